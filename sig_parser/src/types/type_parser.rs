use crate::errors::PResult;
use crate::lexer::identifiers::type_name;
use crate::lexer::literals::literal_value;
use crate::lexer::sym;
use crate::span::Span;
use crate::types::function_type::function_type;
use nom::Parser;
use nom::branch::alt;
use nom::combinator::{map, opt};
use nom::multi::separated_list0;
use nom::sequence::{delimited, preceded};
use sig_syntax::{NameKind, Type};
use std::collections::BTreeMap;

/// A comma-separated `[T1, T2, ...]` argument/tuple list.
fn bracketed_types(input: Span<'_>) -> PResult<'_, Vec<Type>> {
    delimited(sym("["), separated_list0(sym(","), type_expr), sym("]")).parse(input)
}

/// `singleton(ClassName)` — the singleton type of a class (spec §3:
/// `ClassSingleton(name)`).
fn class_singleton(input: Span<'_>) -> PResult<'_, Type> {
    map(
        preceded(sym("singleton"), delimited(sym("("), type_name, sym(")"))),
        Type::ClassSingleton,
    )
    .parse(input)
}

/// `^(params) -> return` — a first-class proc type (spec §3:
/// `Proc(function_type)`). This punctuation is not spelled out in spec
/// §4.1's enumerated list, so the caret is carried over from the RBS
/// source this spec distills (see DESIGN.md).
fn proc_type(input: Span<'_>) -> PResult<'_, Type> {
    map(
        preceded(sym("^"), function_type),
        |ft| Type::Proc(Box::new(ft)),
    )
    .parse(input)
}

/// `[T1, T2]` tuple literal vs. `{name: T, ...}` record literal vs. a
/// named/applied type vs. a base/literal/variable atom.
fn atom(input: Span<'_>) -> PResult<'_, Type> {
    alt((
        map(sym("any"), |_| Type::Any),
        map(sym("void"), |_| Type::Void),
        map(sym("bool"), |_| Type::Bool),
        map(sym("self"), |_| Type::SelfType),
        map(sym("instance"), |_| Type::Instance),
        map(sym("class"), |_| Type::Class),
        map(sym("nil"), |_| Type::Nil),
        map(sym("top"), |_| Type::Top),
        map(sym("bot"), |_| Type::Bot),
        map(literal_value, Type::Literal),
        class_singleton,
        proc_type,
        record_type,
        tuple_type,
        applied_name,
    ))
    .parse(input)
}

fn tuple_type(input: Span<'_>) -> PResult<'_, Type> {
    map(bracketed_types, Type::Tuple).parse(input)
}

fn record_field(input: Span<'_>) -> PResult<'_, (String, Type)> {
    let (input, name) = crate::lexer::identifiers::plain_identifier(input)?;
    let (input, _) = sym(":")(input)?;
    let (input, ty) = type_expr(input)?;
    Ok((input, (name, ty)))
}

fn record_type(input: Span<'_>) -> PResult<'_, Type> {
    map(
        delimited(sym("{"), separated_list0(sym(","), record_field), sym("}")),
        |fields| Type::Record(BTreeMap::from_iter(fields)),
    )
    .parse(input)
}

/// A bare or applied type name: `Foo`, `Foo[Integer]`, `_Each[A]`,
/// `foo`, or a single-uppercase-letter type-parameter occurrence.
fn applied_name(input: Span<'_>) -> PResult<'_, Type> {
    let (input, name) = type_name(input)?;
    // Aliases are never parameterized at the use site (spec §3:
    // `Type::Alias` carries no argument list), so a `[...]` following an
    // alias name isn't consumed here — it's left for whatever comes next
    // to reject, instead of being silently parsed and discarded.
    let (input, args) = if name.kind() == NameKind::Alias {
        (input, None)
    } else {
        opt(bracketed_types).parse(input)?
    };
    let args = args.unwrap_or_default();

    let is_bare_variable = args.is_empty()
        && !name.is_absolute()
        && name.namespace.segments().is_empty()
        && name.simple_name.len() == 1
        && name
            .simple_name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase());

    let ty = if is_bare_variable {
        Type::Variable(name.simple_name)
    } else {
        match name.kind() {
            NameKind::Interface => Type::Interface(name, args),
            NameKind::Alias => Type::Alias(name),
            NameKind::ClassLike => Type::ClassInstance(name, args),
        }
    };
    Ok((input, ty))
}

/// `T?` — optional postfix, binds tighter than `&`/`|`.
fn optional_postfix(input: Span<'_>) -> PResult<'_, Type> {
    let (input, base) = atom(input)?;
    let (input, marks) = nom::multi::many0(sym("?")).parse(input)?;
    let ty = marks
        .into_iter()
        .fold(base, |acc, _| Type::Optional(Box::new(acc)));
    Ok((input, ty))
}

/// `T1 & T2 & ...` — intersection, binds tighter than `|`.
fn intersection_type(input: Span<'_>) -> PResult<'_, Type> {
    let (input, first) = optional_postfix(input)?;
    let (input, rest) =
        nom::multi::many0(preceded(sym("&"), optional_postfix)).parse(input)?;
    let ty = if rest.is_empty() {
        first
    } else {
        let mut all = vec![first];
        all.extend(rest);
        Type::Intersection(all)
    };
    Ok((input, ty))
}

/// `T1 | T2 | ...` — union, the entry point for any type expression
/// (spec §3: `Union(types[])`).
pub fn type_expr(input: Span<'_>) -> PResult<'_, Type> {
    let (input, first) = intersection_type(input)?;
    let (input, rest) = nom::multi::many0(preceded(sym("|"), intersection_type)).parse(input)?;
    let ty = if rest.is_empty() {
        first
    } else {
        let mut all = vec![first];
        all.extend(rest);
        Type::Union(all)
    };
    Ok((input, ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use pretty_assertions::assert_eq;

    fn parse(src: &str) -> Type {
        let (rest, ty) = type_expr(Span::new(src)).unwrap();
        assert!(rest.fragment().trim().is_empty(), "leftover: {rest:?}");
        ty
    }

    #[test]
    fn parses_bases() {
        assert_eq!(parse("any"), Type::Any);
        assert_eq!(parse("void"), Type::Void);
        assert_eq!(parse("nil"), Type::Nil);
    }

    #[test]
    fn parses_applied_class_instance() {
        match parse("Array[Integer]") {
            Type::ClassInstance(name, args) => {
                assert_eq!(name.simple_name, "Array");
                assert_eq!(args.len(), 1);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parses_optional_union() {
        match parse("Integer? | String") {
            Type::Union(ts) => {
                assert_eq!(ts.len(), 2);
                assert!(matches!(ts[0], Type::Optional(_)));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parses_single_letter_as_variable() {
        assert_eq!(parse("A"), Type::Variable("A".to_string()));
    }
}
