use crate::errors::PResult;
use crate::lexer::annotation::annotation;
use crate::lexer::identifiers::{cvar_name, ivar_name, plain_identifier, type_name};
use crate::lexer::method_names::method_name;
use crate::lexer::sym;
use crate::span::{spanning, Span};
use crate::types::{overload_list, type_expr};
use nom::Parser;
use nom::branch::alt;
use nom::combinator::{cut, map, opt, value};
use nom::multi::separated_list0;
use nom::sequence::{delimited, tuple};
use sig_syntax::members::{Attribute, AttributeKind, Mixin, MixinKind};
use sig_syntax::{Member, MethodDef, MethodKind, Visibility};

fn mixin_kind(input: Span<'_>) -> PResult<'_, MixinKind> {
    alt((
        value(MixinKind::Include, sym("include")),
        value(MixinKind::Extend, sym("extend")),
        value(MixinKind::Prepend, sym("prepend")),
    ))
    .parse(input)
}

/// `include`/`extend`/`prepend` Name[args] (spec §3 Data Model).
fn mixin_member(input: Span<'_>) -> PResult<'_, Member> {
    let start = input;
    let (input, kind) = mixin_kind(input)?;
    let (input, name) = type_name(input)?;
    let (input, args) = opt(delimited(
        sym("["),
        separated_list0(sym(","), type_expr),
        sym("]"),
    ))
    .parse(input)?;
    let location = spanning(start, input);
    Ok((
        input,
        Member::Mixin(Mixin {
            kind,
            name,
            args: args.unwrap_or_default(),
            location,
        }),
    ))
}

fn method_kind_prefix(input: Span<'_>) -> PResult<'_, MethodKind> {
    alt((
        value(
            MethodKind::SingletonInstance,
            tuple((sym("self?"), sym("."))),
        ),
        value(MethodKind::Singleton, tuple((sym("self"), sym(".")))),
    ))
    .parse(input)
}

/// `def (self. | self?.)? method_name: overload (| overload)*` (spec
/// §4.1).
fn method_member(input: Span<'_>) -> PResult<'_, Member> {
    let start = input;
    let (input, _) = sym("def")(input)?;
    let (input, kind) = opt(method_kind_prefix).parse(input)?;
    let (input, name) = method_name(input)?;
    let (input, _) = sym(":")(input)?;
    let (input, overloads) = overload_list(input)?;
    let location = spanning(start, input);
    Ok((
        input,
        Member::Method(MethodDef {
            name,
            kind: kind.unwrap_or(MethodKind::Instance),
            overloads,
            annotations: Vec::new(),
            location,
        }),
    ))
}

/// Attach annotations parsed ahead of a member to the variant that
/// actually carries an `annotations` field (spec §3: only `MethodDef`
/// has one; other member kinds drop them, matching the teacher's
/// practice of not over-threading rarely-populated fields).
fn attach_annotations(annotations: Vec<sig_syntax::Annotation>, member: Member) -> Member {
    match member {
        Member::Method(mut m) => {
            m.annotations = annotations;
            Member::Method(m)
        }
        Member::Nested(decl) => {
            Member::Nested(Box::new(crate::decl::attach_annotations(annotations, *decl)))
        }
        other => other,
    }
}

fn attribute_kind(input: Span<'_>) -> PResult<'_, AttributeKind> {
    alt((
        value(AttributeKind::Reader, sym("attr_reader")),
        value(AttributeKind::Writer, sym("attr_writer")),
        value(AttributeKind::Accessor, sym("attr_accessor")),
    ))
    .parse(input)
}

/// `(@ivar)` or `()` ivar-override suffix on an attribute (spec §4.1:
/// "attr_reader name(@Other): T or attr_reader name(): T (no backing
/// ivar)").
fn ivar_override(input: Span<'_>) -> PResult<'_, Option<String>> {
    delimited(sym("("), opt(ivar_name), sym(")")).parse(input)
}

/// `attr_reader`/`attr_writer`/`attr_accessor name(@ivar)?: T` (spec §3
/// Data Model, "attribute").
fn attribute_member(input: Span<'_>) -> PResult<'_, Member> {
    let start = input;
    let (input, kind) = attribute_kind(input)?;
    let (input, name) = plain_identifier(input)?;
    let (input, ivar_override) = opt(ivar_override).parse(input)?;
    let (input, _) = sym(":")(input)?;
    let (input, ty) = type_expr(input)?;
    let location = spanning(start, input);
    Ok((
        input,
        Member::Attribute(Attribute {
            kind,
            name,
            ivar_override,
            ty,
            location,
        }),
    ))
}

/// `@name: T` instance variable.
fn instance_variable_member(input: Span<'_>) -> PResult<'_, Member> {
    let start = input;
    let (input, name) = ivar_name(input)?;
    let (input, _) = sym(":")(input)?;
    let (input, ty) = type_expr(input)?;
    let location = spanning(start, input);
    Ok((input, Member::InstanceVariable { name, ty, location }))
}

/// `@@name: T` class variable.
fn class_variable_member(input: Span<'_>) -> PResult<'_, Member> {
    let start = input;
    let (input, name) = cvar_name(input)?;
    let (input, _) = sym(":")(input)?;
    let (input, ty) = type_expr(input)?;
    let location = spanning(start, input);
    Ok((input, Member::ClassVariable { name, ty, location }))
}

/// `self.@name: T` class-instance variable (spec §8 scenario 6).
fn class_instance_variable_member(input: Span<'_>) -> PResult<'_, Member> {
    let start = input;
    let (input, _) = tuple((sym("self"), sym("."))).parse(input)?;
    let (input, name) = ivar_name(input)?;
    let (input, _) = sym(":")(input)?;
    let (input, ty) = type_expr(input)?;
    let location = spanning(start, input);
    Ok((
        input,
        Member::ClassInstanceVariable { name, ty, location },
    ))
}

/// `alias new old` or `alias self.new self.old` (spec §3 Data Model). The
/// two names' kind must agree (spec §4.5: "kind must match (`alias self.x
/// self.y` vs `alias x y`)"), so once the first name carries a `self.`
/// prefix the second one is required, not optional — `alias self.new old`
/// is a syntax error rather than a silently-accepted mismatch.
fn alias_member(input: Span<'_>) -> PResult<'_, Member> {
    let start = input;
    let (input, _) = sym("alias")(input)?;
    let (input, self_prefix) = opt(tuple((sym("self"), sym(".")))).parse(input)?;
    let (input, new_name) = method_name(input)?;
    let (input, _) = if self_prefix.is_some() {
        map(cut(tuple((sym("self"), sym(".")))), |_| ()).parse(input)?
    } else {
        (input, ())
    };
    let (input, old_name) = method_name(input)?;
    let location = spanning(start, input);
    Ok((
        input,
        Member::Alias {
            new_name,
            old_name,
            kind: if self_prefix.is_some() {
                MethodKind::Singleton
            } else {
                MethodKind::Instance
            },
            location,
        },
    ))
}

fn visibility_member(input: Span<'_>) -> PResult<'_, Member> {
    alt((
        value(
            Member::VisibilityMarker(Visibility::Public),
            sym("public"),
        ),
        value(
            Member::VisibilityMarker(Visibility::Private),
            sym("private"),
        ),
    ))
    .parse(input)
}

fn nested_decl_member(input: Span<'_>) -> PResult<'_, Member> {
    map(crate::decl::nested_decl, |d| Member::Nested(Box::new(d))).parse(input)
}

/// Optional leading `%a{...}` annotations on a member (spec §4.1:
/// "Optional annotations precede any declaration or member"); attached by
/// [`attach_annotations`] to the variants that carry an `annotations`
/// field.
fn leading_annotations(input: Span<'_>) -> PResult<'_, Vec<sig_syntax::Annotation>> {
    nom::multi::many0(annotation).parse(input)
}

/// One member inside a class/module body (spec §3 Data Model, "Member
/// variants").
pub fn member(input: Span<'_>) -> PResult<'_, Member> {
    let (input, annotations) = leading_annotations(input)?;
    let (input, member) = alt((
        method_member,
        mixin_member,
        attribute_member,
        class_instance_variable_member,
        instance_variable_member,
        class_variable_member,
        alias_member,
        visibility_member,
        nested_decl_member,
    ))
    .parse(input)?;
    Ok((input, attach_annotations(annotations, member)))
}

/// An interface body member: only method defs and `include` of other
/// interfaces are syntactically permitted (spec §4.1); `self.` methods
/// and non-interface includes are still *parsed* here and rejected by
/// [`crate::semantics::check_interface_members`], matching the design
/// note that semantics checks run after a syntactically valid parse.
pub fn interface_member(input: Span<'_>) -> PResult<'_, Member> {
    alt((method_member, mixin_member)).parse(input)
}
