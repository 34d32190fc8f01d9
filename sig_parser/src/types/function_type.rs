use crate::errors::PResult;
use crate::lexer::identifiers::plain_identifier;
use crate::lexer::sym;
use crate::span::Span;
use crate::types::type_parser::type_expr;
use nom::Parser;
use nom::branch::alt;
use nom::combinator::opt;
use nom::multi::separated_list0;
use nom::sequence::delimited;
use sig_syntax::{FunctionType, Param, Type};

/// An optional trailing parameter name, e.g. the `x` in `Integer x`
/// (spec §3: "Each param carries an optional name").
fn param_name(input: Span<'_>) -> PResult<'_, Option<String>> {
    opt(plain_identifier).parse(input)
}

enum RawParam {
    Required(Param),
    Optional(Param),
    Rest(Param),
    RequiredKeyword(String, Param),
    OptionalKeyword(String, Param),
    RestKeyword(Param),
}

fn rest_keyword(input: Span<'_>) -> PResult<'_, RawParam> {
    let (input, _) = sym("**")(input)?;
    let (input, ty) = type_expr(input)?;
    let (input, name) = param_name(input)?;
    Ok((input, RawParam::RestKeyword(Param::new(name, ty))))
}

fn rest_positional(input: Span<'_>) -> PResult<'_, RawParam> {
    let (input, _) = sym("*")(input)?;
    let (input, ty) = type_expr(input)?;
    let (input, name) = param_name(input)?;
    Ok((input, RawParam::Rest(Param::new(name, ty))))
}

fn optional_keyword(input: Span<'_>) -> PResult<'_, RawParam> {
    let (input, _) = sym("?")(input)?;
    let (input, kw_name) = plain_identifier(input)?;
    let (input, _) = sym(":")(input)?;
    let (input, ty) = type_expr(input)?;
    Ok((
        input,
        RawParam::OptionalKeyword(kw_name, Param::new(None, ty)),
    ))
}

fn optional_positional(input: Span<'_>) -> PResult<'_, RawParam> {
    let (input, _) = sym("?")(input)?;
    let (input, ty) = type_expr(input)?;
    let (input, name) = param_name(input)?;
    Ok((input, RawParam::Optional(Param::new(name, ty))))
}

fn required_keyword(input: Span<'_>) -> PResult<'_, RawParam> {
    let (input, kw_name) = plain_identifier(input)?;
    let (input, _) = sym(":")(input)?;
    let (input, ty) = type_expr(input)?;
    Ok((
        input,
        RawParam::RequiredKeyword(kw_name, Param::new(None, ty)),
    ))
}

fn required_positional(input: Span<'_>) -> PResult<'_, RawParam> {
    let (input, ty) = type_expr(input)?;
    let (input, name) = param_name(input)?;
    Ok((input, RawParam::Required(Param::new(name, ty))))
}

fn one_param(input: Span<'_>) -> PResult<'_, RawParam> {
    alt((
        rest_keyword,
        rest_positional,
        optional_keyword,
        optional_positional,
        required_keyword,
        required_positional,
    ))
    .parse(input)
}

/// `(p1, p2, ...)` — the parenthesized parameter list of a method/proc
/// type (spec §4.1).
pub fn param_list(input: Span<'_>) -> PResult<'_, Vec<RawParamBox>> {
    delimited(
        sym("("),
        separated_list0(sym(","), one_param),
        sym(")"),
    )
    .parse(input)
    .map(|(rest, items)| (rest, items.into_iter().map(RawParamBox).collect()))
}

/// Wrapper so `param_list`'s return type doesn't leak the private
/// `RawParam` enum outside this module while still letting
/// [`function_type`] fold it.
pub struct RawParamBox(RawParam);

fn fold_params(items: Vec<RawParamBox>, return_type: Type) -> FunctionType {
    let mut ft = FunctionType {
        return_type: Box::new(return_type),
        ..Default::default()
    };
    let mut seen_rest = false;
    for RawParamBox(item) in items {
        match item {
            RawParam::Required(p) => {
                if seen_rest {
                    ft.trailing_positionals.push(p);
                } else {
                    ft.required_positionals.push(p);
                }
            }
            RawParam::Optional(p) => ft.optional_positionals.push(p),
            RawParam::Rest(p) => {
                ft.rest_positional = Some(p);
                seen_rest = true;
            }
            RawParam::RequiredKeyword(name, p) => {
                ft.required_keywords.insert(name, p);
            }
            RawParam::OptionalKeyword(name, p) => {
                ft.optional_keywords.insert(name, p);
            }
            RawParam::RestKeyword(p) => ft.rest_keywords = Some(p),
        }
    }
    ft
}

/// `(params) -> return`, with no block — the shape used by first-class
/// proc types (spec §3: "Proc(function_type)").
pub fn function_type(input: Span<'_>) -> PResult<'_, FunctionType> {
    let (input, params) = opt(param_list).parse(input)?;
    let (input, _) = sym("->")(input)?;
    let (input, ret) = type_expr(input)?;
    Ok((input, fold_params(params.unwrap_or_default(), ret)))
}

pub(crate) fn fold_function_type(items: Vec<RawParamBox>, return_type: Type) -> FunctionType {
    fold_params(items, return_type)
}
