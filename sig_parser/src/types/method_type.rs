use crate::errors::PResult;
use crate::lexer::identifiers::type_variable;
use crate::lexer::sym;
use crate::span::Span;
use crate::types::function_type::{fold_function_type, function_type, param_list};
use crate::types::type_parser::type_expr;
use nom::Parser;
use nom::branch::alt;
use nom::combinator::{map, opt, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, preceded};
use sig_syntax::types::BlockSpec;
use sig_syntax::{MethodType, Overload};

fn type_param_list(input: Span<'_>) -> PResult<'_, Vec<String>> {
    delimited(sym("["), separated_list1(sym(","), type_variable), sym("]")).parse(input)
}

/// `{ fn }` (required) or `?{ fn }` (optional) block spec (spec §4.1).
fn block_spec(input: Span<'_>) -> PResult<'_, BlockSpec> {
    alt((
        map(
            preceded(sym("?"), delimited(sym("{"), function_type, sym("}"))),
            |fn_type| BlockSpec {
                fn_type,
                required: false,
            },
        ),
        map(delimited(sym("{"), function_type, sym("}")), |fn_type| {
            BlockSpec {
                fn_type,
                required: true,
            }
        }),
    ))
    .parse(input)
}

/// One method type: `[TypeParams]? (params)? block? -> return` (spec
/// §4.1).
pub fn method_type(input: Span<'_>) -> PResult<'_, MethodType> {
    let (input, type_params) = opt(type_param_list).parse(input)?;
    let (input, params) = opt(param_list).parse(input)?;
    let (input, block) = opt(block_spec).parse(input)?;
    let (input, _) = sym("->")(input)?;
    let (input, ret) = type_expr(input)?;
    let fn_type = fold_function_type(params.unwrap_or_default(), ret);
    Ok((
        input,
        MethodType {
            type_params: type_params.unwrap_or_default(),
            block,
            fn_type,
        },
    ))
}

/// One overload: either the `super` sentinel or a method type (spec §3:
/// "A method's overload set ... a special sentinel super").
pub fn overload(input: Span<'_>) -> PResult<'_, Overload> {
    alt((
        value(Overload::Super, sym("super")),
        map(method_type, Overload::Method),
    ))
    .parse(input)
}

/// `overload (| overload)*` — a method's full overload list (spec §4.1).
pub fn overload_list(input: Span<'_>) -> PResult<'_, Vec<Overload>> {
    separated_list1(sym("|"), overload).parse(input)
}
