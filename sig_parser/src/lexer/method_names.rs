use crate::errors::PResult;
use crate::lexer::identifiers::backtick_name;
use crate::lexer::token;
use crate::span::Span;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric1, char as nom_char};
use nom::combinator::{map, opt, recognize};
use nom::error::ParseError;
use nom::multi::many0;
use nom::sequence::pair;

/// Punctuation-named methods, longest alternative first so e.g. `<=>`
/// matches before `<=` or `<` (spec §4.1: "Method names accepted after
/// `def` include ... punctuation-named methods").
const OPERATOR_NAMES: &[&str] = &[
    "<=>", "[]=", "**", "==", "<=", ">=", "<<", ">>", "+@", "-@", "[]", "!", "+", "-", "*", "/",
    "&", "^", "|", "<", ">", "%", "~",
];

fn operator_name(input: Span<'_>) -> PResult<'_, String> {
    token(|input| {
        for op in OPERATOR_NAMES {
            if let Ok((rest, matched)) = tag::<_, Span<'_>, nom_supreme::error::ErrorTree<Span<'_>>>(*op).parse(input) {
                return Ok((rest, matched.fragment().to_string()));
            }
        }
        Err(nom::Err::Error(nom_supreme::error::ErrorTree::from_error_kind(
            input,
            nom::error::ErrorKind::Tag,
        )))
    })
    .parse(input)
}

/// A plain method-name identifier, with optional trailing `?` or `!`
/// (spec §4.1: "predicate and bang suffixes (`name?`, `name!`)"). Unlike
/// [`crate::lexer::identifiers::plain_identifier`], keywords ARE allowed
/// here (`def class: ...` reopening-style names are rejected earlier by
/// the grammar, not by the lexer).
fn plain_method_name(input: Span<'_>) -> PResult<'_, String> {
    token(map(
        recognize(pair(
            alt((alpha1, recognize(nom_char('_')))),
            pair(
                many0(alt((alphanumeric1, recognize(nom_char('_'))))),
                opt(alt((nom_char('?'), nom_char('!')))),
            ),
        )),
        |s: Span<'_>| s.fragment().to_string(),
    ))
    .parse(input)
}

/// The full method-name grammar (spec §4.1).
pub fn method_name(input: Span<'_>) -> PResult<'_, String> {
    alt((backtick_name, operator_name, plain_method_name)).parse(input)
}
