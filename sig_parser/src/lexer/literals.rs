use crate::errors::PResult;
use crate::lexer::token;
use crate::span::Span;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::{escaped_transform, tag};
use nom::character::complete::{alpha1, alphanumeric1, char as nom_char, digit1, none_of};
use nom::combinator::{map, opt, recognize, value};
use nom::multi::many0;
use nom::sequence::{delimited, pair};
use sig_syntax::types::LiteralValue;

/// A double-quoted string literal with `\\`, `\"`, `\n`, `\t` escapes.
pub fn string_literal(input: Span<'_>) -> PResult<'_, String> {
    token(|input| {
        delimited(
            nom_char('"'),
            map(
                opt(escaped_transform(
                    none_of("\\\""),
                    '\\',
                    alt((
                        value('\\', nom_char('\\')),
                        value('"', nom_char('"')),
                        value('\n', nom_char('n')),
                        value('\t', nom_char('t')),
                    )),
                )),
                |s: Option<String>| s.unwrap_or_default(),
            ),
            nom_char('"'),
        )
        .parse(input)
    })
    .parse(input)
}

/// `:foo` or `:"foo bar"` symbol literal.
pub fn symbol_literal(input: Span<'_>) -> PResult<'_, String> {
    token(|input| {
        let (input, _) = nom_char(':').parse(input)?;
        alt((
            string_literal_body,
            map(
                recognize(pair(
                    alt((alpha1, recognize(nom_char('_')))),
                    many0(alt((alphanumeric1, recognize(nom_char('_'))))),
                )),
                |s: Span<'_>| s.fragment().to_string(),
            ),
        ))
        .parse(input)
    })
    .parse(input)
}

fn string_literal_body(input: Span<'_>) -> PResult<'_, String> {
    delimited(
        nom_char('"'),
        map(
            opt(escaped_transform(
                none_of("\\\""),
                '\\',
                alt((value('\\', nom_char('\\')), value('"', nom_char('"')))),
            )),
            |s: Option<String>| s.unwrap_or_default(),
        ),
        nom_char('"'),
    )
    .parse(input)
}

/// A signed decimal integer literal.
pub fn integer_literal(input: Span<'_>) -> PResult<'_, i64> {
    token(|input| {
        map(
            recognize(pair(opt(nom_char('-')), digit1)),
            |s: Span<'_>| s.fragment().parse::<i64>().unwrap_or(0),
        )
        .parse(input)
    })
    .parse(input)
}

pub fn bool_literal(input: Span<'_>) -> PResult<'_, bool> {
    token(alt((
        value(true, tag("true")),
        value(false, tag("false")),
    )))
    .parse(input)
}

/// Any of the four literal kinds (spec §3: "Literal(value) — string,
/// symbol, integer, or boolean literal").
pub fn literal_value(input: Span<'_>) -> PResult<'_, LiteralValue> {
    alt((
        map(string_literal, LiteralValue::String),
        map(symbol_literal, LiteralValue::Symbol),
        map(bool_literal, LiteralValue::Bool),
        map(integer_literal, LiteralValue::Integer),
    ))
    .parse(input)
}
