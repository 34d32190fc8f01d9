use crate::errors::PResult;
use crate::lexer::keywords::is_keyword;
use crate::lexer::{token, ws};
use crate::span::Span;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric1, char as nom_char, satisfy};
use nom::combinator::{map_opt, opt, recognize, value};
use nom::multi::{many0, many1};
use nom::sequence::{pair, preceded};
use sig_syntax::{Namespace, TypeName};

/// A bare word: letters/underscore start, then letters/digits/underscores.
/// Does not reject keywords — callers that need a non-keyword identifier
/// use [`plain_identifier`].
fn bare_word(input: Span<'_>) -> PResult<'_, Span<'_>> {
    recognize(pair(
        alt((alpha1, recognize(nom_char('_')))),
        many0(alt((alphanumeric1, recognize(nom_char('_'))))),
    ))
    .parse(input)
}

/// A non-keyword bare word, for alias/local identifiers (spec §4.1 lexer:
/// "identifiers").
pub fn plain_identifier(input: Span<'_>) -> PResult<'_, String> {
    token(map_opt(bare_word, |s: Span<'_>| {
        let text = *s.fragment();
        if is_keyword(text) {
            None
        } else {
            Some(text.to_string())
        }
    }))
    .parse(input)
}

/// A single uppercase-letter type variable occurrence, e.g. `A`, `X`
/// (spec §4.1 lexer: "type variables (single uppercase)").
pub fn type_variable(input: Span<'_>) -> PResult<'_, String> {
    token(map_opt(bare_word, |s: Span<'_>| {
        let text = *s.fragment();
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => Some(text.to_string()),
            _ => None,
        }
    }))
    .parse(input)
}

/// One path/simple-name segment: letters/digits/underscore, optionally
/// prefixed by `_` for interface names. Does not itself classify the
/// result — `TypeName::kind` does that from the spelling.
fn name_segment(input: Span<'_>) -> PResult<'_, String> {
    map_opt(bare_word, |s: Span<'_>| {
        let text = *s.fragment();
        if text.chars().next().map(|c| c.is_alphabetic() || c == '_') == Some(true) {
            Some(text.to_string())
        } else {
            None
        }
    })
    .parse(input)
}

/// A full (possibly-qualified) type name, e.g. `::Foo::Bar::_Each`,
/// `Foo::bar`, `bar` (spec §3 Data Model, "TypeName"; spec §4.1 lexer:
/// "constant names", "interface names").
pub fn type_name(input: Span<'_>) -> PResult<'_, TypeName> {
    token(|input| {
        let (input, leading) = opt(tag("::")).parse(input)?;
        let (input, first) = name_segment(input)?;
        let (input, rest) = many0(preceded(tag("::"), name_segment)).parse(input)?;

        let mut segments = vec![first];
        segments.extend(rest);
        let simple_name = segments.pop().expect("at least one segment parsed");
        let namespace = Namespace::new(segments, leading.is_some());
        Ok((input, TypeName::new(namespace, simple_name)))
    })
    .parse(input)
}

/// `@name` instance-variable reference.
pub fn ivar_name(input: Span<'_>) -> PResult<'_, String> {
    token(|input| {
        let (input, _) = nom_char('@').parse(input)?;
        let (input, name) = bare_word(input)?;
        Ok((input, format!("@{}", name.fragment())))
    })
    .parse(input)
}

/// `@@name` class-variable reference.
pub fn cvar_name(input: Span<'_>) -> PResult<'_, String> {
    token(|input| {
        let (input, _) = tag("@@").parse(input)?;
        let (input, name) = bare_word(input)?;
        Ok((input, format!("@@{}", name.fragment())))
    })
    .parse(input)
}

/// `$name` global-variable reference.
pub fn global_name(input: Span<'_>) -> PResult<'_, String> {
    token(|input| {
        let (input, _) = nom_char('$').parse(input)?;
        let (input, name) = bare_word(input)?;
        Ok((input, format!("${}", name.fragment())))
    })
    .parse(input)
}

/// A backtick-quoted method name, e.g. `` `class` ``, `` `self?` ``,
/// `` `\`` `` — a method named literally `` ` `` (spec §4.1:
/// "keyword-identifiers quoted in backticks"). `\`` is the only escape: it
/// lets a backtick-named method be spelled without prematurely closing the
/// quote.
pub fn backtick_name(input: Span<'_>) -> PResult<'_, String> {
    token(|input| {
        let (input, _) = nom_char('`').parse(input)?;
        let (input, chars) = many1(alt((
            value('`', tag("\\`")),
            satisfy(|c| c != '`'),
        )))
        .parse(input)?;
        let (input, _) = nom_char('`').parse(input)?;
        Ok((input, chars.into_iter().collect()))
    })
    .parse(input)
}
