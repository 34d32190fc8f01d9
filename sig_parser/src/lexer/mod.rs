pub mod annotation;
pub mod identifiers;
pub mod keywords;
pub mod literals;
pub mod method_names;

use crate::errors::PResult;
use crate::span::Span;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_until};
use nom::character::complete::{char as nom_char, multispace1};
use nom::combinator::{rest, value};
use nom::multi::many0;
use nom::sequence::preceded;

/// `# ... \n` line comment (spec §6: "Comments begin with `#` to end of
/// line"). A comment on the last line of a file has no trailing `\n`, so
/// fall back to consuming the rest of the input in that case.
fn comment(input: Span<'_>) -> PResult<'_, ()> {
    value(
        (),
        preceded(nom_char('#'), alt((take_until("\n"), rest))),
    )
    .parse(input)
}

/// Skip any run of whitespace and comments, zero or more times.
pub fn ws(input: Span<'_>) -> PResult<'_, ()> {
    value((), many0(alt((value((), multispace1), comment)))).parse(input)
}

/// Wrap a parser so surrounding whitespace/comments are consumed.
pub fn token<'a, O>(
    mut inner: impl FnMut(Span<'a>) -> PResult<'a, O>,
) -> impl FnMut(Span<'a>) -> PResult<'a, O> {
    move |input| {
        let (input, _) = ws(input)?;
        let (input, out) = inner(input)?;
        let (input, _) = ws(input)?;
        Ok((input, out))
    }
}

/// A fixed punctuation/keyword token, whitespace-tolerant on both sides.
pub fn sym<'a>(s: &'static str) -> impl FnMut(Span<'a>) -> PResult<'a, Span<'a>> {
    token(move |input| tag(s).parse(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_stops_at_newline() {
        let (rest, ()) = comment(Span::new("# hi\nclass")).unwrap();
        assert_eq!(*rest.fragment(), "\nclass");
    }

    #[test]
    fn comment_at_eof_with_no_trailing_newline_consumes_rest() {
        let (rest, ()) = comment(Span::new("# hi")).unwrap();
        assert_eq!(*rest.fragment(), "");
    }

    #[test]
    fn ws_skips_comment_at_eof() {
        let (rest, ()) = ws(Span::new("  # trailing comment")).unwrap();
        assert_eq!(*rest.fragment(), "");
    }
}
