use crate::errors::PResult;
use crate::lexer::token;
use crate::span::Span;
use nom::Parser;
use nom::bytes::complete::tag;
use nom::character::complete::anychar;
use sig_syntax::Annotation;

fn matching_close(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    }
}

/// `%a<delim>...<matching delim>` (spec §4.1). The delimiter pair is one
/// of `()[]{}<>|` or arbitrary matched punctuation; bracket-style
/// delimiters (where open != close) nest, everything else reads up to
/// the next occurrence of the same character.
pub fn annotation(input: Span<'_>) -> PResult<'_, Annotation> {
    token(|input| {
        let (input, _) = tag("%a").parse(input)?;
        let (input, open) = anychar(input)?;
        let close = matching_close(open);
        let nests = open != close;

        let mut depth = 1usize;
        let mut rest = input;
        let mut text = String::new();
        loop {
            let (next, c) = anychar(rest)?;
            if nests && c == open {
                depth += 1;
                text.push(c);
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    rest = next;
                    break;
                }
                text.push(c);
            } else {
                text.push(c);
            }
            rest = next;
        }
        Ok((rest, Annotation::new(text)))
    })
    .parse(input)
}
