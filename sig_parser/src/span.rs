/// The parser's input type: a string slice tagged with line/column as it
/// is consumed, following the teacher's `bsharp_parser::span` approach.
pub type Span<'a> = nom_locate::LocatedSpan<&'a str>;

use sig_syntax::{Location, Position};

/// Convert a `(start, end)` pair of spans into a `sig_syntax::Location`.
pub fn location_of(start: Span<'_>, end: Span<'_>) -> Location {
    Location::new(
        Position::new(start.location_line() as usize, start.get_utf8_column()),
        Position::new(end.location_line() as usize, end.get_utf8_column()),
        start.location_offset(),
        end.location_offset(),
    )
}

/// A location spanning exactly the consumed text between `before` (the
/// span before a sub-parser ran) and `after` (the span left over once it
/// finished).
pub fn spanning<'a>(before: Span<'a>, after: Span<'a>) -> Location {
    location_of(before, after)
}
