use serde::{Deserialize, Serialize};

/// A single point in a signature-file buffer, 1-based like the teacher's
/// `SourceLocation` (`bsharp_analysis::context`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open span of source text, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
    pub byte_start: usize,
    pub byte_end: usize,
}

impl Location {
    pub fn new(start: Position, end: Position, byte_start: usize, byte_end: usize) -> Self {
        Self {
            start,
            end,
            byte_start,
            byte_end,
        }
    }

    /// A placeholder location for synthesized nodes (attribute-expanded
    /// accessors, alias-copied methods) that have no direct source text.
    pub fn synthesized() -> Self {
        Self {
            start: Position::new(0, 0),
            end: Position::new(0, 0),
            byte_start: 0,
            byte_end: 0,
        }
    }
}
