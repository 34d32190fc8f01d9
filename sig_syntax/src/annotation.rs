use serde::{Deserialize, Serialize};

/// A `%a<delim>...<matching delim>` annotation literal attached to a
/// declaration or member (spec §4.1). Stored as an opaque string; the
/// core never interprets annotation contents, only carries them so a
/// downstream writer could round-trip them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
}

impl Annotation {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
