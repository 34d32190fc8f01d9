use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered sequence of path segments plus an absolute flag (spec §3
/// Data Model, "Namespace"). `::A::B` is absolute with segments `[A, B]`;
/// `A::B` is relative with the same segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace {
    segments: Vec<String>,
    absolute: bool,
}

impl Namespace {
    /// `::` — the absolute root namespace.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
            absolute: true,
        }
    }

    /// The empty relative namespace (no leading `::`, no segments).
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
            absolute: false,
        }
    }

    pub fn new(segments: Vec<String>, absolute: bool) -> Self {
        Self { segments, absolute }
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn is_root(&self) -> bool {
        self.absolute && self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Append a single segment, returning a new namespace.
    pub fn append(&self, seg: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(seg.into());
        Self {
            segments,
            absolute: self.absolute,
        }
    }

    /// Append another namespace's segments (used for `ns + T` lookups).
    pub fn join(&self, other: &Namespace) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self {
            segments,
            absolute: self.absolute,
        }
    }

    /// The enclosing namespace, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            let mut segments = self.segments.clone();
            segments.pop();
            Some(Self {
                segments,
                absolute: self.absolute,
            })
        }
    }

    /// Reinterpret a relative namespace as absolute by prefixing it with
    /// `context` (the enclosing absolute namespace at the point this
    /// namespace was written), or return it unchanged if already absolute.
    pub fn absolute_in(&self, context: &Namespace) -> Self {
        if self.absolute {
            self.clone()
        } else {
            context.join(self)
        }
    }

    /// Yields `self`, `self.parent()`, … up to and including the root.
    pub fn ascend(&self) -> impl Iterator<Item = Namespace> {
        let mut cur = Some(self.clone());
        std::iter::from_fn(move || {
            let next = cur.clone()?;
            cur = next.parent();
            Some(next)
        })
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            write!(f, "::")?;
        }
        write!(f, "{}", self.segments.join("::"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascend_reaches_root() {
        let ns = Namespace::new(vec!["A".into(), "B".into()], true);
        let chain: Vec<_> = ns.ascend().collect();
        assert_eq!(chain.len(), 3);
        assert!(chain.last().unwrap().is_root());
    }

    #[test]
    fn absolute_in_prefixes_relative_only() {
        let ctx = Namespace::new(vec!["A".into()], true);
        let rel = Namespace::new(vec!["B".into()], false);
        let abs = Namespace::new(vec!["C".into()], true);
        assert_eq!(rel.absolute_in(&ctx).segments(), ["A", "B"]);
        assert_eq!(abs.absolute_in(&ctx).segments(), ["C"]);
    }

    #[test]
    fn display_round_trips() {
        let ns = Namespace::new(vec!["Foo".into(), "Bar".into()], true);
        assert_eq!(ns.to_string(), "::Foo::Bar");
    }
}
