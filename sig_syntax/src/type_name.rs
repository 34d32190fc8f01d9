use crate::namespace::Namespace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The syntactic kind a simple name carries, derived from its spelling
/// (spec §3: "Simple names carry a kind tag derived syntactically").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameKind {
    /// Initial uppercase: `Foo`, `Array`.
    ClassLike,
    /// Leading underscore + uppercase: `_Each`.
    Interface,
    /// All-lowercase: `foo`.
    Alias,
}

impl NameKind {
    /// Classify a simple name by its spelling. Panics on the empty string;
    /// the parser never hands one of those to this function.
    pub fn of(simple_name: &str) -> Self {
        let mut chars = simple_name.chars();
        let first = chars.next().expect("simple name must be non-empty");
        if first == '_' {
            return NameKind::Interface;
        }
        if first.is_uppercase() {
            return NameKind::ClassLike;
        }
        NameKind::Alias
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NameKind::ClassLike => "class",
            NameKind::Interface => "interface",
            NameKind::Alias => "alias",
        };
        write!(f, "{s}")
    }
}

/// A `(namespace, simple_name)` pair (spec §3 Data Model, "TypeName").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
    pub namespace: Namespace,
    pub simple_name: String,
}

impl TypeName {
    pub fn new(namespace: Namespace, simple_name: impl Into<String>) -> Self {
        Self {
            namespace,
            simple_name: simple_name.into(),
        }
    }

    /// A root-relative name with no namespace prefix, e.g. a bare `Integer`.
    pub fn bare(simple_name: impl Into<String>) -> Self {
        Self {
            namespace: Namespace::empty(),
            simple_name: simple_name.into(),
        }
    }

    /// An absolute name with no further namespace segments, e.g. the
    /// environment's key for a top-level `class Foo`. Distinct from
    /// [`TypeName::bare`]: that one is relative and awaits resolution,
    /// this one already carries the absolute flag a resolved/indexed name
    /// requires.
    pub fn root(simple_name: impl Into<String>) -> Self {
        Self {
            namespace: Namespace::root(),
            simple_name: simple_name.into(),
        }
    }

    pub fn kind(&self) -> NameKind {
        NameKind::of(&self.simple_name)
    }

    pub fn is_absolute(&self) -> bool {
        self.namespace.is_absolute()
    }

    /// The absolute namespace this name would live directly under, e.g. for
    /// `::A::B::C` this is `::A::B`.
    pub fn owning_namespace(&self) -> Namespace {
        self.namespace.clone()
    }

    /// Rewrite this name's namespace, preserving the simple name.
    pub fn with_namespace(&self, namespace: Namespace) -> Self {
        Self {
            namespace,
            simple_name: self.simple_name.clone(),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.segments().is_empty() {
            if self.namespace.is_absolute() {
                write!(f, "::{}", self.simple_name)
            } else {
                write!(f, "{}", self.simple_name)
            }
        } else {
            write!(f, "{}::{}", self.namespace, self.simple_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classification() {
        assert_eq!(NameKind::of("Foo"), NameKind::ClassLike);
        assert_eq!(NameKind::of("_Each"), NameKind::Interface);
        assert_eq!(NameKind::of("foo"), NameKind::Alias);
    }

    #[test]
    fn display_matches_source_spelling() {
        let ns = Namespace::new(vec!["A".into()], true);
        let name = TypeName::new(ns, "Foo");
        assert_eq!(name.to_string(), "::A::Foo");
        assert_eq!(TypeName::bare("foo").to_string(), "foo");
    }
}
