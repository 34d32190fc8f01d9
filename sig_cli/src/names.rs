//! Parses a CLI-supplied dotted type name (`Foo::Bar`, `::Foo::Bar`) into
//! a [`sig_syntax::TypeName`], and a context spec (`::A::B`) into a
//! [`sig_analysis::Context`]. CLI arguments are always treated as absolute
//! names, matching how a user would address a type from outside any
//! namespace (spec §6 CLI surface takes bare `TypeName` arguments).

use sig_analysis::Context;
use sig_syntax::{Namespace, TypeName};

pub fn parse_type_name(arg: &str) -> TypeName {
    let trimmed = arg.strip_prefix("::").unwrap_or(arg);
    let mut segments: Vec<String> = trimmed.split("::").map(|s| s.to_string()).collect();
    let simple_name = segments.pop().unwrap_or_default();
    TypeName::new(Namespace::new(segments, true), simple_name)
}

pub fn parse_context(arg: Option<&str>) -> Context {
    match arg {
        None => Context::root(),
        Some(s) => {
            let trimmed = s.strip_prefix("::").unwrap_or(s);
            let segments: Vec<String> = if trimmed.is_empty() {
                Vec::new()
            } else {
                trimmed.split("::").map(|s| s.to_string()).collect()
            };
            Context::enclosing(&Namespace::new(segments, true))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_qualified_name() {
        let name = parse_type_name("::A::B::C");
        assert_eq!(name.simple_name, "C");
        assert_eq!(name.namespace.segments(), ["A", "B"]);
        assert!(name.is_absolute());
    }

    #[test]
    fn parses_bare_name() {
        let name = parse_type_name("Foo");
        assert_eq!(name.simple_name, "Foo");
        assert!(name.namespace.segments().is_empty());
        assert!(name.is_absolute());
    }
}
