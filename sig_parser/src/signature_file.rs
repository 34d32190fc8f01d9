use crate::decl::top_level_decl;
use crate::errors::{format_error_tree, SemanticsError};
use crate::lexer::ws;
use crate::semantics::check_all;
use crate::span::Span;
use nom::Parser;
use nom::combinator::all_consuming;
use nom::multi::many0;
use nom::sequence::delimited;
use sig_syntax::Decl;

/// Everything that can go wrong parsing a signature file (spec §4.1:
/// "Errors: SyntaxError ... SemanticsError ...").
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("syntax error:\n{0}")]
    Syntax(String),
    #[error("{} semantics error(s) found", .0.len())]
    Semantics(Vec<SemanticsError>),
}

/// Parse a full signature-file buffer into its sequence of top-level
/// declarations (spec §4.1: "A signature file is a sequence of top-level
/// declarations"), running the post-parse structural checks before
/// returning.
pub fn parse_signature_text(source: &str) -> Result<Vec<Decl>, SignatureError> {
    let span = Span::new(source);
    let result = all_consuming(delimited(ws, many0(top_level_decl), ws)).parse(span);
    let decls = match result {
        Ok((_, decls)) => decls,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(SignatureError::Syntax(format_error_tree(source, &e)));
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(SignatureError::Syntax(
                "unexpected end of input".to_string(),
            ));
        }
    };

    let errors = check_all(&decls);
    if !errors.is_empty() {
        return Err(SignatureError::Semantics(errors));
    }
    Ok(decls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sig_syntax::{Decl, Type};

    #[test]
    fn parses_alias_decl_scenario() {
        let decls = parse_signature_text("type foo = any").unwrap();
        assert_eq!(decls.len(), 1);
        match &decls[0] {
            Decl::Alias(a) => {
                assert_eq!(a.name.simple_name, "foo");
                assert_eq!(a.ty, Type::Any);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parses_absolute_constant_scenario() {
        let decls = parse_signature_text("::BAR: any").unwrap();
        assert_eq!(decls.len(), 1);
        match &decls[0] {
            Decl::Constant(c) => {
                assert_eq!(c.name.simple_name, "BAR");
                assert!(c.name.is_absolute());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parses_interface_with_overloads_and_include_scenario() {
        let src = "interface _Each[A,B] \
            def count: -> Integer | [X] { (A) -> X } -> Integer \
            include _Hash[Integer] \
            end";
        let decls = parse_signature_text(src).unwrap();
        assert_eq!(decls.len(), 1);
        match &decls[0] {
            Decl::Interface(i) => {
                assert_eq!(i.members.len(), 2);
                match &i.members[0] {
                    sig_syntax::Member::Method(m) => assert_eq!(m.overloads.len(), 2),
                    other => panic!("unexpected: {other:?}"),
                }
                match &i.members[1] {
                    sig_syntax::Member::Mixin(mx) => {
                        assert_eq!(mx.name.simple_name, "_Hash");
                        assert_eq!(mx.args.len(), 1);
                    }
                    other => panic!("unexpected: {other:?}"),
                }
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parses_extension_scenario() {
        let src = "class C end extension C (Pathname) def path: -> String end end";
        let decls = parse_signature_text(src).unwrap();
        assert_eq!(decls.len(), 2);
        assert!(matches!(decls[0], Decl::Class(_)));
        match &decls[1] {
            Decl::Extension(e) => assert_eq!(e.extension_name, "Pathname"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn comment_followed_by_declaration_is_skipped() {
        let src = "# a widget\nclass Widget\nend\n";
        let decls = parse_signature_text(src).unwrap();
        assert_eq!(decls.len(), 1);
        assert!(matches!(decls[0], Decl::Class(_)));
    }

    #[test]
    fn trailing_comment_with_no_newline_at_eof_is_skipped() {
        let src = "class Widget\nend\n# trailing, no newline after this";
        let decls = parse_signature_text(src).unwrap();
        assert_eq!(decls.len(), 1);
        assert!(matches!(decls[0], Decl::Class(_)));
    }

    #[test]
    fn file_that_is_only_a_comment_with_no_newline_parses_empty() {
        let decls = parse_signature_text("# just a comment").unwrap();
        assert!(decls.is_empty());
    }

    #[test]
    fn parses_class_instance_variable_scenario() {
        let src = "module M : Object self.@x: Integer end";
        let decls = parse_signature_text(src).unwrap();
        match &decls[0] {
            Decl::Module(m) => {
                assert_eq!(m.self_types.len(), 1);
                assert!(matches!(
                    m.members[0],
                    sig_syntax::Member::ClassInstanceVariable { .. }
                ));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parses_singleton_alias_with_both_self_prefixes() {
        let src = "class C def self.old: () -> Integer alias self.new self.old end";
        let decls = parse_signature_text(src).unwrap();
        match &decls[0] {
            Decl::Class(c) => match &c.members[1] {
                sig_syntax::Member::Alias { new_name, old_name, kind, .. } => {
                    assert_eq!(new_name, "new");
                    assert_eq!(old_name, "old");
                    assert_eq!(*kind, sig_syntax::MethodKind::Singleton);
                }
                other => panic!("unexpected: {other:?}"),
            },
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn alias_with_mismatched_self_prefix_is_a_syntax_error() {
        let src = "class C def self.old: () -> Integer alias self.new old end";
        assert!(parse_signature_text(src).is_err());
    }

    #[test]
    fn backtick_method_name_with_escaped_backtick_parses() {
        let src = "class C def `\\``: () -> void end";
        let decls = parse_signature_text(src).unwrap();
        match &decls[0] {
            Decl::Class(c) => match &c.members[0] {
                sig_syntax::Member::Method(m) => assert_eq!(m.name, "`"),
                other => panic!("unexpected: {other:?}"),
            },
            other => panic!("unexpected: {other:?}"),
        }
    }
}
