use crate::span::Span;
use nom::IResult;
use nom_supreme::error::{BaseErrorKind, ErrorTree, StackContext};

/// Result type for every combinator in this crate, carrying a
/// `nom_supreme::ErrorTree` so deeply-nested failures keep their full
/// alternative/context stack (mirrors `bsharp_parser::errors::BResult`).
pub type PResult<'a, O> = IResult<Span<'a>, O, ErrorTree<Span<'a>>>;

/// A well-formed-but-semantically-invalid construct, raised by parser-level
/// structural checks (spec §4.1: "SemanticsError (well-formed syntactically
/// but violates a structural rule)"). Distinct from a `SyntaxError`, which
/// is just an unparsed `ErrorTree` surfaced directly to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SemanticsError {
    #[error("interface `{name}` declares a self method; interfaces may only declare instance methods")]
    InterfaceSelfMethod { name: String },
    #[error("interface `{name}` includes non-interface type `{included}`")]
    InterfaceNonInterfaceInclude { name: String, included: String },
    #[error("method `{name}` declares `super` more than once in its overload list")]
    DuplicateSuperSentinel { name: String },
}

/// Render an `ErrorTree` as a human-readable, line/column-anchored message,
/// the way `bsharp_parser::errors::format_error_tree` does for its own
/// `ErrorTree<Span>`.
pub fn format_error_tree(input: &str, error: &ErrorTree<Span<'_>>) -> String {
    fn line_slice(input: &str, line_no: usize) -> String {
        input
            .lines()
            .nth(line_no.saturating_sub(1))
            .unwrap_or("")
            .to_string()
    }

    fn fmt_stack_context(ctx: &StackContext<&'static str>) -> String {
        match ctx {
            StackContext::Context(name) => name.to_string(),
            StackContext::Kind(kind) => format!("{kind:?}"),
        }
    }

    fn fmt_tree(input: &str, e: &ErrorTree<Span<'_>>, acc: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match e {
            ErrorTree::Base { location, kind } => {
                let line = location.location_line() as usize;
                let col = location.get_utf8_column();
                let src_line = line_slice(input, line);
                let kind_msg = match kind {
                    BaseErrorKind::Expected(msg) => format!("expected {msg}"),
                    other => format!("{other:?}"),
                };
                acc.push_str(&format!(
                    "{indent}at {line}:{col}: {kind_msg}\n{indent}{src_line}\n{indent}{}^\n",
                    " ".repeat(col.saturating_sub(1))
                ));
            }
            ErrorTree::Stack { base, contexts } => {
                fmt_tree(input, base, acc, depth);
                for (_, ctx) in contexts {
                    acc.push_str(&format!("{indent}  in {}\n", fmt_stack_context(ctx)));
                }
            }
            ErrorTree::Alt(alts) => {
                acc.push_str(&format!("{indent}one of:\n"));
                for alt in alts {
                    fmt_tree(input, alt, acc, depth + 1);
                }
            }
        }
    }

    let mut out = String::new();
    fmt_tree(input, error, &mut out, 0);
    out
}
