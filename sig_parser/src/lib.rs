//! sig_parser crate
//!
//! A nom-based recursive-descent parser turning signature-file source text
//! into the `sig_syntax` AST, plus the post-parse structural checks that
//! catch well-formed-but-invalid constructs (self methods in interfaces,
//! duplicate `super` sentinels, non-interface includes in an interface
//! body).

pub mod decl;
pub mod errors;
pub mod lexer;
pub mod members;
pub mod semantics;
pub mod signature_file;
pub mod span;
pub mod types;

pub use errors::{format_error_tree, PResult, SemanticsError};
pub use signature_file::{parse_signature_text, SignatureError};
pub use span::Span;
