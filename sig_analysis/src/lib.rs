//! sig_analysis crate
//!
//! Builds an [`Environment`] out of parsed signature declarations, resolves
//! every type-name reference against it, linearizes ancestor chains, folds
//! them into per-name [`Definition`]s, and validates the whole thing.
//! Parsing itself lives in `sig_parser`; this crate is where declarations
//! turn into a queryable type system.

pub mod ancestors;
pub mod constants;
pub mod context;
pub mod definition;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod resolver;
pub mod session;
pub mod validator;

pub use ancestors::{build_ancestors, Ancestor, Kind};
pub use constants::lookup_constant;
pub use context::Context;
pub use definition::{build_definition, Definition, MethodEntry};
pub use diagnostics::{Diagnostic, DiagnosticCollection, Severity};
pub use environment::{
    AliasEntry, ClassLikeEntry, ClassLikeFragment, ConstantEntry, Environment, Fragment,
    GlobalEntry, InterfaceEntry,
};
pub use error::{AResult, AnalysisError, LocatedError};
pub use resolver::{resolve_name, resolve_type};
pub use session::Session;
pub use validator::validate;

/// Parse a signature file and index it into a fresh [`Environment`],
/// returning any declaration-level errors (duplicate declarations,
/// mismatched superclass fragments) alongside it.
pub fn build_environment(source: &str) -> Result<(Environment, Vec<AnalysisError>), sig_parser::SignatureError> {
    let decls = sig_parser::parse_signature_text(source)?;
    let mut env = Environment::new();
    let errors = env.insert_all(decls);
    Ok((env, errors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_builds_and_validates() {
        let (env, errors) = build_environment(
            "class Animal def speak: () -> String end end \
             class Dog < Animal def speak: () -> String | super end end",
        )
        .unwrap();
        assert!(errors.is_empty());

        let diagnostics = validate(&env);
        assert!(!diagnostics.has_errors());

        let def = build_definition(&env, &sig_syntax::TypeName::root("Dog"), Kind::Instance).unwrap();
        let speak = def.methods.get("speak").unwrap();
        assert_eq!(speak.overloads.len(), 2);
    }
}
