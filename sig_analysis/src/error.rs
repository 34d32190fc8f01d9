use sig_syntax::{Location, TypeName};
use thiserror::Error;

/// The full error taxonomy raised by the environment, resolver, ancestor
/// builder, definition builder, and validator (spec §7). Parse-time errors
/// (`SyntaxError`, `SemanticsError`) live in `sig_parser` and are not
/// re-exported here; this enum covers everything from environment
/// insertion onward.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("`{name}` is already declared and cannot be redeclared")]
    DuplicateDeclaration { name: TypeName },

    #[error("fragments of `{name}` disagree on their superclass")]
    SuperclassMismatch { name: TypeName },

    #[error("`{name}` is applied with {found} type argument(s), expected {expected}")]
    GenericParameterMismatch {
        name: TypeName,
        expected: usize,
        found: usize,
    },

    #[error("no type named `{name}` could be found")]
    NoTypeFound { name: TypeName },

    #[error("`{name}` cannot be applied as a {expected_kind}")]
    InvalidTypeApplication { name: TypeName, expected_kind: &'static str },

    #[error("no superclass named `{name}` could be found")]
    NoSuperclassFound { name: TypeName },

    #[error("no mixin named `{name}` could be found")]
    NoMixinFound { name: TypeName },

    #[error("`{name}` appears in its own ancestor chain")]
    RecursiveAncestor { name: TypeName },

    #[error("alias `{name}` refers to itself, directly or indirectly")]
    RecursiveAliasDefinition { name: TypeName },

    #[error("method `{owner}#{method}` has an unresolved `super` with no ancestor to inherit from")]
    SuperOverloadMethodDefinition { owner: TypeName, method: String },

    #[error("method `{owner}#{method}` is defined more than once with conflicting overloads")]
    DuplicatedMethodDefinition { owner: TypeName, method: String },

    #[error("variable `{name}` on `{owner}` is declared more than once with different types")]
    ConflictingVariableType { owner: TypeName, name: String },

    #[error("alias `{name}` on `{owner}` refers to an undefined method")]
    UnresolvedAlias { owner: TypeName, name: String },

    #[error("`{name}`'s self type must be a class instance or interface")]
    InvalidSelfType { name: TypeName },
}

impl AnalysisError {
    /// A stable short code, in the spirit of the teacher's `DiagnosticCode`
    /// taxonomy, usable by a CLI or report format.
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::DuplicateDeclaration { .. } => "ENV001",
            AnalysisError::SuperclassMismatch { .. } => "ENV002",
            AnalysisError::GenericParameterMismatch { .. } => "ENV003",
            AnalysisError::NoTypeFound { .. } => "RES001",
            AnalysisError::InvalidTypeApplication { .. } => "RES002",
            AnalysisError::NoSuperclassFound { .. } => "RES003",
            AnalysisError::NoMixinFound { .. } => "RES004",
            AnalysisError::RecursiveAncestor { .. } => "RES005",
            AnalysisError::RecursiveAliasDefinition { .. } => "RES006",
            AnalysisError::SuperOverloadMethodDefinition { .. } => "DEF001",
            AnalysisError::DuplicatedMethodDefinition { .. } => "DEF002",
            AnalysisError::ConflictingVariableType { .. } => "DEF003",
            AnalysisError::UnresolvedAlias { .. } => "DEF004",
            AnalysisError::InvalidSelfType { .. } => "VAL001",
        }
    }
}

/// An `AnalysisError` tied to the declaration that raised it (spec §4.7:
/// "Errors collected per declaration with their source location").
#[derive(Debug, Clone, Error)]
#[error("{error}")]
pub struct LocatedError {
    #[source]
    pub error: AnalysisError,
    pub location: Location,
}

impl LocatedError {
    pub fn new(error: AnalysisError, location: Location) -> Self {
        Self { error, location }
    }
}

pub type AResult<T> = Result<T, AnalysisError>;
