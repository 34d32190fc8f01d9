//! sig_syntax crate
//!
//! Pure data: the AST produced by `sig_parser` and consumed by `sig_analysis`.
//! No parsing and no semantic logic live here — just names, namespaces, type
//! expressions, and declaration/member shapes, plus source locations.

pub mod annotation;
pub mod decl;
pub mod location;
pub mod members;
pub mod namespace;
pub mod type_name;
pub mod types;

pub use annotation::Annotation;
pub use decl::{
    AliasDecl, ClassDecl, ConstantDecl, Decl, ExtensionDecl, GlobalDecl, InterfaceDecl, ModuleDecl,
};
pub use location::{Location, Position};
pub use members::{
    Attribute, AttributeKind, Member, MethodDef, MethodKind, Mixin, MixinKind, Visibility,
};
pub use namespace::Namespace;
pub use type_name::{NameKind, TypeName};
pub use types::{FunctionType, MethodType, Overload, Param, Type};
