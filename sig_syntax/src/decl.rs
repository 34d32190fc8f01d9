use crate::annotation::Annotation;
use crate::location::Location;
use crate::members::Member;
use crate::type_name::TypeName;
use crate::types::Type;
use serde::{Deserialize, Serialize};

/// `class Name[TypeParams]? (< Super[args])? members end` (spec §3 Data
/// Model, "Top-level declaration variants").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: TypeName,
    pub type_params: Vec<String>,
    pub super_class: Option<(TypeName, Vec<Type>)>,
    pub members: Vec<Member>,
    pub annotations: Vec<Annotation>,
    pub location: Location,
}

/// `module Name[TypeParams]? (: SelfType)? members end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDecl {
    pub name: TypeName,
    pub type_params: Vec<String>,
    pub self_types: Vec<Type>,
    pub members: Vec<Member>,
    pub annotations: Vec<Annotation>,
    pub location: Location,
}

/// `interface _Name[TypeParams]? members end`; members are restricted by
/// the parser to method defs and `include` of other interfaces (spec
/// §4.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: TypeName,
    pub type_params: Vec<String>,
    pub members: Vec<Member>,
    pub annotations: Vec<Annotation>,
    pub location: Location,
}

/// `extension Name[TypeParams]? (ExtensionTag) members end` — reopens an
/// existing class/module under a labeled fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionDecl {
    pub name: TypeName,
    pub extension_name: String,
    pub type_params: Vec<String>,
    pub members: Vec<Member>,
    pub annotations: Vec<Annotation>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantDecl {
    pub name: TypeName,
    pub ty: Type,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalDecl {
    pub name: String,
    pub ty: Type,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasDecl {
    pub name: TypeName,
    pub ty: Type,
    pub location: Location,
}

/// A top-level declaration (spec §3 Data Model).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decl {
    Class(ClassDecl),
    Module(ModuleDecl),
    Interface(InterfaceDecl),
    Constant(ConstantDecl),
    Global(GlobalDecl),
    Alias(AliasDecl),
    Extension(ExtensionDecl),
}

impl Decl {
    pub fn location(&self) -> Location {
        match self {
            Decl::Class(d) => d.location,
            Decl::Module(d) => d.location,
            Decl::Interface(d) => d.location,
            Decl::Constant(d) => d.location,
            Decl::Global(d) => d.location,
            Decl::Alias(d) => d.location,
            Decl::Extension(d) => d.location,
        }
    }

    /// The name a nested declaration is indexed under, for the definition
    /// builder's constant synthesis (spec §4.5: "Nested class/module
    /// declarations inside a class produce constant entries"). `None` for
    /// variants that can't meaningfully nest under a class the way a
    /// class/module/interface can (a nested `extension` still names the
    /// class it reopens, not a new constant).
    pub fn nested_name(&self) -> Option<&TypeName> {
        match self {
            Decl::Class(d) => Some(&d.name),
            Decl::Module(d) => Some(&d.name),
            Decl::Interface(d) => Some(&d.name),
            Decl::Extension(_) | Decl::Constant(_) | Decl::Global(_) | Decl::Alias(_) => None,
        }
    }
}
