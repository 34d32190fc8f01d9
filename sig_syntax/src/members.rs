use crate::annotation::Annotation;
use crate::location::Location;
use crate::type_name::TypeName;
use crate::types::{Overload, Type};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which table a method definition belongs to. `SingletonInstance` is the
/// `self?.` form (supplemented feature, SPEC_FULL §C.1): the method is
/// folded into both the instance and singleton method tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodKind {
    Instance,
    Singleton,
    SingletonInstance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
}

/// A `def` member (spec §3 Data Model, "Member variants"). Visibility is
/// not stored here: it's a running marker the definition builder tracks
/// while folding a fragment's members in order (spec §4.5), flipped by
/// `VisibilityMarker` members — a method's own effective visibility
/// depends on where it sits relative to those markers, not on anything
/// knowable at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    pub kind: MethodKind,
    pub overloads: Vec<Overload>,
    pub annotations: Vec<Annotation>,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MixinKind {
    Include,
    Extend,
    Prepend,
}

/// `include`/`extend`/`prepend` (spec §3 Data Model).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mixin {
    pub kind: MixinKind,
    pub name: TypeName,
    pub args: Vec<Type>,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    Reader,
    Writer,
    Accessor,
}

/// `attr_reader`/`attr_writer`/`attr_accessor`, with an optional explicit
/// ivar name override (spec §4.1: `attr_reader name(@Other): T` or
/// `attr_reader name(): T` for no backing ivar).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub name: String,
    /// `None` = synthesize `@name`; `Some(None)` = no backing ivar
    /// (`name()` was written); `Some(Some(ivar))` = explicit override.
    pub ivar_override: Option<Option<String>>,
    pub ty: Type,
    pub location: Location,
}

/// One member inside a class/module/interface declaration (spec §3 Data
/// Model, "Member variants").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Method(MethodDef),
    Mixin(Mixin),
    Attribute(Attribute),
    InstanceVariable {
        name: String,
        ty: Type,
        location: Location,
    },
    ClassInstanceVariable {
        name: String,
        ty: Type,
        location: Location,
    },
    ClassVariable {
        name: String,
        ty: Type,
        location: Location,
    },
    Alias {
        new_name: String,
        old_name: String,
        kind: MethodKind,
        location: Location,
    },
    VisibilityMarker(Visibility),
    /// A nested class/module/interface/constant declared directly inside
    /// a class or module body, e.g. `class Outer class Inner end end`.
    Nested(Box<crate::decl::Decl>),
}

impl Member {
    /// Replace every type-parameter occurrence reachable from this
    /// member's types with its binding in `subst` (spec §4.5: an
    /// ancestor's contributed members are substituted before folding).
    /// `Alias`, `VisibilityMarker` and `Nested` carry no `Type` of their
    /// own, so they pass through unchanged.
    pub fn substitute(&self, subst: &HashMap<String, Type>) -> Member {
        if subst.is_empty() {
            return self.clone();
        }
        match self {
            Member::Method(m) => Member::Method(MethodDef {
                name: m.name.clone(),
                kind: m.kind,
                overloads: m.overloads.iter().map(|o| o.substitute(subst)).collect(),
                annotations: m.annotations.clone(),
                location: m.location,
            }),
            Member::Mixin(mx) => Member::Mixin(Mixin {
                kind: mx.kind,
                name: mx.name.clone(),
                args: mx.args.iter().map(|a| a.substitute(subst)).collect(),
                location: mx.location,
            }),
            Member::Attribute(attr) => Member::Attribute(Attribute {
                kind: attr.kind,
                name: attr.name.clone(),
                ivar_override: attr.ivar_override.clone(),
                ty: attr.ty.substitute(subst),
                location: attr.location,
            }),
            Member::InstanceVariable { name, ty, location } => Member::InstanceVariable {
                name: name.clone(),
                ty: ty.substitute(subst),
                location: *location,
            },
            Member::ClassInstanceVariable { name, ty, location } => {
                Member::ClassInstanceVariable {
                    name: name.clone(),
                    ty: ty.substitute(subst),
                    location: *location,
                }
            }
            Member::ClassVariable { name, ty, location } => Member::ClassVariable {
                name: name.clone(),
                ty: ty.substitute(subst),
                location: *location,
            },
            Member::Alias { .. } | Member::VisibilityMarker(_) | Member::Nested(_) => {
                self.clone()
            }
        }
    }
}
