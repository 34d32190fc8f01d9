use crate::type_name::TypeName;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A literal value usable in a `Literal` type (spec §3: string, symbol,
/// integer, or boolean literal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    String(String),
    Symbol(String),
    Integer(i64),
    Bool(bool),
}

/// The type-expression sum type (spec §3 Data Model, "Type expression").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    Any,
    Void,
    Bool,
    SelfType,
    Instance,
    Class,
    Nil,
    Top,
    Bot,

    Literal(LiteralValue),
    Variable(String),

    ClassInstance(TypeName, Vec<Type>),
    ClassSingleton(TypeName),
    Interface(TypeName, Vec<Type>),
    Alias(TypeName),

    Union(Vec<Type>),
    Intersection(Vec<Type>),
    Optional(Box<Type>),

    Tuple(Vec<Type>),
    Record(BTreeMap<String, Type>),

    Proc(Box<FunctionType>),
}

impl Type {
    /// The type-name this expression applies, if any (used by the
    /// validator's arity + resolution sweep).
    pub fn applied_name(&self) -> Option<&TypeName> {
        match self {
            Type::ClassInstance(n, _) | Type::Interface(n, _) | Type::Alias(n) => Some(n),
            Type::ClassSingleton(n) => Some(n),
            _ => None,
        }
    }

    /// The type arguments applied at this reference, for arity checking.
    /// `ClassSingleton` and `Alias` are never parameterized at the use
    /// site (an alias's own params, if any, are on its declaration).
    pub fn applied_args(&self) -> &[Type] {
        match self {
            Type::ClassInstance(_, args) | Type::Interface(_, args) => args,
            _ => &[],
        }
    }

    /// Recursively visit every type reachable from this expression,
    /// including itself. Used by the validator to sweep nested references
    /// inside unions, tuples, procs, etc.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Type)) {
        f(self);
        match self {
            Type::ClassInstance(_, args) | Type::Interface(_, args) => {
                for a in args {
                    a.walk(f);
                }
            }
            Type::Union(ts) | Type::Intersection(ts) | Type::Tuple(ts) => {
                for t in ts {
                    t.walk(f);
                }
            }
            Type::Record(fields) => {
                for t in fields.values() {
                    t.walk(f);
                }
            }
            Type::Optional(t) => t.walk(f),
            Type::Proc(ft) => ft.walk(f),
            Type::Any
            | Type::Void
            | Type::Bool
            | Type::SelfType
            | Type::Instance
            | Type::Class
            | Type::Nil
            | Type::Top
            | Type::Bot
            | Type::Literal(_)
            | Type::Variable(_)
            | Type::ClassSingleton(_)
            | Type::Alias(_) => {}
        }
    }

    /// Replace every `Variable(name)` reachable from this expression with
    /// its binding in `subst`, leaving unbound variables as-is (spec §4.5:
    /// "enumerate its contributed members after substituting type
    /// arguments for its type parameters").
    pub fn substitute(&self, subst: &HashMap<String, Type>) -> Type {
        match self {
            Type::Variable(name) => subst.get(name).cloned().unwrap_or_else(|| self.clone()),
            Type::ClassInstance(n, args) => {
                Type::ClassInstance(n.clone(), args.iter().map(|a| a.substitute(subst)).collect())
            }
            Type::Interface(n, args) => {
                Type::Interface(n.clone(), args.iter().map(|a| a.substitute(subst)).collect())
            }
            Type::Union(ts) => Type::Union(ts.iter().map(|t| t.substitute(subst)).collect()),
            Type::Intersection(ts) => {
                Type::Intersection(ts.iter().map(|t| t.substitute(subst)).collect())
            }
            Type::Tuple(ts) => Type::Tuple(ts.iter().map(|t| t.substitute(subst)).collect()),
            Type::Optional(t) => Type::Optional(Box::new(t.substitute(subst))),
            Type::Record(fields) => Type::Record(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.substitute(subst)))
                    .collect(),
            ),
            Type::Proc(ft) => Type::Proc(Box::new(ft.substitute(subst))),
            Type::Any
            | Type::Void
            | Type::Bool
            | Type::SelfType
            | Type::Instance
            | Type::Class
            | Type::Nil
            | Type::Top
            | Type::Bot
            | Type::Literal(_)
            | Type::ClassSingleton(_)
            | Type::Alias(_) => self.clone(),
        }
    }
}

/// A function-type parameter: an optional name plus a type (spec §3
/// Data Model, "Function type" — "Each param carries an optional name").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: Option<String>,
    pub ty: Type,
}

impl Param {
    pub fn new(name: Option<String>, ty: Type) -> Self {
        Self { name, ty }
    }

    pub fn substitute(&self, subst: &HashMap<String, Type>) -> Param {
        Param {
            name: self.name.clone(),
            ty: self.ty.substitute(subst),
        }
    }
}

/// Ordered positional/keyword parameter groups plus a return type (spec §3
/// Data Model, "Function type").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FunctionType {
    pub required_positionals: Vec<Param>,
    pub optional_positionals: Vec<Param>,
    pub rest_positional: Option<Param>,
    pub trailing_positionals: Vec<Param>,
    pub required_keywords: BTreeMap<String, Param>,
    pub optional_keywords: BTreeMap<String, Param>,
    pub rest_keywords: Option<Param>,
    pub return_type: Box<Type>,
}

impl FunctionType {
    pub fn returning(return_type: Type) -> Self {
        Self {
            return_type: Box::new(return_type),
            ..Default::default()
        }
    }

    fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Type)) {
        for p in self
            .required_positionals
            .iter()
            .chain(self.optional_positionals.iter())
            .chain(self.trailing_positionals.iter())
            .chain(self.rest_positional.iter())
            .chain(self.rest_keywords.iter())
        {
            p.ty.walk(f);
        }
        for p in self
            .required_keywords
            .values()
            .chain(self.optional_keywords.values())
        {
            p.ty.walk(f);
        }
        self.return_type.walk(f);
    }

    pub fn substitute(&self, subst: &HashMap<String, Type>) -> FunctionType {
        FunctionType {
            required_positionals: self
                .required_positionals
                .iter()
                .map(|p| p.substitute(subst))
                .collect(),
            optional_positionals: self
                .optional_positionals
                .iter()
                .map(|p| p.substitute(subst))
                .collect(),
            rest_positional: self.rest_positional.as_ref().map(|p| p.substitute(subst)),
            trailing_positionals: self
                .trailing_positionals
                .iter()
                .map(|p| p.substitute(subst))
                .collect(),
            required_keywords: self
                .required_keywords
                .iter()
                .map(|(k, p)| (k.clone(), p.substitute(subst)))
                .collect(),
            optional_keywords: self
                .optional_keywords
                .iter()
                .map(|(k, p)| (k.clone(), p.substitute(subst)))
                .collect(),
            rest_keywords: self.rest_keywords.as_ref().map(|p| p.substitute(subst)),
            return_type: Box::new(self.return_type.substitute(subst)),
        }
    }
}

/// A block parameter attached to a method type: the block's own function
/// shape, and whether it is required (spec §3: "an optional block spec
/// (function_type, required: bool)").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub fn_type: FunctionType,
    pub required: bool,
}

/// One overload in a method's overload list: either a concrete method
/// type, or the `super` sentinel meaning "inherit the super's overloads
/// here" (spec §3: "A method's overload set is an ordered list of method
/// types; a special sentinel super...").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Overload {
    Super,
    Method(MethodType),
}

/// A function type plus type parameters and an optional block spec
/// (spec §3 Data Model, "Method type").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodType {
    pub type_params: Vec<String>,
    pub block: Option<BlockSpec>,
    pub fn_type: FunctionType,
}

impl MethodType {
    /// Visit every `Type` reachable from this method type, for the
    /// validator's resolution + arity sweep.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Type)) {
        self.fn_type.walk(f);
        if let Some(block) = &self.block {
            block.fn_type.walk(f);
        }
    }

    /// Substitute `subst` through this method type's shape, with the
    /// method's own type parameters shadowing any class-level binding of
    /// the same name (a method declaring `[T]` reuses the letter `T` for
    /// its own purposes regardless of an enclosing `class Box[T]`).
    pub fn substitute(&self, subst: &HashMap<String, Type>) -> MethodType {
        let local_subst: std::borrow::Cow<HashMap<String, Type>> = if self.type_params.is_empty()
        {
            std::borrow::Cow::Borrowed(subst)
        } else {
            std::borrow::Cow::Owned(
                subst
                    .iter()
                    .filter(|(k, _)| !self.type_params.contains(k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )
        };
        MethodType {
            type_params: self.type_params.clone(),
            block: self.block.as_ref().map(|b| BlockSpec {
                fn_type: b.fn_type.substitute(local_subst.as_ref()),
                required: b.required,
            }),
            fn_type: self.fn_type.substitute(local_subst.as_ref()),
        }
    }
}

impl Overload {
    pub fn substitute(&self, subst: &HashMap<String, Type>) -> Overload {
        match self {
            Overload::Super => Overload::Super,
            Overload::Method(mt) => Overload::Method(mt.substitute(subst)),
        }
    }
}
