use crate::context::Context;
use crate::error::AnalysisError;
use sig_syntax::{
    AliasDecl, ClassDecl, ConstantDecl, Decl, ExtensionDecl, GlobalDecl, InterfaceDecl, Member,
    ModuleDecl, Namespace, TypeName,
};
use std::collections::HashMap;

/// One open piece of a class/module entry: a `class`/`module` block
/// re-declaring the same absolute name, or an `extension` reopening it
/// under a labeled fragment (spec GLOSSARY: "Fragment: one of possibly
/// several declarations of the same class/module").
#[derive(Debug, Clone)]
pub enum ClassLikeFragment {
    Class(ClassDecl),
    Module(ModuleDecl),
    Extension(ExtensionDecl),
}

impl ClassLikeFragment {
    pub fn members(&self) -> &[Member] {
        match self {
            ClassLikeFragment::Class(d) => &d.members,
            ClassLikeFragment::Module(d) => &d.members,
            ClassLikeFragment::Extension(d) => &d.members,
        }
    }

    pub fn extension_name(&self) -> Option<&str> {
        match self {
            ClassLikeFragment::Extension(d) => Some(&d.extension_name),
            _ => None,
        }
    }

    pub fn type_params(&self) -> &[String] {
        match self {
            ClassLikeFragment::Class(d) => &d.type_params,
            ClassLikeFragment::Module(d) => &d.type_params,
            ClassLikeFragment::Extension(d) => &d.type_params,
        }
    }
}

/// A fragment together with the lexical context it was written in,
/// needed by the resolver to turn its member type references into
/// absolute form (spec §4.2: "Each entry records the lexical context... of
/// each fragment").
#[derive(Debug, Clone)]
pub struct Fragment<D> {
    pub context: Context,
    pub decl: D,
}

#[derive(Debug, Clone, Default)]
pub struct ClassLikeEntry {
    pub fragments: Vec<Fragment<ClassLikeFragment>>,
}

impl ClassLikeEntry {
    /// `true` if every fragment so far is a `module` (vs. `class`) block;
    /// used by the ancestor builder to choose singleton-root behavior.
    pub fn is_module(&self) -> bool {
        self.fragments
            .iter()
            .any(|f| matches!(f.decl, ClassLikeFragment::Module(_)))
    }

    /// The explicit superclass agreed on by all `class` fragments, if any
    /// (spec §3 Invariants: "their `super?` fields, if present, must be
    /// identical").
    pub fn super_class(&self) -> Option<&(TypeName, Vec<sig_syntax::Type>)> {
        self.fragments.iter().find_map(|f| match &f.decl {
            ClassLikeFragment::Class(d) => d.super_class.as_ref(),
            _ => None,
        })
    }

    pub fn self_types(&self) -> Vec<&sig_syntax::Type> {
        self.fragments
            .iter()
            .filter_map(|f| match &f.decl {
                ClassLikeFragment::Module(d) => Some(d.self_types.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct InterfaceEntry {
    pub context: Context,
    pub decl: InterfaceDecl,
}

#[derive(Debug, Clone)]
pub struct AliasEntry {
    pub context: Context,
    pub decl: AliasDecl,
}

#[derive(Debug, Clone)]
pub struct ConstantEntry {
    pub context: Context,
    pub decl: ConstantDecl,
}

#[derive(Debug, Clone)]
pub struct GlobalEntry {
    pub context: Context,
    pub decl: GlobalDecl,
}

/// The index of every declaration, grouped by kind and keyed by absolute
/// name (spec §4.2, §3 Data Model "Environment").
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub class_decls: HashMap<TypeName, ClassLikeEntry>,
    pub interface_decls: HashMap<TypeName, InterfaceEntry>,
    pub alias_decls: HashMap<TypeName, AliasEntry>,
    pub constant_decls: HashMap<TypeName, ConstantEntry>,
    pub global_decls: HashMap<String, GlobalEntry>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every top-level declaration parsed from one signature file,
    /// recursing into nested class/module declarations (spec §4.5:
    /// "Nested class/module declarations inside a class produce constant
    /// entries").
    pub fn insert_all(&mut self, decls: Vec<Decl>) -> Vec<AnalysisError> {
        let mut errors = Vec::new();
        for decl in decls {
            if let Err(e) = self.insert_decl(decl, &Namespace::root()) {
                errors.push(e);
            }
        }
        errors
    }

    fn insert_decl(&mut self, decl: Decl, enclosing: &Namespace) -> Result<(), AnalysisError> {
        let context = Context::enclosing(enclosing);
        match decl {
            Decl::Class(d) => {
                let absolute = absolute_name(&d.name, enclosing);
                let nested_ns = absolute.namespace.append(absolute.simple_name.clone());
                let members = d.members.clone();
                let entry = self.class_decls.entry(absolute).or_default();
                if let Some(existing) = entry.super_class() {
                    if let Some(new_super) = &d.super_class {
                        if existing != new_super {
                            return Err(AnalysisError::SuperclassMismatch {
                                name: d.name.clone(),
                            });
                        }
                    }
                }
                entry.fragments.push(Fragment {
                    context,
                    decl: ClassLikeFragment::Class(d),
                });
                self.insert_nested(&members, &nested_ns)
            }
            Decl::Module(d) => {
                let absolute = absolute_name(&d.name, enclosing);
                let nested_ns = absolute.namespace.append(absolute.simple_name.clone());
                let members = d.members.clone();
                let entry = self.class_decls.entry(absolute).or_default();
                entry.fragments.push(Fragment {
                    context,
                    decl: ClassLikeFragment::Module(d),
                });
                self.insert_nested(&members, &nested_ns)
            }
            Decl::Extension(d) => {
                let absolute = absolute_name(&d.name, enclosing);
                let nested_ns = absolute.namespace.append(absolute.simple_name.clone());
                let members = d.members.clone();
                let entry = self.class_decls.entry(absolute).or_default();
                entry.fragments.push(Fragment {
                    context,
                    decl: ClassLikeFragment::Extension(d),
                });
                self.insert_nested(&members, &nested_ns)
            }
            Decl::Interface(d) => {
                let absolute = absolute_name(&d.name, enclosing);
                if self.interface_decls.contains_key(&absolute) {
                    return Err(AnalysisError::DuplicateDeclaration { name: d.name });
                }
                self.interface_decls
                    .insert(absolute, InterfaceEntry { context, decl: d });
                Ok(())
            }
            Decl::Alias(d) => {
                let absolute = absolute_name(&d.name, enclosing);
                if self.alias_decls.contains_key(&absolute) {
                    return Err(AnalysisError::DuplicateDeclaration { name: d.name });
                }
                self.alias_decls
                    .insert(absolute, AliasEntry { context, decl: d });
                Ok(())
            }
            Decl::Constant(d) => {
                let absolute = absolute_name(&d.name, enclosing);
                if self.constant_decls.contains_key(&absolute) {
                    return Err(AnalysisError::DuplicateDeclaration { name: d.name });
                }
                self.constant_decls
                    .insert(absolute, ConstantEntry { context, decl: d });
                Ok(())
            }
            Decl::Global(d) => {
                if self.global_decls.contains_key(&d.name) {
                    return Err(AnalysisError::DuplicateDeclaration {
                        name: TypeName::bare(d.name.clone()),
                    });
                }
                self.global_decls
                    .insert(d.name.clone(), GlobalEntry { context, decl: d });
                Ok(())
            }
        }
    }

    fn insert_nested(&mut self, members: &[Member], nested_ns: &Namespace) -> Result<(), AnalysisError> {
        for member in members {
            if let Member::Nested(inner) = member {
                self.insert_decl((**inner).clone(), nested_ns)?;
            }
        }
        Ok(())
    }

    pub fn lookup_class_like(&self, name: &TypeName) -> Option<&ClassLikeEntry> {
        self.class_decls.get(name)
    }

    pub fn lookup_interface(&self, name: &TypeName) -> Option<&InterfaceEntry> {
        self.interface_decls.get(name)
    }

    pub fn lookup_alias(&self, name: &TypeName) -> Option<&AliasEntry> {
        self.alias_decls.get(name)
    }

    pub fn lookup_constant(&self, name: &TypeName) -> Option<&ConstantEntry> {
        self.constant_decls.get(name)
    }

    /// Any declared entity under this absolute name, regardless of kind
    /// (used by the resolver to check mere existence before checking kind
    /// agreement).
    pub fn contains(&self, name: &TypeName) -> bool {
        self.class_decls.contains_key(name)
            || self.interface_decls.contains_key(name)
            || self.alias_decls.contains_key(name)
    }
}

/// Prepend `enclosing` to a possibly-relative type name, the way a
/// declaration's own name becomes absolute once placed under its lexical
/// context (spec §4.2: "computed by prepending its lexical context path").
fn absolute_name(name: &TypeName, enclosing: &Namespace) -> TypeName {
    if name.is_absolute() {
        name.clone()
    } else {
        name.with_namespace(enclosing.join(&name.namespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sig_parser::parse_signature_text;

    #[test]
    fn reopened_class_accumulates_fragments() {
        let decls = parse_signature_text("class C end extension C (Pathname) end").unwrap();
        let mut env = Environment::new();
        let errors = env.insert_all(decls);
        assert!(errors.is_empty());
        let entry = env
            .lookup_class_like(&TypeName::root("C"))
            .expect("class C indexed");
        assert_eq!(entry.fragments.len(), 2);
    }

    #[test]
    fn duplicate_interface_is_an_error() {
        let decls =
            parse_signature_text("interface _Foo def bar: -> void end interface _Foo end")
                .unwrap();
        let mut env = Environment::new();
        let errors = env.insert_all(decls);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            AnalysisError::DuplicateDeclaration { .. }
        ));
    }

    #[test]
    fn mismatched_superclass_fragments_is_an_error() {
        let decls = parse_signature_text(
            "class C < A end class C < B end class A end class B end",
        )
        .unwrap();
        let mut env = Environment::new();
        let errors = env.insert_all(decls);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], AnalysisError::SuperclassMismatch { .. }));
    }

    #[test]
    fn nested_class_is_indexed_under_owner_namespace() {
        let decls = parse_signature_text("class Outer class Inner end end").unwrap();
        let mut env = Environment::new();
        let errors = env.insert_all(decls);
        assert!(errors.is_empty());
        let inner_name = TypeName::new(Namespace::new(vec!["Outer".into()], true), "Inner");
        assert!(env.lookup_class_like(&inner_name).is_some());
    }
}
