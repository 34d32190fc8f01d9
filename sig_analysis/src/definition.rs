use crate::ancestors::{build_ancestors, Ancestor, Kind};
use crate::environment::{ClassLikeFragment, Environment, Fragment};
use crate::error::AnalysisError;
use sig_syntax::{
    Attribute, AttributeKind, FunctionType, Member, MethodKind, MethodType, Overload, Param, Type,
    TypeName, Visibility,
};
use std::collections::HashMap;

/// One name's resolved method table entry: its accumulated overload list
/// plus where it was last (re)defined (spec §4.5: "Definition... method
/// table entries record where each method is defined and implemented").
#[derive(Debug, Clone)]
pub struct MethodEntry {
    pub name: String,
    pub defined_in: TypeName,
    pub implemented_in: TypeName,
    pub visibility: Visibility,
    pub overloads: Vec<MethodType>,
}

/// The folded view of a class/module/singleton: its full method table,
/// variables and nested constants, built by folding its ancestor chain
/// most-distant-to-nearest (spec §4.5, §3 Data Model "Definition").
#[derive(Debug, Clone, Default)]
pub struct Definition {
    pub ancestors: Vec<Ancestor>,
    pub methods: HashMap<String, MethodEntry>,
    pub instance_variables: HashMap<String, Type>,
    pub class_variables: HashMap<String, Type>,
    pub constants: HashMap<String, Type>,
}

/// Fold `name`'s ancestor chain into a complete [`Definition`] (spec §4.5).
pub fn build_definition(
    env: &Environment,
    name: &TypeName,
    kind: Kind,
) -> Result<Definition, AnalysisError> {
    let ancestors = build_ancestors(env, name, kind)?;
    let mut def = Definition {
        ancestors: ancestors.clone(),
        ..Definition::default()
    };

    for ancestor in ancestors.iter().rev() {
        apply_ancestor(env, ancestor, kind, &mut def)?;
    }

    Ok(def)
}

fn method_kind_matches(member_kind: MethodKind, building: Kind) -> bool {
    matches!(
        (member_kind, building),
        (MethodKind::Instance, Kind::Instance)
            | (MethodKind::Singleton, Kind::Singleton)
            | (MethodKind::SingletonInstance, Kind::Instance)
            | (MethodKind::SingletonInstance, Kind::Singleton)
    )
}

/// Build a `TypeParam → Type` map by zipping a declaration's own
/// `type_params()` against the concrete `args` an ancestor was reached
/// with (spec §4.5: "enumerate its contributed members after substituting
/// type arguments for its type parameters"). Mismatched lengths (an
/// arity error the validator reports separately) just zip to the shorter
/// length rather than panicking.
fn substitution_map(type_params: &[String], args: &[Type]) -> HashMap<String, Type> {
    type_params
        .iter()
        .cloned()
        .zip(args.iter().cloned())
        .collect()
}

fn substituted_members(members: &[Member], subst: &HashMap<String, Type>) -> Vec<Member> {
    if subst.is_empty() {
        return members.to_vec();
    }
    members.iter().map(|m| m.substitute(subst)).collect()
}

fn apply_ancestor(
    env: &Environment,
    ancestor: &Ancestor,
    building: Kind,
    def: &mut Definition,
) -> Result<(), AnalysisError> {
    let owner = ancestor.name().clone();

    match ancestor {
        Ancestor::Instance(name, args) => {
            if let Some(entry) = env.lookup_class_like(name) {
                let no_params: &[String] = &[];
                let type_params = entry
                    .fragments
                    .first()
                    .map(|f| f.decl.type_params())
                    .unwrap_or(no_params);
                let subst = substitution_map(type_params, args);
                for fragment in class_fragments(entry) {
                    let members = substituted_members(fragment.decl.members(), &subst);
                    apply_fragment(&owner, &members, building, def)?;
                }
            } else if let Some(iface) = env.lookup_interface(name) {
                let subst = substitution_map(&iface.decl.type_params, args);
                let members = substituted_members(&iface.decl.members, &subst);
                apply_fragment(&owner, &members, building, def)?;
            }
        }
        Ancestor::Singleton(name) => {
            if let Some(entry) = env.lookup_class_like(name) {
                for fragment in class_fragments(entry) {
                    apply_fragment(&owner, fragment.decl.members(), building, def)?;
                }
            }
        }
        Ancestor::ExtensionInstance(name, ext_name, args) => {
            if let Some(entry) = env.lookup_class_like(name) {
                for fragment in &entry.fragments {
                    if let ClassLikeFragment::Extension(ext) = &fragment.decl {
                        if &ext.extension_name == ext_name {
                            let subst = substitution_map(&ext.type_params, args);
                            let members = substituted_members(&ext.members, &subst);
                            apply_fragment(&owner, &members, building, def)?;
                        }
                    }
                }
            }
        }
        Ancestor::ExtensionSingleton(name, ext_name) => {
            if let Some(entry) = env.lookup_class_like(name) {
                for fragment in &entry.fragments {
                    if let ClassLikeFragment::Extension(ext) = &fragment.decl {
                        if &ext.extension_name == ext_name {
                            apply_fragment(&owner, &ext.members, building, def)?;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn class_fragments(
    entry: &crate::environment::ClassLikeEntry,
) -> impl Iterator<Item = &Fragment<ClassLikeFragment>> {
    entry
        .fragments
        .iter()
        .filter(|f| !matches!(f.decl, ClassLikeFragment::Extension(_)))
}

fn apply_fragment(
    owner: &TypeName,
    members: &[Member],
    building: Kind,
    def: &mut Definition,
) -> Result<(), AnalysisError> {
    let mut active_visibility = Visibility::Public;
    // Names `def`'d directly in *this* fragment so far, distinct from
    // `def.methods`, which also holds entries folded in from more-distant
    // ancestors — redefining a method within the same fragment (without
    // going through `| super`) is a `DuplicatedMethodDefinitionError`
    // (spec §7), not an override.
    let mut defined_here = std::collections::HashSet::new();

    for member in members {
        match member {
            Member::VisibilityMarker(v) => active_visibility = *v,

            Member::Method(m) => {
                if !method_kind_matches(m.kind, building) {
                    continue;
                }
                if !defined_here.insert(m.name.clone()) {
                    return Err(AnalysisError::DuplicatedMethodDefinition {
                        owner: owner.clone(),
                        method: m.name.clone(),
                    });
                }
                let overloads = resolve_overloads(owner, &m.name, &m.overloads, def)?;
                let previous = def.methods.get(&m.name);
                let defined_in = previous
                    .map(|prev| prev.defined_in.clone())
                    .unwrap_or_else(|| owner.clone());
                // A fragment whose entire overload list is the `super`
                // sentinel (`def f: super`, used to re-declare an
                // inherited method just to flip its visibility) doesn't
                // "implement" the method here — `implemented_in` stays at
                // whichever ancestor last contributed a concrete overload
                // (spec §8 testable property #4).
                let contributes_concrete =
                    m.overloads.iter().any(|o| matches!(o, Overload::Method(_)));
                let implemented_in = if contributes_concrete {
                    owner.clone()
                } else {
                    previous
                        .map(|prev| prev.implemented_in.clone())
                        .unwrap_or_else(|| owner.clone())
                };
                def.methods.insert(
                    m.name.clone(),
                    MethodEntry {
                        name: m.name.clone(),
                        defined_in,
                        implemented_in,
                        visibility: active_visibility,
                        overloads,
                    },
                );
            }

            Member::Attribute(attr) => {
                if building != Kind::Instance {
                    continue;
                }
                apply_attribute(owner, attr, active_visibility, def);
            }

            Member::InstanceVariable { name, ty, .. } if building == Kind::Instance => {
                insert_variable(&mut def.instance_variables, owner, name, ty)?;
            }
            Member::ClassInstanceVariable { name, ty, .. } if building == Kind::Singleton => {
                insert_variable(&mut def.instance_variables, owner, name, ty)?;
            }
            Member::ClassVariable { name, ty, .. } => {
                insert_variable(&mut def.class_variables, owner, name, ty)?;
            }
            Member::InstanceVariable { .. } | Member::ClassInstanceVariable { .. } => {}

            Member::Alias {
                new_name,
                old_name,
                kind,
                ..
            } => {
                if !method_kind_matches(*kind, building) {
                    continue;
                }
                let referent = def.methods.get(old_name).cloned().ok_or_else(|| {
                    AnalysisError::UnresolvedAlias {
                        owner: owner.clone(),
                        name: old_name.clone(),
                    }
                })?;
                def.methods.insert(
                    new_name.clone(),
                    MethodEntry {
                        name: new_name.clone(),
                        defined_in: owner.clone(),
                        implemented_in: referent.implemented_in,
                        visibility: active_visibility,
                        overloads: referent.overloads,
                    },
                );
            }

            Member::Nested(inner) => {
                if building == Kind::Instance {
                    if let Some(nested_name) = inner.nested_name() {
                        let absolute = TypeName::new(
                            owner.namespace.append(owner.simple_name.clone()),
                            nested_name.simple_name.clone(),
                        );
                        def.constants
                            .entry(nested_name.simple_name.clone())
                            .or_insert(Type::ClassSingleton(absolute));
                    }
                }
            }

            Member::Mixin(_) => {}
        }
    }

    Ok(())
}

/// `super` sentinels are replaced with the full overload list already
/// accumulated for this method name from more-distant ancestors, spliced
/// in at the sentinel's position (SPEC_FULL §D: "concatenate super's full
/// list in original order at the sentinel position").
fn resolve_overloads(
    owner: &TypeName,
    method_name: &str,
    overloads: &[Overload],
    def: &Definition,
) -> Result<Vec<MethodType>, AnalysisError> {
    let mut resolved = Vec::with_capacity(overloads.len());
    for overload in overloads {
        match overload {
            Overload::Method(mt) => resolved.push(mt.clone()),
            Overload::Super => {
                let previous = def.methods.get(method_name).ok_or_else(|| {
                    AnalysisError::SuperOverloadMethodDefinition {
                        owner: owner.clone(),
                        method: method_name.to_string(),
                    }
                })?;
                resolved.extend(previous.overloads.iter().cloned());
            }
        }
    }
    Ok(resolved)
}

fn insert_variable(
    table: &mut HashMap<String, Type>,
    owner: &TypeName,
    name: &str,
    ty: &Type,
) -> Result<(), AnalysisError> {
    if let Some(existing) = table.get(name) {
        if existing != ty {
            return Err(AnalysisError::ConflictingVariableType {
                owner: owner.clone(),
                name: name.to_string(),
            });
        }
    } else {
        table.insert(name.to_string(), ty.clone());
    }
    Ok(())
}

/// Synthesize the reader/writer methods an `attr_*` member stands for, and
/// record its backing ivar unless it opted out (spec §4.1, §4.5).
fn apply_attribute(owner: &TypeName, attr: &Attribute, visibility: Visibility, def: &mut Definition) {
    let ivar_name = match &attr.ivar_override {
        None => Some(format!("@{}", attr.name)),
        Some(None) => None,
        Some(Some(explicit)) => Some(explicit.clone()),
    };
    if let Some(ivar_name) = ivar_name {
        def.instance_variables
            .entry(ivar_name)
            .or_insert_with(|| attr.ty.clone());
    }

    if matches!(attr.kind, AttributeKind::Reader | AttributeKind::Accessor) {
        def.methods.insert(
            attr.name.clone(),
            MethodEntry {
                name: attr.name.clone(),
                defined_in: owner.clone(),
                implemented_in: owner.clone(),
                visibility,
                overloads: vec![MethodType {
                    type_params: Vec::new(),
                    block: None,
                    fn_type: FunctionType::returning(attr.ty.clone()),
                }],
            },
        );
    }

    if matches!(attr.kind, AttributeKind::Writer | AttributeKind::Accessor) {
        let writer_name = format!("{}=", attr.name);
        let mut fn_type = FunctionType::returning(attr.ty.clone());
        fn_type
            .required_positionals
            .push(Param::new(Some(attr.name.clone()), attr.ty.clone()));
        def.methods.insert(
            writer_name.clone(),
            MethodEntry {
                name: writer_name,
                defined_in: owner.clone(),
                implemented_in: owner.clone(),
                visibility,
                overloads: vec![MethodType {
                    type_params: Vec::new(),
                    block: None,
                    fn_type,
                }],
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sig_parser::parse_signature_text;

    fn env_from(src: &str) -> Environment {
        let decls = parse_signature_text(src).unwrap();
        let mut env = Environment::new();
        assert!(env.insert_all(decls).is_empty());
        env
    }

    #[test]
    fn super_sentinel_concatenates_overloads() {
        let env = env_from(
            "class A def f: () -> Integer end end \
             class B < A def f: (String) -> Integer | super end end",
        );
        let def = build_definition(&env, &TypeName::root("B"), Kind::Instance).unwrap();
        let f = def.methods.get("f").expect("f defined");
        assert_eq!(f.overloads.len(), 2);
    }

    #[test]
    fn attribute_synthesizes_reader_and_ivar() {
        let env = env_from("class C attr_reader name: String end");
        let def = build_definition(&env, &TypeName::root("C"), Kind::Instance).unwrap();
        assert!(def.methods.contains_key("name"));
        assert!(def.instance_variables.contains_key("@name"));
    }

    #[test]
    fn redefining_a_method_in_the_same_fragment_is_an_error() {
        let env = env_from(
            "class C def f: () -> Integer end def f: () -> String end end",
        );
        let err = build_definition(&env, &TypeName::root("C"), Kind::Instance).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DuplicatedMethodDefinition { .. }
        ));
    }

    #[test]
    fn overriding_in_a_subclass_is_not_a_duplicate() {
        let env = env_from(
            "class A def f: () -> Integer end end class B < A def f: () -> String end end",
        );
        let def = build_definition(&env, &TypeName::root("B"), Kind::Instance).unwrap();
        assert!(def.methods.contains_key("f"));
    }

    #[test]
    fn nested_class_becomes_a_constant() {
        let env = env_from("class Outer class Inner end end");
        let def = build_definition(&env, &TypeName::root("Outer"), Kind::Instance).unwrap();
        assert_eq!(
            def.constants.get("Inner"),
            Some(&Type::ClassSingleton(TypeName::new(
                sig_syntax::Namespace::new(vec!["Outer".into()], true),
                "Inner"
            )))
        );
    }

    #[test]
    fn conflicting_ivar_types_is_an_error() {
        let env = env_from(
            "class A @x: String end class B < A @x: Integer end",
        );
        let err = build_definition(&env, &TypeName::root("B"), Kind::Instance).unwrap_err();
        assert!(matches!(err, AnalysisError::ConflictingVariableType { .. }));
    }

    #[test]
    fn bare_super_redeclaration_does_not_change_implemented_in() {
        let env = env_from(
            "class A def f: () -> Integer end end \
             class B < A private def f: super end end",
        );
        let def = build_definition(&env, &TypeName::root("B"), Kind::Instance).unwrap();
        let f = def.methods.get("f").expect("f defined");
        assert_eq!(f.implemented_in, TypeName::root("A"));
        assert_eq!(f.visibility, Visibility::Private);
        assert_eq!(f.overloads.len(), 1);
    }

    #[test]
    fn inherited_generic_method_substitutes_the_superclass_type_argument() {
        let env = env_from(
            "class Box[T] def get: () -> T end end \
             class IntBox < Box[Integer] end",
        );
        let def = build_definition(&env, &TypeName::root("IntBox"), Kind::Instance).unwrap();
        let get = def.methods.get("get").expect("get defined");
        assert_eq!(get.overloads.len(), 1);
        assert_eq!(
            *get.overloads[0].fn_type.return_type,
            Type::ClassInstance(TypeName::root("Integer"), Vec::new())
        );
    }
}
