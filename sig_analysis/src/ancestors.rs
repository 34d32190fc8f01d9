use crate::context::Context;
use crate::environment::{ClassLikeFragment, Environment};
use crate::error::AnalysisError;
use crate::resolver::resolve_name;
use sig_syntax::members::MixinKind;
use sig_syntax::{Member, Type, TypeName};
use std::collections::HashSet;

/// Resolve an `include`/`extend`/`prepend` target, reporting the
/// mixin-specific `NoMixinFound` rather than the generic `NoTypeFound`
/// a bare [`resolve_name`] call would raise (spec §7).
fn resolve_mixin(env: &Environment, name: &TypeName, context: &Context) -> Result<TypeName, AnalysisError> {
    resolve_name(env, name, context, name.kind()).map_err(|e| match e {
        AnalysisError::NoTypeFound { name } => AnalysisError::NoMixinFound { name },
        other => other,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Instance,
    Singleton,
}

/// One node in a linearized ancestor chain (spec §4.4).
#[derive(Debug, Clone, PartialEq)]
pub enum Ancestor {
    Instance(TypeName, Vec<Type>),
    Singleton(TypeName),
    ExtensionInstance(TypeName, String, Vec<Type>),
    ExtensionSingleton(TypeName, String),
}

impl Ancestor {
    pub fn name(&self) -> &TypeName {
        match self {
            Ancestor::Instance(n, _) | Ancestor::ExtensionInstance(n, _, _) => n,
            Ancestor::Singleton(n) | Ancestor::ExtensionSingleton(n, _) => n,
        }
    }
}

fn object_name() -> TypeName {
    TypeName::root("Object")
}

/// The names already reachable by walking `Object`'s own explicit `<
/// Super` links (including `Object` itself), stopping at whatever class
/// has no explicit super of its own (e.g. `BasicObject`). The implicit
/// "no super declared ⇒ superclass is Object" fallback must not also
/// apply to any name in this set — otherwise the root of the hierarchy
/// (`BasicObject` in the bundled stdlib) would implicitly point back at
/// `Object`, which is already on the stack, and every query would fail
/// with a bogus `RecursiveAncestorError` (spec §4.4: "Cycle detection is
/// required").
fn root_chain_names(env: &Environment) -> HashSet<TypeName> {
    let mut seen = HashSet::new();
    let mut current = object_name();
    loop {
        if !seen.insert(current.clone()) {
            break;
        }
        let Some(entry) = env.lookup_class_like(&current) else {
            break;
        };
        let super_ref = entry.fragments.iter().find_map(|f| match &f.decl {
            ClassLikeFragment::Class(d) => Some((d.super_class.clone(), f.context.clone())),
            _ => None,
        });
        let Some((Some((super_name, _)), context)) = super_ref else {
            break;
        };
        match resolve_name(env, &super_name, &context, super_name.kind()) {
            Ok(resolved) => current = resolved,
            Err(_) => break,
        }
    }
    seen
}

/// Build the linearized ancestor chain for `(name, kind)` (spec §4.4).
pub fn build_ancestors(
    env: &Environment,
    name: &TypeName,
    kind: Kind,
) -> Result<Vec<Ancestor>, AnalysisError> {
    let root_chain = root_chain_names(env);
    let mut visiting = Vec::new();
    match kind {
        Kind::Instance => build_instance_chain(env, name, &[], &root_chain, &mut visiting),
        Kind::Singleton => build_singleton_chain(env, name, &root_chain, &mut visiting),
    }
}

fn build_instance_chain(
    env: &Environment,
    name: &TypeName,
    args: &[Type],
    root_chain: &HashSet<TypeName>,
    visiting: &mut Vec<TypeName>,
) -> Result<Vec<Ancestor>, AnalysisError> {
    if visiting.contains(name) {
        return Err(AnalysisError::RecursiveAncestor { name: name.clone() });
    }
    visiting.push(name.clone());

    let chain = if let Some(entry) = env.lookup_class_like(name) {
        let mut prepend_chain = Vec::new();
        let mut include_chain = Vec::new();
        let mut extension_ancestors = Vec::new();
        let mut super_ref: Option<(TypeName, Vec<Type>, Context)> = None;

        for fragment in &entry.fragments {
            if let ClassLikeFragment::Extension(ext) = &fragment.decl {
                extension_ancestors.push(Ancestor::ExtensionInstance(
                    name.clone(),
                    ext.extension_name.clone(),
                    Vec::new(),
                ));
                continue;
            }
            if let ClassLikeFragment::Class(d) = &fragment.decl {
                if super_ref.is_none() {
                    if let Some((sn, sa)) = &d.super_class {
                        super_ref = Some((sn.clone(), sa.clone(), fragment.context.clone()));
                    }
                }
            }
            for member in fragment.decl.members() {
                if let Member::Mixin(mx) = member {
                    match mx.kind {
                        MixinKind::Prepend => {
                            let resolved = resolve_mixin(env, &mx.name, &fragment.context)?;
                            prepend_chain.extend(build_instance_chain(
                                env, &resolved, &mx.args, root_chain, visiting,
                            )?);
                        }
                        MixinKind::Include => {
                            let resolved = resolve_mixin(env, &mx.name, &fragment.context)?;
                            include_chain.extend(build_instance_chain(
                                env, &resolved, &mx.args, root_chain, visiting,
                            )?);
                        }
                        MixinKind::Extend => {}
                    }
                }
            }
        }

        let mut result = Vec::new();
        result.extend(prepend_chain);
        result.push(Ancestor::Instance(name.clone(), args.to_vec()));
        result.extend(extension_ancestors);
        result.extend(include_chain);

        if let Some((super_name, super_args, ctx)) = super_ref {
            let resolved = resolve_name(env, &super_name, &ctx, super_name.kind())?;
            result.extend(build_instance_chain(
                env, &resolved, &super_args, root_chain, visiting,
            )?);
        } else if !entry.is_module() && !root_chain.contains(name) {
            if env.lookup_class_like(&object_name()).is_some() {
                result.extend(build_instance_chain(
                    env,
                    &object_name(),
                    &[],
                    root_chain,
                    visiting,
                )?);
            } else {
                result.push(Ancestor::Instance(object_name(), Vec::new()));
            }
        }
        result
    } else if let Some(iface) = env.lookup_interface(name) {
        let mut result = vec![Ancestor::Instance(name.clone(), args.to_vec())];
        for member in &iface.decl.members {
            if let Member::Mixin(mx) = member {
                let resolved = resolve_mixin(env, &mx.name, &iface.context)?;
                result.extend(build_instance_chain(
                    env, &resolved, &mx.args, root_chain, visiting,
                )?);
            }
        }
        result
    } else {
        visiting.pop();
        return Err(AnalysisError::NoSuperclassFound { name: name.clone() });
    };

    visiting.pop();
    Ok(chain)
}

fn build_singleton_chain(
    env: &Environment,
    name: &TypeName,
    root_chain: &HashSet<TypeName>,
    visiting: &mut Vec<TypeName>,
) -> Result<Vec<Ancestor>, AnalysisError> {
    if visiting.contains(name) {
        return Err(AnalysisError::RecursiveAncestor { name: name.clone() });
    }
    visiting.push(name.clone());

    let mut result = vec![Ancestor::Singleton(name.clone())];

    if let Some(entry) = env.lookup_class_like(name) {
        let mut extend_chain = Vec::new();
        let mut extension_ancestors = Vec::new();
        let mut super_ref: Option<(TypeName, Vec<Type>, Context)> = None;

        for fragment in &entry.fragments {
            if let ClassLikeFragment::Extension(ext) = &fragment.decl {
                extension_ancestors.push(Ancestor::ExtensionSingleton(
                    name.clone(),
                    ext.extension_name.clone(),
                ));
                continue;
            }
            if let ClassLikeFragment::Class(d) = &fragment.decl {
                if super_ref.is_none() {
                    if let Some((sn, sa)) = &d.super_class {
                        super_ref = Some((sn.clone(), sa.clone(), fragment.context.clone()));
                    }
                }
            }
            for member in fragment.decl.members() {
                if let Member::Mixin(mx) = member {
                    if mx.kind == MixinKind::Extend {
                        let resolved = resolve_mixin(env, &mx.name, &fragment.context)?;
                        extend_chain.extend(build_instance_chain(
                            env, &resolved, &mx.args, root_chain, visiting,
                        )?);
                    }
                }
            }
        }

        result.extend(extension_ancestors);
        result.extend(extend_chain);

        if let Some((super_name, _super_args, ctx)) = super_ref {
            let resolved = resolve_name(env, &super_name, &ctx, super_name.kind())?;
            result.extend(build_singleton_chain(env, &resolved, root_chain, visiting)?);
        } else if !root_chain.contains(name) {
            if env.lookup_class_like(&object_name()).is_some() {
                result.extend(build_singleton_chain(
                    env,
                    &object_name(),
                    root_chain,
                    visiting,
                )?);
            } else {
                result.push(Ancestor::Singleton(TypeName::root("Class")));
            }
        }
    }

    visiting.pop();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use pretty_assertions::assert_eq;
    use sig_parser::parse_signature_text;

    fn env_from(src: &str) -> Environment {
        let decls = parse_signature_text(src).unwrap();
        let mut env = Environment::new();
        assert!(env.insert_all(decls).is_empty());
        env
    }

    #[test]
    fn extension_ancestor_scenario() {
        let env = env_from("class C end extension C (Pathname) def path: -> String end end");
        let chain = build_ancestors(&env, &TypeName::root("C"), Kind::Instance).unwrap();
        assert_eq!(chain[0], Ancestor::Instance(TypeName::root("C"), Vec::new()));
        assert_eq!(
            chain[1],
            Ancestor::ExtensionInstance(TypeName::root("C"), "Pathname".to_string(), Vec::new())
        );
        assert_eq!(chain[2], Ancestor::Instance(TypeName::root("Object"), Vec::new()));
    }

    #[test]
    fn implicit_object_fallback_does_not_loop_back_through_basic_object() {
        let env = env_from(
            "class BasicObject end class Object < BasicObject end class Widget end",
        );

        let object_chain = build_ancestors(&env, &TypeName::root("Object"), Kind::Instance).unwrap();
        let object_names: Vec<_> = object_chain.iter().map(|a| a.name().simple_name.clone()).collect();
        assert_eq!(object_names, vec!["Object", "BasicObject"]);

        let basic_chain =
            build_ancestors(&env, &TypeName::root("BasicObject"), Kind::Instance).unwrap();
        assert_eq!(basic_chain, vec![Ancestor::Instance(TypeName::root("BasicObject"), Vec::new())]);

        let widget_chain = build_ancestors(&env, &TypeName::root("Widget"), Kind::Instance).unwrap();
        let widget_names: Vec<_> = widget_chain.iter().map(|a| a.name().simple_name.clone()).collect();
        assert_eq!(widget_names, vec!["Widget", "Object", "BasicObject"]);
    }

    #[test]
    fn cycle_is_rejected() {
        let env = env_from("class A < B end class B < A end");
        let err = build_ancestors(&env, &TypeName::root("A"), Kind::Instance).unwrap_err();
        assert!(matches!(err, AnalysisError::RecursiveAncestor { .. }));
    }

    #[test]
    fn prepend_precedes_class_include_follows() {
        let env = env_from(
            "module Pre end module Inc end class C prepend Pre include Inc end",
        );
        let chain = build_ancestors(&env, &TypeName::root("C"), Kind::Instance).unwrap();
        let names: Vec<_> = chain.iter().map(|a| a.name().simple_name.clone()).collect();
        let pre_idx = names.iter().position(|n| n == "Pre").unwrap();
        let c_idx = names.iter().position(|n| n == "C").unwrap();
        let inc_idx = names.iter().position(|n| n == "Inc").unwrap();
        assert!(pre_idx < c_idx);
        assert!(c_idx < inc_idx);
    }

    #[test]
    fn unresolved_include_is_no_mixin_found_not_no_type_found() {
        let env = env_from("class C include Missing end");
        let err = build_ancestors(&env, &TypeName::root("C"), Kind::Instance).unwrap_err();
        assert!(matches!(err, AnalysisError::NoMixinFound { .. }));
    }
}
