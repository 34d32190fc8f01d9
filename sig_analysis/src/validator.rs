use crate::context::Context;
use crate::diagnostics::{Diagnostic, DiagnosticCollection};
use crate::environment::{ClassLikeEntry, ClassLikeFragment, Environment};
use crate::error::AnalysisError;
use crate::resolver::resolve_name;
use sig_syntax::{Location, Member, NameKind, Type, TypeName};
use std::collections::HashSet;

/// Walk every declared type reference in `env`, checking that it resolves
/// and that its arity matches the target's declared type parameters, plus
/// a self-type sanity check on modules (spec §4.7).
pub fn validate(env: &Environment) -> DiagnosticCollection {
    let mut diagnostics = DiagnosticCollection::new();

    for entry in env.class_decls.values() {
        validate_class_like(env, entry, &mut diagnostics);
    }
    for iface in env.interface_decls.values() {
        for member in &iface.decl.members {
            validate_member(env, member, &iface.context, &mut diagnostics);
        }
    }
    for (name, alias) in env.alias_decls.iter() {
        check_type(env, &alias.decl.ty, &alias.context, alias.decl.location, &mut diagnostics);
        let mut visited = HashSet::new();
        visited.insert(name.clone());
        if alias_cycle_reaches(env, name, name, &mut visited) {
            diagnostics.add(Diagnostic::from_error(
                &AnalysisError::RecursiveAliasDefinition { name: name.clone() },
                alias.decl.location,
            ));
        }
    }
    for constant in env.constant_decls.values() {
        check_type(
            env,
            &constant.decl.ty,
            &constant.context,
            constant.decl.location,
            &mut diagnostics,
        );
    }
    for global in env.global_decls.values() {
        check_type(env, &global.decl.ty, &global.context, global.decl.location, &mut diagnostics);
    }

    diagnostics
}

fn validate_class_like(env: &Environment, entry: &ClassLikeEntry, diagnostics: &mut DiagnosticCollection) {
    for fragment in &entry.fragments {
        match &fragment.decl {
            ClassLikeFragment::Class(d) => {
                if let Some((super_name, args)) = &d.super_class {
                    check_name_and_args(
                        env,
                        super_name,
                        args,
                        &fragment.context,
                        d.location,
                        diagnostics,
                    );
                }
                for member in &d.members {
                    validate_member(env, member, &fragment.context, diagnostics);
                }
            }
            ClassLikeFragment::Module(d) => {
                for self_type in &d.self_types {
                    check_type(env, self_type, &fragment.context, d.location, diagnostics);
                    if !is_valid_self_type(self_type) {
                        diagnostics.add(Diagnostic::from_error(
                            &AnalysisError::InvalidSelfType { name: d.name.clone() },
                            d.location,
                        ));
                    }
                }
                for member in &d.members {
                    validate_member(env, member, &fragment.context, diagnostics);
                }
            }
            ClassLikeFragment::Extension(d) => {
                for member in &d.members {
                    validate_member(env, member, &fragment.context, diagnostics);
                }
            }
        }
    }
}

fn is_valid_self_type(ty: &Type) -> bool {
    matches!(ty, Type::ClassInstance(_, _) | Type::Interface(_, _))
}

fn validate_member(env: &Environment, member: &Member, context: &Context, diagnostics: &mut DiagnosticCollection) {
    match member {
        Member::Method(m) => {
            for overload in &m.overloads {
                if let sig_syntax::Overload::Method(mt) = overload {
                    mt.walk(&mut |ty| check_type(env, ty, context, m.location, diagnostics));
                }
            }
        }
        Member::Mixin(mx) => {
            match resolve_name(env, &mx.name, context, mx.name.kind()) {
                Ok(resolved) => check_resolved_arity(env, &resolved, &mx.args, context, mx.location, diagnostics),
                Err(AnalysisError::NoTypeFound { name }) => diagnostics.add(Diagnostic::from_error(
                    &AnalysisError::NoMixinFound { name },
                    mx.location,
                )),
                Err(e) => diagnostics.add(Diagnostic::from_error(&e, mx.location)),
            }
        }
        Member::Attribute(attr) => {
            check_type(env, &attr.ty, context, attr.location, diagnostics);
        }
        Member::InstanceVariable { ty, location, .. }
        | Member::ClassInstanceVariable { ty, location, .. }
        | Member::ClassVariable { ty, location, .. } => {
            check_type(env, ty, context, *location, diagnostics);
        }
        Member::Alias { .. } | Member::VisibilityMarker(_) | Member::Nested(_) => {}
    }
}

fn check_type(env: &Environment, ty: &Type, context: &Context, location: Location, diagnostics: &mut DiagnosticCollection) {
    ty.walk(&mut |t| {
        if let Some(name) = t.applied_name() {
            check_name_and_args(env, name, t.applied_args(), context, location, diagnostics);
        }
    });
}

fn check_name_and_args(
    env: &Environment,
    name: &sig_syntax::TypeName,
    args: &[Type],
    context: &Context,
    location: Location,
    diagnostics: &mut DiagnosticCollection,
) {
    match resolve_name(env, name, context, name.kind()) {
        Ok(resolved_name) => check_resolved_arity(env, &resolved_name, args, context, location, diagnostics),
        Err(e) => diagnostics.add(Diagnostic::from_error(&e, location)),
    }
}

/// Check arity against an already-resolved name and recurse into its type
/// arguments. Split out of [`check_name_and_args`] so callers that need a
/// different error on resolution failure (e.g. `NoMixinFound` instead of
/// the generic `NoTypeFound`) can resolve themselves and still share this
/// tail.
fn check_resolved_arity(
    env: &Environment,
    resolved_name: &sig_syntax::TypeName,
    args: &[Type],
    context: &Context,
    location: Location,
    diagnostics: &mut DiagnosticCollection,
) {
    if let Some(expected) = declared_arity(env, resolved_name) {
        if expected != args.len() {
            diagnostics.add(Diagnostic::from_error(
                &AnalysisError::GenericParameterMismatch {
                    name: resolved_name.clone(),
                    expected,
                    found: args.len(),
                },
                location,
            ));
        }
    }
    for arg in args {
        check_type(env, arg, context, location, diagnostics);
    }
}

/// Every `Alias(name)` reference reachable inside `ty`, unresolved (spec
/// §7: `RecursiveAliasDefinitionError`, raised when an alias's body
/// eventually refers back to itself through a chain of other aliases).
fn referenced_aliases(ty: &Type) -> Vec<TypeName> {
    let mut refs = Vec::new();
    ty.walk(&mut |t| {
        if let Type::Alias(n) = t {
            refs.push(n.clone());
        }
    });
    refs
}

/// `true` if following `current`'s alias body (and the aliases it in turn
/// refers to) ever reaches back to `start`.
fn alias_cycle_reaches(
    env: &Environment,
    start: &TypeName,
    current: &TypeName,
    visited: &mut HashSet<TypeName>,
) -> bool {
    let Some(entry) = env.lookup_alias(current) else {
        return false;
    };
    for referenced in referenced_aliases(&entry.decl.ty) {
        let Ok(resolved) = resolve_name(env, &referenced, &entry.context, NameKind::Alias) else {
            continue;
        };
        if &resolved == start {
            return true;
        }
        if visited.insert(resolved.clone()) && alias_cycle_reaches(env, start, &resolved, visited) {
            return true;
        }
    }
    false
}

fn declared_arity(env: &Environment, name: &sig_syntax::TypeName) -> Option<usize> {
    if let Some(entry) = env.lookup_class_like(name) {
        entry
            .fragments
            .first()
            .map(|f| f.decl.type_params().len())
    } else if let Some(iface) = env.lookup_interface(name) {
        Some(iface.decl.type_params.len())
    } else if env.lookup_alias(name).is_some() {
        None
    } else {
        None
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
    fn unresolved_reference_is_reported() {
        let env = env_from("class C def f: () -> Missing end end");
        let diagnostics = validate(&env);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn arity_mismatch_is_reported() {
        let env = env_from("class Box[T] end class C def f: () -> Box[Integer, String] end end");
        let diagnostics = validate(&env);
        assert!(diagnostics.errors().any(|d| d.code == "ENV003"));
    }

    #[test]
    fn well_formed_signature_has_no_errors() {
        let env = env_from("class C def f: () -> Integer end end");
        let diagnostics = validate(&env);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn unresolved_mixin_is_reported_as_no_mixin_found() {
        let env = env_from("class C include Missing end");
        let diagnostics = validate(&env);
        assert!(diagnostics.errors().any(|d| d.code == "RES004"));
    }

    #[test]
    fn direct_alias_cycle_is_reported() {
        let env = env_from("type foo = foo");
        let diagnostics = validate(&env);
        assert!(diagnostics.errors().any(|d| d.code == "RES006"));
    }

    #[test]
    fn indirect_alias_cycle_is_reported() {
        let env = env_from("type a = b type b = a");
        let diagnostics = validate(&env);
        assert!(diagnostics.errors().any(|d| d.code == "RES006"));
    }

    #[test]
    fn acyclic_alias_chain_has_no_errors() {
        let env = env_from("type a = b type b = any");
        let diagnostics = validate(&env);
        assert!(!diagnostics.has_errors());
    }
}
