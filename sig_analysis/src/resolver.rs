use crate::context::Context;
use crate::environment::Environment;
use crate::error::AnalysisError;
use sig_syntax::{NameKind, Type, TypeName};

/// Turn every relative type reference in `ty` into an absolute one,
/// looked up against `context` (spec §4.3: "For each type reference T...
/// resolve as follows").
pub fn resolve_type(env: &Environment, ty: &Type, context: &Context) -> Result<Type, AnalysisError> {
    match ty {
        Type::ClassInstance(name, args) => {
            let resolved = resolve_name(env, name, context, NameKind::ClassLike)?;
            let args = args
                .iter()
                .map(|a| resolve_type(env, a, context))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Type::ClassInstance(resolved, args))
        }
        Type::ClassSingleton(name) => {
            let resolved = resolve_name(env, name, context, NameKind::ClassLike)?;
            Ok(Type::ClassSingleton(resolved))
        }
        Type::Interface(name, args) => {
            let resolved = resolve_name(env, name, context, NameKind::Interface)?;
            let args = args
                .iter()
                .map(|a| resolve_type(env, a, context))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Type::Interface(resolved, args))
        }
        Type::Alias(name) => {
            let resolved = resolve_name(env, name, context, NameKind::Alias)?;
            Ok(Type::Alias(resolved))
        }
        Type::Union(ts) => Ok(Type::Union(resolve_all(env, ts, context)?)),
        Type::Intersection(ts) => Ok(Type::Intersection(resolve_all(env, ts, context)?)),
        Type::Tuple(ts) => Ok(Type::Tuple(resolve_all(env, ts, context)?)),
        Type::Optional(t) => Ok(Type::Optional(Box::new(resolve_type(env, t, context)?))),
        Type::Record(fields) => {
            let mut out = std::collections::BTreeMap::new();
            for (name, t) in fields {
                out.insert(name.clone(), resolve_type(env, t, context)?);
            }
            Ok(Type::Record(out))
        }
        Type::Proc(ft) => {
            let mut ft = (**ft).clone();
            resolve_function_type(env, &mut ft, context)?;
            Ok(Type::Proc(Box::new(ft)))
        }
        other => Ok(other.clone()),
    }
}

fn resolve_all(env: &Environment, ts: &[Type], context: &Context) -> Result<Vec<Type>, AnalysisError> {
    ts.iter().map(|t| resolve_type(env, t, context)).collect()
}

fn resolve_function_type(
    env: &Environment,
    ft: &mut sig_syntax::FunctionType,
    context: &Context,
) -> Result<(), AnalysisError> {
    for p in ft
        .required_positionals
        .iter_mut()
        .chain(ft.optional_positionals.iter_mut())
        .chain(ft.trailing_positionals.iter_mut())
        .chain(ft.rest_positional.iter_mut())
        .chain(ft.rest_keywords.iter_mut())
    {
        p.ty = resolve_type(env, &p.ty, context)?;
    }
    for p in ft
        .required_keywords
        .values_mut()
        .chain(ft.optional_keywords.values_mut())
    {
        p.ty = resolve_type(env, &p.ty, context)?;
    }
    *ft.return_type = resolve_type(env, &ft.return_type, context)?;
    Ok(())
}

/// Resolve a single `TypeName` reference to its absolute form (spec §4.3).
pub fn resolve_name(
    env: &Environment,
    name: &TypeName,
    context: &Context,
    expected_kind: NameKind,
) -> Result<TypeName, AnalysisError> {
    let resolved = if name.is_absolute() {
        if !env.contains(name) {
            return Err(AnalysisError::NoTypeFound { name: name.clone() });
        }
        name.clone()
    } else {
        context
            .namespaces()
            .iter()
            .map(|ns| name.with_namespace(ns.join(&name.namespace)))
            .find(|candidate| env.contains(candidate))
            .ok_or_else(|| AnalysisError::NoTypeFound { name: name.clone() })?
    };

    let found_kind = if env.lookup_interface(&resolved).is_some() {
        NameKind::Interface
    } else if env.lookup_alias(&resolved).is_some() {
        NameKind::Alias
    } else {
        NameKind::ClassLike
    };

    if found_kind != expected_kind {
        return Err(AnalysisError::InvalidTypeApplication {
            name: resolved,
            expected_kind: kind_label(expected_kind),
        });
    }

    Ok(resolved)
}

fn kind_label(kind: NameKind) -> &'static str {
    match kind {
        NameKind::ClassLike => "class",
        NameKind::Interface => "interface",
        NameKind::Alias => "alias",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use sig_parser::parse_signature_text;

    fn env_from(src: &str) -> Environment {
        let decls = parse_signature_text(src).unwrap();
        let mut env = Environment::new();
        assert!(env.insert_all(decls).is_empty());
        env
    }

    #[test]
    fn resolves_relative_name_against_innermost_context() {
        let env = env_from("class A end");
        let name = TypeName::bare("A");
        let resolved =
            resolve_name(&env, &name, &Context::enclosing(&sig_syntax::Namespace::root()), NameKind::ClassLike)
                .unwrap();
        assert_eq!(resolved, TypeName::root("A"));
    }

    #[test]
    fn rejects_missing_name() {
        let env = env_from("class A end");
        let name = TypeName::bare("Missing");
        let err = resolve_name(&env, &name, &Context::root(), NameKind::ClassLike).unwrap_err();
        assert!(matches!(err, AnalysisError::NoTypeFound { .. }));
    }

    #[test]
    fn rejects_kind_mismatch() {
        let env = env_from("class A end");
        let name = TypeName::bare("A");
        let err =
            resolve_name(&env, &name, &Context::root(), NameKind::Interface).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidTypeApplication { .. }));
    }
}
