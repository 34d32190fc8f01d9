use crate::ancestors::{build_ancestors, Ancestor, Kind};
use crate::context::Context;
use crate::environment::Environment;
use sig_syntax::{Type, TypeName};

/// Look up the type of a constant reference from `context` (spec §4.6):
/// try it absolute directly, then relative to each enclosing namespace
/// innermost-outward, then via the innermost enclosing class/module's
/// ancestor constants.
pub fn lookup_constant(env: &Environment, name: &TypeName, context: &Context) -> Option<Type> {
    if name.is_absolute() {
        return lookup_absolute(env, name);
    }

    for namespace in context.namespaces() {
        let candidate = name.with_namespace(namespace.join(&name.namespace));
        if let Some(ty) = lookup_absolute(env, &candidate) {
            return Some(ty);
        }
    }

    if let Some(innermost) = context.innermost() {
        if !innermost.is_root() {
            let owner_name = TypeName::new(
                innermost
                    .parent()
                    .unwrap_or_else(sig_syntax::Namespace::root),
                innermost.segments().last().cloned().unwrap_or_default(),
            );
            if let Ok(ancestors) = build_ancestors(env, &owner_name, Kind::Instance) {
                for ancestor in &ancestors {
                    if let Ancestor::Instance(ancestor_name, _) = ancestor {
                        let candidate = name.with_namespace(
                            ancestor_name
                                .namespace
                                .append(ancestor_name.simple_name.clone()),
                        );
                        if let Some(ty) = lookup_absolute(env, &candidate) {
                            return Some(ty);
                        }
                    }
                }
            }
        }
    }

    None
}

fn lookup_absolute(env: &Environment, name: &TypeName) -> Option<Type> {
    if let Some(entry) = env.lookup_constant(name) {
        return Some(entry.decl.ty.clone());
    }
    if env.lookup_class_like(name).is_some() {
        return Some(Type::ClassSingleton(name.clone()));
    }
    None
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
    fn absolute_constant_looked_up_directly() {
        let env = env_from("VERSION: String");
        let ty = lookup_constant(&env, &TypeName::bare("VERSION"), &Context::root());
        assert_eq!(ty, Some(Type::ClassInstance(TypeName::bare("String"), Vec::new())));
    }

    #[test]
    fn class_name_resolves_to_its_singleton_type() {
        let env = env_from("class Foo end");
        let ty = lookup_constant(&env, &TypeName::bare("Foo"), &Context::root());
        assert_eq!(ty, Some(Type::ClassSingleton(TypeName::root("Foo"))));
    }

    #[test]
    fn unknown_constant_is_none() {
        let env = env_from("class Foo end");
        assert!(lookup_constant(&env, &TypeName::bare("Missing"), &Context::root()).is_none());
    }
}
