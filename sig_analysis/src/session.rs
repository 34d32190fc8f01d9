use crate::ancestors::Kind;
use crate::definition::{build_definition, Definition};
use crate::environment::Environment;
use crate::error::AnalysisError;
use sig_syntax::TypeName;
use std::collections::HashMap;
use std::sync::Mutex;

/// Thread-safe memoization of built [`Definition`]s over one [`Environment`]
/// (spec §5: "if an embedder calls the builder from multiple threads
/// concurrently, it must either guard the memoization map with a mutex or
/// build definitions in a coordinator thread"). Grounded on the teacher's
/// `ArtifactStore` pattern (`framework/session.rs`), scoped down to this
/// one `(TypeName, Kind) -> Definition` cache instead of a general
/// artifact store keyed by arbitrary query type.
#[derive(Debug)]
pub struct Session {
    env: Environment,
    cache: Mutex<HashMap<(TypeName, Kind), Definition>>,
}

impl Session {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Return the memoized `Definition` for `(name, kind)`, building and
    /// caching it on first request.
    pub fn definition(&self, name: &TypeName, kind: Kind) -> Result<Definition, AnalysisError> {
        let key = (name.clone(), kind);
        {
            let cache = self.cache.lock().expect("definition cache poisoned");
            if let Some(def) = cache.get(&key) {
                log::trace!("definition cache hit for {name}");
                return Ok(def.clone());
            }
        }

        log::debug!("building definition for {name}");
        let def = build_definition(&self.env, name, kind)?;

        let mut cache = self.cache.lock().expect("definition cache poisoned");
        cache.entry(key).or_insert_with(|| def.clone());
        Ok(def)
    }

    /// Drop every memoized definition, e.g. after the environment's
    /// declarations have changed.
    pub fn invalidate(&self) {
        self.cache.lock().expect("definition cache poisoned").clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sig_parser::parse_signature_text;

    #[test]
    fn repeated_lookups_return_equivalent_definitions() {
        let decls = parse_signature_text("class A def f: () -> Integer end end").unwrap();
        let mut env = Environment::new();
        assert!(env.insert_all(decls).is_empty());
        let session = Session::new(env);

        let first = session.definition(&TypeName::root("A"), Kind::Instance).unwrap();
        let second = session.definition(&TypeName::root("A"), Kind::Instance).unwrap();
        assert_eq!(first.methods.len(), second.methods.len());
        assert!(first.methods.contains_key("f"));
    }
}
