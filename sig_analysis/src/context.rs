use sig_syntax::Namespace;

/// The lexical context of a declaration fragment or a type reference: the
/// enclosing namespaces, innermost first, e.g. `[::A::B, ::A, ::]` (spec
/// §3 Data Model, "Environment... records the lexical context"; spec
/// GLOSSARY, "Context").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Context(Vec<Namespace>);

impl Context {
    /// The root context: just the absolute root namespace.
    pub fn root() -> Self {
        Self(vec![Namespace::root()])
    }

    /// Build the context for code written directly inside `namespace`,
    /// listing `namespace` itself and every enclosing namespace up to the
    /// root (spec §3: "ascend (yields self, parent, ... up to root)").
    pub fn enclosing(namespace: &Namespace) -> Self {
        Self(namespace.ascend().collect())
    }

    pub fn namespaces(&self) -> &[Namespace] {
        &self.0
    }

    pub fn innermost(&self) -> Option<&Namespace> {
        self.0.first()
    }

    /// Descend one level further in, for code nested directly inside a
    /// declaration at `namespace` (itself already resolved to absolute).
    pub fn push(&self, namespace: Namespace) -> Self {
        let mut v = vec![namespace];
        v.extend(self.0.iter().cloned());
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_lists_innermost_first() {
        let ns = Namespace::new(vec!["A".into(), "B".into()], true);
        let ctx = Context::enclosing(&ns);
        assert_eq!(ctx.namespaces().len(), 3);
        assert!(ctx.innermost().unwrap().is_absolute());
        assert_eq!(ctx.namespaces().last().unwrap(), &Namespace::root());
    }
}
