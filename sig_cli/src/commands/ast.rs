use sig_syntax::Decl;

fn decl_name(decl: &Decl) -> String {
    match decl {
        Decl::Class(d) => d.name.to_string(),
        Decl::Module(d) => d.name.to_string(),
        Decl::Interface(d) => d.name.to_string(),
        Decl::Constant(d) => d.name.to_string(),
        Decl::Global(d) => d.name.clone(),
        Decl::Alias(d) => d.name.to_string(),
        Decl::Extension(d) => d.name.to_string(),
    }
}

/// `ast [PATTERN…]` (spec §6): emit declarations as a JSON tree, optionally
/// filtered to those whose name contains one of the given substrings.
pub fn run(decls: &[Decl], patterns: &[String]) -> anyhow::Result<()> {
    let filtered: Vec<&Decl> = if patterns.is_empty() {
        decls.iter().collect()
    } else {
        decls
            .iter()
            .filter(|d| {
                let name = decl_name(d);
                patterns.iter().any(|p| name.contains(p.as_str()))
            })
            .collect()
    };
    println!("{}", serde_json::to_string_pretty(&filtered)?);
    Ok(())
}
