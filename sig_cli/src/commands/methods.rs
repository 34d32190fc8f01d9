use anyhow::Result;
use sig_analysis::{Kind, Session};
use sig_syntax::TypeName;

/// `methods [--instance|--singleton] [--[no-]inherit] TypeName` (spec §6).
pub fn run(session: &Session, name: &TypeName, singleton: bool, no_inherit: bool) -> Result<()> {
    let kind = if singleton { Kind::Singleton } else { Kind::Instance };
    let def = session.definition(name, kind)?;

    let mut entries: Vec<_> = def
        .methods
        .values()
        .filter(|m| !no_inherit || &m.implemented_in == name)
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    for entry in entries {
        println!(
            "{} ({}): {}",
            entry.name,
            entry.defined_in,
            crate::render::render_overloads(&entry.overloads)
        );
    }
    Ok(())
}
