use anyhow::{bail, Result};
use sig_analysis::{Kind, Session};
use sig_syntax::TypeName;

/// `method [--instance|--singleton] TypeName MethodName` (spec §6).
pub fn run(
    session: &Session,
    name: &TypeName,
    method_name: &str,
    singleton: bool,
) -> Result<()> {
    let kind = if singleton { Kind::Singleton } else { Kind::Instance };
    let def = session.definition(name, kind)?;

    let Some(entry) = def.methods.get(method_name) else {
        bail!("no method `{method_name}` on `{name}`");
    };

    println!("defined_in: {}", entry.defined_in);
    println!("implemented_in: {}", entry.implemented_in);
    println!("visibility: {:?}", entry.visibility);
    println!("overloads: {}", crate::render::render_overloads(&entry.overloads));
    Ok(())
}
