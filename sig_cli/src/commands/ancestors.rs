use anyhow::Result;
use sig_analysis::{build_ancestors, Ancestor, Kind};
use sig_syntax::TypeName;

/// `ancestors [--instance|--singleton] TypeName` (spec §6).
pub fn run(env: &sig_analysis::Environment, name: &TypeName, singleton: bool) -> Result<()> {
    let kind = if singleton { Kind::Singleton } else { Kind::Instance };
    let chain = build_ancestors(env, name, kind)?;
    for ancestor in &chain {
        println!("{}", render_ancestor(ancestor));
    }
    Ok(())
}

fn render_ancestor(ancestor: &Ancestor) -> String {
    match ancestor {
        Ancestor::Instance(name, args) => format!("{name}{}", render_args(args)),
        Ancestor::Singleton(name) => format!("singleton({name})"),
        Ancestor::ExtensionInstance(name, ext, args) => {
            format!("{name}{} ({ext})", render_args(args))
        }
        Ancestor::ExtensionSingleton(name, ext) => format!("singleton({name}) ({ext})"),
    }
}

fn render_args(args: &[sig_syntax::Type]) -> String {
    if args.is_empty() {
        String::new()
    } else {
        format!(
            "[{}]",
            args.iter()
                .map(crate::render::render_type)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
