use anyhow::{Context as _, Result};
use std::path::Path;

/// `parse FILE…` (spec §6): parse each file in isolation, reporting syntax
/// errors without building an environment.
pub fn run(files: &[std::path::PathBuf]) -> Result<bool> {
    let mut had_errors = false;
    for file in files {
        had_errors |= parse_one(file)?;
    }
    Ok(had_errors)
}

fn parse_one(file: &Path) -> Result<bool> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    match sig_parser::parse_signature_text(&contents) {
        Ok(decls) => {
            println!("{}: {} declaration(s)", file.display(), decls.len());
            Ok(false)
        }
        Err(sig_parser::SignatureError::Syntax(msg)) => {
            println!("{}: syntax error\n{}", file.display(), msg);
            Ok(true)
        }
        Err(sig_parser::SignatureError::Semantics(errs)) => {
            for e in &errs {
                println!("{}: {}", file.display(), e);
            }
            Ok(true)
        }
    }
}
