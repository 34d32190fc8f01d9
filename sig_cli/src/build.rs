//! Turns CLI configuration into a loaded, indexed [`sig_analysis::Session`],
//! surfacing every loader/parse/environment error along the way (spec §6:
//! "The loader calls the parser on each byte-string; parse errors surface
//! with file, line, column, and token description").

use crate::cli::Cli;
use crate::loader::Loader;
use anyhow::Result;
use sig_analysis::{Environment, Session};
use sig_syntax::Decl;

pub fn loader_from_cli(cli: &Cli) -> Loader {
    let mut loader = Loader::new();
    if cli.no_stdlib {
        loader.no_builtin();
    }
    for library in &cli.libraries {
        loader.add_library(library.clone());
    }
    for dir in &cli.include_dirs {
        loader.add_path(dir.clone());
    }
    loader
}

/// Load every configured source and parse it, without indexing it into an
/// environment. Used directly by the `ast` command, which wants the raw
/// declaration tree rather than a resolved/folded view.
pub fn load_decls(cli: &Cli) -> Result<(Vec<Decl>, Vec<String>)> {
    let loader = loader_from_cli(cli);
    let files = loader.load_all()?;

    let mut errors = Vec::new();
    let mut decls = Vec::new();

    for (sub_path, contents) in &files {
        match sig_parser::parse_signature_text(contents) {
            Ok(mut file_decls) => decls.append(&mut file_decls),
            Err(sig_parser::SignatureError::Syntax(msg)) => {
                errors.push(format!("{}: syntax error\n{}", sub_path.display(), msg));
            }
            Err(sig_parser::SignatureError::Semantics(errs)) => {
                for e in errs {
                    errors.push(format!("{}: {}", sub_path.display(), e));
                }
            }
        }
    }

    Ok((decls, errors))
}

/// Load every configured source, parse it, and index it into one
/// [`Session`]. Returns the session plus every error message collected
/// along the way (parse failures are reported per file and do not stop
/// the remaining files from loading).
pub fn build_session(cli: &Cli) -> Result<(Session, Vec<String>)> {
    let (decls, mut errors) = load_decls(cli)?;
    let mut env = Environment::new();
    for err in env.insert_all(decls) {
        errors.push(format!("{} [{}]", err, err.code()));
    }
    Ok((Session::new(env), errors))
}
