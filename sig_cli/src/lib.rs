//! sig_cli crate
//!
//! The `sigil` binary: the CLI external collaborator of spec §6, wrapping
//! the `sig_analysis`/`sig_parser` core with argument parsing, a
//! filesystem-only loader stand-in, logging, and human-readable output.

pub mod build;
pub mod cli;
pub mod commands;
pub mod loader;
pub mod names;
pub mod render;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};

/// Parse arguments, configure logging, and dispatch to the requested
/// subcommand. Returns the process exit code (spec §6: "Exit 0 on success,
/// 1 on failure").
pub fn run() -> Result<i32> {
    let os_args = std::env::args_os();
    let all_args = argfile::expand_args_from(os_args, argfile::parse_fromfile, argfile::PREFIX)?;
    let cli = Cli::parse_from(all_args);
    init_logging(&cli)?;

    let exit_code = match &cli.command {
        Command::Version => {
            commands::version::run();
            0
        }
        Command::Paths => {
            let loader = build::loader_from_cli(&cli);
            commands::paths::run(&loader);
            0
        }
        Command::Parse { files } => {
            let had_errors = commands::parse::run(files)?;
            i32::from(had_errors)
        }
        Command::Ast { patterns } => {
            let (decls, errors) = build::load_decls(&cli)?;
            report_errors(&errors);
            commands::ast::run(&decls, patterns)?;
            i32::from(!errors.is_empty())
        }
        Command::Validate => {
            let (session, errors) = build::build_session(&cli)?;
            report_errors(&errors);
            let has_validator_errors = commands::validate::run(session.environment());
            i32::from(!errors.is_empty() || has_validator_errors)
        }
        Command::List {
            class,
            module,
            interface,
        } => {
            let (session, errors) = build::build_session(&cli)?;
            report_errors(&errors);
            commands::list::run(session.environment(), *class, *module, *interface);
            i32::from(!errors.is_empty())
        }
        Command::Ancestors { instance: _, singleton, type_name } => {
            let (session, errors) = build::build_session(&cli)?;
            report_errors(&errors);
            let name = names::parse_type_name(type_name);
            commands::ancestors::run(session.environment(), &name, *singleton)?;
            i32::from(!errors.is_empty())
        }
        Command::Methods {
            instance: _,
            singleton,
            no_inherit,
            type_name,
        } => {
            let (session, errors) = build::build_session(&cli)?;
            report_errors(&errors);
            let name = names::parse_type_name(type_name);
            commands::methods::run(&session, &name, *singleton, *no_inherit)?;
            i32::from(!errors.is_empty())
        }
        Command::Method {
            instance: _,
            singleton,
            type_name,
            method_name,
        } => {
            let (session, errors) = build::build_session(&cli)?;
            report_errors(&errors);
            let name = names::parse_type_name(type_name);
            commands::method::run(&session, &name, method_name, *singleton)?;
            i32::from(!errors.is_empty())
        }
        Command::Constant { context, name } => {
            let (session, errors) = build::build_session(&cli)?;
            report_errors(&errors);
            let type_name = names::parse_type_name(name);
            let ctx = names::parse_context(context.as_deref());
            commands::constant::run(session.environment(), &type_name, &ctx);
            i32::from(!errors.is_empty())
        }
    };

    Ok(exit_code)
}

fn report_errors(errors: &[String]) {
    for error in errors {
        log::error!("{error}");
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or(cli.log_level.clone());
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = &cli.log_output {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().ok();
    Ok(())
}
