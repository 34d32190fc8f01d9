//! The `sigil` command surface (spec §6 "CLI surface"), following the same
//! `#[derive(Parser)]` / `#[derive(Subcommand)]` shape the wider example
//! pack uses for its own `clap`-based tools (e.g. `flake8_to_ruff`'s
//! `Args`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sigil", version, about = "Signature file tooling")]
pub struct Cli {
    /// Add a library to the load path (spec §6: `-r LIBRARY`).
    #[arg(short = 'r', long = "library", global = true, value_name = "LIBRARY")]
    pub libraries: Vec<String>,

    /// Add a directory to the load path (spec §6: `-I DIR`).
    #[arg(short = 'I', long = "include", global = true, value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Don't load the bundled standard-library signatures.
    #[arg(long = "no-stdlib", global = true)]
    pub no_stdlib: bool,

    /// Logging verbosity passed straight to `env_logger`'s filter.
    #[arg(long = "log-level", global = true, default_value = "info")]
    pub log_level: String,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-output", global = true, value_name = "FILE")]
    pub log_output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every declared class, module, or interface.
    List {
        #[arg(long)]
        class: bool,
        #[arg(long)]
        module: bool,
        #[arg(long)]
        interface: bool,
    },
    /// Print the linearized ancestor chain of a type.
    Ancestors {
        #[arg(long, conflicts_with = "singleton")]
        instance: bool,
        #[arg(long)]
        singleton: bool,
        type_name: String,
    },
    /// Print the full (or own-only) method table of a type.
    Methods {
        #[arg(long, conflicts_with = "singleton")]
        instance: bool,
        #[arg(long)]
        singleton: bool,
        /// Only show methods defined directly on this type, not inherited.
        #[arg(long = "no-inherit")]
        no_inherit: bool,
        type_name: String,
    },
    /// Print one method's resolved overload list.
    Method {
        #[arg(long, conflicts_with = "singleton")]
        instance: bool,
        #[arg(long)]
        singleton: bool,
        type_name: String,
        method_name: String,
    },
    /// Resolve a constant reference from a namespace context.
    Constant {
        #[arg(long = "context", value_name = "NS")]
        context: Option<String>,
        name: String,
    },
    /// Validate every loaded declaration; exits 1 if any errors are found.
    Validate,
    /// Print the configured source search paths.
    Paths,
    /// Parse one or more files without indexing them, reporting syntax errors.
    Parse { files: Vec<PathBuf> },
    /// Emit declarations as a JSON tree, optionally filtered by name pattern.
    Ast { patterns: Vec<String> },
    /// Print the tool version.
    Version,
}
