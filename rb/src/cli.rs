//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rb - host for the render bridge exports
#[derive(Parser)]
#[command(
    name = "rb",
    version,
    about = "Call render bridge exports the way a host would",
    after_help = "Logs are written to stderr; set RUST_LOG for finer control"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Invoke an export and print its HTML
    Call {
        /// Export name (e.g. renderIndex)
        #[arg(value_name = "EXPORT")]
        export: String,

        /// Host arguments: undefined, null, true/false, numbers, or strings
        #[arg(value_name = "ARGS", allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List registered exports
    Exports,
}
