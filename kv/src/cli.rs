//! CLI argument parsing for kvstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kv")]
#[command(author, version, about = "Inspect and edit the render bridge KV store", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the store document path
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value stored under a key (empty when absent)
    Get {
        #[arg(required = true)]
        key: String,
    },

    /// Store a value under a key
    Set {
        #[arg(required = true)]
        key: String,

        #[arg(required = true)]
        value: String,
    },

    /// List all keys
    List,
}
