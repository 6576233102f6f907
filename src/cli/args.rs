//! CLI argument definitions using clap
//!
//! Commands:
//! - quilldb exec [--config <path> | --data-dir <dir>]
//! - quilldb truncate <collection> [--config <path> | --data-dir <dir>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// quilldb - file-backed JSON record store
#[derive(Parser, Debug)]
#[command(name = "quilldb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where to find collections
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Path to a JSON configuration file; overrides --data-dir
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding collection files
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute one JSON request read from stdin
    Exec {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Empty a collection
    Truncate {
        /// Collection name
        collection: String,

        #[command(flatten)]
        store: StoreArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
