//! CLI module for quilldb
//!
//! Provides a command-line surface over the store:
//! - exec: run one JSON request from stdin
//! - truncate: empty a collection

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, StoreArgs};
pub use commands::{exec, execute, run, run_command, truncate, Action, Request};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
