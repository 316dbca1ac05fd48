//! CLI module for jsonql
//!
//! Provides command-line interface for:
//! - query: One-shot statement execution
//! - shell: Line-oriented statement loop over stdin
//! - tables / create-table / drop-table / drop-database: table management
//! - insert / select: programmatic record access

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, Target};
pub use commands::{run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
