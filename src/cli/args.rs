//! CLI argument definitions using clap
//!
//! Commands:
//! - jsonql query <TEXT>...
//! - jsonql shell
//! - jsonql tables
//! - jsonql create-table <NAME> / drop-table <NAME>
//! - jsonql insert <TABLE>            (JSON object on stdin)
//! - jsonql select <TABLE> [--where FIELD=VALUE]...
//! - jsonql drop-database --yes

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// jsonql - a file-backed JSON record store with a SQL-like query interface
#[derive(Parser, Debug)]
#[command(name = "jsonql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the database lives
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Path to configuration file (defaults apply if it does not exist)
    #[arg(long, default_value = "./jsonql.json")]
    pub config: PathBuf,

    /// Database directory, overrides `data_dir` from the config file
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a single statement and exit
    Query {
        #[command(flatten)]
        target: Target,

        /// Statement text; multiple arguments are joined with spaces
        #[arg(required = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Read statements from stdin, one per line, and answer each
    Shell {
        #[command(flatten)]
        target: Target,
    },

    /// List tables
    Tables {
        #[command(flatten)]
        target: Target,
    },

    /// Create an empty table if it does not exist
    CreateTable {
        #[command(flatten)]
        target: Target,

        /// Table name (letters, digits and '_')
        name: String,
    },

    /// Remove a table and all its records
    DropTable {
        #[command(flatten)]
        target: Target,

        name: String,
    },

    /// Insert one JSON object read from stdin
    Insert {
        #[command(flatten)]
        target: Target,

        table: String,
    },

    /// Select records, optionally filtered by exact field matches
    Select {
        #[command(flatten)]
        target: Target,

        table: String,

        /// Exact match filter; the value is coerced like a query literal
        #[arg(long = "where", value_name = "FIELD=VALUE")]
        filters: Vec<String>,
    },

    /// Delete every table in the database
    DropDatabase {
        #[command(flatten)]
        target: Target,

        /// Confirm the irreversible deletion
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
