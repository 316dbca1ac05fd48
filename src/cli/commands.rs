//! CLI command implementations
//!
//! Each command loads configuration, opens the database and writes exactly
//! one JSON envelope per response to stdout. `shell` keeps answering after
//! a failed statement; every other command stops at the first error.

use serde_json::{json, Value};

use super::args::{Command, Target};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, read_statements, write_error, write_response};
use crate::connection::Connection;
use crate::observability::Logger;
use crate::query::coerce::coerce_quoted;
use crate::store::Filter;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Query { target, text } => query(&target, &text.join(" ")),
        Command::Shell { target } => shell(&target),
        Command::Tables { target } => tables(&target),
        Command::CreateTable { target, name } => create_table(&target, &name),
        Command::DropTable { target, name } => drop_table(&target, &name),
        Command::Insert { target, table } => insert(&target, &table),
        Command::Select {
            target,
            table,
            filters,
        } => select(&target, &table, &filters),
        Command::DropDatabase { target, yes } => drop_database(&target, yes),
    }
}

/// Load config, apply the `--db` override and the log level, open the database
pub fn open(target: &Target) -> CliResult<Connection> {
    let config = Config::load_or_default(&target.config)?.with_data_dir(target.db.as_deref());
    Logger::set_min_severity(config.severity()?);
    Ok(Connection::open(config.data_path(), config.store_options())?)
}

/// Execute one statement
pub fn query(target: &Target, text: &str) -> CliResult<()> {
    let conn = open(target)?;
    let output = conn.query(text)?;
    write_response(output.to_json())
}

/// Answer statements read from stdin until EOF, `exit` or `quit`
pub fn shell(target: &Target) -> CliResult<()> {
    let conn = open(target)?;

    for statement in read_statements() {
        let statement = statement?;
        let trimmed = statement.trim();
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }

        match conn.query(trimmed) {
            Ok(output) => write_response(output.to_json())?,
            Err(e) => write_error(e.code(), &e.to_string())?,
        }
    }
    Ok(())
}

/// List tables
pub fn tables(target: &Target) -> CliResult<()> {
    let conn = open(target)?;
    write_response(json!(conn.list_tables()?))
}

pub fn create_table(target: &Target, name: &str) -> CliResult<()> {
    let conn = open(target)?;
    conn.create_table(name)?;
    write_response(json!({"created": name}))
}

pub fn drop_table(target: &Target, name: &str) -> CliResult<()> {
    let conn = open(target)?;
    conn.drop_table(name)?;
    write_response(json!({"dropped": name}))
}

/// Insert the JSON object read from stdin
pub fn insert(target: &Target, table: &str) -> CliResult<()> {
    let record = match read_request()? {
        Value::Object(record) => record,
        other => {
            return Err(CliError::usage(format!(
                "expected a JSON object on stdin, got {}",
                json_kind(&other)
            )))
        }
    };

    let conn = open(target)?;
    let id = conn.insert(table, record)?;
    write_response(json!({"status": "inserted", "id": id}))
}

/// Select with `FIELD=VALUE` filters
pub fn select(target: &Target, table: &str, filters: &[String]) -> CliResult<()> {
    let filter = parse_filters(filters)?;
    let conn = open(target)?;
    let rows = conn.select(table, filter.as_ref())?;
    write_response(Value::Array(rows.into_iter().map(Value::Object).collect()))
}

pub fn drop_database(target: &Target, confirmed: bool) -> CliResult<()> {
    if !confirmed {
        return Err(CliError::usage(
            "refusing to drop database without --yes",
        ));
    }
    let conn = open(target)?;
    conn.drop_database()?;
    write_response(json!({"dropped": conn.path().display().to_string()}))
}

/// Parses `FIELD=VALUE` pairs; values are coerced like query literals.
fn parse_filters(filters: &[String]) -> CliResult<Option<Filter>> {
    if filters.is_empty() {
        return Ok(None);
    }

    let mut filter = Filter::new();
    for pair in filters {
        let (field, value) = pair
            .split_once('=')
            .ok_or_else(|| CliError::usage(format!("expected FIELD=VALUE, got '{}'", pair)))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(CliError::usage(format!("missing field name in '{}'", pair)));
        }
        filter.insert(field.to_string(), coerce_quoted(value.trim()));
    }
    Ok(Some(filter))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
