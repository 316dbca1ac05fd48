//! Query results
//!
//! A query either yields rows or a status descriptor. "Not found"
//! conditions are results, not errors:
//!
//! | Case | Rendered JSON |
//! |------|---------------|
//! | SELECT, missing table | `[{"error": "Table 't' does not exist"}]` |
//! | INSERT | `{"status": "inserted", "id": 1}` |
//! | UPDATE/DELETE, matches | `{"status": "updated", "rows": 2}` |
//! | UPDATE/DELETE, no match | `{"status": "no rows updated", "rows": 0}` |
//! | UPDATE/DELETE, missing table | `{"error": "Table 't' does not exist"}` |

use serde_json::{json, Value};

use crate::store::Record;

/// Outcome of a write statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Inserted { id: u64 },
    Updated { rows: usize },
    Deleted { rows: usize },
    /// UPDATE or DELETE against a table with no snapshot file
    TableMissing { table: String },
}

impl Status {
    /// Rows changed by the statement (1 for an insert)
    pub fn affected(&self) -> usize {
        match self {
            Status::Inserted { .. } => 1,
            Status::Updated { rows } | Status::Deleted { rows } => *rows,
            Status::TableMissing { .. } => 0,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Status::Inserted { id } => json!({"status": "inserted", "id": id}),
            Status::Updated { rows: 0 } => json!({"status": "no rows updated", "rows": 0}),
            Status::Updated { rows } => json!({"status": "updated", "rows": rows}),
            Status::Deleted { rows: 0 } => json!({"status": "no rows deleted", "rows": 0}),
            Status::Deleted { rows } => json!({"status": "deleted", "rows": rows}),
            Status::TableMissing { table } => json!({"error": missing_table_message(table)}),
        }
    }
}

/// Successful query result
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    Rows(Vec<Record>),
    Status(Status),
}

impl QueryOutput {
    /// The one-row result SELECT returns for a missing table
    pub fn missing_table_rows(table: &str) -> Self {
        let mut row = Record::new();
        row.insert("error".to_string(), Value::from(missing_table_message(table)));
        QueryOutput::Rows(vec![row])
    }

    pub fn rows(&self) -> Option<&[Record]> {
        match self {
            QueryOutput::Rows(rows) => Some(rows),
            QueryOutput::Status(_) => None,
        }
    }

    pub fn status(&self) -> Option<&Status> {
        match self {
            QueryOutput::Status(status) => Some(status),
            QueryOutput::Rows(_) => None,
        }
    }

    pub fn into_rows(self) -> Option<Vec<Record>> {
        match self {
            QueryOutput::Rows(rows) => Some(rows),
            QueryOutput::Status(_) => None,
        }
    }

    /// Renders the result the way the CLI prints it
    pub fn to_json(&self) -> Value {
        match self {
            QueryOutput::Rows(rows) => {
                Value::Array(rows.iter().cloned().map(Value::Object).collect())
            }
            QueryOutput::Status(status) => status.to_json(),
        }
    }
}

impl From<QueryOutput> for Value {
    fn from(output: QueryOutput) -> Self {
        match output {
            QueryOutput::Rows(rows) => Value::Array(rows.into_iter().map(Value::Object).collect()),
            QueryOutput::Status(status) => status.to_json(),
        }
    }
}

fn missing_table_message(table: &str) -> String {
    format!("Table '{}' does not exist", table)
}
