//! Parsed statements

use std::fmt;

use serde_json::Value;

/// The four supported query operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Select,
    Insert,
    Update,
    Delete,
}

impl Verb {
    /// Every supported verb, in the order they are documented
    pub const ALL: [Verb; 4] = [Verb::Select, Verb::Insert, Verb::Update, Verb::Delete];

    /// Leading keyword, upper case
    pub fn keyword(&self) -> &'static str {
        match self {
            Verb::Select => "SELECT",
            Verb::Insert => "INSERT",
            Verb::Update => "UPDATE",
            Verb::Delete => "DELETE",
        }
    }

    /// A correctly shaped example statement, quoted in parse errors
    pub fn example(&self) -> &'static str {
        match self {
            Verb::Select => "SELECT * FROM table [WHERE key=value]",
            Verb::Insert => "INSERT INTO devices (name, room) VALUES ('Projo', 'A101')",
            Verb::Update => "UPDATE devices SET ip='192.168.1.10' WHERE id=1",
            Verb::Delete => "DELETE FROM devices WHERE id=1",
        }
    }

    /// Matches a leading keyword case-insensitively.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|verb| verb.keyword().eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// `field = value` with the value already coerced
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub value: Value,
}

/// One parsed statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select {
        table: String,
        condition: Option<Condition>,
    },
    Insert {
        table: String,
        columns: Vec<String>,
        values: Vec<Value>,
    },
    Update {
        table: String,
        assignment: Condition,
        condition: Condition,
    },
    Delete {
        table: String,
        condition: Condition,
    },
}

impl Statement {
    pub fn verb(&self) -> Verb {
        match self {
            Statement::Select { .. } => Verb::Select,
            Statement::Insert { .. } => Verb::Insert,
            Statement::Update { .. } => Verb::Update,
            Statement::Delete { .. } => Verb::Delete,
        }
    }

    pub fn table(&self) -> &str {
        match self {
            Statement::Select { table, .. }
            | Statement::Insert { table, .. }
            | Statement::Update { table, .. }
            | Statement::Delete { table, .. } => table,
        }
    }
}
