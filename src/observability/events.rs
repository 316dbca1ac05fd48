//! Observable events
//!
//! Events are explicit and typed; the logger never takes free-form names.

use std::fmt;

/// Observable events in jsonql
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Database lifecycle
    /// Database root opened (created if missing)
    DatabaseOpened,
    /// Whole database removed and recreated empty
    DatabaseDropped,

    // Table lifecycle
    /// Empty table file materialized
    TableCreated,
    /// Table file removed
    TableDropped,

    // Record writes
    /// Record appended with a fresh id
    RecordInserted,
    /// Record merged in place
    RecordUpdated,
    /// Record(s) removed by id
    RecordDeleted,

    /// Persisted table content failed to parse
    SnapshotCorrupted,

    // Query operations
    /// Query executed successfully
    QueryExecuted,
    /// Query rejected (parse or validation failure)
    QueryRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::DatabaseOpened => "DATABASE_OPENED",
            Event::DatabaseDropped => "DATABASE_DROPPED",
            Event::TableCreated => "TABLE_CREATED",
            Event::TableDropped => "TABLE_DROPPED",
            Event::RecordInserted => "RECORD_INSERTED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordDeleted => "RECORD_DELETED",
            Event::SnapshotCorrupted => "SNAPSHOT_CORRUPTED",
            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::QueryRejected => "QUERY_REJECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
