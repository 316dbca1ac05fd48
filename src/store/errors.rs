//! Record store error types
//!
//! Error codes:
//! - JSONQL_STORAGE_IO_ERROR
//! - JSONQL_DATA_CORRUPTION
//! - JSONQL_VALIDATION_ERROR (invalid table name)

use std::io;

use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
///
/// None of these are recoverable inside the store; they propagate to the
/// caller unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage medium could not be read or written
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// A table file exists but does not hold a JSON array of objects
    #[error("Table '{table}' is corrupted: {reason}")]
    Corrupted { table: String, reason: String },

    /// Table names become file names, so they are restricted
    #[error("Invalid table name '{0}': use only ASCII letters, digits and '_'")]
    InvalidTableName(String),
}

impl StoreError {
    /// Create an I/O error with a short description of what was being done
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a corruption error for the given table
    pub fn corrupted(table: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::Corrupted {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "JSONQL_STORAGE_IO_ERROR",
            StoreError::Corrupted { .. } => "JSONQL_DATA_CORRUPTION",
            StoreError::InvalidTableName(_) => "JSONQL_VALIDATION_ERROR",
        }
    }

    /// True when the caller's input was rejected before touching storage
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::InvalidTableName(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let io_err = StoreError::io("reading", io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(io_err.code(), "JSONQL_STORAGE_IO_ERROR");
        assert_eq!(
            StoreError::corrupted("t", "bad").code(),
            "JSONQL_DATA_CORRUPTION"
        );
        assert_eq!(
            StoreError::InvalidTableName("../x".into()).code(),
            "JSONQL_VALIDATION_ERROR"
        );
        assert!(StoreError::InvalidTableName("../x".into()).is_validation());
        assert!(!StoreError::corrupted("t", "bad").is_validation());
    }

    #[test]
    fn test_display_contains_context() {
        let err = StoreError::io(
            "writing table 'users'",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = err.to_string();
        assert!(display.contains("writing table 'users'"));
        assert!(display.contains("denied"));

        let err = StoreError::corrupted("users", "expected value at line 1");
        assert!(err.to_string().contains("users"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_io_error_exposes_source() {
        use std::error::Error;

        let err = StoreError::io("x", io::Error::new(io::ErrorKind::Other, "inner"));
        assert!(err.source().is_some());
    }
}
