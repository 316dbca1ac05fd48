//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit status.

use std::fmt;
use std::io;

use crate::query::QueryError;
use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Arguments or input were well-formed but not acceptable
    UsageError,
    /// Query rejected or failed; carries the query error code
    QueryFailed(&'static str),
    /// Record store failure; carries the store error code
    StorageFailed(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "JSONQL_CLI_CONFIG_ERROR",
            Self::IoError => "JSONQL_CLI_IO_ERROR",
            Self::UsageError => "JSONQL_CLI_USAGE_ERROR",
            Self::QueryFailed(code) | Self::StorageFailed(code) => *code,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Usage error
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::UsageError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        Self::new(CliErrorCode::QueryFailed(e.code()), e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(CliErrorCode::StorageFailed(e.code()), e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_code_then_message() {
        let err = CliError::usage("refusing to drop database without --yes");
        assert_eq!(
            err.to_string(),
            "JSONQL_CLI_USAGE_ERROR: refusing to drop database without --yes"
        );
    }

    #[test]
    fn test_query_error_code_is_preserved() {
        let err = CliError::from(QueryError::Empty);
        assert_eq!(err.code_str(), "JSONQL_EMPTY_QUERY");
        assert_eq!(err.message(), "Empty query");
    }

    #[test]
    fn test_store_error_code_is_preserved() {
        let err = CliError::from(StoreError::InvalidTableName("a/b".into()));
        assert_eq!(err.code(), &CliErrorCode::StorageFailed("JSONQL_VALIDATION_ERROR"));
    }
}
