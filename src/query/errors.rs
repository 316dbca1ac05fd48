//! Query error types
//!
//! Missing tables and zero-row matches are not errors: they come back as
//! data in a successful `QueryOutput`. Only malformed queries and storage
//! failures end up here.

use thiserror::Error;

use super::ast::Verb;
use crate::store::StoreError;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query errors
#[derive(Debug, Error)]
pub enum QueryError {
    /// Nothing left after trimming whitespace and the trailing `;`
    #[error("Empty query")]
    Empty,

    /// Leading keyword is not one of the supported verbs
    #[error("Unsupported statement '{0}': only SELECT, INSERT, UPDATE, DELETE are supported")]
    UnsupportedVerb(String),

    /// Text does not match the grammar for its verb
    #[error("Invalid {verb} ({detail}). Use: {expected}")]
    Parse {
        verb: Verb,
        expected: &'static str,
        detail: String,
    },

    /// Well-formed but semantically invalid, e.g. column/value count mismatch
    #[error("{0}")]
    Validation(String),

    /// Failure reported by the record store
    #[error(transparent)]
    Storage(StoreError),
}

impl From<StoreError> for QueryError {
    fn from(e: StoreError) -> Self {
        if e.is_validation() {
            QueryError::Validation(e.to_string())
        } else {
            QueryError::Storage(e)
        }
    }
}

impl QueryError {
    /// Parse error for `verb` carrying its example shape
    pub fn parse(verb: Verb, detail: impl Into<String>) -> Self {
        QueryError::Parse {
            verb,
            expected: verb.example(),
            detail: detail.into(),
        }
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::Empty => "JSONQL_EMPTY_QUERY",
            QueryError::UnsupportedVerb(_) => "JSONQL_UNSUPPORTED_STATEMENT",
            QueryError::Parse { .. } => "JSONQL_PARSE_ERROR",
            QueryError::Validation(_) => "JSONQL_VALIDATION_ERROR",
            QueryError::Storage(e) => e.code(),
        }
    }

    /// True for errors caused by the query text rather than the store
    pub fn is_rejection(&self) -> bool {
        !matches!(self, QueryError::Storage(_))
    }
}
