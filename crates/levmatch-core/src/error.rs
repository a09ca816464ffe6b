//! Error types for the matching core

use thiserror::Error;

/// Invalid or incomplete matching configuration.
///
/// Raised while building a [`MatchConfig`](crate::MatchConfig), before any
/// candidate is pulled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A required request field is absent
    #[error("missing required field '{0}'")]
    MissingField(String),

    /// A request field holds a value of the wrong kind
    #[error("field '{field}' must be {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Threshold outside [0, 1] or not a number
    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// Negative result limit
    #[error("limit must not be negative, got {0}")]
    InvalidLimit(i64),

    /// Unknown invalid-field policy name
    #[error("unknown invalid-field policy '{0}' (expected 'abort' or 'skip')")]
    InvalidPolicy(String),

    /// Comparison field selector is empty
    #[error("comparison field must not be empty")]
    EmptyField,
}

/// Failure reported by a candidate source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// The named collection does not exist
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// Backend failure while fetching the next record
    #[error("source backend error: {0}")]
    Backend(String),
}

/// Errors that abort a scan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Candidate lacks the comparison field
    #[error("candidate {position} has no field '{field}'")]
    MissingField { field: String, position: usize },

    /// Candidate comparison field is not text
    #[error("candidate {position} field '{field}' must be a string, found {found}")]
    FieldType {
        field: String,
        found: &'static str,
        position: usize,
    },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Result type for matching operations
pub type Result<T> = std::result::Result<T, MatchError>;
