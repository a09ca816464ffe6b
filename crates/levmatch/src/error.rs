//! Common error types for levmatch hosts.

use levmatch_core::{ConfigError, MatchError, SourceError};
use thiserror::Error;

/// Common error type for levmatch operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Matching failed
    #[error("match error: {0}")]
    Match(#[from] MatchError),

    /// No command registered under this name
    #[error("no such command: '{0}'")]
    UnknownCommand(String),

    /// A JSON-lines record is not a JSON object
    #[error("line {line}: expected a JSON object, found {found}")]
    InvalidDocument { line: usize, found: &'static str },

    /// Request document has no command field
    #[error("empty request")]
    EmptyRequest,
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Match(MatchError::Config(err))
    }
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        Error::Match(MatchError::Source(err))
    }
}

/// Result type alias using levmatch Error.
pub type Result<T> = std::result::Result<T, Error>;
