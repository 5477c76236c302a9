//! Error types for the shallow state store.

use thiserror::Error;

/// Dotted-path lookup failures.
///
/// Only intermediate segments fail; a missing terminal key is `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Cannot read '{segment}' of missing value at '{parent}' (path: {path})")]
    MissingSegment {
        path: String,
        parent: String,
        segment: String,
    },

    #[error("Cannot descend into '{segment}': '{parent}' is {found}, not a mapping (path: {path})")]
    NotAMapping {
        path: String,
        parent: String,
        segment: String,
        found: &'static str,
    },

    #[error("Invalid array index '{segment}' under '{parent}' (path: {path})")]
    InvalidIndex {
        path: String,
        parent: String,
        segment: String,
    },

    #[error("Value at '{path}' could not be deserialized: {message}")]
    Deserialize { path: String, message: String },
}

impl LookupError {
    /// Full dotted path that was being resolved.
    pub fn path(&self) -> &str {
        match self {
            LookupError::MissingSegment { path, .. }
            | LookupError::NotAMapping { path, .. }
            | LookupError::InvalidIndex { path, .. }
            | LookupError::Deserialize { path, .. } => path,
        }
    }
}

/// Logging initialization errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log format: {0} (must be 'json' or 'text')")]
    InvalidFormat(String),

    #[error("Invalid log output: {0} (must be 'stdout' or 'stderr')")]
    InvalidOutput(String),

    #[error("Invalid log directive: {0}")]
    InvalidDirective(String),

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}
