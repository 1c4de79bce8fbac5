//! Core error types for weekplan-core.
//!
//! The hierarchy mirrors the layers of the crate: repository failures,
//! configuration problems and validation of user-supplied values.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for weekplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Repository (load/add/update/delete) failures
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures reported by a schedule repository.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The addressed row does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An insert collided with an existing id
    #[error("{entity} already exists: {id}")]
    Conflict { entity: &'static str, id: String },

    /// Failed to open the backing store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The backing store rejected a query
    #[error("Storage failure: {0}")]
    Storage(String),

    /// The store is temporarily unreachable (locked, offline)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// No usable data directory
    #[error("Cannot determine data directory: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ValidationError {
    /// Duration must be strictly positive
    #[error("Invalid duration for item '{id}': {duration_millis} ms (must be > 0)")]
    NonPositiveDuration { id: String, duration_millis: i64 },

    /// The end of an interval would overflow the calendar
    #[error("Item '{id}' ends beyond the supported calendar range")]
    EndOutOfRange { id: String },

    /// A week offset lands outside the supported calendar range
    #[error("Week offset {offset} from {today} is outside the supported calendar range")]
    DateOutOfRange {
        offset: i64,
        today: chrono::NaiveDate,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg) => match code.code {
                rusqlite::ErrorCode::DatabaseLocked | rusqlite::ErrorCode::DatabaseBusy => {
                    RepositoryError::Unavailable(err.to_string())
                }
                _ => RepositoryError::Storage(err.to_string()),
            },
            _ => RepositoryError::Storage(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

/// Result type alias used by repository implementations
pub type RepoResult<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_error_wraps_into_core_error() {
        let err: CoreError = RepositoryError::NotFound {
            entity: "scheduled item",
            id: "abc".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Repository error: scheduled item not found: abc"
        );
    }

    #[test]
    fn non_positive_duration_message_names_the_item() {
        let err = ValidationError::NonPositiveDuration {
            id: "e1".to_string(),
            duration_millis: 0,
        };
        assert!(err.to_string().contains("'e1'"));
        assert!(err.to_string().contains("0 ms"));
    }

    #[test]
    fn query_errors_map_to_storage() {
        let err: RepositoryError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, RepositoryError::Storage(_)));
    }
}
