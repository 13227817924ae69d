//! Core error types for chorely-core.
//!
//! Every fallible operation in the library reports one of the kinds below.
//! Repository and ledger operations check all preconditions before touching
//! state, so an `Err` always means nothing was changed.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What kind of record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Chore,
    Person,
    HistoryEntry,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Chore => "chore",
            RecordKind::Person => "person",
            RecordKind::HistoryEntry => "history entry",
        };
        f.write_str(label)
    }
}

/// Core error type for chorely-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A referenced chore, person or history entry does not exist
    #[error("{kind} not found: {name}")]
    NotFound { kind: RecordKind, name: String },

    /// Chore or person name collision
    #[error("'{0}' already exists")]
    DuplicateName(String),

    /// Rejected input (empty name, zero frequency, ...)
    #[error("Invalid value for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// Underlying store could not be written
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CoreError {
    pub(crate) fn not_found(kind: RecordKind, name: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Persistence-specific errors.
///
/// Only writes surface these. Reads repair themselves and fall back to
/// empty collections.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to write a collection file
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode a collection
    #[error("Failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Data directory could not be resolved or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
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

    /// Key does not exist in the configuration schema
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_kind_and_record() {
        let err = CoreError::not_found(RecordKind::Person, "Alice");
        assert_eq!(err.to_string(), "person not found: Alice");

        let err = CoreError::not_found(RecordKind::HistoryEntry, "#7");
        assert_eq!(err.to_string(), "history entry not found: #7");
    }

    #[test]
    fn invalid_input_message_names_field() {
        let err = CoreError::invalid("frequency_days", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'frequency_days': must be at least 1"
        );
    }
}
