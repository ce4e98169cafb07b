//! Error types for ERP core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for ERP core operations.
pub type Result<T> = std::result::Result<T, ErpError>;

/// Core error type for ERP operations.
#[derive(Debug, Error)]
pub enum ErpError {
    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Value could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Record failed validation (e.g. a patch produced an invalid record)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error (unknown adapter, bad path)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for ErpError {
    fn from(err: std::io::Error) -> Self {
        ErpError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ErpError {
    fn from(err: serde_json::Error) -> Self {
        ErpError::Serialization(err.to_string())
    }
}

impl From<rusqlite::Error> for ErpError {
    fn from(err: rusqlite::Error) -> Self {
        ErpError::Storage(format!("SQLite error: {}", err))
    }
}
