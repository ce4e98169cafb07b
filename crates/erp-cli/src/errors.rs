//! CLI error types for structured error handling.
//!
//! Command handlers return `anyhow::Result`; the typed errors here (and the
//! core's `ErpError`) are recovered from the chain in `main` to pick the
//! process exit code.

use std::fmt;

use erp_core::ErpError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Record, config or report not found
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// The backend refused to persist a change
    WriteFailed { key: String, reason: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::WriteFailed { key, reason } => write!(
                f,
                "Change to {} was not saved: {}\nHint: Check that the data location is writable, then run `erp doctor`.",
                key, reason
            ),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    pub fn write_failed(key: &str, reason: &str) -> Self {
        CliError::WriteFailed {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::WriteFailed { .. } => exit_codes::WRITE_FAILED,
        }
    }
}

/// Exit code for any error returned by a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return cli.exit_code();
        }
        if let Some(core) = cause.downcast_ref::<ErpError>() {
            return match core {
                ErpError::NotFound(_) => exit_codes::NOT_FOUND,
                ErpError::InvalidInput(_) | ErpError::Validation(_) | ErpError::Config(_) => {
                    exit_codes::INVALID_INPUT
                }
                ErpError::Storage(_) | ErpError::Serialization(_) => 1,
            };
        }
    }
    1
}
