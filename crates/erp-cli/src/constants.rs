//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (anything not classified below)
/// - 2: Usage error (reported by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Record, config or report not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, record contents or configuration.
    pub const INVALID_INPUT: i32 = 4;

    /// The change was applied in memory but the backend rejected the write.
    pub const WRITE_FAILED: i32 = 5;
}

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ERP_CONFIG";

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "ERP_LOG";

/// Directory name used under the XDG config and data homes.
pub const APP_DIR: &str = "erp";

/// Database file name used by the sqlite adapter by default.
pub const SQLITE_FILE: &str = "erp.sqlite";
