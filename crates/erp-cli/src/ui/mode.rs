//! Output mode routing.

use crate::errors::CliError;

/// How a command presents its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// JSON document on stdout, nothing else
    Json,
    /// `key=value` lines and space-separated rows, stable for scripts
    #[default]
    Plain,
    /// Tables, badges and colors (TTY only)
    Pretty,
}

impl OutputMode {
    /// `--json` beats `--format`; `--format plain` or `TERM=dumb` force
    /// plain; otherwise pretty on a TTY and plain elsewhere.
    pub fn resolve(json: bool, format: Option<&str>, is_tty: bool, term_is_dumb: bool) -> Self {
        match (json, format) {
            (true, _) => Self::Json,
            (false, Some("json")) => Self::Json,
            (false, Some("plain")) => Self::Plain,
            _ if is_tty && !term_is_dumb => Self::Pretty,
            _ => Self::Plain,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Reject `--format` values other than table, plain and json.
pub fn validate_format(format: Option<&str>) -> Result<(), CliError> {
    match format {
        None | Some("table") | Some("plain") | Some("json") => Ok(()),
        Some(other) => Err(CliError::invalid_input(format!(
            "Unknown format \"{}\" (use table, plain or json)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag_wins() {
        assert_eq!(OutputMode::resolve(true, Some("plain"), true, false), OutputMode::Json);
        assert_eq!(OutputMode::resolve(false, Some("json"), false, false), OutputMode::Json);
    }

    #[test]
    fn test_tty_routing() {
        assert_eq!(OutputMode::resolve(false, None, true, false), OutputMode::Pretty);
        assert_eq!(OutputMode::resolve(false, Some("table"), true, false), OutputMode::Pretty);
        assert_eq!(OutputMode::resolve(false, None, true, true), OutputMode::Plain);
        assert_eq!(OutputMode::resolve(false, None, false, false), OutputMode::Plain);
        assert_eq!(OutputMode::resolve(false, Some("plain"), true, false), OutputMode::Plain);
    }

    #[test]
    fn test_validate_format() {
        assert!(validate_format(Some("table")).is_ok());
        assert!(validate_format(None).is_ok());
        assert!(validate_format(Some("csv")).is_err());
    }
}
