//! Badges and text styling.

use owo_colors::OwoColorize;

use erp_core::aggregate::{AlertTone, Tone};
use erp_core::Money;

/// Status markers printed in front of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    pub fn display(self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Badge::Ok, true) => "[\u{2713}]",
            (Badge::Ok, false) => "[OK]",
            (Badge::Warn, true) => "[\u{26A0}]",
            (Badge::Warn, false) => "[WARN]",
            (Badge::Err, true) => "[\u{2717}]",
            (Badge::Err, false) => "[ERR]",
            (Badge::Info, true) => "[\u{2139}]",
            (Badge::Info, false) => "[INFO]",
        }
    }

    pub fn paint(self, text: &str, color: bool) -> String {
        if !color {
            return text.to_string();
        }
        match self {
            Badge::Ok => text.green().to_string(),
            Badge::Warn => text.yellow().to_string(),
            Badge::Err => text.red().to_string(),
            Badge::Info => text.cyan().to_string(),
        }
    }
}

impl From<AlertTone> for Badge {
    fn from(tone: AlertTone) -> Self {
        match tone {
            AlertTone::Warn => Badge::Warn,
            AlertTone::Info => Badge::Info,
        }
    }
}

pub fn dim(text: &str, color: bool) -> String {
    if color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Color a formatted KPI value by its tone.
pub fn toned(text: &str, tone: Tone, color: bool) -> String {
    match (tone, color) {
        (_, false) | (Tone::Neutral, true) => text.to_string(),
        (Tone::Success, true) => text.green().to_string(),
        (Tone::Danger, true) => text.red().to_string(),
    }
}

/// Green for income, red for outflow.
pub fn signed(text: &str, amount: Money, color: bool) -> String {
    if !color || amount == Money::ZERO {
        text.to_string()
    } else if amount.is_negative() {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_symbols() {
        assert_eq!(Badge::Ok.display(false), "[OK]");
        assert_eq!(Badge::Err.display(true), "[\u{2717}]");
        assert_eq!(Badge::from(AlertTone::Warn), Badge::Warn);
    }

    #[test]
    fn test_no_color_is_identity() {
        assert_eq!(Badge::Err.paint("x", false), "x");
        assert_eq!(toned("R$ 1,00", Tone::Danger, false), "R$ 1,00");
        assert_eq!(signed("-1", Money::from_cents(-100), false), "-1");
        assert_eq!(bold("t", false), "t");
    }

    #[test]
    fn test_color_adds_escapes() {
        assert!(Badge::Ok.paint("ok", true).contains("\u{1b}["));
        assert!(dim("label", true).contains("\u{1b}["));
    }
}
