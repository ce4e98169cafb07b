use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ErpError, Result};

const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// A calendar month. Membership compares year and month components only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MonthParts")]
pub struct MonthWindow {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct MonthParts {
    year: i32,
    month: u32,
}

impl TryFrom<MonthParts> for MonthWindow {
    type Error = ErpError;

    fn try_from(parts: MonthParts) -> Result<Self> {
        Self::new(parts.year, parts.month)
    }
}

impl MonthWindow {
    /// Build a window; `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ErpError::InvalidInput(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// The month `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Long Portuguese label, e.g. "novembro de 2025".
    pub fn label(&self) -> String {
        let name = MONTH_NAMES[(self.month - 1) as usize];
        format!("{} de {}", name, self.year)
    }
}

impl fmt::Display for MonthWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthWindow {
    type Err = ErpError;

    /// Parse `YYYY-MM`.
    fn from_str(value: &str) -> Result<Self> {
        let invalid = || ErpError::InvalidInput(format!("Invalid month \"{}\" (use YYYY-MM)", value));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_boundaries() {
        let november = MonthWindow::containing(date(2025, 11, 15));
        assert!(november.contains(date(2025, 11, 30)));
        assert!(!november.contains(date(2025, 12, 1)));
        assert!(!november.contains(date(2024, 11, 30)));
        assert!(november.next().contains(date(2025, 12, 1)));
    }

    #[test]
    fn test_navigation_wraps_years() {
        let january: MonthWindow = "2026-01".parse().unwrap();
        assert_eq!(january.prev().to_string(), "2025-12");
        assert_eq!(january.prev().next(), january);
        assert_eq!(january.label(), "janeiro de 2026");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!("2025-13".parse::<MonthWindow>().is_err());
        assert!("2025/11".parse::<MonthWindow>().is_err());
        assert!(MonthWindow::new(2025, 0).is_err());
    }

    #[test]
    fn test_deserialize_checks_month() {
        let window: MonthWindow = serde_json::from_str(r#"{"year":2025,"month":11}"#).unwrap();
        assert_eq!(window.label(), "novembro de 2025");
        assert!(serde_json::from_str::<MonthWindow>(r#"{"year":2025,"month":0}"#).is_err());
        assert!(serde_json::from_str::<MonthWindow>(r#"{"year":2025,"month":13}"#).is_err());
    }
}
