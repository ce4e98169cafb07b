//! Helper functions shared by command handlers.

mod parsing;

pub use parsing::{parse_date, parse_kind, parse_month, parse_status, record_input};
