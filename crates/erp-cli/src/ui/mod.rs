//! UI primitives for the ERP CLI.
//!
//! - **Context**: environment detection (TTY, width, color, unicode)
//! - **Mode**: output mode resolution (json, plain, pretty)
//! - **Theme**: badges and styling
//! - **Render**: tables, headers, key/value lines, hints, errors
//! - **Format**: money and text helpers

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::{validate_format, OutputMode};
pub use theme::Badge;

pub use render::{badge, header, hint, kv, print_error, print_json, table, Column};

pub use format::{brl, signed_brl, truncate};
