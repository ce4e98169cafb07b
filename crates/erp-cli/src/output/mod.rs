//! Per-entity table layouts.
//!
//! JSON output needs nothing extra (records serialize with their stored
//! field names); table output goes through [`Tabular`].

mod tables;

pub use tables::Tabular;
