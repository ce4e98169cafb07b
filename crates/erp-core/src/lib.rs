//! # ERP Core
//!
//! Local persistence and reporting for a small-business ERP: sales,
//! purchases, contacts, products, users and a finance ledger.
//!
//! This crate holds the domain types, storage backends and aggregations,
//! independent of the CLI.
//!
//! ## Architecture
//!
//! - **storage**: persistence adapter trait and its file, SQLite and memory backends
//! - **store**: generic write-through collection store
//! - **entities**: typed records and their seeds
//! - **aggregate**: month/text/tab filters, finance summaries, dashboard data
//! - **money**: integer-cent amounts and input normalization
//! - **bus**: change notification between stores of the same key
//! - **favorites**: starred reports

pub mod aggregate;
pub mod bus;
pub mod entities;
pub mod error;
pub mod favorites;
pub mod fs;
pub mod money;
pub mod storage;
pub mod store;

pub use entities::{EntityKind, Record};
pub use error::{ErpError, Result};
pub use money::Money;
pub use storage::{open_adapter, AdapterConfig, AdapterKind, PersistenceAdapter};
pub use store::CollectionStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
