//! Storage abstraction for ERP collections.
//!
//! This module defines the `PersistenceAdapter` trait and its backends.
//!
//! ## Architecture
//!
//! The storage layer is backend-agnostic:
//! - `file`: one JSON file per key in a data directory (durable)
//! - `sqlite`: one row per key in a SQLite database (durable)
//! - `memory`: a map that lives as long as the process (ephemeral)
//!
//! The backend is chosen once at startup with [`open_adapter`] and handed to
//! every collection store explicitly. Nothing here is global, and switching
//! backends does not carry data across.

pub mod envelope;
pub mod file;
pub mod memory;
pub mod sqlite;
pub mod traits;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ErpError, Result};

// Re-export public types
pub use file::FileAdapter;
pub use memory::MemoryAdapter;
pub use sqlite::SqliteAdapter;
pub use traits::{PersistenceAdapter, PersistenceExt};

/// Which backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
    File,
    Sqlite,
    Memory,
}

impl AdapterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AdapterKind::File => "file",
            AdapterKind::Sqlite => "sqlite",
            AdapterKind::Memory => "memory",
        }
    }

    /// Whether the backend needs a location on disk.
    pub fn is_durable(self) -> bool {
        !matches!(self, AdapterKind::Memory)
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdapterKind {
    type Err = ErpError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" | "local" | "durable" => Ok(AdapterKind::File),
            "sqlite" | "indexeddb" => Ok(AdapterKind::Sqlite),
            "memory" | "ephemeral" => Ok(AdapterKind::Memory),
            other => Err(ErpError::Config(format!(
                "Unknown adapter \"{}\" (use file, sqlite or memory)",
                other
            ))),
        }
    }
}

/// Startup selection of the storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub kind: AdapterKind,
    /// Data directory for `file`, database file for `sqlite`; unused by `memory`.
    pub location: Option<PathBuf>,
}

impl AdapterConfig {
    pub fn new(kind: AdapterKind, location: Option<PathBuf>) -> Self {
        Self { kind, location }
    }

    pub fn memory() -> Self {
        Self::new(AdapterKind::Memory, None)
    }
}

/// Open the backend described by `config`.
///
/// # Errors
///
/// Returns `ErpError::Config` if a durable backend has no location, or
/// `ErpError::Storage` if the location cannot be opened.
pub fn open_adapter(config: &AdapterConfig) -> Result<Arc<dyn PersistenceAdapter>> {
    let require_location = || {
        config.location.clone().ok_or_else(|| {
            ErpError::Config(format!("The {} adapter needs a data location", config.kind))
        })
    };

    let adapter: Arc<dyn PersistenceAdapter> = match config.kind {
        AdapterKind::File => Arc::new(FileAdapter::open(require_location()?)?),
        AdapterKind::Sqlite => Arc::new(SqliteAdapter::open(&require_location()?)?),
        AdapterKind::Memory => Arc::new(MemoryAdapter::new()),
    };
    tracing::debug!(adapter = adapter.name(), "persistence adapter selected");
    Ok(adapter)
}
