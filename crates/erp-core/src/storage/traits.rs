//! Persistence adapter trait definition.
//!
//! The `PersistenceAdapter` trait is the seam between collections and the
//! medium that holds them. Each key maps to one serialized JSON blob.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Key-value storage for serialized blobs.
///
/// Implementations must ensure:
/// - `write_raw` followed by `read_raw` on the same instance returns the
///   written text
/// - `remove` of a missing key is not an error
/// - methods take `&self`; adapters are shared behind `Arc` and use interior
///   mutability where they need it
pub trait PersistenceAdapter: Send + Sync {
    /// Short name of the backend ("file", "sqlite", "memory").
    fn name(&self) -> &'static str;

    /// Read the raw blob stored under `key`.
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` if nothing is stored under the key.
    fn read_raw(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns `ErpError::Storage` if the medium rejects the write
    /// (full disk, read-only location, ...).
    fn write_raw(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the blob stored under `key`.
    fn remove(&self, key: &str) -> Result<()>;

    /// List every stored key, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Typed access over any [`PersistenceAdapter`].
///
/// Kept separate from the base trait so `dyn PersistenceAdapter` stays
/// object-safe.
pub trait PersistenceExt {
    /// Read and deserialize the value under `key`.
    ///
    /// Fails soft: a missing key, a backend error or content that does not
    /// parse as `T` all yield `None`.
    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T>;

    /// Serialize and store `value` under `key`.
    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()>;
}

impl<A: PersistenceAdapter + ?Sized> PersistenceExt for A {
    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.read_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(key, adapter = self.name(), error = %err, "read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, adapter = self.name(), error = %err, "malformed blob ignored");
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let serialized = serde_json::to_string(value)?;
        self.write_raw(key, &serialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn(_adapter: &dyn PersistenceAdapter) {}
        fn _typed_on_dyn(adapter: &dyn PersistenceAdapter) -> Option<Vec<String>> {
            adapter.read("erp.reports.favorites")
        }
    }
}
