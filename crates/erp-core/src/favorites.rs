//! Starred report ids, stored as a plain JSON string list.

use std::sync::Arc;

use crate::entities::FAVORITES_KEY;
use crate::error::Result;
use crate::storage::{PersistenceAdapter, PersistenceExt};

pub struct Favorites {
    adapter: Arc<dyn PersistenceAdapter>,
}

impl Favorites {
    pub fn new(adapter: Arc<dyn PersistenceAdapter>) -> Self {
        Self { adapter }
    }

    /// Stored ids; empty when nothing (or nothing readable) is stored.
    pub fn list(&self) -> Vec<String> {
        self.adapter.read(FAVORITES_KEY).unwrap_or_default()
    }

    pub fn contains(&self, report: &str) -> bool {
        self.list().iter().any(|id| id == report)
    }

    /// Add `report` if absent, remove it if present. Returns whether it is
    /// now a favorite.
    pub fn toggle(&self, report: &str) -> Result<bool> {
        let mut ids = self.list();
        let starred = match ids.iter().position(|id| id == report) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(report.to_string());
                true
            }
        };
        self.adapter.write(FAVORITES_KEY, &ids)?;
        Ok(starred)
    }
}
