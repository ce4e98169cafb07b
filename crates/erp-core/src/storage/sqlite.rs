//! Durable adapter backed by a single-table SQLite database.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{ErpError, Result};
use crate::storage::traits::PersistenceAdapter;

/// Durable adapter storing blobs as rows of a `kv` table.
pub struct SqliteAdapter {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteAdapter {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        tracing::debug!(path = %path.display(), "sqlite adapter opened");
        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    /// Open a private in-memory database (same SQL paths, nothing on disk).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Lock the connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ErpError::Storage("SQLite connection poisoned".to_string()))
    }
}

impl PersistenceAdapter for SqliteAdapter {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn read_raw(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock_conn()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn write_raw(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        let updated_at = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, updated_at],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_upsert_overwrites() {
        let adapter = SqliteAdapter::open_in_memory().unwrap();
        adapter.write_raw("erp.sales", "[1]").unwrap();
        adapter.write_raw("erp.sales", "[2]").unwrap();
        assert_eq!(adapter.read_raw("erp.sales").unwrap().as_deref(), Some("[2]"));
        assert_eq!(adapter.keys().unwrap(), vec!["erp.sales"]);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("erp.sqlite");
        {
            let adapter = SqliteAdapter::open(&path).unwrap();
            adapter.write_raw("erp.compras", "[]").unwrap();
        }
        let adapter = SqliteAdapter::open(&path).unwrap();
        assert_eq!(adapter.read_raw("erp.compras").unwrap().as_deref(), Some("[]"));
        adapter.remove("erp.compras").unwrap();
        assert!(adapter.read_raw("erp.compras").unwrap().is_none());
    }
}
