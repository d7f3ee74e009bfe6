//! SQLite-backed blob store

use crate::StoreError;
use instaplot_domain::BlobStore;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite-based implementation of BlobStore
///
/// One row per key. Writes are immediate and synchronous; there is no
/// batching and no explicit shutdown step.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. The store is `Send` but not
/// `Sync`; share it behind a mutex.
#[derive(Debug)]
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use instaplot_store::SqliteBlobStore;
    ///
    /// let store = SqliteBlobStore::new("instaplot.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Remove the blob stored under `key`; returns whether one existed
    pub fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM blobs WHERE key = ?1", params![key])?;
        Ok(changed > 0)
    }
}

impl BlobStore for SqliteBlobStore {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT INTO blobs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
             value = excluded.value, updated_at = strftime('%s', 'now')",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let store = SqliteBlobStore::new(":memory:").unwrap();
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = SqliteBlobStore::new(":memory:").unwrap();
        store.set("k", "[]").unwrap();
        store.set("k", "[1]").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_remove() {
        let mut store = SqliteBlobStore::new(":memory:").unwrap();
        store.set("k", "v").unwrap();
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert_eq!(store.get("k").unwrap(), None);
    }
}
