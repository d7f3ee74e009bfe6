//! In-memory blob store for development and testing.
//!
//! Not durable across processes.

use instaplot_domain::BlobStore;
use std::collections::HashMap;
use std::convert::Infallible;

/// HashMap-backed implementation of BlobStore
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
    writes: usize,
}

impl MemoryBlobStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one pre-existing blob
    pub fn with_blob(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(key.into(), value.into());
        Self { blobs, writes: 0 }
    }

    /// Number of `set` calls served so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl BlobStore for MemoryBlobStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.blobs.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
