//! InstaPlot Storage Layer
//!
//! Implements the `BlobStore` port and the card repository built on it.
//!
//! # Architecture
//!
//! - [`SqliteBlobStore`]: durable key/value blobs in a SQLite file
//! - [`MemoryBlobStore`]: process-local blobs (tests, scratch boards)
//! - [`CardRepository`]: the authoritative in-memory card collection,
//!   loaded (or seeded) once and written back after every mutation
//!
//! # Examples
//!
//! ```no_run
//! use instaplot_store::{CardRepository, SqliteBlobStore, DEFAULT_STORAGE_KEY};
//!
//! let store = SqliteBlobStore::new("board.db").unwrap();
//! let repo = CardRepository::load_or_seed(store, DEFAULT_STORAGE_KEY);
//! println!("{} cards", repo.len());
//! ```

#![warn(missing_docs)]

mod memory;
mod repository;
mod sqlite;

pub use memory::MemoryBlobStore;
pub use repository::{CardRepository, LoadSource, DEFAULT_STORAGE_KEY};
pub use sqlite::SqliteBlobStore;

use instaplot_domain::CardId;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Card collection could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Card position cannot be represented in the stored JSON
    #[error("Card {0} has a non-finite coordinate")]
    NonFiniteCoordinate(CardId),
}
