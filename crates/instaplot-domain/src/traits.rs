//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Durable key/value blob storage
///
/// The board keeps its whole collection under one key as serialized text.
/// Implemented by the infrastructure layer (instaplot-store).
pub trait BlobStore {
    /// Error type for store operations
    type Error: std::error::Error;

    /// Read the blob stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Replace the blob stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}
