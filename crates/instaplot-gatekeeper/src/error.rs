//! Gatekeeper error types

use thiserror::Error;

/// Errors that abort a whole bulk-sync operation
///
/// Per-item rejections are not errors; see [`crate::ItemError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Input text is not JSON at all
    #[error("JSON parse error: {0}")]
    Parse(String),

    /// Input is JSON but the top level is not an array
    #[error("Invalid format: expected a JSON array of cards, found {0}")]
    Format(&'static str),
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::Parse(e.to_string())
    }
}
