//! Board error types

use instaplot_domain::{CardId, CardValidationError};
use instaplot_gatekeeper::SyncError;
use thiserror::Error;

/// Errors surfaced by board commands
#[derive(Error, Debug)]
pub enum BoardError {
    /// Card fields failed creation/edit validation
    #[error("Validation error: {0}")]
    Validation(#[from] CardValidationError),

    /// Bulk-sync input was unusable as a whole
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// An explicit command addressed a card that does not exist
    #[error("Card not found: {0}")]
    NotFound(CardId),

    /// Import source could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Board could not be rendered as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
