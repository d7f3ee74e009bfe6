//! Gatekeeper configuration

use instaplot_domain::PlacementRegion;
use serde::{Deserialize, Serialize};

/// What to do when one batch repeats an id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateIdPolicy {
    /// Keep the item under a freshly generated id
    Rekey,
    /// Reject the later item
    Reject,
}

/// Configuration for bulk-sync validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Region used for items without usable coordinates
    #[serde(default)]
    pub placement: PlacementRegion,

    /// Handling of repeated ids within one batch
    #[serde(default = "default_duplicate_ids")]
    pub duplicate_ids: DuplicateIdPolicy,
}

fn default_duplicate_ids() -> DuplicateIdPolicy {
    DuplicateIdPolicy::Rekey
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            placement: PlacementRegion::default(),
            duplicate_ids: default_duplicate_ids(),
        }
    }
}

impl SyncConfig {
    /// Create a strict configuration (repeated ids are rejected)
    pub fn strict() -> Self {
        Self {
            duplicate_ids: DuplicateIdPolicy::Reject,
            ..Self::default()
        }
    }
}
