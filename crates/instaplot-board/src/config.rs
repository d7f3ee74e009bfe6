//! Board configuration
//!
//! Storage key, debounce interval, and the axis modes a board opens with.

use instaplot_domain::AxisMode;
use instaplot_gatekeeper::SyncConfig;
use instaplot_store::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for one board
///
/// # Examples
///
/// ```
/// use instaplot_board::BoardConfig;
/// use instaplot_domain::AxisMode;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.x_axis, AxisMode::Place);
/// assert_eq!(config.y_axis, AxisMode::Time);
/// assert_eq!(config.debounce_ms, 500);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Blob key the card collection is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Quiet interval before a freeform buffer edit is parsed (milliseconds)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Horizontal axis mode
    #[serde(default = "default_x_axis")]
    pub x_axis: AxisMode,

    /// Vertical axis mode
    #[serde(default = "default_y_axis")]
    pub y_axis: AxisMode,

    /// Bulk-sync validation settings
    #[serde(default)]
    pub sync: SyncConfig,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_x_axis() -> AxisMode {
    AxisMode::Place
}

fn default_y_axis() -> AxisMode {
    AxisMode::Time
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            debounce_ms: default_debounce_ms(),
            x_axis: default_x_axis(),
            y_axis: default_y_axis(),
            sync: SyncConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Debounce interval as a Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
