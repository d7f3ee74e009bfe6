//! InstaPlot Gatekeeper
//!
//! Validates externally supplied card sets before they replace a board.
//!
//! Both bulk-sync entry points (file import and the freeform JSON buffer)
//! run the same per-item rule: an item is accepted iff `time`, `actor`,
//! `place` and `claims` are present, textual and non-empty. Accepted items
//! get defaults for what they omit:
//! - `id`: their own when present, else a fresh unique id
//! - `isLie`: their own when it is a boolean, else `false`
//! - `x` / `y`: their own when a non-zero finite number, else a random point
//!
//! Rejections are collected per item; one bad item never stops the batch.
//!
//! # Examples
//!
//! ```
//! use instaplot_gatekeeper::Gatekeeper;
//!
//! let gatekeeper = Gatekeeper::default_config();
//! let batch = gatekeeper
//!     .parse_import(r#"[{"time":"2024-01-01T10:00","actor":"A","place":"P","claims":"C"}]"#)
//!     .unwrap();
//! assert_eq!(batch.cards.len(), 1);
//! assert!(batch.report.is_complete());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod report;
mod validator;

pub use config::{DuplicateIdPolicy, SyncConfig};
pub use error::SyncError;
pub use report::{SyncBatch, SyncReport};
pub use validator::{Gatekeeper, ItemError, RejectionReason};
