//! Board orchestration for InstaPlot
//!
//! Ties the card repository, the layout engine, and the bulk-sync validator
//! together:
//!
//! - axis-mode changes and explicit requests run a full layout pass
//! - content edits, drags, and buffer syncs never do
//! - file imports ask before discarding a non-empty board
//! - the freeform buffer is parsed after a quiet period, silently
//!
//! # Examples
//!
//! ```
//! use instaplot_board::{Board, BoardConfig};
//! use instaplot_domain::{AxisMode, CardId};
//! use instaplot_store::MemoryBlobStore;
//!
//! let mut board = Board::open(MemoryBlobStore::new(), &BoardConfig::default());
//! board.drag_end(&CardId::new("1"), 40.0, 0.0);
//! assert_eq!(board.cards()[0].x, 140.0);
//!
//! board.set_x_axis(AxisMode::Actor);
//! assert_eq!(board.cards()[0].x, 100.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod board;
pub mod buffer;
pub mod config;
pub mod draft;
pub mod error;

pub use board::{Board, ImportOutcome};
pub use buffer::{BufferSession, SharedBoard};
pub use config::BoardConfig;
pub use draft::CardDraft;
pub use error::BoardError;
