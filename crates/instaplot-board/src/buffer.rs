//! Debounced freeform buffer editing
//!
//! Each edit cancels the pending parse and schedules a new one after the
//! quiet interval, so at most one parse is pending at a time. When it fires,
//! the buffer text goes through [`Board::apply_buffer`].

use crate::{Board, BoardError};
use instaplot_domain::BlobStore;
use instaplot_gatekeeper::SyncReport;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};

/// A board shared between the editing session and its pending parse
pub type SharedBoard<S> = Arc<Mutex<Board<S>>>;

/// Text view of a board that syncs back after a quiet period
///
/// Must be used from within a tokio runtime. Dropping the session cancels a
/// pending parse.
///
/// # Examples
///
/// ```
/// use instaplot_board::{Board, BoardConfig, BufferSession};
/// use instaplot_store::MemoryBlobStore;
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let board = Board::open(MemoryBlobStore::new(), &BoardConfig::default());
///     let board = Arc::new(Mutex::new(board));
///     let mut session = BufferSession::open(board.clone(), Duration::from_millis(10)).unwrap();
///
///     session.edit(r#"[{"time":"2024-03-01T08:00","actor":"A","place":"P","claims":"C"}]"#);
///     let report = session.flush().await.unwrap();
///     assert_eq!(report.accepted, 1);
///     assert_eq!(board.lock().unwrap().cards().len(), 1);
/// }
/// ```
pub struct BufferSession<S: BlobStore + Send + 'static> {
    board: SharedBoard<S>,
    quiet: Duration,
    text: String,
    pending: Option<JoinHandle<Option<SyncReport>>>,
}

impl<S: BlobStore + Send + 'static> BufferSession<S> {
    /// Open the buffer pre-populated with the live collection
    pub fn open(board: SharedBoard<S>, quiet: Duration) -> Result<Self, BoardError> {
        let text = match board.lock() {
            Ok(guard) => guard.buffer_text()?,
            Err(poisoned) => poisoned.into_inner().buffer_text()?,
        };
        Ok(Self {
            board,
            quiet,
            text,
            pending: None,
        })
    }

    /// Current buffer contents
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the buffer contents and reschedule the parse
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cancel();

        let deadline = Instant::now() + self.quiet;
        let board = Arc::clone(&self.board);
        let text = self.text.clone();

        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            match board.lock() {
                Ok(mut board) => board.apply_buffer(&text),
                Err(_) => {
                    tracing::error!("Board lock poisoned, buffer edit dropped");
                    None
                }
            }
        }));
    }

    /// Whether a parse is scheduled and has not run yet
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Drop the pending parse, if any
    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    /// Wait for the pending parse and return its report.
    ///
    /// `None` when nothing was pending, or the buffer did not apply.
    pub async fn flush(&mut self) -> Option<SyncReport> {
        let task = self.pending.take()?;
        match task.await {
            Ok(report) => report,
            Err(e) => {
                tracing::debug!("Pending buffer parse did not complete: {}", e);
                None
            }
        }
    }
}

impl<S: BlobStore + Send + 'static> Drop for BufferSession<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
