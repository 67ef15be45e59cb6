//! Progress events emitted while downloading.
//!
//! The engine and client only send; whoever owns the receiving end (the CLI
//! spinner, a test) decides what to do with them.

use std::path::PathBuf;

use tokio::sync::mpsc::UnboundedSender;

/// One step of a download run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    /// Work on a page begins. `position` is 1-based.
    PageStarted {
        position: usize,
        total: usize,
        page: String,
    },
    /// A file transfer begins.
    FileStarted { url: String, path: PathBuf },
    /// Running byte count for the current file.
    BytesReceived { path: PathBuf, bytes: u64 },
    /// A file transfer completed.
    FileFinished { path: PathBuf, bytes: u64 },
}

/// Sending half of the progress channel.
pub type EventSender = UnboundedSender<DownloadEvent>;

/// Sends `event` if a listener is attached. A closed channel is ignored.
pub(crate) fn emit(events: Option<&EventSender>, event: DownloadEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}
