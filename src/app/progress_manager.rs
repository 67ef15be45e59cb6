//! Progress UI (spinner) for download runs.

use std::path::Path;
use std::time::Duration;

use iiif_downloader_core::{DownloadEvent, EventSender};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

/// Spawns the progress UI (spinner) when requested.
///
/// Returns the sender to hand to the engine and the task handle. The task ends
/// once every sender has been dropped, so callers drop the engine before
/// awaiting the handle. When `use_spinner` is false, returns `(None, None)`.
pub(crate) fn spawn_progress_ui(
    use_spinner: bool,
) -> (Option<EventSender>, Option<tokio::task::JoinHandle<()>>) {
    if !use_spinner {
        return (None, None);
    }
    let (tx, rx) = unbounded_channel();
    let handle = spawn_spinner_inner(rx);
    (Some(tx), Some(handle))
}

fn spawn_spinner_inner(mut rx: UnboundedReceiver<DownloadEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));

        let mut counter = String::new();
        while let Some(event) = rx.recv().await {
            match event {
                DownloadEvent::PageStarted { position, total, .. } => {
                    counter = format!("[{position}/{total}]");
                }
                DownloadEvent::FileStarted { path, .. } => {
                    spinner.set_message(transfer_message(&counter, &path, 0));
                }
                DownloadEvent::BytesReceived { path, bytes } => {
                    spinner.set_message(transfer_message(&counter, &path, bytes));
                }
                DownloadEvent::FileFinished { path, bytes } => {
                    spinner.println(finished_message(&path, bytes));
                }
            }
        }

        spinner.finish_and_clear();
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn transfer_message(counter: &str, path: &Path, bytes: u64) -> String {
    format!("{counter} {}: {bytes} bytes downloaded", display_name(path))
}

fn finished_message(path: &Path, bytes: u64) -> String {
    format!("\u{2713} {}: {bytes} bytes downloaded", display_name(path))
}
