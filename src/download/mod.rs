//! Network side of a run: manifest retrieval and streaming page downloads.
//!
//! This module is the only part of the crate that performs I/O. Selection
//! and resolution produce URLs and file names; the [`DownloadEngine`] feeds
//! them through a [`Fetcher`] one page at a time.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large scans)
//! - Configurable timeouts (30s connect, 5min read by default)
//! - Error responses keep the server's message for display
//! - Progress reported as [`DownloadEvent`]s over a channel
//!
//! # Example
//!
//! ```no_run
//! use iiif_downloader_core::download::{Fetcher, HttpClient};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let bytes = client
//!     .download_to_path(
//!         "https://example.org/iiif/00000001.tif/full/max/0/default.jpg",
//!         Path::new("./scans/00000001.jpg"),
//!         None,
//!     )
//!     .await?;
//! println!("Downloaded {bytes} bytes");
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;
mod events;
mod fetcher;

pub use client::HttpClient;
pub use constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use engine::{DownloadEngine, DownloadStats, EngineError};
pub use error::DownloadError;
pub use events::{DownloadEvent, EventSender};
pub use fetcher::Fetcher;

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
