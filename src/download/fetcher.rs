//! The network seam between the engine and the HTTP client.

use std::path::Path;

use async_trait::async_trait;

use super::error::DownloadError;
use super::events::EventSender;
use crate::resolve::OcrLink;

/// Performs the network side of a page download.
///
/// [`HttpClient`](super::HttpClient) is the production implementation.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Streams `url` into `dest`, replacing any existing file, and returns
    /// the number of bytes written.
    async fn download_to_path(
        &self,
        url: &str,
        dest: &Path,
        events: Option<&EventSender>,
    ) -> Result<u64, DownloadError>;

    /// Returns the URL of the ALTO document behind `link`.
    ///
    /// Direct links are returned as-is. Annotation lists are fetched and
    /// their first resource is returned; `None` means the list is empty.
    async fn resolve_ocr_url(&self, link: &OcrLink) -> Result<Option<String>, DownloadError>;
}
