//! Sequential download engine for selected pages.
//!
//! Pages are processed strictly one at a time, in selection order. For each
//! page the engine resolves its resources, downloads the image as
//! `<basename>.jpg`, and, when ALTO was requested and the page links one,
//! downloads it as `<basename>.xml`.
//!
//! # Example
//!
//! ```no_run
//! use iiif_downloader_core::download::{DownloadEngine, HttpClient};
//! use iiif_downloader_core::query::{SelectionOptions, select_pages};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let manifest = client.fetch_manifest("https://example.org/iiif/PPN1/manifest").await?;
//! let pages = select_pages(&manifest, &SelectionOptions::default(), &mut rand::thread_rng())?;
//! let engine = DownloadEngine::new(&client, "./scans").with_ocr(true);
//! let stats = engine.run(&pages).await?;
//! println!("images: {}, alto: {}", stats.images(), stats.ocr());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use super::error::DownloadError;
use super::events::{DownloadEvent, EventSender, emit};
use super::fetcher::Fetcher;
use crate::manifest::Canvas;
use crate::resolve::{PageResources, ResolveError, resolve_page};

/// Error type for download engine runs.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A selected page has no usable image.
    #[error("cannot resolve page: {0}")]
    Resolve(#[from] ResolveError),

    /// A transfer failed.
    #[error("download failed: {0}")]
    Download(#[from] DownloadError),
}

/// Counters from one engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadStats {
    images: usize,
    ocr: usize,
    ocr_missing: usize,
    bytes: u64,
}

impl DownloadStats {
    /// Number of images downloaded.
    #[must_use]
    pub fn images(&self) -> usize {
        self.images
    }

    /// Number of ALTO files downloaded.
    #[must_use]
    pub fn ocr(&self) -> usize {
        self.ocr
    }

    /// Number of pages for which ALTO was requested but not available.
    #[must_use]
    pub fn ocr_missing(&self) -> usize {
        self.ocr_missing
    }

    /// Total bytes written.
    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

/// Downloads selected pages into an output directory.
pub struct DownloadEngine<'f> {
    fetcher: &'f dyn Fetcher,
    output_dir: PathBuf,
    download_ocr: bool,
    events: Option<EventSender>,
}

impl<'f> DownloadEngine<'f> {
    /// Creates an engine writing into `output_dir`. ALTO is off by default.
    pub fn new(fetcher: &'f dyn Fetcher, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            output_dir: output_dir.into(),
            download_ocr: false,
            events: None,
        }
    }

    /// Enables or disables ALTO downloads.
    #[must_use]
    pub fn with_ocr(mut self, download_ocr: bool) -> Self {
        self.download_ocr = download_ocr;
        self
    }

    /// Attaches a progress channel.
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Downloads every page in order.
    ///
    /// Stops at the first page that cannot be resolved or fetched. A page
    /// without ALTO is counted in [`DownloadStats::ocr_missing`] and does not
    /// stop the run.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] for the first failing page.
    #[instrument(skip_all, fields(pages = pages.len(), ocr = self.download_ocr))]
    pub async fn run(&self, pages: &[&Canvas]) -> Result<DownloadStats, EngineError> {
        let mut stats = DownloadStats::default();
        let total = pages.len();

        for (index, page) in pages.iter().enumerate() {
            emit(
                self.events.as_ref(),
                DownloadEvent::PageStarted {
                    position: index + 1,
                    total,
                    page: page.id.clone(),
                },
            );

            let resources = resolve_page(page, self.download_ocr)?;
            let image_path = self.output_dir.join(resources.image_file_name());
            info!(url = %resources.image_url, path = %image_path.display(), "Downloading image");
            stats.bytes += self
                .fetcher
                .download_to_path(&resources.image_url, &image_path, self.events.as_ref())
                .await?;
            stats.images += 1;

            if self.download_ocr {
                self.download_ocr_for(page, &resources, &mut stats).await?;
            }
        }

        Ok(stats)
    }

    async fn download_ocr_for(
        &self,
        page: &Canvas,
        resources: &PageResources,
        stats: &mut DownloadStats,
    ) -> Result<(), DownloadError> {
        let target = match &resources.ocr {
            Some(link) => self.fetcher.resolve_ocr_url(link).await?,
            None => None,
        };
        let Some(url) = target else {
            debug!(page = %page.id, "skipping ALTO download, none linked");
            stats.ocr_missing += 1;
            return Ok(());
        };

        let ocr_path = self.output_dir.join(resources.ocr_file_name());
        info!(url = %url, path = %ocr_path.display(), "Downloading ALTO");
        stats.bytes += self
            .fetcher
            .download_to_path(&url, &ocr_path, self.events.as_ref())
            .await?;
        stats.ocr += 1;
        Ok(())
    }
}
