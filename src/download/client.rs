//! HTTP client wrapper for manifests, annotation lists, and page files.
//!
//! This module provides the `HttpClient` struct which handles streaming
//! downloads with timeout configuration and error handling.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde_json::Value;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, MAX_ERROR_BODY_CHARS, READ_TIMEOUT_SECS};
use super::error::DownloadError;
use super::events::{DownloadEvent, EventSender, emit};
use super::fetcher::Fetcher;
use crate::manifest::Manifest;
use crate::resolve::OcrLink;
use crate::user_agent;

/// HTTP client for IIIF manifests and page resources.
///
/// This client is designed to be created once and reused for the whole run,
/// taking advantage of connection pooling.
///
/// # Example
///
/// ```no_run
/// use iiif_downloader_core::download::HttpClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let manifest = client.fetch_manifest("https://example.org/iiif/PPN1/manifest").await?;
/// println!("{} pages", manifest.pages().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes
    /// - Gzip decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches and parses a IIIF presentation manifest.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns an error status; the error carries the body text
    /// - The response is not a JSON object
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_manifest(&self, url: &str) -> Result<Manifest, DownloadError> {
        let body = self.get_bytes(url).await?;
        let manifest =
            Manifest::from_slice(&body).map_err(|e| DownloadError::manifest(url, e))?;
        info!(
            title = manifest.title().unwrap_or("(untitled)"),
            pages = manifest.pages().len(),
            structures = manifest.structures.len(),
            "Received IIIF manifest"
        );
        Ok(manifest)
    }

    /// Fetches an annotation list and returns its first resource URL.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` on request failure or if the body is not JSON.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_annotation_list_target(
        &self,
        url: &str,
    ) -> Result<Option<String>, DownloadError> {
        let body = self.get_bytes(url).await?;
        let list: Value =
            serde_json::from_slice(&body).map_err(|e| DownloadError::annotation_list(url, e))?;
        Ok(first_annotation_target(&list))
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = self.send_get(url).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| map_request_error(url, e))?;
        Ok(body.to_vec())
    }

    async fn send_get(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .ok()
                .map(|text| text.chars().take(MAX_ERROR_BODY_CHARS).collect());
            return Err(DownloadError::http_status_with_body(
                url,
                status.as_u16(),
                body,
            ));
        }
        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    #[instrument(skip(self, events), fields(url = %url, path = %dest.display()))]
    async fn download_to_path(
        &self,
        url: &str,
        dest: &Path,
        events: Option<&EventSender>,
    ) -> Result<u64, DownloadError> {
        debug!("starting download");
        let response = self.send_get(url).await?;

        emit(
            events,
            DownloadEvent::FileStarted {
                url: url.to_string(),
                path: dest.to_path_buf(),
            },
        );

        let mut file = File::create(dest)
            .await
            .map_err(|e| DownloadError::io(dest, e))?;

        let stream_result = stream_to_file(&mut file, response, url, dest, events).await;
        if stream_result.is_err() {
            debug!(path = %dest.display(), "cleaning up partial file after error");
            drop(file);
            let _ = tokio::fs::remove_file(dest).await;
        }
        let bytes = stream_result?;

        emit(
            events,
            DownloadEvent::FileFinished {
                path: dest.to_path_buf(),
                bytes,
            },
        );
        info!(path = %dest.display(), bytes, "download complete");
        Ok(bytes)
    }

    async fn resolve_ocr_url(&self, link: &OcrLink) -> Result<Option<String>, DownloadError> {
        match link {
            OcrLink::Direct(url) => Ok(Some(url.clone())),
            OcrLink::AnnotationList(url) => self.fetch_annotation_list_target(url).await,
        }
    }
}

/// Streams response body to file, returning bytes written.
///
/// This is extracted to enable cleanup on error in the caller.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    path: &Path,
    events: Option<&EventSender>,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| map_request_error(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(path, e))?;

        bytes_written += chunk.len() as u64;
        emit(
            events,
            DownloadEvent::BytesReceived {
                path: path.to_path_buf(),
                bytes: bytes_written,
            },
        );
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(path, e))?;

    Ok(bytes_written)
}

fn map_request_error(url: &str, error: reqwest::Error) -> DownloadError {
    if error.is_timeout() {
        DownloadError::timeout(url)
    } else {
        DownloadError::network(url, error)
    }
}

/// First `resources[*].resource.@id`, falling back to `resources[*].@id`.
fn first_annotation_target(list: &Value) -> Option<String> {
    list.get("resources")?
        .as_array()?
        .iter()
        .find_map(|annotation| {
            annotation
                .pointer("/resource/@id")
                .or_else(|| annotation.get("@id"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
}
