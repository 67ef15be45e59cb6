//! Error types for the download module.
//!
//! This module defines structured errors for manifest retrieval, annotation
//! list lookups, and file downloads.

use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::ManifestError;

/// Errors that can occur while talking to the IIIF server or writing files.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} fetching {url}{}", body_suffix(.body))]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// Response body text, if any was returned.
        body: Option<String>,
    },

    /// File system error during download (create file, write, etc.)
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The manifest response could not be parsed.
    #[error("could not load manifest from {url}: {source}")]
    Manifest {
        /// The manifest URL.
        url: String,
        /// The parse error.
        #[source]
        source: ManifestError,
    },

    /// An ALTO annotation list response is not JSON.
    #[error("invalid annotation list at {url}: {source}")]
    AnnotationList {
        /// The annotation list URL.
        url: String,
        /// The parse error.
        #[source]
        source: serde_json::Error,
    },
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref().map(|b| format!(":\n{b}")).unwrap_or_default()
}

impl DownloadError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error without a body.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
            body: None,
        }
    }

    /// Creates an HTTP status error carrying the server's response text.
    pub fn http_status_with_body(url: impl Into<String>, status: u16, body: Option<String>) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
            body: body.filter(|b| !b.trim().is_empty()),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a manifest parse error.
    pub fn manifest(url: impl Into<String>, source: ManifestError) -> Self {
        Self::Manifest {
            url: url.into(),
            source,
        }
    }

    /// Creates an annotation list parse error.
    pub fn annotation_list(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::AnnotationList {
            url: url.into(),
            source,
        }
    }
}
