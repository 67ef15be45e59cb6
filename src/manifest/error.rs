//! Error types for manifest parsing.

use thiserror::Error;

/// Errors that can occur while turning raw bytes into a [`Manifest`](super::Manifest).
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The document is not valid JSON, or its root is not an object.
    #[error("invalid manifest JSON: {source}\n  Suggestion: Check that the URL points at a IIIF presentation manifest")]
    InvalidJson {
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl ManifestError {
    /// Creates an `InvalidJson` error from a serde error.
    #[must_use]
    pub fn invalid_json(source: serde_json::Error) -> Self {
        Self::InvalidJson { source }
    }
}
