//! Error types for per-page resource resolution.

use thiserror::Error;

/// Errors that make a page impossible to download.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The canvas has no image annotation with a resource.
    #[error("page {page} has no image resource")]
    MissingImage {
        /// Canvas ID.
        page: String,
    },

    /// The image resource carries neither an `@id` nor a service `@id`.
    #[error("image resource of page {page} has no identifier")]
    MissingImageId {
        /// Canvas ID.
        page: String,
    },

    /// No file name can be derived from the image URL.
    #[error("cannot derive a file name from image URL {url} of page {page}")]
    NoBasename {
        /// Canvas ID.
        page: String,
        /// Base image URL.
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_messages_name_the_page() {
        let err = ResolveError::MissingImage {
            page: "https://example.org/canvas/3".to_string(),
        };
        assert!(err.to_string().contains("canvas/3"));

        let err = ResolveError::NoBasename {
            page: "p".to_string(),
            url: "https://example.org/".to_string(),
        };
        assert!(err.to_string().contains("https://example.org/"));
    }
}
