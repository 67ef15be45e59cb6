//! IIIF Downloader Core Library
//!
//! This library selects pages of a IIIF presentation manifest by the
//! metadata of the structures (ranges) that contain them, and downloads the
//! page images and, optionally, their ALTO text layers.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`manifest`] - Typed, lenient view of the manifest document
//! - [`query`] - Label/value criteria, structure lookup and page selection
//! - [`resolve`] - Image request URLs, file names and ALTO links per page
//! - [`download`] - HTTP client and sequential download engine
//!
//! Selection and resolution are pure; only [`download`] performs I/O.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod manifest;
pub mod query;
pub mod resolve;
mod user_agent;

// Re-export commonly used types
pub use download::{
    DownloadEngine, DownloadError, DownloadEvent, DownloadStats, EngineError, EventSender, Fetcher,
    HttpClient,
};
pub use manifest::{Canvas, Manifest, ManifestError, Structure, ids_equal};
pub use query::{
    LabelValueCriterion, SelectionError, SelectionOptions, StructureIndex, StructureMode,
    metadata_matches, select_pages,
};
pub use resolve::{OcrLink, PageResources, ResolveError, resolve_page};
