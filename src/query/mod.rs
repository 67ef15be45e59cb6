//! Manifest query engine: criteria, metadata matching, structure lookup and
//! page selection.
//!
//! # Example
//!
//! ```
//! use iiif_downloader_core::manifest::Manifest;
//! use iiif_downloader_core::query::{SelectionOptions, StructureMode, select_pages};
//!
//! let manifest = Manifest::from_json(r#"{
//!     "sequences": [{"canvases": [{"@id": "p1"}, {"@id": "p2"}]}],
//!     "structures": [{"canvases": ["p2"],
//!                     "metadata": [{"label": "Chapter", "value": "Intro"}]}]
//! }"#).unwrap();
//!
//! let options = SelectionOptions {
//!     include: vec!["Chapter::Intro".parse().unwrap()],
//!     structure_mode: StructureMode::FirstPage,
//!     ..SelectionOptions::default()
//! };
//! let pages = select_pages(&manifest, &options, &mut rand::thread_rng()).unwrap();
//! assert_eq!(pages[0].id, "p2");
//! ```

mod criterion;
mod error;
mod matcher;
mod selector;
mod structure_index;

pub use criterion::{CRITERION_SEPARATOR, LabelValueCriterion};
pub use error::{CriterionError, SelectionError};
pub use matcher::metadata_matches;
pub use selector::{SelectionOptions, select_pages};
pub use structure_index::{StructureIndex, StructureMode};
