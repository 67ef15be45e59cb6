//! Typed read-only view of a IIIF presentation manifest.
//!
//! Only the parts of the document the selector and resolver need are
//! modelled: the first sequence's canvases, the flat `structures` list, and
//! per-canvas image and `seeAlso` links. Everything else is ignored.
//!
//! Parsing is lenient. A single object is accepted where a list is expected,
//! `null` or a missing list is treated as empty, and list elements with an
//! unexpected shape are dropped instead of failing the whole document.
//!
//! # Example
//!
//! ```
//! use iiif_downloader_core::manifest::Manifest;
//!
//! let manifest = Manifest::from_json(r#"{
//!     "sequences": [{"canvases": [{"@id": "https://example.org/canvas/1"}]}],
//!     "structures": []
//! }"#).unwrap();
//! assert_eq!(manifest.pages().len(), 1);
//! ```

mod error;
mod page_id;
mod text;

pub use error::ManifestError;
pub use page_id::{ids_equal, normalize_id};
pub use text::LocalizedText;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

/// Root manifest document. Immutable once parsed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Human-readable title.
    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<LocalizedText>,
    /// Reading sequences; only the first is used.
    #[serde(default, deserialize_with = "one_or_many")]
    pub sequences: Vec<Sequence>,
    /// Flat list of ranges (table-of-contents nodes).
    #[serde(default, deserialize_with = "one_or_many")]
    pub structures: Vec<Structure>,
}

/// An ordered list of pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sequence {
    #[serde(default, deserialize_with = "one_or_many")]
    pub canvases: Vec<Canvas>,
}

/// One page of the object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Canvas {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<LocalizedText>,
    /// Image annotations; the first one is authoritative.
    #[serde(default, deserialize_with = "one_or_many")]
    pub images: Vec<ImageAnnotation>,
    /// Auxiliary links such as the ALTO annotation list.
    #[serde(rename = "seeAlso", default, deserialize_with = "one_or_many")]
    pub see_also: Vec<SeeAlso>,
}

/// An image annotation painting a resource onto a canvas.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageAnnotation {
    #[serde(default)]
    pub resource: Option<ImageResource>,
}

/// The image resource behind an annotation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageResource {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub service: Vec<ImageService>,
}

/// A IIIF image API service endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageService {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
}

/// An entry of a canvas' `seeAlso` list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeeAlso {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    #[serde(rename = "@type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<LocalizedText>,
}

/// A range: groups pages under shared metadata.
///
/// Ranges are not nested here; each one lists the pages it covers by ID.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Structure {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<LocalizedText>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub canvases: Vec<CanvasRef>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub metadata: Vec<Metadata>,
}

/// A page reference inside a range: a bare ID or an object carrying `@id`.
///
/// Anything else is kept as [`CanvasRef::Irregular`] so that the positions of
/// the remaining references, and with them a range's first page, stay intact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CanvasRef {
    Id(String),
    Object {
        #[serde(rename = "@id")]
        id: String,
    },
    Irregular(Value),
}

impl CanvasRef {
    /// The referenced page ID, `None` for an irregular reference.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Id(id) | Self::Object { id } => Some(id),
            Self::Irregular(_) => None,
        }
    }
}

/// One label/value metadata pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<LocalizedText>,
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<LocalizedText>,
}

impl Metadata {
    /// Builds a scalar label/value entry.
    #[must_use]
    pub fn scalar(label: &str, value: &str) -> Self {
        Self {
            label: Some(LocalizedText::from(label)),
            value: Some(LocalizedText::from(value)),
        }
    }
}

impl Manifest {
    /// Parses a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidJson`] if the text is not JSON or its
    /// root is not an object.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(json).map_err(ManifestError::invalid_json)
    }

    /// Parses a manifest from raw response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidJson`] if the bytes are not JSON or the
    /// root is not an object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ManifestError> {
        serde_json::from_slice(bytes).map_err(ManifestError::invalid_json)
    }

    /// The manifest's title, if it has a readable one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.label.as_ref().and_then(LocalizedText::first)
    }

    /// The sequence pages are taken from.
    #[must_use]
    pub fn primary_sequence(&self) -> Option<&Sequence> {
        self.sequences.first()
    }

    /// Pages of the primary sequence in display order.
    #[must_use]
    pub fn pages(&self) -> &[Canvas] {
        self.primary_sequence()
            .map_or(&[], |sequence| sequence.canvases.as_slice())
    }

    /// Finds the full page for `id` in the primary sequence.
    #[must_use]
    pub fn find_page(&self, id: &str) -> Option<&Canvas> {
        self.pages().iter().find(|page| ids_equal(&page.id, id))
    }
}

/// Accepts a list, a single element, or `null`; drops elements that do not
/// fit `T` with a warning.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        other => vec![other],
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(error = %e, "skipping irregular manifest element");
                None
            }
        })
        .collect())
}

/// Reads an optional field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            debug!(error = %e, "ignoring irregular manifest field");
            Ok(None)
        }
    }
}
