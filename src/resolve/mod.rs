//! Per-page resource resolution: image request URL, output basename, and
//! the optional ALTO link.
//!
//! The base image URL is the first image's resource `@id` (or its image
//! service `@id`). A plain service URL gets `/full/full/0/default.jpg`
//! appended. Some servers publish resource URLs that are already full image
//! requests (`<id>/<region>/<size>/<rotation>/default.jpg`) and reject
//! `full/full`; those are rewritten to `<id>/full/max/0/default.jpg` unless
//! the size is already `max`.

mod error;

pub use error::ResolveError;

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::manifest::{Canvas, SeeAlso};

/// `seeAlso` label marking the ALTO text layer.
pub const ALTO_LABEL: &str = "ALTO";

/// Suffix appended to image service URLs.
pub const FULL_IMAGE_SUFFIX: &str = "/full/full/0/default.jpg";

/// Suffix used when rewriting image request URLs.
pub const MAX_IMAGE_SUFFIX: &str = "/full/max/0/default.jpg";

/// Extension of downloaded images.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Extension of downloaded ALTO files.
pub const OCR_EXTENSION: &str = "xml";

/// Matches `<id>/<region>/<size>/<rotation>/default.jpg`; `<id>` must
/// itself contain a path separator.
static IMAGE_REQUEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r"^(.*/[^/]+)/[^/]+/([^/]+)/[^/]+/default\.jpg$")
});

/// Compiles a regex at static init; panics on invalid pattern.
fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Where a page's ALTO text lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrLink {
    /// The link is the ALTO document itself.
    Direct(String),
    /// The link is an annotation list that must be fetched to find the ALTO
    /// document.
    AnnotationList(String),
}

impl OcrLink {
    /// The linked URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Direct(url) | Self::AnnotationList(url) => url,
        }
    }
}

/// Everything needed to download one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResources {
    /// Full-resolution image request URL.
    pub image_url: String,
    /// File stem shared by the image and ALTO files.
    pub basename: String,
    /// ALTO link, when requested and present.
    pub ocr: Option<OcrLink>,
}

impl PageResources {
    /// File name for the image, e.g. `00000001.jpg`.
    #[must_use]
    pub fn image_file_name(&self) -> String {
        format!("{}.{IMAGE_EXTENSION}", self.basename)
    }

    /// File name for the ALTO document, e.g. `00000001.xml`.
    #[must_use]
    pub fn ocr_file_name(&self) -> String {
        format!("{}.{OCR_EXTENSION}", self.basename)
    }
}

/// Resolves the download URLs for `page`.
///
/// When `with_ocr` is false the `seeAlso` list is not inspected. A page
/// without an ALTO link resolves with `ocr: None`.
///
/// # Errors
///
/// Returns [`ResolveError`] if the page has no usable image resource.
pub fn resolve_page(page: &Canvas, with_ocr: bool) -> Result<PageResources, ResolveError> {
    let base = base_image_url(page)?;
    let (image_url, basename) = image_request(base);
    if basename.is_empty() {
        return Err(ResolveError::NoBasename {
            page: page.id.clone(),
            url: base.to_string(),
        });
    }

    let ocr = if with_ocr { find_alto_link(page) } else { None };
    if with_ocr && ocr.is_none() {
        debug!(page = %page.id, "no ALTO link on page");
    }

    Ok(PageResources {
        image_url,
        basename,
        ocr,
    })
}

/// First image's resource `@id`, falling back to its service `@id`.
fn base_image_url(page: &Canvas) -> Result<&str, ResolveError> {
    let resource = page
        .images
        .first()
        .and_then(|image| image.resource.as_ref())
        .ok_or_else(|| ResolveError::MissingImage {
            page: page.id.clone(),
        })?;
    resource
        .id
        .as_deref()
        .or_else(|| resource.service.first().and_then(|s| s.id.as_deref()))
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ResolveError::MissingImageId {
            page: page.id.clone(),
        })
}

/// Returns the image request URL and the basename for a base image URL.
#[must_use]
pub fn image_request(base: &str) -> (String, String) {
    if let Some(captures) = IMAGE_REQUEST_RE.captures(base) {
        let identifier = captures.get(1).map_or("", |m| m.as_str());
        let size = captures.get(2).map_or("", |m| m.as_str());
        let url = if size == "max" {
            base.to_string()
        } else {
            format!("{identifier}{MAX_IMAGE_SUFFIX}")
        };
        return (url, basename_of(identifier));
    }
    let trimmed = base.trim_end_matches('/');
    (format!("{trimmed}{FULL_IMAGE_SUFFIX}"), basename_of(trimmed))
}

/// Last non-empty path segment with a trailing extension removed.
fn basename_of(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .unwrap_or_default()
            .to_string(),
        Err(_) => url.rsplit('/').next().unwrap_or(url).to_string(),
    };
    match segment.rfind('.') {
        Some(dot) if dot > 0 => segment[..dot].to_string(),
        _ => segment,
    }
}

/// Finds the `seeAlso` entry whose first label is exactly `ALTO`.
#[must_use]
pub fn find_alto_link(page: &Canvas) -> Option<OcrLink> {
    page.see_also
        .iter()
        .filter(|link| link.label.as_ref().and_then(|l| l.first()) == Some(ALTO_LABEL))
        .find_map(ocr_link)
}

fn ocr_link(link: &SeeAlso) -> Option<OcrLink> {
    let url = link.id.clone().filter(|id| !id.is_empty())?;
    let is_annotation_list = link
        .kind
        .as_deref()
        .is_some_and(|kind| kind == "sc:AnnotationList" || kind == "AnnotationList");
    Some(if is_annotation_list {
        OcrLink::AnnotationList(url)
    } else {
        OcrLink::Direct(url)
    })
}
