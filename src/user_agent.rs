//! User-Agent string sent with every request.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/nicksrandall/iiif-downloader";

/// Default User-Agent for manifest, image, and ALTO requests.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("iiif-downloader/{version} (+{PROJECT_UA_URL})")
}
