//! Page identifier comparison.
//!
//! Canvas identifiers are URIs that manifests spell inconsistently: the same
//! page may be referenced as `.../canvas/11` in a range and `.../canvas/11/`
//! in the sequence. Identifiers are compared after normalizing both sides to
//! end with exactly one `/`.

/// Returns `id` with all trailing `/` removed and exactly one appended.
#[must_use]
pub fn normalize_id(id: &str) -> String {
    let mut normalized = id.trim_end_matches('/').to_string();
    normalized.push('/');
    normalized
}

/// Returns true if both identifiers denote the same page.
#[must_use]
pub fn ids_equal(lhs: &str, rhs: &str) -> bool {
    lhs.trim_end_matches('/') == rhs.trim_end_matches('/')
}
