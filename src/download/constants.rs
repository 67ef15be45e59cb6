//! Constants for the download module (timeouts, error body limits).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large scans).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Maximum number of characters of an error response body kept for display.
pub const MAX_ERROR_BODY_CHARS: usize = 2000;
