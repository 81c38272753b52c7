//! Utility functions and helpers.

pub mod date;
pub mod http;

use url::Url;

pub use date::parse_instant;

/// Trim `raw` and check that it is an absolute http(s) URL.
pub fn normalize_url(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Url::parse(trimmed)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}
