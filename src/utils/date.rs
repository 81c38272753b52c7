// src/utils/date.rs

//! Calendar timestamp decoding.
//!
//! Accepts ISO 8601 combined date-time strings as found in linked-data blocks:
//! `2021-05-01T10:00:00Z`, `2021-05-01T10:00:00.250-07:00`,
//! `2021-05-01T10:00:00+0700`, `2021-05-01T10:00+07`, and zone-less forms,
//! which are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

// `%#z` takes `Z`, `±hh`, `±hhmm` and `±hh:mm`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Decode a timestamp string into an instant.
///
/// Returns `None` for empty or malformed input; never fails harder than that.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
