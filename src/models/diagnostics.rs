//! Non-fatal extraction findings.

use serde::Serialize;

/// Why an item found on the page did not make it into the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discard {
    /// Structured-data text that is not valid JSON
    InvalidJson { message: String },
    /// Valid JSON that does not fit the expected object shape
    UnexpectedShape { message: String },
    /// Object whose `@type` is not the one being extracted
    IgnoredType { declared: Option<String> },
    /// Date string that did not decode; the event was kept without it
    UnparsedDate { field: &'static str, raw: String },
}

/// Collector passed alongside a listing during one population pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    discards: Vec<Discard>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, discard: Discard) {
        log::debug!("Discarded during extraction: {:?}", discard);
        self.discards.push(discard);
    }

    pub fn discards(&self) -> &[Discard] {
        &self.discards
    }

    pub fn len(&self) -> usize {
        self.discards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discards.is_empty()
    }
}
