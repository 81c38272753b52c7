// src/models/listing.rs

//! Listing record and its parts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a listing is in its single population pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingState {
    /// Just constructed, only the source URL is set
    #[default]
    Empty,
    /// A population pass is running
    Populating,
    /// Walk finished; any number of fields may have been extracted
    Populated,
    /// Fetch or parse failed; only the source URL is set
    Failed,
}

impl ListingState {
    /// `Populated` and `Failed` are never left.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Populated | Self::Failed)
    }
}

/// Address as found on the page.
///
/// Only `value` is filled by extraction. The structured parts are kept for a
/// later address parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Raw address string
    pub value: String,
    pub street: String,
    pub postal_code: String,
    pub locality: String,
    pub region: String,
}

/// Asking price. No extractor fills this yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// ISO 4217 currency code
    pub currency: String,
    pub amount: i64,
}

/// An advertised open-house showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenHouse {
    /// Start instant, `None` when the source date did not parse
    pub start: Option<DateTime<Utc>>,
    /// End instant, `None` when the source date did not parse
    pub end: Option<DateTime<Utc>>,
    /// Display name (may be empty)
    pub name: String,
}

/// Structured data extracted from one listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// URL the listing was requested from
    pub url: String,

    /// Page's self-declared canonical URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,

    /// Summary description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub address: Address,

    /// Main photo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    #[serde(default)]
    pub price: Price,

    /// Open houses in document order
    #[serde(default)]
    pub open_houses: Vec<OpenHouse>,

    #[serde(default)]
    state: ListingState,
}

impl Listing {
    /// Create an empty listing for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            canonical_url: None,
            description: None,
            address: Address::default(),
            photo_url: None,
            price: Price::default(),
            open_houses: Vec::new(),
            state: ListingState::Empty,
        }
    }

    pub fn state(&self) -> ListingState {
        self.state
    }

    pub fn is_populated(&self) -> bool {
        self.state == ListingState::Populated
    }

    pub(crate) fn begin(&mut self) {
        self.state = ListingState::Populating;
    }

    pub(crate) fn complete(&mut self) {
        self.state = ListingState::Populated;
    }

    /// Mark the listing as failed.
    ///
    /// Used by callers that abandon a pass (deadline expiry) as well as by the
    /// assembler itself.
    pub fn fail(&mut self) {
        self.state = ListingState::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_listing_is_empty() {
        let listing = Listing::new("https://example.com/homedetails/1");
        assert_eq!(listing.url, "https://example.com/homedetails/1");
        assert_eq!(listing.state(), ListingState::Empty);
        assert!(listing.description.is_none());
        assert!(listing.photo_url.is_none());
        assert!(listing.open_houses.is_empty());
        assert_eq!(listing.price, Price::default());
    }

    #[test]
    fn terminal_states() {
        assert!(!ListingState::Empty.is_terminal());
        assert!(!ListingState::Populating.is_terminal());
        assert!(ListingState::Populated.is_terminal());
        assert!(ListingState::Failed.is_terminal());
    }

    #[test]
    fn serializes_instants_as_rfc3339() {
        let mut listing = Listing::new("https://example.com/1");
        listing.open_houses.push(OpenHouse {
            start: "2021-05-01T10:00:00Z".parse().ok(),
            end: None,
            name: "Open House".to_string(),
        });

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["open_houses"][0]["start"], "2021-05-01T10:00:00Z");
        assert!(json["open_houses"][0]["end"].is_null());
        assert_eq!(json["state"], "empty");
        assert!(json.get("description").is_none());
    }
}
