// src/services/structured.rs

//! Linked-data (`application/ld+json`) extraction.
//!
//! Every text child of a structured-data `<script>` is decoded on its own;
//! objects declaring `"@type": "Event"` become open houses.

use scraper::ElementRef;
use scraper::node::Element;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{Diagnostics, Discard, Listing, OpenHouse};
use crate::utils::parse_instant;

/// Script type carrying linked data.
pub const LD_JSON: &str = "application/ld+json";

/// Object type turned into an open house.
pub const EVENT_TYPE: &str = "Event";

/// The part of a linked-data object this crate reads.
#[derive(Debug, Default, Deserialize)]
struct LinkedDataObject {
    #[serde(rename = "@type")]
    kind: Option<String>,
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<String>,
    name: Option<String>,
}

/// True for `<script type="application/ld+json">`.
pub fn is_linked_data(element: &Element) -> bool {
    element.attr("type") == Some(LD_JSON)
}

/// Append every event found in the script's text children to the listing.
pub fn extract_events(
    element: ElementRef<'_>,
    listing: &mut Listing,
    diagnostics: &mut Diagnostics,
) {
    for text in element.children().filter_map(|child| child.value().as_text()) {
        if let Some(event) = parse_event(text, diagnostics) {
            listing.open_houses.push(event);
        }
    }
}

/// Decode one candidate text into an open house.
///
/// Returns `None` (and records why) for invalid JSON, objects of the wrong
/// shape and objects of another type. A date that does not decode leaves the
/// instant unset; the event is still returned.
pub fn parse_event(text: &str, diagnostics: &mut Diagnostics) -> Option<OpenHouse> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            diagnostics.record(Discard::InvalidJson {
                message: e.to_string(),
            });
            return None;
        }
    };

    if !value.is_object() {
        diagnostics.record(Discard::UnexpectedShape {
            message: "expected a JSON object".to_string(),
        });
        return None;
    }

    let object: LinkedDataObject = match serde_json::from_value(value) {
        Ok(object) => object,
        Err(e) => {
            diagnostics.record(Discard::UnexpectedShape {
                message: e.to_string(),
            });
            return None;
        }
    };

    if object.kind.as_deref() != Some(EVENT_TYPE) {
        diagnostics.record(Discard::IgnoredType {
            declared: object.kind,
        });
        return None;
    }

    Some(OpenHouse {
        start: decode_date("startDate", object.start_date, diagnostics),
        end: decode_date("endDate", object.end_date, diagnostics),
        name: object.name.unwrap_or_default(),
    })
}

fn decode_date(
    field: &'static str,
    raw: Option<String>,
    diagnostics: &mut Diagnostics,
) -> Option<chrono::DateTime<chrono::Utc>> {
    let raw = raw.unwrap_or_default();
    let instant = parse_instant(&raw);
    if instant.is_none() {
        diagnostics.record(Discard::UnparsedDate { field, raw });
    }
    instant
}
