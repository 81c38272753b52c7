// src/services/metadata.rs

//! `<meta>` tag extraction.
//!
//! A `<meta>` element is a field carrier when one of its attributes (the
//! selector) has an exact known value. The `content` attribute then supplies
//! the field value. Later carriers overwrite earlier ones.

use scraper::ElementRef;
use scraper::node::Element;

use crate::models::{Address, Diagnostics, Listing};

/// Listing field written by a `<meta>` carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Description,
    PhotoUrl,
    Address,
    CanonicalUrl,
}

/// One recognized `selector = value` pair.
#[derive(Debug, Clone, Copy)]
pub struct MetaMapping {
    pub selector: &'static str,
    pub value: &'static str,
    pub field: MetaField,
}

/// Recognized carriers, checked in order; the first match decides the field.
///
/// `name=canonical` is kept as found on listing pages even though the usual
/// carrier is `<link rel="canonical">`.
pub const META_MAPPINGS: &[MetaMapping] = &[
    MetaMapping {
        selector: "name",
        value: "description",
        field: MetaField::Description,
    },
    MetaMapping {
        selector: "property",
        value: "og:image",
        field: MetaField::PhotoUrl,
    },
    MetaMapping {
        selector: "property",
        value: "og:zillow_fb:address",
        field: MetaField::Address,
    },
    MetaMapping {
        selector: "name",
        value: "canonical",
        field: MetaField::CanonicalUrl,
    },
];

/// Find the field a `<meta>` element carries, if any.
pub fn classify(element: &Element) -> Option<MetaField> {
    META_MAPPINGS
        .iter()
        .find(|m| element.attr(m.selector) == Some(m.value))
        .map(|m| m.field)
}

/// Write the carried field onto the listing. Unrecognized tags are ignored.
pub fn extract_meta(element: ElementRef<'_>, listing: &mut Listing, _: &mut Diagnostics) {
    let Some(field) = classify(element.value()) else {
        return;
    };
    let content = element.value().attr("content").unwrap_or("").to_string();

    match field {
        MetaField::Description => listing.description = Some(content),
        MetaField::PhotoUrl => listing.photo_url = Some(content),
        MetaField::Address => {
            listing.address = Address {
                value: content,
                ..Address::default()
            }
        }
        MetaField::CanonicalUrl => listing.canonical_url = Some(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn run(html: &str) -> Listing {
        let document = Html::parse_document(html);
        let selector = Selector::parse("meta").unwrap();
        let mut listing = Listing::new("https://example.com/1");
        let mut diagnostics = Diagnostics::new();
        for element in document.select(&selector) {
            extract_meta(element, &mut listing, &mut diagnostics);
        }
        assert!(diagnostics.is_empty());
        listing
    }

    #[test]
    fn reads_all_recognized_carriers() {
        let listing = run(r#"<head>
            <meta name="description" content="Nice house">
            <meta property="og:image" content="http://x/photo.jpg">
            <meta property="og:zillow_fb:address" content="361 Blaine St, Seattle, WA 98109">
            <meta name="canonical" content="https://example.com/canonical">
        </head>"#);

        assert_eq!(listing.description.as_deref(), Some("Nice house"));
        assert_eq!(listing.photo_url.as_deref(), Some("http://x/photo.jpg"));
        assert_eq!(listing.address.value, "361 Blaine St, Seattle, WA 98109");
        assert!(listing.address.street.is_empty());
        assert_eq!(
            listing.canonical_url.as_deref(),
            Some("https://example.com/canonical")
        );
    }

    #[test]
    fn ignores_unrecognized_tags() {
        let listing = run(r#"<meta name="viewport" content="width=device-width">
            <meta property="og:title" content="Title">
            <meta charset="utf-8">"#);

        assert!(listing.description.is_none());
        assert!(listing.photo_url.is_none());
        assert!(listing.canonical_url.is_none());
        assert!(listing.address.value.is_empty());
    }

    #[test]
    fn last_carrier_wins() {
        let listing = run(r#"<meta name="description" content="first">
            <meta name="description" content="second">"#);
        assert_eq!(listing.description.as_deref(), Some("second"));
    }

    #[test]
    fn first_mapping_decides_a_double_carrier() {
        let listing = run(r#"<meta property="og:image" name="description" content="both">"#);
        assert_eq!(listing.description.as_deref(), Some("both"));
        assert!(listing.photo_url.is_none());
    }

    #[test]
    fn missing_content_writes_empty_string() {
        let listing = run(r#"<meta property="og:image">"#);
        assert_eq!(listing.photo_url.as_deref(), Some(""));
    }

    #[test]
    fn selector_values_match_exactly() {
        let listing = run(r#"<meta name="Description" content="upper">
            <meta property="og:image:width" content="640">"#);
        assert!(listing.description.is_none());
        assert!(listing.photo_url.is_none());
    }
}
