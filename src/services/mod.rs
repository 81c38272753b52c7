//! Service layer for listing extraction.
//!
//! - `PageFetcher` / `HttpFetcher`: GET a listing page
//! - `DocumentWalker`: pre-order traversal with rule dispatch
//! - `metadata`: `<meta>` field carriers
//! - `structured`: linked-data open-house events
//! - `ListingAssembler`: fetch, parse and walk into one `Listing`

pub mod assembler;
pub mod fetcher;
pub mod metadata;
pub mod structured;
pub mod walker;

pub use assembler::ListingAssembler;
pub use fetcher::{FetchedPage, HttpFetcher, PageFetcher};
pub use walker::{DocumentWalker, ExtractionRule, WalkStats};
