//! Pipeline entry points.
//!
//! - `run_extract`: populate a batch of listings from their URLs

pub mod extract;

pub use extract::{ExtractOutcome, FailedListing, extract_all, run_extract};
