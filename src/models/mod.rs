// src/models/mod.rs

//! Domain models for listing extraction.

mod config;
mod diagnostics;
mod listing;

// Re-export all public types
pub use config::{BatchConfig, Config, FetcherConfig, LoggingConfig};
pub use diagnostics::{Diagnostics, Discard};
pub use listing::{Address, Listing, ListingState, OpenHouse, Price};
