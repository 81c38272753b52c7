// src/lib.rs

//! openhouse: listing page extraction library
//!
//! Fetches a real-estate listing page and pulls its description, photo,
//! address, canonical URL and open-house events into a [`models::Listing`].

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
