// src/pipeline/extract.rs

//! Listing extraction pipeline.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{BatchConfig, Config, Diagnostics, Listing};
use crate::services::{ListingAssembler, PageFetcher};

/// A listing that could not be populated.
#[derive(Debug, Clone, Serialize)]
pub struct FailedListing {
    pub url: String,
    pub error: String,
}

/// Summary of an extraction run.
#[derive(Debug, Default, Serialize)]
pub struct ExtractOutcome {
    /// Populated listings, in input order
    pub listings: Vec<Listing>,
    /// Listings skipped because population failed
    pub failures: Vec<FailedListing>,
    /// Non-fatal discards across all populated listings
    pub diagnostics_total: usize,
}

/// Populate one listing per URL over HTTP.
pub async fn run_extract(config: &Config, urls: &[String]) -> Result<ExtractOutcome> {
    let assembler = ListingAssembler::from_config(&config.fetcher)?;

    log::info!(
        "Extracting {} listings ({} at a time, {}s deadline each)",
        urls.len(),
        config.batch.max_concurrent,
        config.batch.deadline_secs
    );

    let outcome = extract_all(&assembler, urls, &config.batch).await;

    log::info!(
        "Extraction complete: {} populated, {} failed, {} items discarded",
        outcome.listings.len(),
        outcome.failures.len(),
        outcome.diagnostics_total
    );
    Ok(outcome)
}

/// Populate one listing per URL with the given assembler.
///
/// Every listing owns its record and its request; at most
/// `batch.max_concurrent` run at once. A listing that fails or runs past the
/// deadline is skipped and reported in `failures`.
pub async fn extract_all<F: PageFetcher>(
    assembler: &ListingAssembler<F>,
    urls: &[String],
    batch: &BatchConfig,
) -> ExtractOutcome {
    let deadline = Duration::from_secs(batch.deadline_secs);
    let concurrency = batch.max_concurrent.max(1);

    let mut results = stream::iter(urls)
        .map(|url| populate_with_deadline(assembler, url, deadline))
        .buffered(concurrency);

    let mut outcome = ExtractOutcome::default();
    while let Some((listing, result)) = results.next().await {
        match result {
            Ok(diagnostics) => {
                outcome.diagnostics_total += diagnostics.len();
                outcome.listings.push(listing);
            }
            Err(error) => {
                log::warn!("Skipping listing {}: {}", listing.url, error);
                outcome.failures.push(FailedListing {
                    url: listing.url,
                    error: error.to_string(),
                });
            }
        }
    }

    outcome
}

async fn populate_with_deadline<F: PageFetcher>(
    assembler: &ListingAssembler<F>,
    url: &str,
    deadline: Duration,
) -> (Listing, Result<Diagnostics>) {
    let mut listing = Listing::new(url);

    // Dropping the timed-out future abandons the in-flight request.
    let timed = tokio::time::timeout(deadline, assembler.populate(&mut listing)).await;
    let result = match timed {
        Ok(result) => result,
        Err(_) => {
            listing.fail();
            Err(AppError::Deadline {
                url: url.to_string(),
                secs: deadline.as_secs(),
            })
        }
    };

    (listing, result)
}
