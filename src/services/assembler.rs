// src/services/assembler.rs

//! Listing population: fetch, parse, walk.

use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{Diagnostics, FetcherConfig, Listing, ListingState};
use crate::services::fetcher::{FetchedPage, HttpFetcher, PageFetcher};
use crate::services::walker::DocumentWalker;

/// Drives one fetch and one walk per listing.
pub struct ListingAssembler<F = HttpFetcher> {
    fetcher: F,
    walker: DocumentWalker,
}

impl ListingAssembler<HttpFetcher> {
    /// Create an assembler that fetches over HTTP.
    pub fn from_config(config: &FetcherConfig) -> Result<Self> {
        Ok(Self::new(HttpFetcher::new(config)?))
    }
}

impl<F: PageFetcher> ListingAssembler<F> {
    /// Create an assembler with the default extraction rules.
    pub fn new(fetcher: F) -> Self {
        Self::with_walker(fetcher, DocumentWalker::default())
    }

    pub fn with_walker(fetcher: F, walker: DocumentWalker) -> Self {
        Self { fetcher, walker }
    }

    /// Populate an empty listing from its source URL.
    ///
    /// On success the listing is `Populated` (even if nothing was found) and
    /// the non-fatal findings are returned. On failure it is `Failed` and no
    /// field other than the URL has been touched.
    pub async fn populate(&self, listing: &mut Listing) -> Result<Diagnostics> {
        if listing.state() != ListingState::Empty {
            return Err(AppError::input(format!(
                "listing for {} is {:?}, not empty",
                listing.url,
                listing.state()
            )));
        }
        listing.begin();

        let page = match self.fetcher.fetch(&listing.url).await {
            Ok(page) => page,
            Err(e) => {
                listing.fail();
                return Err(e);
            }
        };

        let diagnostics = self.extract(&page, listing);
        listing.complete();
        log::info!(
            "Populated {} ({} open houses, {} discarded items)",
            listing.url,
            listing.open_houses.len(),
            diagnostics.len()
        );
        Ok(diagnostics)
    }

    fn extract(&self, page: &FetchedPage, listing: &mut Listing) -> Diagnostics {
        let document = Html::parse_document(&page.body);
        if !document.errors.is_empty() {
            log::debug!("{} markup errors recovered in {}", document.errors.len(), page.url);
        }

        let mut diagnostics = Diagnostics::new();
        let stats = self.walker.walk(&document, listing, &mut diagnostics);
        log::debug!(
            "Walked {} nodes ({} elements, {} rule hits) for {}",
            stats.nodes,
            stats.elements,
            stats.rule_hits,
            page.url
        );
        diagnostics
    }
}
