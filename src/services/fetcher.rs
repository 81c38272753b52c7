// src/services/fetcher.rs

//! Listing page fetcher.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::FetcherConfig;
use crate::utils::{http, normalize_url};

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL actually requested (trimmed)
    pub url: String,
    pub status: u16,
    /// Body decoded per the declared charset (UTF-8 otherwise), with
    /// undecodable bytes replaced
    pub body: String,
}

/// Capability to GET a page.
///
/// Implementations must reject blank URLs with [`AppError::Input`] before
/// touching the network, report transport failures as
/// [`AppError::Connection`] and non-2xx answers as [`AppError::Fetch`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// Fetcher backed by a reqwest client with browser-like headers.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given configuration.
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config)?,
        })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        if url.trim().is_empty() {
            return Err(AppError::input("URL is empty"));
        }
        let target = normalize_url(url)
            .ok_or_else(|| AppError::input(format!("not an absolute http(s) URL: {url:?}")))?;

        log::debug!("GET {}", target);
        let response = self.client.get(target.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch {
                url: target.into(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        log::debug!("{} answered {} ({} chars)", target, status, body.chars().count());

        Ok(FetchedPage {
            url: target.into(),
            status: status.as_u16(),
            body,
        })
    }
}
