// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, UPGRADE_INSECURE_REQUESTS,
};

use crate::error::{AppError, Result};
use crate::models::FetcherConfig;

/// Headers sent with every listing request.
pub fn browser_headers(config: &FetcherConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    insert(&mut headers, ACCEPT, &config.accept)?;
    insert(&mut headers, ACCEPT_LANGUAGE, &config.accept_language)?;
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    Ok(headers)
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &FetcherConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(browser_headers(config)?)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value)
        .map_err(|e| AppError::config(format!("Invalid {name} header value: {e}")))?;
    headers.insert(name, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_headers_look_like_a_browser() {
        let headers = browser_headers(&FetcherConfig::default()).unwrap();
        assert_eq!(headers[UPGRADE_INSECURE_REQUESTS], "1");
        assert_eq!(headers[ACCEPT_LANGUAGE], "en-US,en;q=0.8");
        assert!(headers[ACCEPT].to_str().unwrap().starts_with("text/html"));
    }

    #[test]
    fn rejects_header_values_with_newlines() {
        let config = FetcherConfig {
            accept_language: "en\nX-Injected: 1".to_string(),
            ..FetcherConfig::default()
        };
        assert!(browser_headers(&config).is_err());
        assert!(create_async_client(&config).is_err());
    }
}
