//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP request settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Multi-listing population settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.batch.deadline_secs == 0 {
            return Err(AppError::validation("batch.deadline_secs must be > 0"));
        }
        if self.batch.max_concurrent == 0 {
            return Err(AppError::validation("batch.max_concurrent must be > 0"));
        }
        if let Some(blank) = self.batch.targets.iter().position(|t| t.trim().is_empty()) {
            return Err(AppError::validation(format!(
                "batch.targets[{blank}] is blank"
            )));
        }
        Ok(())
    }
}

/// Request headers and transport timeout.
///
/// The header defaults mimic a desktop browser; listing sites tend to answer
/// bare clients with a CAPTCHA page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept header
    #[serde(default = "defaults::accept")]
    pub accept: String,

    /// Accept-Language header
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Transport timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            accept: defaults::accept(),
            accept_language: defaults::accept_language(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Settings for populating several listings in one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Deadline for one whole population pass, in seconds
    #[serde(default = "defaults::deadline")]
    pub deadline_secs: u64,

    /// Listings populated at the same time
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Listing URLs used when none are given on the command line
    #[serde(default = "defaults::targets")]
    pub targets: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            deadline_secs: defaults::deadline(),
            max_concurrent: defaults::max_concurrent(),
            targets: defaults::targets(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter (`error`, `warn`, `info`, `debug`, `trace`)
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Fetcher defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.100 Safari/537.36".into()
    }
    pub fn accept() -> String {
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8"
            .into()
    }
    pub fn accept_language() -> String {
        "en-US,en;q=0.8".into()
    }
    pub fn timeout() -> u64 {
        20
    }

    // Batch defaults
    pub fn deadline() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        3
    }
    pub fn targets() -> Vec<String> {
        vec![
            "https://www.zillow.com/homedetails/361-Blaine-St-Seattle-WA-98109/48689963_zpid/"
                .into(),
            "https://www.zillow.com/homedetails/2854-S-Nevada-St-Seattle-WA-98108/70579954_zpid/"
                .into(),
            "https://www.zillow.com/homedetails/1109-122nd-Ave-E-Puyallup-WA-98372/2061905748_zpid/"
                .into(),
        ]
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
