// src/error.rs

//! Unified error handling for listing extraction.
//!
//! Only `Input`, `Connection` and `Fetch` are produced by a population pass;
//! html5ever recovers from any markup, so `Parse` is left to other parsers.
//! Problems inside a page (bad embedded JSON, unknown object types,
//! unparsable dates) never become errors; they end up in
//! [`Diagnostics`](crate::models::Diagnostics).

use thiserror::Error;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid input to a population pass (blank URL, reused listing)
    #[error("Invalid input: {0}")]
    Input(String),

    /// Transport failure reaching the origin (DNS, refused, TLS, timeout)
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// Origin answered with a non-2xx status
    #[error("Fetch error for {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    /// Fetched body could not be turned into a document tree
    #[error("Parse error for {url}: {message}")]
    Parse { url: String, message: String },

    /// Caller-imposed deadline expired and the request was abandoned
    #[error("Deadline of {secs}s exceeded for {url}")]
    Deadline { url: String, secs: u64 },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an input error.
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status carried by a `Fetch` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}
