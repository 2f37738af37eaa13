//! Linkmend: broken-link triage with sitemap-driven redirect suggestions
//!
//! This crate checks a batch of URLs for health, and for every URL that fails
//! it consults the site's sitemap to suggest the live page that most likely
//! replaced it.

pub mod checker;
pub mod config;
pub mod output;
pub mod sitemap;
pub mod url;

use thiserror::Error;

/// Main error type for Linkmend operations
#[derive(Debug, Error)]
pub enum LinkmendError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Sitemap error: {0}")]
    Sitemap(#[from] SitemapError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No URLs to check")]
    EmptyInput,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Reasons a sitemap could not be turned into a URL list
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Failed to fetch sitemap {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("Sitemap {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read sitemap body from {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    #[error("Invalid sitemap XML at {url}: {message}")]
    Xml { url: String, message: String },

    #[error("Child sitemap {url} failed: {source}")]
    Child {
        url: String,
        source: Box<SitemapError>,
    },
}

/// Result type alias for Linkmend operations
pub type Result<T> = std::result::Result<T, LinkmendError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checker::{BatchCoordinator, CheckResult, FetchErrorKind, RedirectResolver};
pub use config::Config;
pub use output::BatchSummary;
pub use sitemap::{MemorySitemapCache, SitemapCache, SitemapStore};
pub use url::{MatchResult, UrlMatcher};
