//! URL handling module for Linkmend
//!
//! This module provides base-domain and sitemap-location helpers, the path
//! similarity ratio, and the redirect candidate matcher.

mod domain;
mod matcher;
mod similarity;

// Re-export main functions
pub use domain::{base_domain, locale_token, resolve_sitemap_url, DEFAULT_SITEMAP_PATH};
pub use matcher::{MatchResult, UrlFeatures, UrlMatcher, MATCH_THRESHOLD};
pub use similarity::sequence_ratio;
