//! Checker module for URL health checks and redirect suggestions
//!
//! This module contains the batch pipeline:
//! - HTTP health checks with error classification
//! - Redirect suggestions for failing URLs, drawn from the site's sitemap
//! - Bounded-concurrency batch coordination

mod coordinator;
mod fetcher;
mod resolver;
mod result;

pub use coordinator::{BatchCoordinator, BatchReport, DEFAULT_MAX_WORKERS};
pub use fetcher::{build_http_client, check_url, classify_error, DEFAULT_CHECK_TIMEOUT};
pub use resolver::RedirectResolver;
pub use result::{CheckResult, FetchErrorKind};
