//! Per-URL check records
//!
//! A `CheckResult` is created when its URL is checked, annotated at most once
//! with a redirect suggestion, and never modified after that.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why a URL check failed before any HTTP status was received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// The request did not complete within the timeout
    Timeout,
    /// DNS resolution, TCP connect, or TLS handshake failed
    Connect,
    /// Too many redirects, or a redirect loop
    Redirect,
    /// The URL could not be turned into a request
    InvalidUrl,
    /// Any other transport failure
    Other,
}

/// Health-check outcome for one input URL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// The URL exactly as submitted
    pub original_url: String,

    /// Final HTTP status, absent on transport failure
    pub status_code: Option<u16>,

    /// Landing URL after all redirects, absent on transport failure
    pub final_url: Option<String>,

    /// True on transport failure or HTTP 404
    pub is_error: bool,

    /// Transport error description
    pub error_detail: Option<String>,

    /// Transport error classification
    pub error_kind: Option<FetchErrorKind>,

    /// When the check completed
    pub checked_at: DateTime<Utc>,

    /// Suggested replacement URL for a failing check
    pub suggested_redirect: Option<String>,

    /// Match score of the suggestion, rounded to two decimals
    pub match_score: Option<f64>,

    /// Set when the sitemap needed for a suggestion could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitemap_error: Option<bool>,

    /// Names the sitemap that could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitemap_error_message: Option<String>,
}

impl CheckResult {
    /// Builds the record for a URL that produced an HTTP response
    pub fn from_response(original_url: &str, status_code: u16, final_url: String) -> Self {
        Self {
            original_url: original_url.to_string(),
            status_code: Some(status_code),
            final_url: Some(final_url),
            is_error: status_code == 404,
            error_detail: None,
            error_kind: None,
            checked_at: Utc::now(),
            suggested_redirect: None,
            match_score: None,
            sitemap_error: None,
            sitemap_error_message: None,
        }
    }

    /// Builds the record for a URL whose request failed in transport
    pub fn from_transport_error(original_url: &str, kind: FetchErrorKind, detail: String) -> Self {
        Self {
            original_url: original_url.to_string(),
            status_code: None,
            final_url: None,
            is_error: true,
            error_detail: Some(detail),
            error_kind: Some(kind),
            checked_at: Utc::now(),
            suggested_redirect: None,
            match_score: None,
            sitemap_error: None,
            sitemap_error_message: None,
        }
    }

    /// True if the final status was 404
    pub fn is_404(&self) -> bool {
        self.status_code == Some(404)
    }

    /// True if the request failed before any status was received
    pub fn is_transport_error(&self) -> bool {
        self.error_detail.is_some()
    }

    /// True if this result should get a redirect suggestion
    ///
    /// Broader than `is_error`: any 4xx or 5xx status qualifies.
    pub fn needs_suggestion(&self) -> bool {
        self.is_error || self.status_code.is_some_and(|status| status >= 400)
    }

    /// The URL whose site and path drive the suggestion: the landing URL if
    /// known, otherwise the submitted URL
    pub fn url_to_inspect(&self) -> &str {
        self.final_url.as_deref().unwrap_or(&self.original_url)
    }

    /// True if a suggestion (match or homepage fallback) was attached
    pub fn has_suggestion(&self) -> bool {
        self.suggested_redirect.is_some()
    }

    /// True if the sitemap for this result could not be read
    pub fn has_sitemap_error(&self) -> bool {
        self.sitemap_error == Some(true)
    }
}
