//! HTTP health checks
//!
//! This module handles the HTTP side of checking a URL:
//! - Building the HTTP client with the configured user agent
//! - GET requests that follow redirects to the landing page
//! - Classifying transport failures
//!
//! A check is attempted once. A failure becomes part of the `CheckResult`;
//! it is not retried.

use crate::checker::result::{CheckResult, FetchErrorKind};
use crate::config::UserAgentConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Default timeout for a single health check
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum redirect hops followed per check
const MAX_REDIRECTS: usize = 10;

/// Builds an HTTP client with proper configuration
///
/// Timeouts are applied per request, so the same client serves both health
/// checks and sitemap fetches.
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use linkmend::config::UserAgentConfig;
/// use linkmend::checker::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Maps a transport error to its classification
pub fn classify_error(error: &reqwest::Error) -> FetchErrorKind {
    if error.is_timeout() {
        FetchErrorKind::Timeout
    } else if error.is_redirect() {
        FetchErrorKind::Redirect
    } else if error.is_connect() {
        FetchErrorKind::Connect
    } else if error.is_builder() {
        FetchErrorKind::InvalidUrl
    } else {
        FetchErrorKind::Other
    }
}

/// Checks a single URL
///
/// Issues a GET that follows redirects and records the final status code and
/// landing URL. The response body is not read.
///
/// | Outcome | `is_error` | `status_code` | `error_detail` |
/// |---------|-----------|---------------|----------------|
/// | HTTP 404 | true | 404 | none |
/// | Any other status | false | status | none |
/// | Transport failure | true | none | error text |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to check
/// * `timeout` - Timeout for the whole request, redirects included
pub async fn check_url(client: &Client, url: &str, timeout: Duration) -> CheckResult {
    match client.get(url).timeout(timeout).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let final_url = response.url().to_string();

            if status == 404 {
                tracing::info!("404 Found: {}", url);
            } else if status != 200 {
                tracing::info!("Status {}: {}", status, url);
            } else {
                tracing::debug!("OK: {}", url);
            }

            CheckResult::from_response(url, status, final_url)
        }
        Err(e) => {
            let kind = classify_error(&e);
            tracing::warn!("Error: {} - {}", url, e);
            CheckResult::from_transport_error(url, kind, e.to_string())
        }
    }
}
