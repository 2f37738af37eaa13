//! Sitemap diagnostics
//!
//! Checks whether a sitemap location is reachable and well-formed before a
//! batch relies on it, and explains what went wrong if it is not.

use crate::sitemap::parse_sitemap;
use crate::url::{base_domain, resolve_sitemap_url};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Kind of sitemap document found by a probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SitemapKind {
    /// A `<urlset>` listing pages
    UrlSitemap,
    /// A `<sitemapindex>` listing other sitemaps
    SitemapIndex,
}

/// Outcome of probing a sitemap location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapProbe {
    pub success: bool,
    /// The fully resolved sitemap URL that was requested
    pub sitemap_url: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SitemapKind>,
    pub url_count: usize,
    pub sitemap_index_count: usize,
    pub total_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl SitemapProbe {
    fn failure(sitemap_url: &str, error: impl Into<String>, suggestion: &str) -> Self {
        Self {
            success: false,
            sitemap_url: sitemap_url.to_string(),
            kind: None,
            url_count: 0,
            sitemap_index_count: 0,
            total_items: 0,
            error: Some(error.into()),
            details: None,
            suggestion: Some(suggestion.to_string()),
        }
    }
}

/// Probes a sitemap location without touching the sitemap cache
///
/// A relative `sitemap_url` is resolved against the base domain of
/// `sample_url` when one is given; otherwise it is requested as-is.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `sitemap_url` - Absolute sitemap URL, or a path such as `/sitemap.xml`
/// * `sample_url` - Any page on the site, used to resolve relative paths
/// * `timeout` - Request timeout
///
/// # Returns
///
/// A `SitemapProbe` describing the document or the failure. Never errors.
pub async fn probe_sitemap(
    client: &Client,
    sitemap_url: &str,
    sample_url: Option<&str>,
    timeout: Duration,
) -> SitemapProbe {
    let sitemap_url = match sample_url
        .and_then(|sample| Url::parse(sample).ok())
        .and_then(|sample| base_domain(&sample))
    {
        Some(base) => resolve_sitemap_url(&base, Some(sitemap_url)),
        None => sitemap_url.to_string(),
    };

    tracing::info!("Testing sitemap: {}", sitemap_url);

    let response = match client.get(&sitemap_url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) if e.is_timeout() => {
            return SitemapProbe::failure(
                &sitemap_url,
                "Timeout - sitemap took too long to respond",
                "The server is too slow. Try again or use a different sitemap URL",
            )
        }
        Err(e) if e.is_connect() => {
            return SitemapProbe::failure(
                &sitemap_url,
                "Cannot connect to sitemap URL",
                "Check if the domain is correct and accessible",
            )
        }
        Err(e) => {
            return SitemapProbe::failure(
                &sitemap_url,
                e.to_string(),
                "An unexpected error occurred. Please try a different sitemap URL",
            )
        }
    };

    if response.status() != StatusCode::OK {
        return SitemapProbe::failure(
            &sitemap_url,
            format!("Sitemap returned status code {}", response.status().as_u16()),
            "Please check if the sitemap URL is correct",
        );
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            return SitemapProbe::failure(
                &sitemap_url,
                e.to_string(),
                "An unexpected error occurred. Please try a different sitemap URL",
            )
        }
    };

    let document = match parse_sitemap(&body) {
        Ok(document) => document,
        Err(message) => {
            let mut probe = SitemapProbe::failure(
                &sitemap_url,
                "Invalid XML format",
                "The URL exists but is not a valid XML sitemap. Please check the URL",
            );
            probe.details = Some(message);
            return probe;
        }
    };

    if document.total_items() == 0 {
        return SitemapProbe::failure(
            &sitemap_url,
            "Sitemap is empty or invalid format",
            "The sitemap exists but contains no URLs. Try /sitemap_index.xml or another sitemap path",
        );
    }

    let kind = if document.sitemaps.is_empty() {
        SitemapKind::UrlSitemap
    } else {
        SitemapKind::SitemapIndex
    };

    SitemapProbe {
        success: true,
        sitemap_url,
        kind: Some(kind),
        url_count: document.urls.len(),
        sitemap_index_count: document.sitemaps.len(),
        total_items: document.total_items(),
        error: None,
        details: None,
        suggestion: None,
    }
}
