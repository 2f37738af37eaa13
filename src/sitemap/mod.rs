//! Sitemap handling module
//!
//! This module provides functionality for fetching, parsing, and caching
//! sitemaps. A sitemap index is expanded one level: its children are fetched
//! and their page URLs concatenated, but a child that is itself an index is
//! not followed further.

mod cache;
mod parser;
mod probe;

pub use cache::{MemorySitemapCache, SitemapCache, SitemapCacheEntry, SITEMAP_CACHE_TTL_SECS};
pub use parser::{parse_sitemap, SitemapDocument};
pub use probe::{probe_sitemap, SitemapKind, SitemapProbe};

use crate::SitemapError;
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Default timeout for each sitemap request
pub const DEFAULT_SITEMAP_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches sitemap URL lists through a shared cache
#[derive(Clone)]
pub struct SitemapStore {
    client: Client,
    cache: Arc<dyn SitemapCache>,
    timeout: Duration,
}

impl SitemapStore {
    /// Creates a store that fetches with `client` and caches into `cache`
    pub fn new(client: Client, cache: Arc<dyn SitemapCache>) -> Self {
        Self {
            client,
            cache,
            timeout: DEFAULT_SITEMAP_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the cache backing this store
    pub fn cache(&self) -> &Arc<dyn SitemapCache> {
        &self.cache
    }

    /// Returns the page URLs listed by a sitemap
    ///
    /// The cache key is `sitemap_url` exactly as given. A fresh cache entry is
    /// returned without network I/O. Otherwise the sitemap is fetched, and
    /// the result is cached whether the fetch succeeded or not.
    ///
    /// # Arguments
    ///
    /// * `sitemap_url` - URL of a sitemap or sitemap index
    ///
    /// # Returns
    ///
    /// Page URLs in document order. An empty list means the sitemap could not
    /// be fetched or parsed, or listed nothing.
    pub async fn fetch(&self, sitemap_url: &str) -> Vec<String> {
        let now = Utc::now();
        if let Some(entry) = self.cache.get(sitemap_url) {
            if !entry.is_stale_at(now) {
                tracing::debug!("Using cached sitemap for: {}", sitemap_url);
                return entry.urls;
            }
        }

        tracing::info!("Fetching sitemap from: {}", sitemap_url);
        let urls = match self.fetch_uncached(sitemap_url).await {
            Ok(urls) => {
                tracing::info!("Sitemap {} lists {} URLs", sitemap_url, urls.len());
                urls
            }
            Err(e) => {
                tracing::warn!("Error fetching sitemap: {}", e);
                Vec::new()
            }
        };

        self.cache.put(sitemap_url, urls.clone(), now);
        urls
    }

    /// Fetches a sitemap without consulting or filling the cache
    ///
    /// A failure anywhere, including in a child of a sitemap index, fails the
    /// whole fetch.
    pub async fn fetch_uncached(&self, sitemap_url: &str) -> Result<Vec<String>, SitemapError> {
        let document = self.fetch_document(sitemap_url).await?;

        if !document.urls.is_empty() {
            return Ok(document.urls);
        }

        let mut urls = Vec::new();
        for child_url in &document.sitemaps {
            tracing::debug!("Expanding child sitemap: {}", child_url);
            let child = self
                .fetch_document(child_url)
                .await
                .map_err(|e| SitemapError::Child {
                    url: child_url.clone(),
                    source: Box::new(e),
                })?;
            urls.extend(child.urls);
        }

        Ok(urls)
    }

    async fn fetch_document(&self, url: &str) -> Result<SitemapDocument, SitemapError> {
        fetch_sitemap_document(&self.client, url, self.timeout).await
    }
}

/// Fetches and parses a single sitemap document
///
/// Non-success status codes are treated as failures.
pub(crate) async fn fetch_sitemap_document(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<SitemapDocument, SitemapError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|source| SitemapError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SitemapError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| SitemapError::Body {
        url: url.to_string(),
        source,
    })?;

    parse_sitemap(&body).map_err(|message| SitemapError::Xml {
        url: url.to_string(),
        message,
    })
}
