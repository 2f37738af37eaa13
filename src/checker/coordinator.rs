//! Batch coordinator - fans URL checks out to a bounded worker pool
//!
//! This module runs a whole batch:
//! - Checking every URL concurrently, at most `max_workers` at a time
//! - Attaching redirect suggestions to the failing results
//! - Computing the summary counters
//!
//! Results come back in completion order, not input order. Use
//! `CheckResult::original_url` to match them to the input.

use crate::checker::fetcher::{build_http_client, check_url, DEFAULT_CHECK_TIMEOUT};
use crate::checker::resolver::RedirectResolver;
use crate::checker::result::{CheckResult, FetchErrorKind};
use crate::config::Config;
use crate::output::BatchSummary;
use crate::sitemap::{SitemapCache, SitemapStore};
use crate::LinkmendError;
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default number of concurrent checks
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Results and counters for one batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub results: Vec<CheckResult>,
    pub summary: BatchSummary,
}

/// Runs batches of URL checks
#[derive(Clone)]
pub struct BatchCoordinator {
    client: Client,
    resolver: RedirectResolver,
    request_timeout: Duration,
}

impl BatchCoordinator {
    /// Creates a coordinator from its parts
    pub fn new(client: Client, resolver: RedirectResolver) -> Self {
        Self {
            client,
            resolver,
            request_timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }

    /// Builds a coordinator, its HTTP client, and its sitemap store from
    /// configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Checker and user agent settings
    /// * `cache` - Sitemap cache to use for this run
    ///
    /// # Returns
    ///
    /// * `Ok(BatchCoordinator)` - Ready to run batches
    /// * `Err(LinkmendError)` - The HTTP client could not be built
    pub fn from_config(config: &Config, cache: Arc<dyn SitemapCache>) -> Result<Self, LinkmendError> {
        let client = build_http_client(&config.user_agent)?;
        let store = SitemapStore::new(client.clone(), cache)
            .with_timeout(Duration::from_secs(config.checker.sitemap_timeout));
        let resolver = RedirectResolver::new(store, config.checker.sitemap_url.clone());

        Ok(Self::new(client, resolver)
            .with_request_timeout(Duration::from_secs(config.checker.request_timeout)))
    }

    /// Overrides the per-check timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Checks every URL, suggests redirects for failures, and tallies counters
    ///
    /// # Arguments
    ///
    /// * `urls` - URLs to check; must not be empty
    /// * `max_workers` - Maximum concurrent checks (values below 1 are treated as 1)
    ///
    /// # Returns
    ///
    /// * `Ok(BatchReport)` - One result per input URL, plus the summary
    /// * `Err(LinkmendError::EmptyInput)` - `urls` was empty
    pub async fn check_all(
        &self,
        urls: &[String],
        max_workers: usize,
    ) -> Result<BatchReport, LinkmendError> {
        if urls.is_empty() {
            return Err(LinkmendError::EmptyInput);
        }

        let start_time = Instant::now();
        tracing::info!(
            "Starting URL checks ({} URLs, {} concurrent workers)",
            urls.len(),
            max_workers.max(1)
        );

        let mut results = self.check_concurrently(urls, max_workers).await;

        for result in results.iter_mut() {
            self.resolver.resolve(result).await;
        }

        let summary = BatchSummary::from_results(&results);
        tracing::info!(
            "Completed {} checks in {:.1}s: {} not found, {} errors, {} with suggestions",
            summary.total,
            start_time.elapsed().as_secs_f64(),
            summary.status_404,
            summary.errors,
            summary.with_suggestions
        );

        Ok(BatchReport { results, summary })
    }

    async fn check_concurrently(&self, urls: &[String], max_workers: usize) -> Vec<CheckResult> {
        let semaphore = Arc::new(Semaphore::new(max_workers.max(1)));
        let mut tasks = JoinSet::new();

        for url in urls {
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let url = url.clone();
            let timeout = self.request_timeout;

            tasks.spawn(async move {
                // Never closed, so acquisition always succeeds.
                let _permit = semaphore.acquire_owned().await.ok();
                check_url(&client, &url, timeout).await
            });
        }

        collect_checks(tasks, urls).await
    }
}

/// Drains finished checks, keeping one result per input URL
///
/// A task that panicked or was cancelled yields no `CheckResult`; its URL is
/// recorded as a transport error instead.
async fn collect_checks(mut tasks: JoinSet<CheckResult>, urls: &[String]) -> Vec<CheckResult> {
    let total = urls.len();
    let mut pending: HashMap<&str, usize> = HashMap::new();
    for url in urls {
        *pending.entry(url.as_str()).or_default() += 1;
    }

    let mut results = Vec::with_capacity(total);
    let mut last_failure = None;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => {
                if let Some(count) = pending.get_mut(result.original_url.as_str()) {
                    *count = count.saturating_sub(1);
                }
                results.push(result);
                tracing::debug!("Progress: {}/{}", results.len(), total);
            }
            Err(e) => {
                tracing::error!("URL check task failed: {}", e);
                last_failure = Some(e.to_string());
            }
        }
    }

    for url in urls {
        if let Some(count) = pending.get_mut(url.as_str()) {
            if *count > 0 {
                *count -= 1;
                let detail = last_failure
                    .clone()
                    .unwrap_or_else(|| "check did not complete".to_string());
                results.push(CheckResult::from_transport_error(
                    url,
                    FetchErrorKind::Other,
                    format!("URL check task failed: {}", detail),
                ));
            }
        }
    }

    results
}
