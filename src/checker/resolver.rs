//! Redirect suggestions for failing URLs
//!
//! For each failing result, the resolver reads the sitemap of the site the
//! URL belongs to and attaches the best-matching live URL. There are three
//! outcomes:
//!
//! 1. A candidate clears the threshold: it is suggested with its score.
//! 2. The sitemap was read but nothing cleared the threshold: the site's
//!    homepage is suggested with a score of `0.0`.
//! 3. The sitemap could not be read (or listed nothing): no suggestion, and
//!    `sitemap_error` is set.

use crate::checker::result::CheckResult;
use crate::sitemap::SitemapStore;
use crate::url::{base_domain, resolve_sitemap_url, UrlMatcher};
use url::Url;

/// Attaches redirect suggestions to failing check results
#[derive(Clone)]
pub struct RedirectResolver {
    store: SitemapStore,
    matcher: UrlMatcher,
    sitemap_override: Option<String>,
}

impl RedirectResolver {
    /// Creates a resolver reading sitemaps through `store`
    ///
    /// # Arguments
    ///
    /// * `store` - Cached sitemap access
    /// * `sitemap_override` - Sitemap URL or path to use instead of
    ///   `/sitemap.xml`; paths are resolved against each failing URL's site
    pub fn new(store: SitemapStore, sitemap_override: Option<String>) -> Self {
        Self {
            store,
            matcher: UrlMatcher::new(),
            sitemap_override,
        }
    }

    /// The sitemap URL to consult for a given base domain
    pub fn sitemap_url_for(&self, base: &str) -> String {
        resolve_sitemap_url(base, self.sitemap_override.as_deref())
    }

    /// Annotates a failing result with a suggestion
    ///
    /// Results that do not need a suggestion are left untouched.
    pub async fn resolve(&self, result: &mut CheckResult) {
        if !result.needs_suggestion() {
            return;
        }

        let url_to_inspect = result.url_to_inspect().to_string();
        let base = match Url::parse(&url_to_inspect)
            .ok()
            .and_then(|url| base_domain(&url))
        {
            Some(base) => base,
            None => {
                tracing::warn!("Cannot derive a site for {}", url_to_inspect);
                mark_sitemap_error(
                    result,
                    format!("Cannot determine sitemap location for {}", url_to_inspect),
                );
                return;
            }
        };

        let sitemap_url = self.sitemap_url_for(&base);
        let candidates = self.store.fetch(&sitemap_url).await;

        if candidates.is_empty() {
            tracing::warn!("No sitemap found at: {}", sitemap_url);
            mark_sitemap_error(result, format!("Cannot access sitemap at {}", sitemap_url));
            return;
        }

        let matched = self.matcher.score(&url_to_inspect, &candidates);
        match matched.best_url {
            Some(best_url) => {
                tracing::debug!(
                    "Suggesting {} for {} (score {:.2})",
                    best_url,
                    result.original_url,
                    matched.score
                );
                result.suggested_redirect = Some(best_url);
                result.match_score = Some(round_score(matched.score));
            }
            None => {
                tracing::debug!(
                    "No close match for {}, falling back to homepage",
                    result.original_url
                );
                result.suggested_redirect = Some(format!("{}/", base));
                result.match_score = Some(0.0);
            }
        }
    }
}

fn mark_sitemap_error(result: &mut CheckResult, message: String) {
    result.suggested_redirect = None;
    result.match_score = Some(0.0);
    result.sitemap_error = Some(true);
    result.sitemap_error_message = Some(message);
}

/// Rounds a score to two decimals, from its exact binary value
///
/// `0.725` is stored as slightly less than 0.725 and rounds down.
fn round_score(score: f64) -> f64 {
    format!("{:.2}", score).parse().unwrap_or(score)
}
