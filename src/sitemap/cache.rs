//! Sitemap caching implementation
//!
//! Fetched sitemap URL lists are cached per sitemap URL and expire after
//! five minutes. Failed fetches are cached too (as an empty list) so a broken
//! sitemap is not hammered while a batch runs.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Seconds a cached sitemap stays fresh
pub const SITEMAP_CACHE_TTL_SECS: i64 = 300;

/// Cached URL list for one sitemap
///
/// The list and its timestamp are stored and replaced together; readers
/// always see a complete entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapCacheEntry {
    /// Page URLs in document order. Empty means the fetch failed or the
    /// sitemap had no entries.
    pub urls: Vec<String>,

    /// When the sitemap was fetched
    pub fetched_at: DateTime<Utc>,
}

impl SitemapCacheEntry {
    /// Creates a new entry stamped with the current time
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            fetched_at: Utc::now(),
        }
    }

    /// Returns the age of the entry at `now`
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    /// Checks whether the entry has outlived the TTL at `now`
    ///
    /// An entry is fresh while its age is strictly below the TTL.
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        self.age_at(now) >= Duration::seconds(SITEMAP_CACHE_TTL_SECS)
    }

    /// Checks whether the entry is stale right now
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Utc::now())
    }
}

/// Storage for fetched sitemaps, keyed by sitemap URL
///
/// Implementations must be safe to share across tasks. `put` replaces any
/// prior entry for the key as a unit.
pub trait SitemapCache: Send + Sync {
    /// Returns the entry for `sitemap_url`, fresh or not
    fn get(&self, sitemap_url: &str) -> Option<SitemapCacheEntry>;

    /// Stores `urls` for `sitemap_url`, stamped with `fetched_at`
    fn put(&self, sitemap_url: &str, urls: Vec<String>, fetched_at: DateTime<Utc>);
}

/// In-memory cache backed by a mutex-guarded map
///
/// Entries are never evicted; staleness is decided by the reader.
#[derive(Debug, Default)]
pub struct MemorySitemapCache {
    entries: Mutex<HashMap<String, SitemapCacheEntry>>,
}

impl MemorySitemapCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sitemaps currently cached
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SitemapCacheEntry>> {
        // A panic while holding the lock cannot leave a half-written entry,
        // so a poisoned map is still consistent.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SitemapCache for MemorySitemapCache {
    fn get(&self, sitemap_url: &str) -> Option<SitemapCacheEntry> {
        self.lock().get(sitemap_url).cloned()
    }

    fn put(&self, sitemap_url: &str, urls: Vec<String>, fetched_at: DateTime<Utc>) {
        self.lock().insert(
            sitemap_url.to_string(),
            SitemapCacheEntry { urls, fetched_at },
        );
    }
}
