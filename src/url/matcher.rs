//! Redirect candidate scoring
//!
//! Scores how likely each live sitemap URL is to be the replacement for a
//! broken URL. Five independent signals are added together:
//!
//! | Signal | Weight |
//! |--------|--------|
//! | Shared path segments | 0.40 |
//! | Whole-path string similarity | 0.35 |
//! | Locale subdomain with a section keyword in the candidate | 0.10 |
//! | Shared `blog` / `service` / `categor` keywords | up to 0.35 |
//! | Shared segments once category words are removed | 0.20 |
//!
//! The sum is not normalized and can exceed 1.0. The acceptance threshold
//! of 0.25 is calibrated against these exact magnitudes.

use crate::url::domain::locale_token;
use crate::url::similarity::sequence_ratio;
use serde::Serialize;
use std::collections::HashSet;
use url::Url;

/// Minimum score for a candidate to be suggested
pub const MATCH_THRESHOLD: f64 = 0.25;

const SEGMENT_WEIGHT: f64 = 0.4;
const PATH_SIMILARITY_WEIGHT: f64 = 0.35;
const LOCALE_BONUS: f64 = 0.1;
const BLOG_BONUS: f64 = 0.15;
const SERVICE_BONUS: f64 = 0.1;
const CATEGORY_BONUS: f64 = 0.1;
const CONTENT_WEIGHT: f64 = 0.2;

/// Subdomain labels treated as locale hints
const LOCALE_SUBDOMAINS: &[&str] = &[
    "cs", "ko", "lo", "da", "es", "ja", "zh-cn", "ar", "tl", "sv", "fi", "de", "en", "ro", "it",
    "vi",
];

/// Candidate path keywords that earn the locale bonus
const LOCALE_SECTION_KEYWORDS: &[&str] = &["blog", "services", "category", "location"];

/// Translated "category" segments dropped from the broken URL
const BROKEN_CATEGORY_WORDS: &[&str] = &["kategorie", "categoria", "categoría", "범주", "ປະເພດ"];

/// Category segments dropped from the candidate URL
const CANDIDATE_CATEGORY_WORDS: &[&str] = &["category", "categories"];

/// Best candidate for a broken URL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// The winning candidate, if it cleared the threshold
    pub best_url: Option<String>,
    /// Its score, or `0.0` when nothing cleared the threshold
    pub score: f64,
}

impl MatchResult {
    /// A result with no suggestion
    pub fn none() -> Self {
        Self {
            best_url: None,
            score: 0.0,
        }
    }

    /// Applies the acceptance threshold to the best candidate found
    ///
    /// A score of exactly `MATCH_THRESHOLD` is accepted.
    pub fn from_best(best_url: Option<String>, best_score: f64) -> Self {
        match best_url {
            Some(url) if best_score >= MATCH_THRESHOLD => Self {
                best_url: Some(url),
                score: best_score,
            },
            _ => Self::none(),
        }
    }

    /// True if a candidate was accepted
    pub fn is_match(&self) -> bool {
        self.best_url.is_some()
    }
}

/// Comparable features of a URL's path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlFeatures {
    /// Lower-cased, percent-decoded path
    pub path: String,
    /// Non-empty `/`-separated components of `path`
    pub segments: Vec<String>,
}

impl UrlFeatures {
    /// Extracts path features from a URL string
    ///
    /// The path is taken from the string as written: an authority with no
    /// path gives an empty path, and dot-segments are kept. It is lower-cased
    /// before it is percent-decoded.
    pub fn from_url(raw: &str) -> Self {
        let written = raw_path(raw);

        let lowered = written.to_lowercase();
        let decoded = urlencoding::decode_binary(lowered.as_bytes());
        let path = String::from_utf8_lossy(&decoded).into_owned();
        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        Self { path, segments }
    }

    fn has_segment(&self, needle: &str) -> bool {
        self.segments.iter().any(|segment| segment == needle)
    }

    fn has_segment_containing(&self, needle: &str) -> bool {
        self.segments.iter().any(|segment| segment.contains(needle))
    }
}

/// Path component of a URL string, without parsing or normalizing it
///
/// Follows the generic URI split: optional `scheme:`, optional `//authority`,
/// then everything up to `?` or `#`. Parameters after a `;` in the last
/// segment are dropped.
fn raw_path(raw: &str) -> &str {
    let mut rest = raw;

    if let Some(colon) = rest.find(':') {
        let scheme = &rest[..colon];
        let is_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if is_scheme {
            rest = &rest[colon + 1..];
        }
    }

    if let Some(authority) = rest.strip_prefix("//") {
        rest = authority
            .find(['/', '?', '#'])
            .map(|end| &authority[end..])
            .unwrap_or("");
    }

    let path = rest.split(['#', '?']).next().unwrap_or("");
    let last_segment = path.rfind('/').unwrap_or(0);
    match path[last_segment..].find(';') {
        Some(params) => &path[..last_segment + params],
        None => path,
    }
}

/// `|set(left) ∩ set(right)| / max(len(left), len(right))`, or 0 if either is empty
fn overlap_ratio<S: AsRef<str>>(left: &[S], right: &[S]) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let left_set: HashSet<&str> = left.iter().map(|s| s.as_ref()).collect();
    let right_set: HashSet<&str> = right.iter().map(|s| s.as_ref()).collect();
    let shared = left_set.intersection(&right_set).count();
    shared as f64 / left.len().max(right.len()) as f64
}

/// Scores sitemap candidates against a broken URL
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlMatcher;

impl UrlMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Finds the best replacement for `broken_url` among `candidates`
    ///
    /// The candidate with the strictly highest score wins; on a tie the one
    /// seen first is kept. The winner is returned only if its score is at
    /// least `MATCH_THRESHOLD`.
    ///
    /// # Arguments
    ///
    /// * `broken_url` - The URL that failed its health check
    /// * `candidates` - Live URLs, usually from the site's sitemap
    ///
    /// # Returns
    ///
    /// The accepted candidate and its raw score, or `(None, 0.0)`
    pub fn score<S: AsRef<str>>(&self, broken_url: &str, candidates: &[S]) -> MatchResult {
        if candidates.is_empty() {
            return MatchResult::none();
        }

        let broken = UrlFeatures::from_url(broken_url);
        let locale = Url::parse(broken_url)
            .map(|url| locale_token(&url))
            .unwrap_or_default();
        let locale_hinted = LOCALE_SUBDOMAINS.contains(&locale.as_str());

        let mut best_url: Option<&str> = None;
        let mut best_score = 0.0;

        for candidate in candidates {
            let candidate = candidate.as_ref();
            let score = self.score_candidate(&broken, locale_hinted, candidate);
            if score > best_score {
                best_score = score;
                best_url = Some(candidate);
            }
        }

        tracing::trace!(
            "Best candidate for {}: {:?} ({:.3})",
            broken_url,
            best_url,
            best_score
        );

        MatchResult::from_best(best_url.map(str::to_string), best_score)
    }

    /// Raw score of one candidate against precomputed broken-URL features
    pub fn score_candidate(&self, broken: &UrlFeatures, locale_hinted: bool, candidate: &str) -> f64 {
        let candidate = UrlFeatures::from_url(candidate);
        let both_have_segments = !broken.segments.is_empty() && !candidate.segments.is_empty();
        let mut score = 0.0;

        if both_have_segments {
            score += overlap_ratio(&broken.segments, &candidate.segments) * SEGMENT_WEIGHT;
        }

        score += sequence_ratio(&broken.path, &candidate.path) * PATH_SIMILARITY_WEIGHT;

        if locale_hinted
            && LOCALE_SECTION_KEYWORDS
                .iter()
                .any(|keyword| candidate.path.contains(keyword))
        {
            score += LOCALE_BONUS;
        }

        if both_have_segments {
            if broken.has_segment("blog") && candidate.has_segment("blog") {
                score += BLOG_BONUS;
            }
            if broken.has_segment_containing("service") && candidate.has_segment_containing("service")
            {
                score += SERVICE_BONUS;
            }
            if broken.has_segment_containing("categor") && candidate.has_segment_containing("categor")
            {
                score += CATEGORY_BONUS;
            }

            let broken_content: Vec<&str> = broken
                .segments
                .iter()
                .map(String::as_str)
                .filter(|segment| !BROKEN_CATEGORY_WORDS.contains(segment))
                .collect();
            let candidate_content: Vec<&str> = candidate
                .segments
                .iter()
                .map(String::as_str)
                .filter(|segment| !CANDIDATE_CATEGORY_WORDS.contains(segment))
                .collect();
            score += overlap_ratio(&broken_content, &candidate_content) * CONTENT_WEIGHT;
        }

        score
    }
}
