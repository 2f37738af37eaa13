//! Aggregate counters for a batch

use crate::checker::CheckResult;
use serde::Serialize;

/// Counters over a batch of check results
///
/// `other_status` is whatever is left after 404s, 200s and transport errors,
/// so the four buckets always add up to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub status_404: usize,
    pub status_200: usize,
    pub errors: usize,
    pub other_status: usize,
    pub with_suggestions: usize,
    pub sitemap_errors: usize,
}

impl BatchSummary {
    /// Tallies a batch. Order of `results` does not matter.
    pub fn from_results(results: &[CheckResult]) -> Self {
        let total = results.len();
        let status_404 = results.iter().filter(|r| r.is_404()).count();
        let status_200 = results
            .iter()
            .filter(|r| r.status_code == Some(200))
            .count();
        let errors = results.iter().filter(|r| r.is_transport_error()).count();
        let with_suggestions = results.iter().filter(|r| r.has_suggestion()).count();
        let sitemap_errors = results.iter().filter(|r| r.has_sitemap_error()).count();

        Self {
            total,
            status_404,
            status_200,
            errors,
            other_status: total.saturating_sub(status_404 + status_200 + errors),
            with_suggestions,
            sitemap_errors,
        }
    }
}
