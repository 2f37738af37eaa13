//! Plain-text batch report

use crate::checker::CheckResult;
use crate::output::BatchSummary;

/// Renders a human-readable report for a batch
///
/// # Arguments
///
/// * `results` - The checked URLs, in any order
/// * `summary` - Counters for the same batch
///
/// # Returns
///
/// The report text, ending with a newline
pub fn render_report(results: &[CheckResult], summary: &BatchSummary) -> String {
    let mut report = String::new();

    report.push_str("=== URL Check Report ===\n");
    report.push_str(&format!("Total URLs checked: {}\n\n", summary.total));
    report.push_str("Results:\n");
    report.push_str(&format!("- 404 Not Found: {}\n", summary.status_404));
    report.push_str(&format!("- 200 OK: {}\n", summary.status_200));
    report.push_str(&format!("- Other Status Codes: {}\n", summary.other_status));
    report.push_str(&format!("- Connection Errors: {}\n", summary.errors));
    report.push_str(&format!("- With Suggestions: {}\n", summary.with_suggestions));
    report.push_str(&format!("- Sitemap Errors: {}\n", summary.sitemap_errors));

    let not_found: Vec<&CheckResult> = results.iter().filter(|r| r.is_404()).collect();
    if !not_found.is_empty() {
        report.push_str("\n404 URLs:\n");
        for result in not_found {
            report.push_str(&format!(
                "  - {}{}\n",
                result.original_url,
                suggestion_note(result)
            ));
        }
    }

    let failed: Vec<&CheckResult> = results.iter().filter(|r| r.is_transport_error()).collect();
    if !failed.is_empty() {
        report.push_str("\nFailed URLs (connection errors):\n");
        for result in failed {
            report.push_str(&format!(
                "  - {}: {}\n",
                result.original_url,
                result.error_detail.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    report
}

fn suggestion_note(result: &CheckResult) -> String {
    match (&result.suggested_redirect, result.match_score) {
        (Some(target), Some(score)) => format!(" -> {} (score {:.2})", target, score),
        (Some(target), None) => format!(" -> {}", target),
        (None, _) => match &result.sitemap_error_message {
            Some(message) => format!(" ({})", message),
            None => String::new(),
        },
    }
}

/// Prints the report to stdout
pub fn print_report(results: &[CheckResult], summary: &BatchSummary) {
    print!("{}", render_report(results, summary));
}
