//! Integration tests for Linkmend
//!
//! These tests use wiremock to stand in for the checked sites and their
//! sitemaps, and run the store, probe, and batch pipeline end-to-end.

mod cli_tests;
mod probe_tests;
mod sitemap_tests;

/// Renders a `<urlset>` sitemap
pub fn urlset(urls: &[String]) -> String {
    let entries: String = urls
        .iter()
        .map(|url| format!("<url><loc>{}</loc></url>", url))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

/// Renders a `<sitemapindex>` document
pub fn sitemap_index(children: &[String]) -> String {
    let entries: String = children
        .iter()
        .map(|url| format!("<sitemap><loc>{}</loc></sitemap>", url))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        entries
    )
}
