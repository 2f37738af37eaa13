//! Sitemap probe tests

use crate::{sitemap_index, urlset};
use linkmend::sitemap::{probe_sitemap, SitemapKind};
use reqwest::Client;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_probe_url_sitemap() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let pages = vec![format!("{}/a", base_url), format!("{}/b", base_url)];

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&pages)))
        .mount(&mock_server)
        .await;

    let sitemap_url = format!("{}/sitemap.xml", base_url);
    let probe = probe_sitemap(&Client::new(), &sitemap_url, None, TIMEOUT).await;

    assert!(probe.success);
    assert_eq!(probe.sitemap_url, sitemap_url);
    assert_eq!(probe.kind, Some(SitemapKind::UrlSitemap));
    assert_eq!(probe.url_count, 2);
    assert_eq!(probe.sitemap_index_count, 0);
    assert_eq!(probe.total_items, 2);
    assert!(probe.error.is_none());
}

#[tokio::test]
async fn test_probe_index_with_relative_path() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let children = vec![
        format!("{}/posts.xml", base_url),
        format!("{}/pages.xml", base_url),
    ];

    Mock::given(method("GET"))
        .and(path("/sitemap_index.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_index(&children)))
        .mount(&mock_server)
        .await;

    let sample = format!("{}/blog/some-post", base_url);
    let probe = probe_sitemap(
        &Client::new(),
        "/sitemap_index.xml",
        Some(sample.as_str()),
        TIMEOUT,
    )
    .await;

    assert!(probe.success);
    assert_eq!(probe.sitemap_url, format!("{}/sitemap_index.xml", base_url));
    assert_eq!(probe.kind, Some(SitemapKind::SitemapIndex));
    assert_eq!(probe.url_count, 0);
    assert_eq!(probe.sitemap_index_count, 2);
    assert_eq!(probe.total_items, 2);
}

#[tokio::test]
async fn test_probe_not_found() {
    let mock_server = MockServer::start().await;
    let sitemap_url = format!("{}/sitemap.xml", mock_server.uri());

    let probe = probe_sitemap(&Client::new(), &sitemap_url, None, TIMEOUT).await;

    assert!(!probe.success);
    assert_eq!(
        probe.error.as_deref(),
        Some("Sitemap returned status code 404")
    );
    assert!(probe.suggestion.is_some());
}

#[tokio::test]
async fn test_probe_invalid_xml() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<urlset><url></urlset>"))
        .mount(&mock_server)
        .await;

    let sitemap_url = format!("{}/sitemap.xml", mock_server.uri());
    let probe = probe_sitemap(&Client::new(), &sitemap_url, None, TIMEOUT).await;

    assert!(!probe.success);
    assert_eq!(probe.error.as_deref(), Some("Invalid XML format"));
    assert!(probe.details.is_some());
}

#[tokio::test]
async fn test_probe_empty_sitemap_suggests_index() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&[])))
        .mount(&mock_server)
        .await;

    let sitemap_url = format!("{}/sitemap.xml", mock_server.uri());
    let probe = probe_sitemap(&Client::new(), &sitemap_url, None, TIMEOUT).await;

    assert!(!probe.success);
    assert_eq!(
        probe.error.as_deref(),
        Some("Sitemap is empty or invalid format")
    );
    assert!(probe
        .suggestion
        .as_deref()
        .is_some_and(|s| s.contains("/sitemap_index.xml")));
}

#[tokio::test]
async fn test_probe_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(urlset(&[]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let sitemap_url = format!("{}/sitemap.xml", mock_server.uri());
    let probe = probe_sitemap(
        &Client::new(),
        &sitemap_url,
        None,
        Duration::from_millis(200),
    )
    .await;

    assert!(!probe.success);
    assert_eq!(
        probe.error.as_deref(),
        Some("Timeout - sitemap took too long to respond")
    );
}

#[tokio::test]
async fn test_probe_serializes_type_field() {
    let mock_server = MockServer::start().await;
    let pages = vec![format!("{}/a", mock_server.uri())];

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&pages)))
        .mount(&mock_server)
        .await;

    let sitemap_url = format!("{}/sitemap.xml", mock_server.uri());
    let probe = probe_sitemap(&Client::new(), &sitemap_url, None, TIMEOUT).await;
    let json = serde_json::to_value(&probe).unwrap();

    assert_eq!(json["type"], "url_sitemap");
    assert_eq!(json["url_count"], 1);
    assert!(json.get("error").is_none());
}
