//! Sitemap store tests: fetching, index expansion, and caching

use crate::{sitemap_index, urlset};
use chrono::{Duration as ChronoDuration, Utc};
use linkmend::sitemap::{MemorySitemapCache, SitemapCache, SitemapStore};
use linkmend::SitemapError;
use reqwest::Client;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_with(cache: Arc<MemorySitemapCache>) -> SitemapStore {
    SitemapStore::new(Client::new(), cache)
}

#[tokio::test]
async fn test_fetch_urlset() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let pages = vec![format!("{}/a", base_url), format!("{}/b", base_url)];

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&pages)))
        .mount(&mock_server)
        .await;

    let store = store_with(Arc::new(MemorySitemapCache::new()));
    let urls = store.fetch(&format!("{}/sitemap.xml", base_url)).await;

    assert_eq!(urls, pages);
}

#[tokio::test]
async fn test_repeated_fetch_hits_network_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let pages = vec![format!("{}/a", base_url)];

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&pages)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = store_with(Arc::new(MemorySitemapCache::new()));
    let sitemap_url = format!("{}/sitemap.xml", base_url);

    let first = store.fetch(&sitemap_url).await;
    let second = store.fetch(&sitemap_url).await;

    assert_eq!(first, second);
    assert_eq!(first, pages);
}

#[tokio::test]
async fn test_stale_entry_is_refetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let pages = vec![format!("{}/fresh", base_url)];

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&pages)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = Arc::new(MemorySitemapCache::new());
    let sitemap_url = format!("{}/sitemap.xml", base_url);
    cache.put(
        &sitemap_url,
        vec![format!("{}/old", base_url)],
        Utc::now() - ChronoDuration::seconds(301),
    );

    let store = store_with(Arc::clone(&cache));
    assert_eq!(store.fetch(&sitemap_url).await, pages);
    // Refreshed entry serves the second call.
    assert_eq!(store.fetch(&sitemap_url).await, pages);
}

#[tokio::test]
async fn test_fresh_entry_skips_network() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cache = Arc::new(MemorySitemapCache::new());
    let sitemap_url = format!("{}/sitemap.xml", base_url);
    let cached = vec![format!("{}/cached", base_url)];
    cache.put(&sitemap_url, cached.clone(), Utc::now() - ChronoDuration::seconds(60));

    let store = store_with(cache);
    assert_eq!(store.fetch(&sitemap_url).await, cached);
}

#[tokio::test]
async fn test_index_expanded_in_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let children = vec![format!("{}/a.xml", base_url), format!("{}/b.xml", base_url)];
    let first = vec![format!("{}/u1", base_url), format!("{}/u2", base_url)];
    let second = vec![format!("{}/u3", base_url)];

    Mock::given(method("GET"))
        .and(path("/sitemap_index.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_index(&children)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&first)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&second)))
        .mount(&mock_server)
        .await;

    let store = store_with(Arc::new(MemorySitemapCache::new()));
    let urls = store
        .fetch(&format!("{}/sitemap_index.xml", base_url))
        .await;

    let expected: Vec<String> = first.into_iter().chain(second).collect();
    assert_eq!(urls, expected);
}

#[tokio::test]
async fn test_nested_index_not_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let outer = vec![format!("{}/inner_index.xml", base_url)];
    let inner = vec![format!("{}/leaf.xml", base_url)];

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_index(&outer)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/inner_index.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_index(&inner)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/leaf.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = store_with(Arc::new(MemorySitemapCache::new()));
    let urls = store.fetch(&format!("{}/sitemap.xml", base_url)).await;

    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_failed_fetch_is_cached_as_empty() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = Arc::new(MemorySitemapCache::new());
    let store = store_with(Arc::clone(&cache));
    let sitemap_url = format!("{}/sitemap.xml", base_url);

    assert!(store.fetch(&sitemap_url).await.is_empty());
    assert!(store.fetch(&sitemap_url).await.is_empty());

    let entry = cache.get(&sitemap_url).expect("failure should be cached");
    assert!(entry.urls.is_empty());
}

#[tokio::test]
async fn test_failing_child_fails_whole_index() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let children = vec![
        format!("{}/a.xml", base_url),
        format!("{}/missing.xml", base_url),
    ];

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_index(&children)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a.xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(urlset(&[format!("{}/u1", base_url)])),
        )
        .mount(&mock_server)
        .await;

    let store = store_with(Arc::new(MemorySitemapCache::new()));
    let sitemap_url = format!("{}/sitemap.xml", base_url);

    let err = store
        .fetch_uncached(&sitemap_url)
        .await
        .expect_err("missing child should fail the index");
    assert!(matches!(err, SitemapError::Child { .. }));

    assert!(store.fetch(&sitemap_url).await.is_empty());
}

#[tokio::test]
async fn test_invalid_xml_yields_empty_list() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<urlset><url><loc>x</urlset>"))
        .mount(&mock_server)
        .await;

    let store = store_with(Arc::new(MemorySitemapCache::new()));
    let sitemap_url = format!("{}/sitemap.xml", base_url);

    let err = store.fetch_uncached(&sitemap_url).await.expect_err("bad XML");
    assert!(matches!(err, SitemapError::Xml { .. }));
    assert!(store.fetch(&sitemap_url).await.is_empty());
}
