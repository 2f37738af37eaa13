//! Command-line tests against the built binary

use crate::urlset;
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn linkmend() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_linkmend"));
    command.arg("--quiet");
    command
}

#[tokio::test]
async fn test_sitemap_check_failure_exits_nonzero() {
    let mock_server = MockServer::start().await;
    let sitemap_url = format!("{}/sitemap.xml", mock_server.uri());

    let output = linkmend()
        .args(["--probe", sitemap_url.as_str()])
        .output()
        .await
        .expect("Failed to run linkmend");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("JSON on stdout");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Sitemap returned status code 404");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sitemap check failed"));
}

#[tokio::test]
async fn test_sitemap_check_success_exits_zero() {
    let mock_server = MockServer::start().await;
    let pages = vec![format!("{}/a", mock_server.uri())];

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&pages)))
        .mount(&mock_server)
        .await;

    let sitemap_url = format!("{}/sitemap.xml", mock_server.uri());
    let output = linkmend()
        .args(["--probe", sitemap_url.as_str()])
        .output()
        .await
        .expect("Failed to run linkmend");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("JSON on stdout");
    assert_eq!(json["url_count"], 1);
}

#[tokio::test]
async fn test_no_urls_rejected() {
    let output = linkmend().output().await.expect("Failed to run linkmend");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no URLs to check"));
}
