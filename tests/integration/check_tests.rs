//! Fetcher and link checker tests against mock servers

use crate::common::{create_test_config, mount_page, mount_status};
use checklink::classifier::{ContentClassifier, HeuristicClassifier};
use checklink::crawler::{FetchOutcome, Fetcher, HttpFetcher, LinkChecker, LinkStatus, Throttle};
use checklink::state::CrawlSession;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GOAL: &str = "Embassy consular services";

fn http_fetcher(timeout_secs: u64) -> Arc<HttpFetcher> {
    let mut config = create_test_config(0);
    config.crawler.request_timeout_secs = timeout_secs;
    Arc::new(HttpFetcher::new(&config.crawler, &config.user_agent).unwrap())
}

fn checker(fetcher: Arc<HttpFetcher>) -> LinkChecker {
    LinkChecker::new(
        fetcher,
        Arc::new(ContentClassifier::heuristic(HeuristicClassifier::default())),
    )
}

fn session(base: &str) -> CrawlSession {
    CrawlSession::new(Url::parse(base).unwrap(), GOAL, Throttle::new(Duration::ZERO)).unwrap()
}

/// A local port with nothing listening on it
fn closed_port_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap()
}

#[tokio::test]
async fn test_fetch_success_and_http_error() {
    let server = MockServer::start().await;
    mount_page(&server, "/ok", "<p>fine</p>").await;
    mount_status(&server, "/gone", 410).await;

    let fetcher = http_fetcher(2);
    let ok = fetcher
        .fetch(&Url::parse(&format!("{}/ok", server.uri())).unwrap())
        .await;
    let gone = fetcher
        .fetch(&Url::parse(&format!("{}/gone", server.uri())).unwrap())
        .await;

    match ok {
        FetchOutcome::Success {
            status_code, body, ..
        } => {
            assert_eq!(status_code, 200);
            assert_eq!(body, b"<p>fine</p>");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(!gone.is_ok());
    assert_eq!(gone.describe(), "HTTP 410 - Gone");
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    let server = MockServer::start().await;
    let location = format!("{}/new", server.uri());
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", location.as_str()))
        .mount(&server)
        .await;
    mount_page(&server, "/new", "<p>moved</p>").await;

    let outcome = http_fetcher(2)
        .fetch(&Url::parse(&format!("{}/old", server.uri())).unwrap())
        .await;

    match outcome {
        FetchOutcome::Success {
            final_url,
            status_code,
            ..
        } => {
            assert_eq!(status_code, 200);
            assert_eq!(final_url.path(), "/new");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_check_broken_link_reports_status() {
    let server = MockServer::start().await;
    mount_status(&server, "/missing", 404).await;
    mount_status(&server, "/error", 500).await;

    let checker = checker(http_fetcher(2));
    let session = session(&server.uri());

    let missing = Url::parse(&format!("{}/missing", server.uri())).unwrap();
    let result = checker.check(&session, "Missing", &missing, "en").await.unwrap();
    assert_eq!(result.status, LinkStatus::Broken);
    assert_eq!(result.reason, "HTTP 404 - Not Found");

    let error = Url::parse(&format!("{}/error", server.uri())).unwrap();
    let result = checker.check(&session, "Error", &error, "en").await.unwrap();
    assert_eq!(result.reason, "HTTP 500 - Internal Server Error");
}

#[tokio::test]
async fn test_check_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>Embassy consular services</p>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let checker = checker(http_fetcher(1));
    let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();

    let result = checker
        .check(&session(&server.uri()), "Slow", &url, "en")
        .await
        .unwrap();

    assert_eq!(result.status, LinkStatus::Timeout);
    assert_eq!(result.reason, "Request timeout");
}

#[tokio::test]
async fn test_check_connection_refused() {
    let url = closed_port_url();
    let checker = checker(http_fetcher(2));

    let result = checker
        .check(&session("http://127.0.0.1/"), "Down", &url, "en")
        .await
        .unwrap();

    assert_eq!(result.status, LinkStatus::ConnectionError);
    assert_eq!(result.reason, "Connection failed");
}

#[tokio::test]
async fn test_check_relevant_page_is_clean() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/visas",
        "<html><body><h1>Visas</h1><p>Embassy consular services for travellers.</p></body></html>",
    )
    .await;

    let url = Url::parse(&format!("{}/visas", server.uri())).unwrap();
    let result = checker(http_fetcher(2))
        .check(&session(&server.uri()), "Visas", &url, "en")
        .await;

    assert!(result.is_none());
}

#[tokio::test]
async fn test_check_scam_page_is_flagged() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/promo",
        "<html><body><p>Embassy consular services. Congratulations you won! Click here now.</p></body></html>",
    )
    .await;

    let url = Url::parse(&format!("{}/promo", server.uri())).unwrap();
    let result = checker(http_fetcher(2))
        .check(&session(&server.uri()), "Promo", &url, "fr")
        .await
        .unwrap();

    assert_eq!(result.status, LinkStatus::Flagged);
    assert_eq!(
        result.reason,
        "SUSPICIOUS: Contains suspicious/scam keywords: click here now, congratulations you won"
    );
    assert_eq!(result.language_code, "fr");
    assert!(result.content_snippet.unwrap().starts_with("Relevance: 6/10"));
}
