//! End-to-end runs: detection, crawl, checks and reports

use crate::common::{create_test_config, mount_page, mount_status};
use checklink::crawler::{Coordinator, LinkStatus};
use checklink::output::{MarkdownReport, ReportSink};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_broken_and_irrelevant_links_are_reported() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;

    mount_page(
        &site,
        "/",
        &format!(
            r#"<html><head><title>Embassy</title>
            <meta name="description" content="Embassy consular services passports"></head>
            <body><a href="/a">Recipes</a><a href="{}/">Partner</a></body></html>"#,
            other.uri()
        ),
    )
    .await;
    mount_page(&site, "/a", "<html><body><p>Chocolate cake recipes</p></body></html>").await;
    mount_status(&other, "/", 404).await;

    let base = Url::parse(&site.uri()).unwrap();
    let report = Coordinator::new(create_test_config(1))
        .unwrap()
        .run(&base)
        .await
        .unwrap();

    assert_eq!(report.goal, "Embassy consular services passports");
    assert_eq!(report.languages.len(), 1);
    assert_eq!(report.languages[0].language.code, "default");

    let results = &report.languages[0].results;
    assert_eq!(results.len(), 2);

    assert_eq!(results[0].title, "Recipes");
    assert_eq!(results[0].status, LinkStatus::Flagged);
    assert!(results[0].reason.contains("LOW RELEVANCE"));

    assert_eq!(results[1].title, "Partner");
    assert_eq!(results[1].status, LinkStatus::Broken);
    assert!(results[1].reason.contains("404"));

    // The other site is only checked, never crawled.
    let other_requests = other.received_requests().await.unwrap();
    assert_eq!(other_requests.len(), 1);
}

#[tokio::test]
async fn test_language_variants_are_crawled_separately() {
    let site = MockServer::start().await;

    let home = r#"<html><head><meta name="description" content="Embassy consular services"></head><body>
        <ul class="language-switcher"><li><a href="/?lang=en">English</a></li><li><a href="/?lang=pt">Português</a></li></ul>
        </body></html>"#;
    let en = r#"<html><body><a href="/en/visas">Visas</a><a href="/en/old">Old page</a></body></html>"#;
    let pt = r#"<html><body><a href="/pt/vistos">Vistos</a></body></html>"#;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(en))
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("lang", "pt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(pt))
        .mount(&site)
        .await;
    mount_page(&site, "/", home).await;
    mount_page(&site, "/en/visas", "<p>Embassy consular services: visas</p>").await;
    mount_page(&site, "/pt/vistos", "<p>Embassy consular services: vistos</p>").await;
    mount_status(&site, "/en/old", 404).await;

    let base = Url::parse(&format!("{}/", site.uri())).unwrap();
    let report = Coordinator::new(create_test_config(0))
        .unwrap()
        .run(&base)
        .await
        .unwrap();

    let codes: Vec<_> = report.languages.iter().map(|l| l.language.code.as_str()).collect();
    assert_eq!(codes, vec!["en", "pt"]);
    assert_eq!(report.languages[1].language.display_name, "Português");

    let by_language = report.results_by_language();
    assert_eq!(by_language["en"].len(), 1);
    assert_eq!(by_language["en"][0].title, "Old page");
    assert_eq!(by_language["en"][0].language_code, "en");
    assert!(by_language["pt"].is_empty());
    assert_eq!(report.total_issues(), 1);
}

#[tokio::test]
async fn test_unreachable_variant_is_isolated() {
    let site = MockServer::start().await;

    let home = r#"<a href="?lang=en">EN</a><a href="?lang=de">DE</a>"#;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("lang", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="/fehlt">Fehlt</a>"#))
        .mount(&site)
        .await;
    mount_page(&site, "/", home).await;

    let base = Url::parse(&format!("{}/", site.uri())).unwrap();
    let report = Coordinator::new(create_test_config(0))
        .unwrap()
        .run(&base)
        .await
        .unwrap();

    let failed = report.failed_languages();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].language.code, "en");
    assert!(failed[0]
        .failure
        .as_deref()
        .unwrap()
        .contains("HTTP 503 - Service Unavailable"));

    assert_eq!(report.languages[1].results.len(), 1);
    assert_eq!(report.languages[1].results[0].status, LinkStatus::Broken);
}

#[tokio::test]
async fn test_reports_are_written_per_language() {
    let site = MockServer::start().await;
    mount_page(
        &site,
        "/",
        r#"<html><head><title>Consulate</title></head><body><p>Passport services</p><a href="/gone">Gone</a></body></html>"#,
    )
    .await;
    mount_status(&site, "/gone", 404).await;

    let base = Url::parse(&site.uri()).unwrap();
    let report = Coordinator::new(create_test_config(1))
        .unwrap()
        .with_config_hash("deadbeef")
        .run(&base)
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let files = MarkdownReport::new(dir.path()).write(&report).unwrap();

    assert_eq!(files.len(), 2);
    let language_report = std::fs::read_to_string(&files[0]).unwrap();
    let combined = std::fs::read_to_string(&files[1]).unwrap();

    assert!(files[0]
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("link_analysis_default_"));
    assert!(language_report.contains("Found 1 problematic links in DEFAULT"));
    assert!(language_report.contains("HTTP 404 - Not Found"));
    assert!(language_report.contains("- **Config Hash**: deadbeef"));
    assert!(combined.contains("Found 1 total issues across all languages"));
    assert_eq!(combined.matches("/gone").count(), 1);
}
