//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use seo_ripple::config::{parse_config, CrawlConfig};
use seo_ripple::crawler::CrawlSession;
use seo_ripple::storage::PageRecord;
use seo_ripple::SessionPhase;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no pacing and output under `output_dir`
fn create_test_config(base_url: &str, output_dir: &Path) -> CrawlConfig {
    let mut config = CrawlConfig::new(base_url);
    config.crawler.rate_limit_seconds = 0.0;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.output.directory = output_dir.to_path_buf();
    config
}

async fn mount_html(server: &MockServer, route: &str, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.into())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

fn find<'a>(results: &'a [PageRecord], url: &str) -> Option<&'a PageRecord> {
    results.iter().find(|record| record.url == url)
}

fn count_csv_rows(path: &Path) -> usize {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV");
    reader.records().count()
}

#[tokio::test]
async fn test_home_page_then_linked_page() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_html(
        &server,
        "/",
        r#"<html><head><title>Home</title></head><body><a href="/about">About</a></body></html>"#,
    )
    .await;
    mount_html(&server, "/about", "<title>About us</title><h1>About</h1>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&base_url, dir.path());
    config.crawler.max_depth = 1;
    config.crawler.max_pages = 10;

    let mut session = CrawlSession::new(config).unwrap();
    session.crawl().await.unwrap();

    let results = session.results();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0].url, base_url);
    assert_eq!(results[0].title, "Home");
    assert_eq!(results[0].status, 200);

    assert_eq!(results[1].url, format!("{}/about", base_url));
    assert_eq!(results[1].title, "About us");
    assert_eq!(results[1].h1, "About");

    assert!(session.errors().is_empty());
    assert_eq!(session.phase(), SessionPhase::Finished);
}

#[tokio::test]
async fn test_seo_fields_extracted() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><head>
            <title>  Widgets  </title>
            <meta name="description" content=" All the widgets ">
            <meta name="robots" content="noindex, follow">
            <link rel="canonical" href="https://example.com/widgets">
        </head><body><h1> Best <em>widgets</em> </h1></body></html>"#,
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();
    session.crawl().await.unwrap();

    let record = &session.results()[0];
    assert_eq!(record.title, "Widgets");
    assert_eq!(record.description, "All the widgets");
    assert_eq!(record.meta_robots, "noindex, follow");
    assert_eq!(record.canonical, "https://example.com/widgets");
    assert_eq!(record.h1, "Best widgets");
    assert!(record.error.is_empty());
}

#[tokio::test]
async fn test_missing_robots_txt_allows_crawl() {
    let server = MockServer::start().await;
    mount_status(&server, "/robots.txt", 404).await;
    mount_html(&server, "/", "<title>Home</title>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();
    session.crawl().await.unwrap();

    assert_eq!(session.results().len(), 1);
    assert_eq!(session.results()[0].title, "Home");
}

#[tokio::test]
async fn test_robots_disallow_respected() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_html(&server, "/robots.txt", "User-agent: *\nDisallow: /private").await;
    mount_html(
        &server,
        "/",
        r#"<a href="/private/secret">Secret</a><a href="/public">Public</a>"#,
    )
    .await;
    mount_html(&server, "/public", "<title>Public</title>").await;
    mount_html(&server, "/private/secret", "<title>Secret</title>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CrawlSession::new(create_test_config(&base_url, dir.path())).unwrap();
    session.crawl().await.unwrap();

    let secret = format!("{}/private/secret", base_url);
    assert!(find(session.results(), &secret).is_none());
    assert!(!session.is_visited(&secret));
    assert!(find(session.results(), &format!("{}/public", base_url)).is_some());
    assert!(!requested_paths(&server)
        .await
        .contains(&"/private/secret".to_string()));
}

#[tokio::test]
async fn test_connection_error_recorded() {
    let server = MockServer::start().await;
    let broken = "http://127.0.0.1:1/broken";

    mount_html(&server, "/", format!(r#"<a href="{}">Broken</a>"#, broken)).await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();
    session.crawl().await.unwrap();

    let record = find(session.results(), broken).expect("broken link should be attempted");
    assert_eq!(record.status, 0);
    assert!(!record.error.is_empty());
    assert!(record.title.is_empty());

    assert_eq!(session.errors().len(), 1);
    assert_eq!(session.errors()[0].url, broken);
    assert_eq!(session.results().len(), 2);
}

#[tokio::test]
async fn test_error_classification() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_html(
        &server,
        "/",
        r#"<a href="/ok">ok</a><a href="/gone">gone</a><a href="/fail">fail</a>"#,
    )
    .await;
    mount_html(&server, "/ok", "<title>Ok</title>").await;
    mount_status(&server, "/gone", 404).await;
    // A non-200 page is recorded but its links are not followed
    Mock::given(method("GET"))
        .and(path("/fail"))
        .respond_with(ResponseTemplate::new(500).set_body_string(r#"<a href="/hidden">x</a>"#))
        .mount(&server)
        .await;
    mount_html(&server, "/hidden", "<title>Hidden</title>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CrawlSession::new(create_test_config(&base_url, dir.path())).unwrap();
    session.crawl().await.unwrap();

    assert_eq!(session.results().len(), 4);
    for record in session.results() {
        let in_errors = session.errors().contains(record);
        assert_eq!(in_errors, record.status != 200, "{}", record.url);
    }
    assert!(find(session.results(), &format!("{}/hidden", base_url)).is_none());
}

#[tokio::test]
async fn test_depth_limit() {
    let server = MockServer::start().await;
    mount_html(&server, "/", r#"<a href="/d1">1</a>"#).await;
    mount_html(&server, "/d1", r#"<a href="/d2">2</a>"#).await;
    mount_html(&server, "/d2", r#"<a href="/d3">3</a>"#).await;
    mount_html(&server, "/d3", "<title>Too deep</title>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&server.uri(), dir.path());
    config.crawler.max_depth = 2;

    let mut session = CrawlSession::new(config).unwrap();
    session.crawl().await.unwrap();

    assert_eq!(session.results().len(), 3);
    assert!(!requested_paths(&server).await.contains(&"/d3".to_string()));
}

#[tokio::test]
async fn test_page_cap() {
    let server = MockServer::start().await;
    let links: String = (0..10)
        .map(|i| format!(r#"<a href="/p{}">{}</a>"#, i, i))
        .collect();
    mount_html(&server, "/", links).await;
    for i in 0..10 {
        mount_html(&server, &format!("/p{}", i), "<title>Page</title>").await;
    }

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&server.uri(), dir.path());
    config.crawler.max_pages = 3;

    let mut session = CrawlSession::new(config).unwrap();
    session.crawl().await.unwrap();

    assert_eq!(session.results().len(), 3);
    assert!(session.frontier_len() > 0);
    assert_eq!(session.progress(), (3, 3));
}

#[tokio::test]
async fn test_each_url_fetched_once() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<a href="/a">a</a><a href="/b">b</a><a href="/a#top">a again</a>"#,
    )
    .await;
    mount_html(&server, "/a", r#"<a href="/b">b</a><a href="/">home</a>"#).await;
    mount_html(&server, "/b", r#"<a href="/a">a</a>"#).await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();
    session.crawl().await.unwrap();

    let urls: Vec<&str> = session.results().iter().map(|r| r.url.as_str()).collect();
    let unique: HashSet<&str> = urls.iter().copied().collect();
    assert_eq!(urls.len(), 3);
    assert_eq!(unique.len(), 3);

    let paths = requested_paths(&server).await;
    assert_eq!(paths.iter().filter(|p| p.as_str() == "/a").count(), 1);
}

#[tokio::test]
async fn test_other_hosts_out_of_scope() {
    let server = MockServer::start().await;
    let port = url::Url::parse(&server.uri()).unwrap().port().unwrap();

    // Same server under a different hostname
    let other_host = format!("http://localhost:{}/elsewhere", port);
    mount_html(
        &server,
        "/",
        format!(r#"<a href="{}">x</a><a href="/inside">y</a>"#, other_host),
    )
    .await;
    mount_html(&server, "/inside", "<title>Inside</title>").await;
    mount_html(&server, "/elsewhere", "<title>Elsewhere</title>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();
    session.crawl().await.unwrap();

    assert_eq!(session.results().len(), 2);
    for record in session.results() {
        let host = url::Url::parse(&record.url).unwrap().host_str().unwrap().to_string();
        assert_eq!(host, "127.0.0.1");
    }
}

#[tokio::test]
async fn test_sitemap_urls_seeded() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_html(
        &server,
        "/sitemap.xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                <url><loc>{}/orphan</loc></url>
            </urlset>"#,
            base_url
        ),
    )
    .await;
    mount_html(&server, "/orphan", "<title>Orphan</title>").await;
    mount_html(&server, "/", "<title>Home</title>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CrawlSession::new(create_test_config(&base_url, dir.path())).unwrap();
    session.crawl().await.unwrap();

    let results = session.results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, format!("{}/orphan", base_url));
    assert_eq!(results[1].url, base_url);
}

#[tokio::test]
async fn test_malformed_sitemap_ignored() {
    let server = MockServer::start().await;
    mount_html(&server, "/sitemap.xml", "<urlset><url><loc>oops</url>").await;
    mount_html(&server, "/", "<title>Home</title>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();
    session.crawl().await.unwrap();

    assert_eq!(session.results().len(), 1);
}

#[tokio::test]
async fn test_truncated_sitemap_ignored() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_html(
        &server,
        "/sitemap.xml",
        format!(
            "<urlset><url><loc>{0}/listed</loc></url><url><loc>{0}/cut",
            base_url
        ),
    )
    .await;
    mount_html(&server, "/listed", "<title>Listed</title>").await;
    mount_html(&server, "/", "<title>Home</title>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CrawlSession::new(create_test_config(&base_url, dir.path())).unwrap();
    session.crawl().await.unwrap();

    assert_eq!(session.results().len(), 1);
    assert_eq!(session.results()[0].url, base_url);
}

#[tokio::test]
async fn test_rate_limit_spacing() {
    let server = MockServer::start().await;
    mount_html(&server, "/", r#"<a href="/a">a</a><a href="/b">b</a>"#).await;
    mount_html(&server, "/a", "a").await;
    mount_html(&server, "/b", "b").await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&server.uri(), dir.path());
    config.crawler.rate_limit_seconds = 0.2;

    let mut session = CrawlSession::new(config).unwrap();
    session.initialize().await.unwrap();

    let start = Instant::now();
    session.run().await.unwrap();

    // Three fetches need at least two full intervals between their starts
    assert_eq!(session.results().len(), 3);
    assert!(start.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_autosave_snapshots() {
    let server = MockServer::start().await;
    let links: String = (0..4)
        .map(|i| format!(r#"<a href="/p{}">{}</a>"#, i, i))
        .collect();
    mount_html(&server, "/", links).await;
    for i in 0..4 {
        mount_html(&server, &format!("/p{}", i), "<title>Page</title>").await;
    }

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&server.uri(), dir.path());
    config.crawler.autosave_interval = 2;

    let autosave_csv = dir.path().join("autosave.csv");
    let observed = Arc::new(Mutex::new(Vec::new()));

    // Progress fires before the autosave for the same attempt, so the file
    // seen at attempt n reflects the snapshot taken at the last multiple of 2
    let seen = Arc::clone(&observed);
    let csv_path = autosave_csv.clone();
    let mut session = CrawlSession::new(config)
        .unwrap()
        .with_progress(move |done, _| {
            let rows = csv_path.exists().then(|| count_csv_rows(&csv_path));
            seen.lock().unwrap().push((done, rows));
        });
    session.crawl().await.unwrap();

    assert_eq!(session.results().len(), 5);
    let observed = observed.lock().unwrap().clone();
    assert_eq!(
        observed,
        vec![
            (1, None),
            (2, None),
            (3, Some(2)),
            (4, Some(2)),
            (5, Some(4)),
        ]
    );
    assert_eq!(count_csv_rows(&autosave_csv), 4);
    assert!(dir.path().join("autosave.xlsx").exists());
}

#[tokio::test]
async fn test_export_files() {
    let server = MockServer::start().await;
    mount_html(&server, "/", r#"<title>Home</title><a href="/missing">m</a>"#).await;
    mount_status(&server, "/missing", 404).await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();
    session.crawl().await.unwrap();

    let written = session.export_default().unwrap();
    assert_eq!(written.len(), 4);

    let base = dir.path().join("results");
    assert_eq!(count_csv_rows(&base.with_extension("csv")), 2);
    assert!(base.with_extension("xlsx").exists());

    let json = std::fs::read_to_string(base.with_extension("json")).unwrap();
    let records: serde_json::Value = serde_json::from_str(&json).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["title"], "Home");
    assert_eq!(records[1]["status"], 404);

    let error_log = dir.path().join("results_errors.log");
    let mut reader = csv::Reader::from_path(&error_log).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["url", "title", "description", "h1", "canonical", "meta_robots", "status", "error"]
    );
    assert_eq!(reader.records().count(), 1);
}

#[tokio::test]
async fn test_export_without_errors_skips_error_log() {
    let server = MockServer::start().await;
    mount_html(&server, "/", "<title>Home</title>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();
    session.crawl().await.unwrap();

    let written = session.export(&dir.path().join("site")).unwrap();
    assert_eq!(written.len(), 3);
    assert!(!dir.path().join("site_errors.log").exists());
}

#[tokio::test]
async fn test_crawl_from_config_file() {
    let server = MockServer::start().await;
    mount_html(&server, "/", r#"<title>Home</title><a href="/next">n</a>"#).await;
    mount_html(&server, "/next", "<title>Next</title>").await;

    let dir = tempfile::tempdir().unwrap();
    let content = format!(
        r#"
base-url = "{}"

[crawler]
max-depth = 0
rate-limit-seconds = 0.0
"#,
        server.uri()
    );
    let mut config = parse_config(&content).unwrap();
    config.output.directory = dir.path().to_path_buf();

    let mut session = CrawlSession::new(config).unwrap();
    session.crawl().await.unwrap();

    assert_eq!(session.results().len(), 1);
    assert_eq!(session.results()[0].title, "Home");
}
