//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, including the JSON output file.

use std::path::Path;
use std::time::Duration;
use sumi_glean::config::{Config, CookieConfig, CrawlConfig, RendererConfig};
use sumi_glean::crawler::{crawl, Coordinator, HttpRenderer};
use sumi_glean::output::{load_results, CrawlResult, JsonFileSink};
use sumi_glean::state::{PageState, TerminationReason};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing to `output`
fn create_test_config(seed: String, pattern: String, max_pages: usize, output: &Path) -> Config {
    Config {
        crawl: CrawlConfig {
            url: seed,
            match_pattern: pattern,
            selector: "#content".to_string(),
            max_pages_to_crawl: max_pages,
            output_file_name: output.to_string_lossy().into_owned(),
        },
        cookie: None,
        renderer: RendererConfig {
            navigation_timeout_ms: 1000,
            selector_timeout_ms: 100,
            user_agent: Some("sumi-glean-test/1.0".to_string()),
        },
    }
}

/// Mounts an HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn page(content: Option<&str>, links: &[&str]) -> String {
    let content = content
        .map(|text| format!(r#"<div id="content">{}</div>"#, text))
        .unwrap_or_default();
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        "<html><head><title>Test</title></head><body>{}{}</body></html>",
        content, anchors
    )
}

#[tokio::test]
async fn test_full_crawl_writes_output_file() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/a", &page(Some("hi"), &["/b", "/b#frag"])).await;

    // Reached through two hrefs, navigated once
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page(Some("bye"), &[]))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.json");
    let config = create_test_config(
        format!("{}/a", base_url),
        format!("{}/**", base_url),
        2,
        &output,
    );

    let report = crawl(config).await.expect("Crawl failed");
    assert_eq!(report.termination, TerminationReason::FrontierExhausted);
    assert_eq!(report.results, 2);

    let results = load_results(&output).expect("Failed to read output");
    assert_eq!(
        results,
        vec![
            CrawlResult::new(format!("{}/a", base_url), "hi"),
            CrawlResult::new(format!("{}/b", base_url), "bye"),
        ]
    );

    // Pretty-printed with a 2-space indent
    let raw = std::fs::read_to_string(&output).unwrap();
    assert!(raw.starts_with("[\n  {\n    \"url\": "));
    assert!(!output.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn test_output_holds_rendered_text_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/a",
        r#"<html><head><title>Docs</title></head><body>
            <style>h1{color:red}</style>
            <div id="content">
                <script>var secret = 1;</script>
                <h1>Intro</h1>
                <p>Hello</p><p>World</p>
            </div>
        </body></html>"#,
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.json");
    let config = create_test_config(
        format!("{}/a", base_url),
        format!("{}/**", base_url),
        5,
        &output,
    );
    crawl(config).await.expect("Crawl failed");

    let results = load_results(&output).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].html, "Intro\nHello\nWorld");
}

#[tokio::test]
async fn test_budget_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/a", &page(Some("hi"), &["/b"])).await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(Some("bye"), &[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.json");
    let config = create_test_config(
        format!("{}/a", base_url),
        format!("{}/**", base_url),
        1,
        &output,
    );

    let report = crawl(config).await.expect("Crawl failed");
    assert_eq!(report.termination, TerminationReason::BudgetReached);

    let results = load_results(&output).unwrap();
    assert_eq!(results, vec![CrawlResult::new(format!("{}/a", base_url), "hi")]);
}

#[tokio::test]
async fn test_missing_selector_still_follows_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/a", &page(None, &["/b"])).await;
    mount_page(&mock_server, "/b", &page(Some("bye"), &[])).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.json");
    let config = create_test_config(
        format!("{}/a", base_url),
        format!("{}/**", base_url),
        5,
        &output,
    );

    let report = crawl(config).await.expect("Crawl failed");
    assert_eq!(report.termination, TerminationReason::FrontierExhausted);
    assert_eq!(report.statistics.pages_in_state(PageState::NoContent), 1);

    let results = load_results(&output).unwrap();
    assert_eq!(results, vec![CrawlResult::new(format!("{}/b", base_url), "bye")]);
}

#[tokio::test]
async fn test_navigation_timeout_skips_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page(Some("too late"), &["/b"]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/b", &page(Some("bye"), &[])).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.json");
    let mut config = create_test_config(
        format!("{}/a", base_url),
        format!("{}/**", base_url),
        5,
        &output,
    );
    config.renderer.navigation_timeout_ms = 100;

    let report = crawl(config).await.expect("Crawl failed");
    assert_eq!(report.termination, TerminationReason::FrontierExhausted);
    assert_eq!(report.results, 0);
    assert_eq!(
        report.statistics.pages_in_state(PageState::NavigationTimeout),
        1
    );

    // The final persist still writes an empty array
    let results = load_results(&output).unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_error_status_skips_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/a", &page(Some("hi"), &["/gone", "/c"])).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string(page(Some("not found"), &[])))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/c", &page(Some("sea"), &[])).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.json");
    let config = create_test_config(
        format!("{}/a", base_url),
        format!("{}/**", base_url),
        5,
        &output,
    );

    let report = crawl(config).await.expect("Crawl failed");
    assert_eq!(
        report.statistics.pages_in_state(PageState::NavigationFailed),
        1
    );

    let urls: Vec<String> = load_results(&output)
        .unwrap()
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert_eq!(urls, vec![format!("{}/a", base_url), format!("{}/c", base_url)]);
}

#[tokio::test]
async fn test_cookie_sent_with_requests() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Unmatched requests get wiremock's default 404
    for (route, body) in [
        ("/a", page(Some("members only"), &["/b"])),
        ("/b", page(Some("still members"), &[])),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("cookie", "session=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&mock_server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.json");
    let mut config = create_test_config(
        format!("{}/a", base_url),
        format!("{}/**", base_url),
        5,
        &output,
    );
    config.cookie = Some(CookieConfig {
        name: "session".to_string(),
        value: "abc123".to_string(),
    });

    let report = crawl(config).await.expect("Crawl failed");
    assert_eq!(report.results, 2);
}

#[tokio::test]
async fn test_pattern_filters_links_but_not_seed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/start",
        &page(
            Some("seed"),
            &["/docs/one", "/blog/post", "https://other.test/docs/two"],
        ),
    )
    .await;
    mount_page(&mock_server, "/docs/one", &page(Some("one"), &[])).await;
    Mock::given(method("GET"))
        .and(path("/blog/post"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(Some("blog"), &[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.json");
    let config = create_test_config(
        format!("{}/start", base_url),
        format!("{}/docs/*", base_url),
        10,
        &output,
    );

    crawl(config).await.expect("Crawl failed");

    let urls: Vec<String> = load_results(&output)
        .unwrap()
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert_eq!(
        urls,
        vec![format!("{}/start", base_url), format!("{}/docs/one", base_url)]
    );
}

#[tokio::test]
async fn test_breadth_first_order_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &page(Some("root"), &["/l1a", "/l1b"])).await;
    mount_page(&mock_server, "/l1a", &page(Some("1a"), &["/l2a"])).await;
    mount_page(&mock_server, "/l1b", &page(Some("1b"), &["/l2b", "/"])).await;
    mount_page(&mock_server, "/l2a", &page(Some("2a"), &[])).await;
    mount_page(&mock_server, "/l2b", &page(Some("2b"), &[])).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.json");
    let config = create_test_config(
        format!("{}/", base_url),
        format!("{}/*", base_url),
        10,
        &output,
    );

    let renderer = HttpRenderer::launch(&config.renderer).unwrap();
    let sink = JsonFileSink::new(&output);
    let mut coordinator = Coordinator::new(config, renderer, sink).unwrap();
    let report = coordinator.run().await.expect("Crawl failed");

    let contents: Vec<&str> = coordinator
        .results()
        .iter()
        .map(|r| r.html.as_str())
        .collect();
    assert_eq!(contents, vec!["root", "1a", "1b", "2a", "2b"]);
    assert_eq!(report.termination, TerminationReason::FrontierExhausted);
    assert!(coordinator.renderer().is_closed());
}

#[tokio::test]
async fn test_output_is_overwritten_not_appended() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/a", &page(Some("fresh"), &[])).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("nested").join("output.json");
    std::fs::create_dir_all(output.parent().unwrap()).unwrap();
    std::fs::write(&output, r#"[{"url": "stale", "html": "old"}]"#).unwrap();

    let config = create_test_config(
        format!("{}/a", base_url),
        format!("{}/**", base_url),
        5,
        &output,
    );
    crawl(config).await.expect("Crawl failed");

    let results = load_results(&output).unwrap();
    assert_eq!(results, vec![CrawlResult::new(format!("{}/a", base_url), "fresh")]);
}

#[tokio::test]
async fn test_invalid_config_fails_before_crawling() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.json");
    let config = create_test_config(
        "ftp://x.test/".to_string(),
        "ftp://x.test/*".to_string(),
        5,
        &output,
    );

    assert!(crawl(config).await.is_err());
    assert!(!output.exists());
}
