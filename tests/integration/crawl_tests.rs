//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the HTTP
//! renderer and crawl engine end-to-end.

use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use term_sweep::config::{
    Config, CrawlConfig, OutputConfig, RendererConfig, RendererEngine, ScanConfig,
};
use term_sweep::crawler::{sweep, BrowserRenderer, Coordinator, HttpRenderer};
use term_sweep::scan::SearchTerm;
use term_sweep::state::PageOutcome;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>\n{}\n</body></html>", body),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_page(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

fn terms(items: &[&str]) -> Vec<SearchTerm> {
    items.iter().map(|t| SearchTerm::new(*t).unwrap()).collect()
}

fn http_coordinator(seed: &Url, items: &[&str], config: CrawlConfig) -> Coordinator<HttpRenderer> {
    let renderer =
        HttpRenderer::new(&RendererConfig::default()).expect("Failed to build renderer");
    Coordinator::new(renderer, terms(items), seed, config)
}

fn seed_for(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("Failed to parse base URL")
}

fn result_paths(report: &term_sweep::CrawlReport) -> Vec<String> {
    report
        .results()
        .iter()
        .map(|r| {
            Url::parse(&r.normalized_url)
                .expect("Result URL should parse")
                .path()
                .to_string()
        })
        .collect()
}

#[tokio::test]
async fn test_full_crawl_depth_first() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/page1">Page 1</a> <a href="/page2">Page 2</a>"#,
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        r#"<a href="/">Home</a> <a href="/page3#top">Page 3</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/page2", "Spring SALE starts now", 1).await;
    mount_page(&mock_server, "/page3", "Use discount code SPRING", 1).await;

    let seed = seed_for(&mock_server);
    let coordinator = http_coordinator(&seed, &["discount", r"\bsale\b"], CrawlConfig::default());

    let (run, result) = coordinator.run(&seed).await;
    assert!(result.is_ok(), "Crawl failed: {:?}", result);

    assert_eq!(
        result_paths(&run.report),
        vec!["/", "/page1/", "/page3/", "/page2/"]
    );

    let page3 = &run.report.results()[2];
    assert_eq!(page3.found_items.len(), 1);
    let discount = &page3.found_items["discount"];
    assert_eq!(discount.len(), 1);
    assert_eq!(discount[0].line_number, 2);
    assert_eq!(discount[0].line_content, "use discount code spring");

    let page2 = &run.report.results()[3];
    assert!(page2.found_items.contains_key(r"\bsale\b"));
    assert!(run.report.results()[0].is_clean());

    // Wiremock verifies each page was fetched exactly once when the server drops
}

#[tokio::test]
async fn test_skip_filter_pages_never_requested() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"
        <a href="/cart/checkout/">Checkout</a>
        <a href="/wp-content/uploads/file.html">Upload</a>
        <a href="/?add-to-cart=42">Add</a>
        <a href="/about">About</a>
        "#,
        1,
    )
    .await;
    mount_page(&mock_server, "/cart/checkout/", "discount", 0).await;
    mount_page(&mock_server, "/wp-content/uploads/file.html", "discount", 0).await;
    mount_page(&mock_server, "/about", "about us", 1).await;

    let seed = seed_for(&mock_server);
    let coordinator = http_coordinator(&seed, &["discount"], CrawlConfig::default());

    let (run, result) = coordinator.run(&seed).await;
    assert!(result.is_ok());

    assert_eq!(result_paths(&run.report), vec!["/", "/about/"]);
    assert_eq!(run.stats.count(PageOutcome::Skipped), 3);
}

#[tokio::test]
async fn test_self_link_with_fragment_fetched_once() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        &format!(
            r##"<a href="#section">Jump</a> <a href="{}/#section">Self</a>"##,
            mock_server.uri()
        ),
        1,
    )
    .await;

    let seed = seed_for(&mock_server);
    let coordinator = http_coordinator(&seed, &["sale"], CrawlConfig::default());

    let (run, _) = coordinator.run(&seed).await;
    assert_eq!(run.report.len(), 1);
}

#[tokio::test]
async fn test_other_origin_never_requested() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        &format!(r#"<a href="{}/elsewhere">Elsewhere</a>"#, other_server.uri()),
        1,
    )
    .await;
    mount_page(&other_server, "/elsewhere", "discount", 0).await;

    let seed = seed_for(&mock_server);
    let coordinator = http_coordinator(&seed, &["discount"], CrawlConfig::default());

    let (run, _) = coordinator.run(&seed).await;
    assert_eq!(run.report.len(), 1);
    assert!(run.report.results()[0].is_clean());
}

#[tokio::test]
async fn test_error_status_page_is_still_scanned() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/gone">Gone</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            "<html><body>Sorry, this sale has ended</body></html>",
            "text/html",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let seed = seed_for(&mock_server);
    let coordinator = http_coordinator(&seed, &["sale"], CrawlConfig::default());

    let (run, _) = coordinator.run(&seed).await;
    assert_eq!(result_paths(&run.report), vec!["/", "/gone/"]);
    assert!(!run.report.results()[1].is_clean());
}

#[tokio::test]
async fn test_redirect_links_resolve_against_final_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new/"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/new/", r#"<a href="sub">Sub</a>"#, 1).await;
    mount_page(&mock_server, "/new/sub", "discount inside", 1).await;

    let seed = seed_for(&mock_server);
    let coordinator = http_coordinator(&seed, &["discount"], CrawlConfig::default());

    let (run, result) = coordinator.run(&seed).await;
    assert!(result.is_ok(), "Crawl failed: {:?}", result);

    assert_eq!(result_paths(&run.report), vec!["/", "/new/sub/"]);
    assert!(!run.report.results()[1].is_clean());
}

#[tokio::test]
async fn test_redirect_limit_zero_fails_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new/"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/new/", "discount", 0).await;

    let renderer = HttpRenderer::new(&RendererConfig {
        max_redirects: 0,
        engine: RendererEngine::Http,
        ..Default::default()
    })
    .expect("Failed to build renderer");
    let seed = seed_for(&mock_server);
    let coordinator =
        Coordinator::new(renderer, terms(&["discount"]), &seed, CrawlConfig::default());

    let (run, result) = coordinator.run(&seed).await;
    assert!(result.is_ok());

    assert!(run.report.is_empty());
    assert_eq!(run.stats.count(PageOutcome::RenderFailed), 1);
}

#[tokio::test]
async fn test_media_response_blocked_and_crawl_continues() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/photo">Photo</a> <a href="/contact">Contact</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/photo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0x89u8, 0x50, 0x4e, 0x47], "image/png"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/contact", "discount desk", 1).await;

    let seed = seed_for(&mock_server);
    let coordinator = http_coordinator(&seed, &["discount"], CrawlConfig::default());

    let (run, result) = coordinator.run(&seed).await;
    assert!(result.is_ok());

    assert_eq!(result_paths(&run.report), vec!["/", "/contact/"]);
    assert_eq!(run.stats.count(PageOutcome::RenderFailed), 1);
}

#[tokio::test]
async fn test_media_extension_links_not_followed() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/banner.JPG">Banner</a> <a href="/clip.mp4">Clip</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/banner.JPG", "x", 0).await;
    mount_page(&mock_server, "/clip.mp4", "x", 0).await;

    let seed = seed_for(&mock_server);
    let coordinator = http_coordinator(&seed, &["x"], CrawlConfig::default());

    let (run, _) = coordinator.run(&seed).await;
    assert_eq!(run.report.len(), 1);
}

/// Builds a config that reads terms from a temp file and writes into a temp dir
fn sweep_config(terms_file: &NamedTempFile, output_dir: &TempDir, abort: bool) -> Config {
    Config {
        scan: ScanConfig {
            terms_file: terms_file.path().display().to_string(),
        },
        renderer: RendererConfig {
            engine: RendererEngine::Http,
            ..Default::default()
        },
        crawl: CrawlConfig {
            abort_on_render_failure: abort,
        },
        output: OutputConfig {
            directory: output_dir.path().display().to_string(),
            json: true,
            html: true,
        },
    }
}

fn terms_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create terms file");
    file.write_all(content.as_bytes()).expect("Failed to write terms file");
    file.flush().expect("Failed to flush terms file");
    file
}

#[tokio::test]
async fn test_sweep_writes_reports() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        "Today only: 20% sale on everything, no discount codes",
        1,
    )
    .await;

    let terms = terms_file("discount\r\n\\bsale\\b\r\n\r\n");
    let output_dir = TempDir::new().expect("Failed to create output dir");
    let config = sweep_config(&terms, &output_dir, false);
    let seed = seed_for(&mock_server);

    let summary = sweep(&seed, &config).await.expect("Sweep failed");

    assert_eq!(summary.report.len(), 1);
    assert_eq!(summary.artifacts.len(), 2);

    let json_path = output_dir.path().join("127.0.0.1_crawl_output.json");
    let json = std::fs::read_to_string(&json_path).expect("JSON report missing");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Invalid JSON");

    assert_eq!(value["startUrl"], seed.as_str());
    let results = value["results"].as_array().expect("results array");
    assert_eq!(results.len(), 1);

    let found = results[0]["foundItems"].as_object().expect("foundItems map");
    assert_eq!(found.len(), 2);
    assert_eq!(found["discount"][0]["lineNumber"], 2);
    assert_eq!(found["discount"][0]["position"], 39);
    assert_eq!(found["\\bsale\\b"][0]["regex"], "\\bsale\\b");
    assert_eq!(found["\\bsale\\b"][0]["position"], 16);

    let html_path = output_dir.path().join("127.0.0.1_crawl_output.html");
    let html = std::fs::read_to_string(&html_path).expect("HTML report missing");
    assert!(html.contains("<span class=\"highlight\">discount</span>"));
    assert!(html.contains("id=\"toggle-all\""));
}

#[tokio::test]
async fn test_sweep_abort_keeps_partial_report() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"discount here <a href="/manual.pdf">Manual</a> <a href="/later">Later</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/manual.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/later", "discount", 0).await;

    let terms = terms_file("discount\n");
    let output_dir = TempDir::new().expect("Failed to create output dir");
    let config = sweep_config(&terms, &output_dir, true);
    let seed = seed_for(&mock_server);

    let result = sweep(&seed, &config).await;
    assert!(result.is_err());

    let json_path = output_dir.path().join("127.0.0.1_crawl_output.json");
    let json = std::fs::read_to_string(&json_path).expect("Partial JSON report missing");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Invalid JSON");
    assert_eq!(value["results"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_sweep_missing_terms_file() {
    let output_dir = TempDir::new().expect("Failed to create output dir");
    let config = Config {
        scan: ScanConfig {
            terms_file: "/nonexistent/items.txt".to_string(),
        },
        output: OutputConfig {
            directory: output_dir.path().display().to_string(),
            json: true,
            html: true,
        },
        ..Config::default()
    };
    let seed = Url::parse("http://127.0.0.1:9/").unwrap();

    let result = sweep(&seed, &config).await;
    assert!(matches!(
        result,
        Err(term_sweep::SweepError::Config(
            term_sweep::ConfigError::TermsFile { .. }
        ))
    ));
}

#[tokio::test]
#[ignore = "needs a local Chrome or Chromium"]
async fn test_browser_renders_scripted_content() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"
        <img src="/banner.png">
        <div id="content"></div>
        <script>
            document.getElementById('content').innerHTML =
                'Weekly discount <a href="/later">Later</a>';
        </script>
        "#,
        1,
    )
    .await;
    mount_page(&mock_server, "/later", "nothing here", 1).await;
    Mock::given(method("GET"))
        .and(path("/banner.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89u8, 0x50], "image/png"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = RendererConfig {
        engine: RendererEngine::Browser,
        network_idle_ms: 200,
        ..Default::default()
    };
    let renderer = BrowserRenderer::launch(&config)
        .await
        .expect("Failed to launch browser");
    let seed = seed_for(&mock_server);
    let coordinator =
        Coordinator::new(renderer, terms(&["discount"]), &seed, CrawlConfig::default());

    let (run, result) = coordinator.run(&seed).await;
    coordinator.into_renderer().close().await;
    assert!(result.is_ok(), "Crawl failed: {:?}", result);

    assert_eq!(result_paths(&run.report), vec!["/", "/later/"]);
    assert!(run.report.results()[0].found_items.contains_key("discount"));
    assert!(run.report.results()[1].is_clean());
}
