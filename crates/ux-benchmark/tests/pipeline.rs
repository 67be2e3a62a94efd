//! End-to-end tests for the analyze pipeline against a local mock server.

use std::time::Duration;

use ux_benchmark::config::USER_AGENT;
use ux_benchmark::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ─────────────────────── helpers ───────────────────────

const FULL_PAGE: &str = r#"<!doctype html>
<html>
  <head>
    <link rel="icon" href="/f.ico">
    <link rel="stylesheet" href="/style.css">
  </head>
  <body>
    <nav><a href="/">Home</a></nav>
    <button aria-label="Open menu">=</button>
  </body>
</html>"#;

const BARE_PAGE: &str = "<html><body><p>hello</p></body></html>";

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

fn css(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/css")
        .set_body_string(body)
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn analyzer() -> Analyzer {
    Analyzer::new(AnalyzerConfig::default()).unwrap()
}

// ═══════════════════════════════════════════════════════
// SCORING
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_full_signal_page_scores() {
    let server = MockServer::start().await;
    mount(&server, "/", html(FULL_PAGE)).await;
    mount(&server, "/style.css", css("a:hover{color:#123456}")).await;

    let analysis = analyzer().analyze(&server.uri()).await.unwrap();
    let scores = &analysis.scores;

    assert!(scores.is_complete());
    assert_eq!(scores.get(UxFactor::Simplicity), Some(9));
    assert_eq!(scores.get(UxFactor::NavigationEase), Some(6));
    assert_eq!(scores.get(UxFactor::Personality), Some(9));
    assert_eq!(scores.get(UxFactor::Delight), Some(6));
    assert_eq!(scores.get(UxFactor::Accessibility), Some(7));
    assert_eq!(scores.get(UxFactor::Speed), Some(10));
    assert_eq!(scores.get(UxFactor::EmotionalResonance), Some(9));

    let diag = &analysis.diagnostics;
    assert_eq!(diag.http_status, 200);
    assert_eq!(diag.css_colors_found, 1);
    assert_eq!(diag.palette_cohesion, 10);
    assert!(diag.final_url.starts_with(&server.uri()));
}

#[tokio::test]
async fn test_bare_page_baseline_scores() {
    let server = MockServer::start().await;
    mount(&server, "/", html(BARE_PAGE)).await;

    let analysis = analyzer().analyze(&server.uri()).await.unwrap();
    let scores = &analysis.scores;

    assert_eq!(scores.get(UxFactor::NavigationEase), Some(5));
    assert_eq!(scores.get(UxFactor::Personality), Some(8));
    assert_eq!(scores.get(UxFactor::Delight), Some(5));
    assert_eq!(scores.get(UxFactor::Accessibility), Some(6));
    assert_eq!(analysis.diagnostics.css_colors_found, 0);
    assert_eq!(analysis.diagnostics.palette_cohesion, 10);
}

#[tokio::test]
async fn test_table_from_analysis() {
    let server = MockServer::start().await;
    mount(&server, "/", html(FULL_PAGE)).await;
    mount(&server, "/style.css", css("a:hover{color:#123456}")).await;

    let analysis = analyzer().analyze(&server.uri()).await.unwrap();
    let table = build_table("mock.local", &analysis.scores);

    assert_eq!(table.len(), 6);
    let target = table.target().unwrap();
    assert_eq!(target.total, 56);
    assert_eq!(target.rank, 6);
}

// ═══════════════════════════════════════════════════════
// STYLESHEETS
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_failed_stylesheets_are_skipped() {
    let server = MockServer::start().await;
    let page = r#"<html><head>
        <link rel="stylesheet" href="/missing.css">
        <link rel="stylesheet" href="/ok.css">
    </head><body></body></html>"#;
    mount(&server, "/", html(page)).await;
    mount(&server, "/missing.css", ResponseTemplate::new(404)).await;
    mount(&server, "/ok.css", css("b{color:#abc}")).await;

    let fetcher = Fetcher::new(USER_AGENT, 50_000).unwrap();
    let bundle = fetcher
        .fetch_stylesheets(page, &server.uri(), 3, Duration::from_secs(4))
        .await;
    assert_eq!(bundle, "b{color:#abc}");
}

#[tokio::test]
async fn test_stylesheet_limit_and_join() {
    let server = MockServer::start().await;
    let page = r#"<html><head>
        <link rel="stylesheet" href="/a.css">
        <link rel="stylesheet" href="/b.css">
        <link rel="stylesheet" href="/c.css">
        <link rel="stylesheet" href="/d.css">
    </head></html>"#;
    mount(&server, "/a.css", css("a{}")).await;
    mount(&server, "/b.css", css("b{}")).await;
    mount(&server, "/c.css", css("c{}")).await;
    Mock::given(method("GET"))
        .and(path("/d.css"))
        .respond_with(css("d{}"))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(USER_AGENT, 50_000).unwrap();
    let bundle = fetcher
        .fetch_stylesheets(page, &server.uri(), 3, Duration::from_secs(4))
        .await;
    assert_eq!(bundle, "a{}\nb{}\nc{}");
}

#[tokio::test]
async fn test_stylesheet_truncated_to_cap() {
    let server = MockServer::start().await;
    let page = r#"<link rel="stylesheet" href="/big.css">"#;
    let big = "x".repeat(60_000);
    mount(&server, "/big.css", css(&big)).await;

    let fetcher = Fetcher::new(USER_AGENT, 50_000).unwrap();
    let bundle = fetcher
        .fetch_stylesheets(page, &server.uri(), 3, Duration::from_secs(4))
        .await;
    assert_eq!(bundle.len(), 50_000);
}

#[tokio::test]
async fn test_stylesheet_timeout_degrades() {
    let server = MockServer::start().await;
    let page = r#"<link rel="stylesheet" href="/slow.css">"#;
    mount(
        &server,
        "/slow.css",
        css("a{color:#fff}").set_delay(Duration::from_millis(500)),
    )
    .await;

    let fetcher = Fetcher::new(USER_AGENT, 50_000).unwrap();
    let bundle = fetcher
        .fetch_stylesheets(page, &server.uri(), 3, Duration::from_millis(50))
        .await;
    assert!(bundle.is_empty());
}

// ═══════════════════════════════════════════════════════
// FAILURES
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_http_error_is_fatal() {
    let server = MockServer::start().await;
    mount(&server, "/gone", ResponseTemplate::new(404)).await;

    let err = analyzer()
        .analyze(&format!("{}/gone", server.uri()))
        .await
        .unwrap_err();
    match &err {
        BenchError::Http { status, .. } => assert_eq!(*status, 404),
        other => panic!("expected HTTP error, got {other:?}"),
    }
    assert!(err.to_string().starts_with("404 Client Error: Not Found for url: "));
}

#[tokio::test]
async fn test_unreachable_host_is_error() {
    let err = analyzer().analyze("http://127.0.0.1:1/").await.unwrap_err();
    assert!(matches!(err, BenchError::Network(_)));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn test_failed_fetch_not_cached() {
    let analyzer = analyzer();
    let _ = analyzer.analyze("http://127.0.0.1:1/").await;
    assert_eq!(analyzer.fetcher().cached_pages(), 0);
}

// ═══════════════════════════════════════════════════════
// FETCH BEHAVIOUR
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_sends_identifying_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(html(BARE_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(USER_AGENT, 50_000).unwrap();
    let page = fetcher
        .fetch_page(&server.uri(), Duration::from_secs(6))
        .await
        .unwrap();
    assert_eq!(page.status, 200);
    assert_eq!(page.size, BARE_PAGE.len());
    assert_eq!(page.html, BARE_PAGE);
}

#[tokio::test]
async fn test_redirect_reports_final_url() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", "/new"),
    )
    .await;
    mount(&server, "/new", html(BARE_PAGE)).await;

    let fetcher = Fetcher::new(USER_AGENT, 50_000).unwrap();
    let page = fetcher
        .fetch_page(&format!("{}/old", server.uri()), Duration::from_secs(6))
        .await
        .unwrap();
    assert_eq!(page.final_url, format!("{}/new", server.uri()));
}

#[tokio::test]
async fn test_repeated_analysis_hits_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(FULL_PAGE))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/style.css"))
        .respond_with(css("a:hover{color:#123456}"))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer();
    let first = analyzer.analyze(&server.uri()).await.unwrap();
    let second = analyzer.analyze(&server.uri()).await.unwrap();

    assert_eq!(first.scores, second.scores);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(analyzer.fetcher().cached_pages(), 1);
    assert_eq!(analyzer.fetcher().cached_stylesheets(), 1);
}

#[tokio::test]
async fn test_page_decoded_with_declared_charset() {
    let server = MockServer::start().await;
    let body: &[u8] =
        b"<html><head><link rel=\"stylesheet\" href=\"/caf\xE9.css\"></head><body><p>caf\xE9</p></body></html>";
    mount(
        &server,
        "/",
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/html; charset=iso-8859-1")
            .set_body_bytes(body.to_vec()),
    )
    .await;

    let fetcher = Fetcher::new(USER_AGENT, 50_000).unwrap();
    let page = fetcher
        .fetch_page(&server.uri(), Duration::from_secs(6))
        .await
        .unwrap();

    assert!(page.html.contains("<p>café</p>"));
    assert!(!page.html.contains('\u{FFFD}'));
    assert_eq!(page.size, body.len());

    let urls = fetch::stylesheet_urls(&page.html, &page.final_url);
    assert_eq!(urls, vec![format!("{}/caf%C3%A9.css", server.uri())]);
}

#[tokio::test]
async fn test_stylesheet_decoded_with_declared_charset() {
    let server = MockServer::start().await;
    let page = r#"<link rel="stylesheet" href="/latin.css">"#;
    mount(
        &server,
        "/latin.css",
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/css; charset=iso-8859-1")
            .set_body_bytes(b"/* caf\xE9 */ a{color:#abc}".to_vec()),
    )
    .await;

    let fetcher = Fetcher::new(USER_AGENT, 50_000).unwrap();
    let bundle = fetcher
        .fetch_stylesheets(page, &server.uri(), 3, Duration::from_secs(4))
        .await;
    assert_eq!(bundle, "/* café */ a{color:#abc}");
}
