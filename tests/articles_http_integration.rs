//! Integration tests for article HTTP endpoints.
//!
//! These drive the axum router with `tower::ServiceExt::oneshot` against an
//! in-memory content store and check status codes, headers and bodies.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use longform::adapters::http::{app_router, build_router, ArticlesAppState};
use longform::adapters::InMemoryContentStore;
use longform::application::{ContentFetcher, FreshnessPolicy, RenderPipeline};
use longform::bootstrap::build_compiler;
use longform::config::{RenderConfig, ServerConfig};
use longform::ports::{StoreError, StoreRow};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn row(slug: &str, date: &str, content: &str) -> StoreRow {
    let Value::Object(map) = json!({
        "slug": slug,
        "title": format!("About {}", slug),
        "description": "Short summary",
        "date": date,
        "content": content,
    }) else {
        unreachable!()
    };
    map
}

fn store() -> InMemoryContentStore {
    InMemoryContentStore::with_rows(
        "articles",
        vec![
            row("distributed-caching", "2023-04-01", "# Intro\n$x^2$ and more text"),
            row("older", "2022-01-01", "Plain <b>text</b>."),
        ],
    )
}

fn state_with(store: InMemoryContentStore, freshness: FreshnessPolicy) -> ArticlesAppState {
    let pipeline = RenderPipeline::new(
        ContentFetcher::new(Arc::new(store)),
        build_compiler(&RenderConfig::default()),
    )
    .with_freshness(freshness);
    ArticlesAppState::new(Arc::new(pipeline))
}

fn app(store: InMemoryContentStore) -> Router {
    app_router(state_with(store, FreshnessPolicy::AlwaysFresh))
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

// =============================================================================
// GET /articles/:slug
// =============================================================================

#[tokio::test]
async fn article_renders_as_json_tree() {
    let (status, headers, body) = get(app(store()), "/articles/distributed-caching").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");

    let body = json_body(&body);
    assert_eq!(body["slug"], "distributed-caching");
    assert_eq!(body["title"], "About distributed-caching");
    assert_eq!(body["date"], "2023-04-01T00:00:00+00:00");
    assert_eq!(body["degraded"], false);

    let nodes = body["document"]["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0]["type"], "heading");
    assert_eq!(nodes[0]["level"], 1);
    assert_eq!(nodes[1]["type"], "paragraph");
    assert_eq!(nodes[1]["children"][0]["type"], "math_inline");
    assert_eq!(nodes[1]["children"][0]["source"], "x^2");
    assert_eq!(nodes[1]["children"][1]["value"], " and more text");
}

#[tokio::test]
async fn article_renders_as_html_fragment() {
    let (status, headers, body) =
        get(app(store()), "/articles/distributed-caching?format=html").await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<h1>About distributed-caching</h1>"));
    assert!(html.contains("<h1>Intro</h1>"));
    assert!(html.contains("<span class=\"math math-inline\"><math"));
}

#[tokio::test]
async fn raw_html_in_body_is_escaped() {
    let (_, _, body) = get(app(store()), "/articles/older?format=html").await;
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("&lt;b&gt;text&lt;/b&gt;"));
    assert!(!html.contains("<b>text</b>"));
}

#[tokio::test]
async fn unknown_slug_is_404() {
    let (status, headers, body) = get(app(store()), "/articles/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    let body = json_body(&body);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Post not found");
}

#[tokio::test]
async fn malformed_slug_is_indistinguishable_from_unknown() {
    let (_, _, absent) = get(app(store()), "/articles/does-not-exist").await;

    for uri in [
        "/articles/Distributed-Caching",
        "/articles/bad%20slug",
        "/articles/semi%3Bcolon",
        "/articles/trailing-",
        "/articles/%FF",
        "/articles/caf%C3",
    ] {
        let (status, _, body) = get(app(store()), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri {}", uri);
        assert_eq!(body, absent, "uri {}", uri);
    }
}

#[tokio::test]
async fn store_failure_is_503_without_detail() {
    let store = store();
    store
        .fail_with(StoreError::unavailable("connection refused by 10.0.0.7"))
        .await;

    let (status, _, body) = get(app(store.clone()), "/articles/distributed-caching").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let text = String::from_utf8(body).unwrap();
    assert!(!text.contains("10.0.0.7"));
    assert_eq!(json_body(text.as_bytes())["code"], "INTERNAL_ERROR");

    store.fail_with(StoreError::Timeout(10)).await;
    let (status, _, _) = get(app(store), "/articles").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn max_age_policy_sets_public_cache_control() {
    let app = app_router(state_with(store(), FreshnessPolicy::MaxAge(60)));
    let (status, headers, _) = get(app, "/articles/distributed-caching").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=60");
}

// =============================================================================
// GET /articles
// =============================================================================

#[tokio::test]
async fn index_lists_newest_first() {
    let (status, headers, body) = get(app(store()), "/articles").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    let body = json_body(&body);
    assert_eq!(body["total"], 2);
    assert_eq!(body["articles"][0]["slug"], "distributed-caching");
    assert_eq!(body["articles"][1]["slug"], "older");
    assert_eq!(body["articles"][1]["description"], "Short summary");
}

#[tokio::test]
async fn index_as_html() {
    let (status, _, body) = get(app(store()), "/articles?format=html").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<a href=\"/articles/distributed-caching\">"));
}

#[tokio::test]
async fn empty_index_is_ok() {
    let (status, _, body) = get(app(InMemoryContentStore::new()), "/articles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({ "articles": [], "total": 0 }));
}

// =============================================================================
// Health and middleware
// =============================================================================

#[tokio::test]
async fn health_is_ok() {
    let (status, _, body) = get(app(store()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({ "status": "ok" }));
}

#[tokio::test]
async fn layered_router_serves_requests() {
    let server = ServerConfig {
        cors_origins: Some("https://blog.example.com".to_string()),
        ..Default::default()
    };
    let app = build_router(state_with(store(), FreshnessPolicy::AlwaysFresh), &server);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/articles/distributed-caching")
                .header(header::ORIGIN, "https://blog.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://blog.example.com"
    );
}
