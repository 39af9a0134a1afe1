//! Shared test utilities for tally integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Router helpers build a fully wired app over a
//! tempdir-backed store; keep the returned `TempDir` alive for the duration
//! of the test.

#![allow(unused)]

pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use tally_core::config::Config;
use tally_core::FileStore;
use tally_server::AppState;

/// Build a router over a fresh tempdir store with the default config.
pub fn test_router() -> (axum::Router, tempfile::TempDir) {
    test_router_with(Config::defaults())
}

/// Build a router over a fresh tempdir store with the given config.
/// The config's storage dir is ignored in favor of the tempdir.
pub fn test_router_with(config: Config) -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let router = router_over(dir.path(), config);
    (router, dir)
}

/// Build a router over an existing storage dir, for reopen/durability tests.
pub fn router_over(dir: &std::path::Path, config: Config) -> axum::Router {
    let store = FileStore::open(dir).expect("open store");
    tally_server::router(AppState::new(store, config))
}

/// Drive one request through the router and decode the JSON body.
///
/// Returns `Value::Null` for empty bodies so status-only assertions stay
/// simple.
pub async fn request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    headers: &[(&str, String)],
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, value.as_str());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

/// Shorthand for an unauthenticated JSON POST.
pub async fn post_json(
    router: &axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request(router, "POST", uri, Some(body), &[]).await
}

/// Shorthand for a GET.
pub async fn get_json(router: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    request(router, "GET", uri, None, &[]).await
}
