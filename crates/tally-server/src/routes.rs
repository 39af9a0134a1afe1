//! HTTP surface: router construction and all endpoint handlers.
//!
//! Wire shapes follow the platform envelope: success bodies carry
//! `code: 0`, failures carry `{code, message, error}` with the HTTP status
//! mirroring `code` (see [`crate::error::ApiError`]). CORS is wide open,
//! including preflight.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use tally_core::convert::to_standard_format;
use tally_core::normalize::to_iso_string;
use tally_core::process::process_record;
use tally_core::types::{ReceivedEntry, ReceivedHeaders};
use tally_core::validate::validate;

use crate::error::ApiError;
use crate::signature::{self, SignatureHeaders};
use crate::state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the full router over the shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/meta.json", get(meta))
        .route("/api/receive-data", post(receive_data))
        .route("/api/data", get(dump_data))
        .route("/api/records", get(list_records))
        .route("/api/stats", get(storage_stats))
        .route("/api/clear-data", post(clear_data))
        .route("/api/ping", get(ping).post(ping))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Request log line for every call, including preflights.
async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    tracing::info!(%method, %path, status = %response.status().as_u16(), "request");
    response
}

// ---------------------------------------------------------------------------
// Liveness and discovery
// ---------------------------------------------------------------------------

async fn health() -> Json<Value> {
    Json(json!({
        "code": 0,
        "message": "tally bitable bridge running",
        "status": "healthy",
        "timestamp": to_iso_string(Utc::now()),
        "version": VERSION,
    }))
}

/// Service discovery descriptor the platform polls before enabling a push
/// target.
async fn meta(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "app_id": state.config.server.app_id,
        "version": VERSION,
        "timestamp": to_iso_string(Utc::now()),
        "status": "healthy",
        "capabilities": {
            "data_receive": true,
            "health_check": true,
        },
        "endpoints": {
            "data_receive": "/api/receive-data",
            "health_check": "/api/ping",
        },
    }))
}

/// Health probe. Never signature-checked, and answers both GET and POST
/// because the platform uses either depending on the check.
async fn ping() -> Json<Value> {
    Json(json!({
        "code": 0,
        "message": "pong",
        "timestamp": to_iso_string(Utc::now()),
        "success": true,
    }))
}

// ---------------------------------------------------------------------------
// Ingest
// ---------------------------------------------------------------------------

async fn receive_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let sig = SignatureHeaders::from_header_map(&headers);
    signature::verify(
        &sig,
        &state.config.security.verification_token,
        state.config.security.require_signature,
    )?;

    let received_at = Utc::now();
    let entry = ReceivedEntry {
        data: payload.clone(),
        timestamp: received_at,
        headers: ReceivedHeaders {
            timestamp: sig.timestamp,
            nonce: sig.nonce,
        },
    };

    let report = validate(&payload);
    if !report.valid {
        tracing::warn!(errors = ?report.errors, "payload failed validation, processing anyway");
    } else if !report.warnings.is_empty() {
        tracing::warn!(warnings = ?report.warnings, "payload validation warnings");
    }

    let standard = to_standard_format(payload);
    let records = standard
        .get("records")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    tracing::info!(count = records.len(), "processing records");

    let mut store = state.store.lock().await;
    store.append_received(entry);

    let mut processed_count = 0usize;
    for (index, record) in records.iter().enumerate() {
        match process_record(record) {
            Some(processed) => {
                tracing::info!(
                    id = %processed.id,
                    action = %processed.action,
                    "processed record {}/{}",
                    index + 1,
                    records.len()
                );
                store.append_processed(processed);
                processed_count += 1;
            }
            None => {
                tracing::warn!("skipping empty record {}/{}", index + 1, records.len());
            }
        }
    }

    let total_stored = store.processed().len();
    store.save_all().map_err(|err| {
        tracing::error!(%err, "failed to persist store");
        ApiError::internal("data processing failed", err)
    })?;

    Ok(Json(json!({
        "code": 0,
        "message": "success",
        "data": {
            "received_at": to_iso_string(received_at),
            "processed_count": processed_count,
            "total_stored": total_stored,
            "validation_warnings": report.warnings,
        },
    })))
}

// ---------------------------------------------------------------------------
// Debug views
// ---------------------------------------------------------------------------

async fn dump_data(State(state): State<AppState>) -> Json<Value> {
    let store = state.store.lock().await;
    Json(json!({
        "total_received": store.received().len(),
        "total_processed": store.processed().len(),
        "last_received": store.received().last().map(|e| to_iso_string(e.timestamp)),
        "last_processed": store.processed().last().map(|r| to_iso_string(r.updated_at)),
        "received_data": store.received(),
        "processed_records": store.processed(),
        "server_time": to_iso_string(Utc::now()),
        "status": "active",
    }))
}

async fn list_records(State(state): State<AppState>) -> Json<Value> {
    let store = state.store.lock().await;
    Json(json!({
        "count": store.processed().len(),
        "records": store.processed(),
        "last_updated": store.processed().last().map(|r| to_iso_string(r.updated_at)),
    }))
}

async fn storage_stats(State(state): State<AppState>) -> Json<Value> {
    let store = state.store.lock().await;
    Json(json!({
        "server_time": to_iso_string(Utc::now()),
        "memory_data": {
            "received_count": store.received().len(),
            "processed_count": store.processed().len(),
        },
        "storage_data": store.stats(),
        "uptime": state.started.elapsed().as_secs_f64(),
    }))
}

// ---------------------------------------------------------------------------
// Clear
// ---------------------------------------------------------------------------

async fn clear_data(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let sig = SignatureHeaders::from_header_map(&headers);
    signature::verify(
        &sig,
        &state.config.security.verification_token,
        state.config.security.require_signature,
    )?;

    let mut store = state.store.lock().await;
    store.clear().map_err(|err| {
        tracing::error!(%err, "failed to clear store");
        ApiError::internal("failed to clear data", err)
    })?;
    tracing::info!("all data cleared");

    Ok(Json(json!({
        "code": 0,
        "message": "success",
        "data": {
            "cleared_at": to_iso_string(Utc::now()),
            "action": "all_data_cleared",
        },
    })))
}
