//! HTTP surface.
//!
//! # Routes
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | `POST` | `/submit` | `{id, trust_score, language, content_hash}` |
//! | `POST` | `/analyze_content` | same, plus `blockchain_hash` |
//! | `GET` | `/verify/{content_hash}` | `{trust_score, source}` or 404 |
//! | `GET` | `/verify_content/{content_hash}` | same as `/verify` |
//! | `GET` | `/health` | `{status: "ok"}` |
//!
//! # Error Responses
//!
//! | Status | Body |
//! |--------|------|
//! | 400 | `{"errors": [{"field": "text", "message": "..."}]}` |
//! | 404 | `{"error": "Content not found"}` |
//! | 500 | `{"error": "Internal server error"}` |
//!
//! Internal failures are logged with their cause and never leak it to the
//! caller.

use crate::models::SubmitResult;
use crate::services::ResolutionPipeline;
use crate::{Error, Result};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<ResolutionPipeline>,
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    #[serde(flatten)]
    result: SubmitResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    blockchain_hash: Option<String>,
}

/// Builds the application router.
pub fn router(pipeline: Arc<ResolutionPipeline>) -> Router {
    Router::new()
        .route("/submit", post(submit))
        .route("/analyze_content", post(analyze_content))
        .route("/verify/{content_hash}", get(verify))
        .route("/verify_content/{content_hash}", get(verify))
        .route("/health", get(health))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            header::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static("no-store"),
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %uuid::Uuid::new_v4(),
                )
            }),
        )
        .with_state(AppState { pipeline })
}

/// Serves the router on `addr` until Ctrl-C.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if the listener cannot bind or the
/// server fails.
pub async fn serve(pipeline: Arc<ResolutionPipeline>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "bind".to_string(),
            cause: format!("{addr}: {e}"),
        })?;

    tracing::info!(%addr, "Server listening");

    axum::serve(listener, router(pipeline))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "serve".to_string(),
            cause: e.to_string(),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn submit(State(state): State<AppState>, body: Bytes) -> Response {
    handle_submit(state, &body, false).await
}

async fn analyze_content(State(state): State<AppState>, body: Bytes) -> Response {
    handle_submit(state, &body, true).await
}

async fn handle_submit(state: AppState, body: &[u8], legacy: bool) -> Response {
    let text = match extract_text(body) {
        Ok(text) => text,
        Err(message) => return validation_error("text", &message),
    };

    let pipeline = state.pipeline;
    let joined = tokio::task::spawn_blocking(move || pipeline.submit(&text)).await;

    match joined {
        Ok(Ok(result)) => {
            let blockchain_hash = legacy.then(|| result.content_hash.to_string());
            Json(SubmitResponse {
                result,
                blockchain_hash,
            })
            .into_response()
        },
        Ok(Err(Error::Validation { field, message })) => validation_error(&field, &message),
        Ok(Err(e)) => internal_error(&e.to_string(), e.kind()),
        Err(e) => internal_error(&e.to_string(), "join"),
    }
}

async fn verify(State(state): State<AppState>, Path(content_hash): Path<String>) -> Response {
    let pipeline = state.pipeline;
    let joined = tokio::task::spawn_blocking(move || pipeline.verify(&content_hash)).await;

    match joined {
        Ok(Ok(Some(verification))) => Json(verification).into_response(),
        Ok(Ok(None)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Content not found" })),
        )
            .into_response(),
        Ok(Err(e)) => internal_error(&e.to_string(), e.kind()),
        Err(e) => internal_error(&e.to_string(), "join"),
    }
}

/// Pulls a string `text` field out of a JSON object body.
fn extract_text(body: &[u8]) -> std::result::Result<String, String> {
    let value: Value =
        serde_json::from_slice(body).map_err(|_| "request body must be a JSON object".to_string())?;

    match value.get("text") {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.clone()),
        Some(Value::String(_)) => Err("must not be empty".to_string()),
        Some(_) => Err("must be a string".to_string()),
        None => Err("is required".to_string()),
    }
}

fn validation_error(field: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "errors": [{ "field": field, "message": message }] })),
    )
        .into_response()
}

fn internal_error(cause: &str, kind: &str) -> Response {
    tracing::error!(error = %cause, kind, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
