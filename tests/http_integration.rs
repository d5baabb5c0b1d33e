//! HTTP surface integration tests.
//!
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`:
//! - Submit then verify over both route families
//! - Validation and not-found response shapes
//! - Internal failures mapped to a generic 500

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]
#![cfg(feature = "http")]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use std::sync::Arc;
use test_case::test_case;
use tower::ServiceExt;
use trustscore::classifier::{Classification, Classifier, LexiconClassifier};
use trustscore::server::router;
use trustscore::storage::{MemoryScoreCache, NoopScoreCache, ScoreCache, SqliteTrustStore};
use trustscore::{ContentHasher, Error, ResolutionPipeline, Result};

struct BrokenClassifier;

impl Classifier for BrokenClassifier {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn classify(&self, _text: &str) -> Result<Classification> {
        Err(Error::Classification("secret internal detail".to_string()))
    }
}

fn app_with(cache: Arc<dyn ScoreCache>, classifier: Arc<dyn Classifier>) -> Router {
    let pipeline = ResolutionPipeline::new(
        Arc::new(SqliteTrustStore::in_memory().unwrap()),
        cache,
        classifier,
    );
    router(Arc::new(pipeline))
}

fn app() -> Router {
    app_with(
        Arc::new(MemoryScoreCache::default()),
        Arc::new(LexiconClassifier::default()),
    )
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_then_verify_from_cache() {
    let app = app();

    let (status, submitted) = send(&app, post_json("/submit", r#"{"text":"I love this"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["language"], "en");
    assert_eq!(
        submitted["content_hash"],
        ContentHasher::hash("I love this").as_str()
    );
    assert!(submitted["id"].as_i64().unwrap() >= 1);
    assert!(submitted.get("blockchain_hash").is_none());

    let hash = submitted["content_hash"].as_str().unwrap();
    let (status, verified) = send(&app, get(&format!("/verify/{hash}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["source"], "cache");
    assert_eq!(verified["trust_score"], submitted["trust_score"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_legacy_routes() {
    let app = app_with(Arc::new(NoopScoreCache), Arc::new(LexiconClassifier::default()));

    let (status, submitted) =
        send(&app, post_json("/analyze_content", r#"{"text":"great product"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["blockchain_hash"], submitted["content_hash"]);

    let hash = submitted["blockchain_hash"].as_str().unwrap();
    let (status, verified) = send(&app, get(&format!("/verify_content/{hash}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["source"], "database");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_padded_submission_is_trimmed() {
    let app = app();

    let (status, submitted) =
        send(&app, post_json("/submit", r#"{"text":"  I love this \n"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        submitted["content_hash"],
        ContentHasher::hash("I love this").as_str()
    );
}

#[test_case(r#"{"text":""}"# ; "empty")]
#[test_case(r#"{"text":"   "}"# ; "whitespace")]
#[test_case(r#"{"text":42}"# ; "not a string")]
#[test_case(r#"{"body":"hi"}"# ; "missing")]
#[test_case("not json" ; "malformed")]
#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_submissions_are_rejected(body: &str) {
    let app = app();

    let (status, response) = send(&app, post_json("/submit", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["errors"][0]["field"], "text");
    assert!(response["errors"][0]["message"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_hash_is_404() {
    let (status, body) = send(&app(), get("/verify/0x1234")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({"error": "Content not found"}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_internal_failure_is_generic_500() {
    let app = app_with(Arc::new(MemoryScoreCache::default()), Arc::new(BrokenClassifier));

    let (status, body) = send(&app, post_json("/submit", r#"{"text":"hello"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
    assert!(!body.to_string().contains("secret"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health() {
    let (status, body) = send(&app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
