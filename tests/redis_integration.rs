//! Redis score cache integration tests.
//!
//! Tests the Redis cache backend against a live server:
//! - Set/get/invalidate round trips
//! - Key prefixing
//! - TTL expiry
//! - Pipeline behaviour with a shared cache
//!
//! These tests require a running Redis server. Set the environment variable
//! `TRUSTSCORE_TEST_REDIS_URL` to enable them:
//!
//! ```bash
//! export TRUSTSCORE_TEST_REDIS_URL="redis://localhost:6379"
//! cargo test --features redis redis_integration
//! ```

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::print_stderr)]
#![cfg(feature = "redis")]

use std::env;
use std::sync::Arc;
use std::time::Duration;
use trustscore::classifier::LexiconClassifier;
use trustscore::models::{ContentHash, ScoreSource};
use trustscore::storage::{RedisScoreCache, ScoreCache, SqliteTrustStore};
use trustscore::ResolutionPipeline;

/// Environment variable for Redis test connection URL.
const REDIS_URL_ENV: &str = "TRUSTSCORE_TEST_REDIS_URL";

/// Returns the Redis connection URL if available, or None to skip tests.
fn get_redis_url() -> Option<String> {
    env::var(REDIS_URL_ENV).ok()
}

/// Macro to skip tests when Redis is not available.
macro_rules! require_redis {
    () => {
        match get_redis_url() {
            Some(url) => url,
            None => {
                eprintln!(
                    "Skipping test: {} not set. Set this environment variable to run Redis tests.",
                    REDIS_URL_ENV
                );
                return;
            },
        }
    };
}

/// Creates a cache with a unique key prefix so tests do not collide.
fn cache(url: &str, ttl: Option<Duration>) -> RedisScoreCache {
    let prefix = format!("trustscore-test:{}:", uuid::Uuid::new_v4());
    RedisScoreCache::new(url, prefix, ttl).unwrap()
}

#[test]
fn test_set_get_invalidate() {
    let url = require_redis!();
    let cache = cache(&url, None);
    let hash = ContentHash::new("0xfeed");

    assert_eq!(cache.get(&hash).unwrap(), None);

    cache.set(&hash, 0.625).unwrap();
    assert_eq!(cache.get(&hash).unwrap(), Some(0.625));

    cache.set(&hash, 0.125).unwrap();
    assert_eq!(cache.get(&hash).unwrap(), Some(0.125));

    assert!(cache.invalidate(&hash).unwrap());
    assert!(!cache.invalidate(&hash).unwrap());
    assert_eq!(cache.get(&hash).unwrap(), None);
}

#[test]
fn test_key_prefix() {
    let url = require_redis!();
    let cache = RedisScoreCache::new(&url, "prefix:", None).unwrap();
    assert_eq!(cache.key_for(&ContentHash::new("0x01")), "prefix:0x01");
}

#[test]
fn test_ttl_expiry() {
    let url = require_redis!();
    let cache = cache(&url, Some(Duration::from_secs(1)));
    let hash = ContentHash::new("0xexpiring");

    cache.set(&hash, 0.5).unwrap();
    assert_eq!(cache.get(&hash).unwrap(), Some(0.5));

    std::thread::sleep(Duration::from_millis(2100));
    assert_eq!(cache.get(&hash).unwrap(), None);
}

#[test]
fn test_pipeline_with_shared_cache() {
    let url = require_redis!();
    let prefix = format!("trustscore-test:{}:", uuid::Uuid::new_v4());
    let store = Arc::new(SqliteTrustStore::in_memory().unwrap());

    let writer = ResolutionPipeline::new(
        store.clone(),
        Arc::new(RedisScoreCache::new(&url, prefix.clone(), None).unwrap()),
        Arc::new(LexiconClassifier::default()),
    );
    let reader = ResolutionPipeline::new(
        store,
        Arc::new(RedisScoreCache::new(&url, prefix, None).unwrap()),
        Arc::new(LexiconClassifier::default()),
    );

    let submitted = writer.submit("I love this").unwrap();
    let verified = reader.verify(&submitted.content_hash).unwrap().unwrap();

    assert_eq!(verified.source, ScoreSource::Cache);
    assert!((verified.trust_score - submitted.trust_score).abs() < f64::EPSILON);
}

#[test]
fn test_unreachable_server_is_cache_error() {
    let result = RedisScoreCache::new("redis://127.0.0.1:1", "x:", None);
    assert!(matches!(result, Err(trustscore::Error::Cache { .. })));
}
