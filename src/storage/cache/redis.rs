//! Redis-backed score cache.
//!
//! Scores are stored as plain string values under `<prefix><content_hash>`,
//! optionally with an `EX` expiry. Several server processes can share one
//! Redis instance and observe each other's write-through updates.
//!
//! # Command Timeout
//!
//! Connections use a 5-second read/write timeout so an unresponsive Redis
//! degrades verification to the trust store instead of hanging it.

#[cfg(feature = "redis")]
mod implementation {
    use crate::models::ContentHash;
    use crate::storage::metrics::status_label;
    use crate::storage::record_operation_metrics;
    use crate::storage::traits::ScoreCache;
    use crate::{Error, Result};
    use redis::{Client, Connection};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    const BACKEND: &str = "redis";

    /// Default timeout for Redis operations.
    const REDIS_TIMEOUT: Duration = Duration::from_secs(5);

    /// Redis-backed score cache.
    ///
    /// # Connection Management
    ///
    /// Keeps one reusable connection in a `Mutex<Option<Connection>>`. A
    /// connection is taken out for each command and only returned after a
    /// successful command, so a broken connection is dropped and replaced on
    /// the next call.
    pub struct RedisScoreCache {
        client: Client,
        key_prefix: String,
        ttl: Option<Duration>,
        connection: Mutex<Option<Connection>>,
    }

    impl RedisScoreCache {
        /// Creates a Redis score cache and checks connectivity.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Cache`] if the URL is invalid or the server is unreachable.
        pub fn new(
            connection_url: &str,
            key_prefix: impl Into<String>,
            ttl: Option<Duration>,
        ) -> Result<Self> {
            let client = Client::open(connection_url).map_err(|e| Error::Cache {
                operation: "redis_connect".to_string(),
                cause: e.to_string(),
            })?;

            let cache = Self {
                client,
                key_prefix: key_prefix.into(),
                ttl,
                connection: Mutex::new(None),
            };

            let conn = cache.get_connection()?;
            cache.return_connection(conn);

            Ok(cache)
        }

        /// Creates a cache against a local Redis with default settings.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Cache`] if the server is unreachable.
        pub fn with_defaults() -> Result<Self> {
            Self::new("redis://localhost:6379", "trustscore:score:", None)
        }

        /// Builds the Redis key for a content hash.
        #[must_use]
        pub fn key_for(&self, hash: &ContentHash) -> String {
            format!("{}{}", self.key_prefix, hash.as_str())
        }

        fn get_connection(&self) -> Result<Connection> {
            if let Some(conn) = crate::storage::acquire_lock(&self.connection).take() {
                return Ok(conn);
            }

            let conn = self
                .client
                .get_connection_with_timeout(REDIS_TIMEOUT)
                .map_err(|e| Error::Cache {
                    operation: "redis_get_connection".to_string(),
                    cause: e.to_string(),
                })?;

            conn.set_read_timeout(Some(REDIS_TIMEOUT))
                .map_err(|e| Error::Cache {
                    operation: "redis_set_read_timeout".to_string(),
                    cause: e.to_string(),
                })?;
            conn.set_write_timeout(Some(REDIS_TIMEOUT))
                .map_err(|e| Error::Cache {
                    operation: "redis_set_write_timeout".to_string(),
                    cause: e.to_string(),
                })?;

            Ok(conn)
        }

        fn return_connection(&self, conn: Connection) {
            *crate::storage::acquire_lock(&self.connection) = Some(conn);
        }

        /// Runs one command on a pooled connection, returning it on success.
        fn with_connection<T>(
            &self,
            operation: &'static str,
            f: impl FnOnce(&mut Connection) -> redis::RedisResult<T>,
        ) -> Result<T> {
            let start = Instant::now();
            let result = self.get_connection().and_then(|mut conn| {
                let value = f(&mut conn).map_err(|e| Error::Cache {
                    operation: format!("redis_{operation}"),
                    cause: e.to_string(),
                })?;
                self.return_connection(conn);
                Ok(value)
            });

            record_operation_metrics(BACKEND, operation, start, status_label(&result));
            result
        }
    }

    impl ScoreCache for RedisScoreCache {
        fn name(&self) -> &'static str {
            BACKEND
        }

        fn get(&self, hash: &ContentHash) -> Result<Option<f64>> {
            let key = self.key_for(hash);
            let raw: Option<String> =
                self.with_connection("get", |conn| redis::cmd("GET").arg(&key).query(conn))?;

            // A value that does not parse was not written by this cache; treat it as absent.
            Ok(raw.and_then(|value| {
                value.parse::<f64>().ok().or_else(|| {
                    tracing::warn!(key = %key, "Ignoring non-numeric cached score");
                    None
                })
            }))
        }

        fn set(&self, hash: &ContentHash, score: f64) -> Result<()> {
            let key = self.key_for(hash);
            let value = score.to_string();
            match self.ttl.map(|ttl| ttl.as_secs().max(1)) {
                Some(seconds) => self.with_connection("set", |conn| {
                    redis::cmd("SET")
                        .arg(&key)
                        .arg(&value)
                        .arg("EX")
                        .arg(seconds)
                        .query(conn)
                }),
                None => self.with_connection("set", |conn| {
                    redis::cmd("SET").arg(&key).arg(&value).query(conn)
                }),
            }
        }

        fn invalidate(&self, hash: &ContentHash) -> Result<bool> {
            let key = self.key_for(hash);
            let removed: i64 = self.with_connection("invalidate", |conn| {
                redis::cmd("DEL").arg(&key).query(conn)
            })?;
            Ok(removed > 0)
        }
    }
}

#[cfg(feature = "redis")]
pub use implementation::RedisScoreCache;

#[cfg(not(feature = "redis"))]
mod stub {
    use crate::models::ContentHash;
    use crate::storage::traits::ScoreCache;
    use crate::{Error, Result};
    use std::time::Duration;

    /// Stub Redis score cache when the feature is not enabled.
    pub struct RedisScoreCache;

    impl RedisScoreCache {
        /// Creates a Redis score cache (stub).
        ///
        /// # Errors
        ///
        /// Always returns an error because the feature is not enabled.
        pub fn new(
            _connection_url: &str,
            _key_prefix: impl Into<String>,
            _ttl: Option<Duration>,
        ) -> Result<Self> {
            Err(Error::FeatureNotEnabled("redis".to_string()))
        }

        /// Creates a cache with default settings (stub).
        ///
        /// # Errors
        ///
        /// Always returns an error because the feature is not enabled.
        pub fn with_defaults() -> Result<Self> {
            Err(Error::FeatureNotEnabled("redis".to_string()))
        }
    }

    impl ScoreCache for RedisScoreCache {
        fn name(&self) -> &'static str {
            "redis"
        }

        fn get(&self, _hash: &ContentHash) -> Result<Option<f64>> {
            Err(Error::FeatureNotEnabled("redis".to_string()))
        }

        fn set(&self, _hash: &ContentHash, _score: f64) -> Result<()> {
            Err(Error::FeatureNotEnabled("redis".to_string()))
        }

        fn invalidate(&self, _hash: &ContentHash) -> Result<bool> {
            Err(Error::FeatureNotEnabled("redis".to_string()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_stub_reports_feature_not_enabled() {
            let result = RedisScoreCache::with_defaults();
            assert!(matches!(result, Err(Error::FeatureNotEnabled(_))));
        }
    }
}

#[cfg(not(feature = "redis"))]
pub use stub::RedisScoreCache;
