//! Configuration management.
//!
//! Configuration is layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config`, `TRUSTSCORE_CONFIG_PATH`, or
//!    `<config_dir>/trustscore/config.toml`)
//! 3. Environment variables (a `.env` file is loaded first when present)
//!
//! # Environment Variables
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `TRUSTSCORE_DB_PATH` | `storage.db_path` |
//! | `TRUSTSCORE_CACHE_BACKEND` | `cache.backend` (`memory`, `redis`, `none`) |
//! | `TRUSTSCORE_REDIS_URL` | `cache.redis_url` |
//! | `TRUSTSCORE_CACHE_TTL_SECS` | `cache.ttl_secs` |
//! | `TRUSTSCORE_TRANSLATE_URL` | `classifier.translate_url` |
//! | `TRUSTSCORE_TRANSLATE_API_KEY` | `classifier.translate_api_key` |
//! | `PORT` | `server.port` |
//! | `TRUSTSCORE_LOG_FORMAT` | `observability.log_format` |
//! | `TRUSTSCORE_LOG_LEVEL` | `observability.log_level` |
//! | `TRUSTSCORE_LOG_FILE` | `observability.log_file` |
//! | `TRUSTSCORE_METRICS_ENABLED` | `observability.metrics_enabled` |
//! | `TRUSTSCORE_METRICS_PORT` | `observability.metrics_port` |

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "TRUSTSCORE_CONFIG_PATH";

/// Main configuration for trustscore.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrustConfig {
    /// Trust store settings.
    pub storage: StorageConfig,
    /// Score cache settings.
    pub cache: CacheConfig,
    /// Classifier settings.
    pub classifier: ClassifierConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging and metrics settings.
    pub observability: ObservabilitySettings,
    /// Resolution pipeline settings.
    pub pipeline: PipelineConfig,
}

/// Trust store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageConfig {
    /// Path to the `SQLite` database.
    pub db_path: PathBuf,
    /// Use an ephemeral in-memory database instead of `db_path`.
    pub in_memory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            in_memory: false,
        }
    }
}

/// Score cache backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process LRU cache.
    #[default]
    Memory,
    /// Shared Redis cache.
    Redis,
    /// Cache disabled; every lookup goes to the trust store.
    None,
}

impl CacheBackend {
    /// Parses a backend name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] for unknown names.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "lru" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            "none" | "off" | "disabled" => Ok(Self::None),
            other => Err(Error::OperationFailed {
                operation: "parse_cache_backend".to_string(),
                cause: format!("unknown cache backend '{other}' (expected memory, redis or none)"),
            }),
        }
    }

    /// Returns the backend name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Redis => "redis",
            Self::None => "none",
        }
    }
}

/// Score cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheConfig {
    /// Which backend to use.
    pub backend: CacheBackend,
    /// Maximum entries held by the memory backend.
    pub capacity: usize,
    /// Entry lifetime in seconds; 0 keeps entries until evicted.
    pub ttl_secs: u64,
    /// Redis connection URL.
    pub redis_url: String,
    /// Prefix prepended to Redis keys.
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            capacity: 10_000,
            ttl_secs: 3600,
            redis_url: "redis://localhost:6379".to_string(),
            key_prefix: "trustscore:score:".to_string(),
        }
    }
}

impl CacheConfig {
    /// Returns the entry lifetime, or `None` when entries never expire.
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        if self.ttl_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.ttl_secs))
        }
    }
}

/// Classifier configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifierConfig {
    /// Base URL of a LibreTranslate-compatible service; `None` disables translation.
    pub translate_url: Option<String>,
    /// API key for the translation service.
    #[serde(skip_serializing)]
    pub translate_api_key: Option<String>,
    /// Language the sentiment lexicon is written in.
    pub target_language: String,
    /// Translation request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            translate_url: None,
            translate_api_key: None,
            target_language: "en".to_string(),
            timeout_secs: 10,
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Logging and metrics settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservabilitySettings {
    /// `pretty` or `json`.
    pub log_format: String,
    /// Default log level or `EnvFilter` directive.
    pub log_level: String,
    /// Optional file receiving log output instead of stderr.
    pub log_file: Option<PathBuf>,
    /// Install the Prometheus recorder.
    pub metrics_enabled: bool,
    /// Port for the Prometheus scrape endpoint.
    pub metrics_port: u16,
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
            log_level: "info".to_string(),
            log_file: None,
            metrics_enabled: false,
            metrics_port: 9090,
        }
    }
}

/// Resolution pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineConfig {
    /// Write store hits back into the cache.
    pub repopulate_cache_on_miss: bool,
    /// Largest accepted submission in bytes.
    pub max_text_bytes: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            repopulate_cache_on_miss: false,
            max_text_bytes: crate::services::DEFAULT_MAX_TEXT_BYTES,
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Storage section.
    pub storage: Option<ConfigFileStorage>,
    /// Cache section.
    pub cache: Option<ConfigFileCache>,
    /// Classifier section.
    pub classifier: Option<ConfigFileClassifier>,
    /// Server section.
    pub server: Option<ConfigFileServer>,
    /// Observability section.
    pub observability: Option<ConfigFileObservability>,
    /// Pipeline section.
    pub pipeline: Option<ConfigFilePipeline>,
}

/// Storage section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileStorage {
    /// Database path.
    pub db_path: Option<String>,
    /// In-memory flag.
    pub in_memory: Option<bool>,
}

/// Cache section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileCache {
    /// Backend name.
    pub backend: Option<String>,
    /// Memory capacity.
    pub capacity: Option<usize>,
    /// TTL in seconds.
    pub ttl_secs: Option<u64>,
    /// Redis URL.
    pub redis_url: Option<String>,
    /// Redis key prefix.
    pub key_prefix: Option<String>,
}

/// Classifier section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileClassifier {
    /// Translation service URL.
    pub translate_url: Option<String>,
    /// Translation API key.
    pub translate_api_key: Option<String>,
    /// Target language.
    pub target_language: Option<String>,
    /// Timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Server section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileServer {
    /// Bind address.
    pub host: Option<String>,
    /// Listen port.
    pub port: Option<u16>,
}

/// Observability section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileObservability {
    /// Log format.
    pub log_format: Option<String>,
    /// Log level.
    pub log_level: Option<String>,
    /// Log file.
    pub log_file: Option<String>,
    /// Metrics flag.
    pub metrics_enabled: Option<bool>,
    /// Metrics port.
    pub metrics_port: Option<u16>,
}

/// Pipeline section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFilePipeline {
    /// Repopulate flag.
    pub repopulate_cache_on_miss: Option<bool>,
    /// Size limit.
    pub max_text_bytes: Option<usize>,
}

impl TrustConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration the way the binary does.
    ///
    /// Reads `.env`, then the config file from `explicit`,
    /// `TRUSTSCORE_CONFIG_PATH` or the default location, then applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named config file cannot be read or
    /// parsed, or if an environment override is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }

        let env_path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load_default(),
        };

        config.apply_env_overrides_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Self::from_config_file(file)
    }

    /// Loads configuration from the platform config directory.
    ///
    /// Returns default configuration if no config file is found or the file
    /// is unreadable.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        Self::load_from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
            Self::default()
        })
    }

    /// Converts a `ConfigFile` to `TrustConfig`.
    fn from_config_file(file: ConfigFile) -> Result<Self> {
        let mut config = Self::default();

        if let Some(storage) = file.storage {
            if let Some(db_path) = storage.db_path {
                config.storage.db_path = PathBuf::from(db_path);
            }
            if let Some(v) = storage.in_memory {
                config.storage.in_memory = v;
            }
        }
        if let Some(cache) = file.cache {
            if let Some(backend) = cache.backend {
                config.cache.backend = CacheBackend::parse(&backend)?;
            }
            if let Some(v) = cache.capacity {
                config.cache.capacity = v;
            }
            if let Some(v) = cache.ttl_secs {
                config.cache.ttl_secs = v;
            }
            if let Some(v) = cache.redis_url {
                config.cache.redis_url = v;
            }
            if let Some(v) = cache.key_prefix {
                config.cache.key_prefix = v;
            }
        }
        if let Some(classifier) = file.classifier {
            config.classifier.translate_url = classifier.translate_url;
            config.classifier.translate_api_key = classifier.translate_api_key;
            if let Some(v) = classifier.target_language {
                config.classifier.target_language = v;
            }
            if let Some(v) = classifier.timeout_secs {
                config.classifier.timeout_secs = v;
            }
        }
        if let Some(server) = file.server {
            if let Some(v) = server.host {
                config.server.host = v;
            }
            if let Some(v) = server.port {
                config.server.port = v;
            }
        }
        if let Some(obs) = file.observability {
            if let Some(v) = obs.log_format {
                config.observability.log_format = v;
            }
            if let Some(v) = obs.log_level {
                config.observability.log_level = v;
            }
            config.observability.log_file = obs.log_file.map(PathBuf::from);
            if let Some(v) = obs.metrics_enabled {
                config.observability.metrics_enabled = v;
            }
            if let Some(v) = obs.metrics_port {
                config.observability.metrics_port = v;
            }
        }
        if let Some(pipeline) = file.pipeline {
            if let Some(v) = pipeline.repopulate_cache_on_miss {
                config.pipeline.repopulate_cache_on_miss = v;
            }
            if let Some(v) = pipeline.max_text_bytes {
                config.pipeline.max_text_bytes = v;
            }
        }

        Ok(config)
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or enum override does not parse.
    pub fn apply_env_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get("TRUSTSCORE_DB_PATH") {
            self.storage.db_path = PathBuf::from(v);
        }
        if let Some(v) = get("TRUSTSCORE_CACHE_BACKEND") {
            self.cache.backend = CacheBackend::parse(&v)?;
        }
        if let Some(v) = get("TRUSTSCORE_REDIS_URL") {
            self.cache.redis_url = v;
        }
        if let Some(v) = get("TRUSTSCORE_CACHE_TTL_SECS") {
            self.cache.ttl_secs = parse_env("TRUSTSCORE_CACHE_TTL_SECS", &v)?;
        }
        if let Some(v) = get("TRUSTSCORE_TRANSLATE_URL") {
            self.classifier.translate_url = Some(v);
        }
        if let Some(v) = get("TRUSTSCORE_TRANSLATE_API_KEY") {
            self.classifier.translate_api_key = Some(v);
        }
        if let Some(v) = get("PORT") {
            self.server.port = parse_env("PORT", &v)?;
        }
        if let Some(v) = get("TRUSTSCORE_LOG_FORMAT") {
            self.observability.log_format = v;
        }
        if let Some(v) = get("TRUSTSCORE_LOG_LEVEL") {
            self.observability.log_level = v;
        }
        if let Some(v) = get("TRUSTSCORE_LOG_FILE") {
            self.observability.log_file = Some(PathBuf::from(v));
        }
        if let Some(v) = get("TRUSTSCORE_METRICS_ENABLED") {
            self.observability.metrics_enabled = parse_bool(&v);
        }
        if let Some(v) = get("TRUSTSCORE_METRICS_PORT") {
            self.observability.metrics_port = parse_env("TRUSTSCORE_METRICS_PORT", &v)?;
        }

        Ok(())
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage.db_path = path.into();
        self
    }

    /// Sets the cache backend.
    #[must_use]
    pub const fn with_cache_backend(mut self, backend: CacheBackend) -> Self {
        self.cache.backend = backend;
        self
    }

    /// Sets the server port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::OperationFailed {
            operation: "serialize_config".to_string(),
            cause: e.to_string(),
        })
    }
}

/// Returns `<config_dir>/trustscore/config.toml` for the current platform.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.config_dir().join("trustscore").join("config.toml"))
}

/// Returns `<data_dir>/trustscore/content.db`, or `content.db` when no home
/// directory can be determined.
#[must_use]
pub fn default_db_path() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("content.db"),
        |dirs| dirs.data_dir().join("trustscore").join("content.db"),
    )
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| Error::OperationFailed {
        operation: "parse_env".to_string(),
        cause: format!("{key}={value}: {e}"),
    })
}

fn parse_bool(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}
