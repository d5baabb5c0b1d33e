//! Backend factory for pipeline initialization.
//!
//! Centralizes collaborator construction from [`TrustConfig`] so the binary,
//! the HTTP server and tests build pipelines the same way.
//!
//! # Architecture
//!
//! ```text
//! BackendFactory
//!   ├── create_store()      → Arc<dyn TrustStore>   (required)
//!   ├── create_cache()      → Arc<dyn ScoreCache>   (degrades to disabled)
//!   ├── create_classifier() → Arc<dyn Classifier>
//!   └── create_pipeline()   → ResolutionPipeline
//! ```
//!
//! # Graceful Degradation
//!
//! The trust store is authoritative, so failing to open it is an error. The
//! cache is only an accelerator: if the configured backend cannot be reached
//! the factory logs a warning and disables caching instead.

use crate::classifier::{Classifier, HttpTranslator, LexiconClassifier, NoopTranslator};
use crate::config::{CacheBackend, CacheConfig, ClassifierConfig, StorageConfig, TrustConfig};
use crate::services::{PipelineOptions, ResolutionPipeline};
use crate::storage::{
    MemoryScoreCache, NoopScoreCache, RedisScoreCache, ScoreCache, SqliteTrustStore, TrustStore,
};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Factory for creating pipeline collaborators.
pub struct BackendFactory;

impl BackendFactory {
    /// Builds a complete pipeline from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the trust store cannot be opened.
    pub fn create_pipeline(config: &TrustConfig) -> Result<ResolutionPipeline> {
        let store = Self::create_store(&config.storage)?;
        let cache = Self::create_cache(&config.cache);
        let classifier = Self::create_classifier(&config.classifier);

        let options = PipelineOptions::default()
            .with_repopulate_cache_on_miss(config.pipeline.repopulate_cache_on_miss)
            .with_max_text_bytes(config.pipeline.max_text_bytes);

        tracing::info!(
            store = store.name(),
            cache = cache.name(),
            classifier = classifier.name(),
            repopulate_cache_on_miss = options.repopulate_cache_on_miss,
            "Resolution pipeline ready"
        );

        Ok(ResolutionPipeline::new(store, cache, classifier).with_options(options))
    }

    /// Opens the trust store.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] if the database cannot be opened or
    /// migrated.
    pub fn create_store(config: &StorageConfig) -> Result<Arc<dyn TrustStore>> {
        let store = if config.in_memory {
            tracing::debug!("Using in-memory trust store");
            SqliteTrustStore::in_memory()?
        } else {
            tracing::debug!(path = %config.db_path.display(), "Opening SQLite trust store");
            SqliteTrustStore::new(&config.db_path)?
        };
        Ok(Arc::new(store))
    }

    /// Creates the score cache, falling back to a disabled cache on failure.
    #[must_use]
    pub fn create_cache(config: &CacheConfig) -> Arc<dyn ScoreCache> {
        match config.backend {
            CacheBackend::Memory => {
                tracing::debug!(
                    capacity = config.capacity,
                    ttl_secs = config.ttl_secs,
                    "Created memory score cache"
                );
                Arc::new(MemoryScoreCache::new(config.capacity, config.ttl()))
            },
            CacheBackend::Redis => {
                match RedisScoreCache::new(&config.redis_url, config.key_prefix.clone(), config.ttl())
                {
                    Ok(cache) => {
                        tracing::debug!("Created Redis score cache");
                        Arc::new(cache)
                    },
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "Failed to create Redis score cache, caching disabled"
                        );
                        Arc::new(NoopScoreCache)
                    },
                }
            },
            CacheBackend::None => Arc::new(NoopScoreCache),
        }
    }

    /// Creates the classifier, with translation when a service is configured.
    #[must_use]
    pub fn create_classifier(config: &ClassifierConfig) -> Arc<dyn Classifier> {
        let Some(url) = config.translate_url.as_deref() else {
            return Arc::new(
                LexiconClassifier::new(NoopTranslator)
                    .with_target_language(config.target_language.clone()),
            );
        };

        let mut translator =
            HttpTranslator::new(url).with_timeout(Duration::from_secs(config.timeout_secs.max(1)));
        if let Some(key) = &config.translate_api_key {
            translator = translator.with_api_key(key.clone());
        }
        tracing::debug!(endpoint = translator.endpoint(), "Translation enabled");

        Arc::new(
            LexiconClassifier::new(translator).with_target_language(config.target_language.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_pipeline() {
        let mut config = TrustConfig::default();
        config.storage.in_memory = true;

        let pipeline = BackendFactory::create_pipeline(&config).unwrap();
        let submitted = pipeline.submit("great stuff").unwrap();
        assert_eq!(pipeline.store().count().unwrap(), 1);
        assert_eq!(pipeline.cache().name(), "memory");
        assert!(pipeline.verify(&submitted.content_hash).unwrap().is_some());
    }

    #[test]
    fn test_file_store_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            db_path: dir.path().join("nested").join("content.db"),
            in_memory: false,
        };

        let store = BackendFactory::create_store(&config).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(config.db_path.exists());
    }

    #[test]
    fn test_disabled_cache() {
        let config = CacheConfig {
            backend: CacheBackend::None,
            ..CacheConfig::default()
        };
        assert_eq!(BackendFactory::create_cache(&config).name(), "none");
    }

    #[test]
    fn test_unreachable_redis_degrades_to_disabled_cache() {
        let config = CacheConfig {
            backend: CacheBackend::Redis,
            redis_url: "redis://127.0.0.1:1".to_string(),
            ..CacheConfig::default()
        };
        assert_eq!(BackendFactory::create_cache(&config).name(), "none");
    }

    #[test]
    fn test_pipeline_options_follow_config() {
        let mut config = TrustConfig::default();
        config.storage.in_memory = true;
        config.pipeline.repopulate_cache_on_miss = true;
        config.pipeline.max_text_bytes = 16;

        let pipeline = BackendFactory::create_pipeline(&config).unwrap();
        assert!(pipeline.options().repopulate_cache_on_miss);
        assert_eq!(pipeline.options().max_text_bytes, 16);
    }
}
