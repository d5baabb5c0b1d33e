//! Resolution pipeline.
//!
//! Orchestrates the write path (validate, classify, hash, persist, cache) and
//! the read path (cache, then trust store) over injected collaborators.
//!
//! # Failure Semantics
//!
//! | Step | Failure | Effect |
//! |------|---------|--------|
//! | validate | blank or oversized text (after trimming) | `Validation`, nothing written |
//! | classify | classifier error | `Classification`, nothing written |
//! | append | store unavailable | `Storage`, nothing cached |
//! | cache set | cache unavailable | logged; record stays, verify falls back |
//! | cache get | cache unavailable | logged; treated as a miss |
//! | store lookup | store unavailable | `Storage` |

use crate::classifier::Classifier;
use crate::models::{ContentHash, NewRecord, ScoreSource, SubmitResult, Verification};
use crate::services::ContentHasher;
use crate::storage::{ScoreCache, TrustStore};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Default maximum size of submitted text in bytes.
pub const DEFAULT_MAX_TEXT_BYTES: usize = 100_000;

/// Tunable pipeline behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Write a score found in the trust store back into the cache.
    ///
    /// The verification that triggered the write still reports
    /// [`ScoreSource::Database`]; only later lookups hit the cache.
    pub repopulate_cache_on_miss: bool,
    /// Largest accepted submission in bytes.
    pub max_text_bytes: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            repopulate_cache_on_miss: false,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
        }
    }
}

impl PipelineOptions {
    /// Enables or disables cache repopulation on store hits.
    #[must_use]
    pub const fn with_repopulate_cache_on_miss(mut self, enabled: bool) -> Self {
        self.repopulate_cache_on_miss = enabled;
        self
    }

    /// Sets the maximum submission size.
    #[must_use]
    pub const fn with_max_text_bytes(mut self, max: usize) -> Self {
        self.max_text_bytes = max;
        self
    }
}

/// Two-tier content resolution over a trust store and a score cache.
///
/// The pipeline holds no mutable state of its own; concurrent calls are safe
/// as long as the collaborators are.
pub struct ResolutionPipeline {
    store: Arc<dyn TrustStore>,
    cache: Arc<dyn ScoreCache>,
    classifier: Arc<dyn Classifier>,
    options: PipelineOptions,
}

impl ResolutionPipeline {
    /// Creates a pipeline with default options.
    #[must_use]
    pub fn new(
        store: Arc<dyn TrustStore>,
        cache: Arc<dyn ScoreCache>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            store,
            cache,
            classifier,
            options: PipelineOptions::default(),
        }
    }

    /// Replaces the pipeline options.
    #[must_use]
    pub const fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the active options.
    #[must_use]
    pub const fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Returns the trust store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn TrustStore> {
        &self.store
    }

    /// Returns the score cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn ScoreCache> {
        &self.cache
    }

    /// Classifies, persists and caches a submission.
    ///
    /// Leading and trailing whitespace is stripped before classification,
    /// hashing and storage.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `text` is blank or too long
    /// - [`Error::Classification`] if the classifier fails
    /// - [`Error::Storage`] if the trust store cannot append
    ///
    /// A failing cache write is not an error.
    #[instrument(
        name = "trustscore.pipeline.submit",
        skip(self, text),
        fields(
            text_len = text.len(),
            content_hash = tracing::field::Empty,
            record_id = tracing::field::Empty
        )
    )]
    pub fn submit(&self, text: &str) -> Result<SubmitResult> {
        let start = Instant::now();
        let result = self.submit_inner(text);

        let status = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::counter!("pipeline_submissions_total", "status" => status).increment(1);
        metrics::histogram!("pipeline_submit_duration_ms")
            .record(start.elapsed().as_secs_f64() * 1000.0);

        result
    }

    fn submit_inner(&self, text: &str) -> Result<SubmitResult> {
        // Surrounding whitespace is not part of the content: padded and
        // unpadded submissions share one identity.
        let text = text.trim();
        self.validate(text)?;

        let classification = self.classifier.classify(text).map_err(|e| {
            tracing::error!(
                classifier = self.classifier.name(),
                error = %e,
                "Classification failed"
            );
            e
        })?;
        // Scores from third-party classifiers are not trusted to be in range.
        let trust_score = if classification.trust_score.is_finite() {
            classification.trust_score.clamp(0.0, 1.0)
        } else {
            return Err(Error::Classification(format!(
                "{} returned a non-finite score",
                self.classifier.name()
            )));
        };

        let content_hash = ContentHasher::hash(text);
        tracing::Span::current().record("content_hash", content_hash.as_str());

        let record = NewRecord {
            text: text.to_string(),
            language: classification.language,
            trust_score,
            content_hash,
        };
        let id = self.store.append(&record).map_err(|e| {
            tracing::error!(
                store = self.store.name(),
                content_hash = %record.content_hash,
                error = %e,
                "Failed to persist submission"
            );
            e
        })?;
        tracing::Span::current().record("record_id", id.get());

        if let Err(e) = self.cache.set(&record.content_hash, trust_score) {
            tracing::warn!(
                cache = self.cache.name(),
                content_hash = %record.content_hash,
                record_id = %id,
                error = %e,
                "Write-through cache update failed; verification will fall back to the store"
            );
        }

        tracing::info!(
            record_id = %id,
            content_hash = %record.content_hash,
            language = %record.language,
            trust_score,
            "Submission stored"
        );

        Ok(SubmitResult {
            id,
            trust_score,
            language: record.language,
            content_hash: record.content_hash,
        })
    }

    fn validate(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(Error::validation("text", "must not be empty"));
        }
        if text.len() > self.options.max_text_bytes {
            return Err(Error::validation(
                "text",
                format!("must be at most {} bytes", self.options.max_text_bytes),
            ));
        }
        Ok(())
    }

    /// Resolves the trust score for a content hash.
    ///
    /// Returns `Ok(None)` when neither tier knows the hash. Any string is
    /// accepted; malformed hashes resolve to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the cache misses and the trust store is
    /// unavailable.
    #[instrument(
        name = "trustscore.pipeline.verify",
        skip(self, hash),
        fields(content_hash = %hash.as_ref())
    )]
    pub fn verify(&self, hash: impl AsRef<str>) -> Result<Option<Verification>> {
        let hash = ContentHash::new(hash.as_ref());
        let start = Instant::now();
        let result = self.verify_inner(&hash);

        let outcome = match &result {
            Ok(Some(v)) => v.source.as_str(),
            Ok(None) => "not_found",
            Err(_) => "error",
        };
        metrics::counter!("pipeline_verifications_total", "source" => outcome).increment(1);
        metrics::histogram!("pipeline_verify_duration_ms")
            .record(start.elapsed().as_secs_f64() * 1000.0);

        result
    }

    fn verify_inner(&self, hash: &ContentHash) -> Result<Option<Verification>> {
        match self.cache.get(hash) {
            Ok(Some(trust_score)) => {
                metrics::counter!("score_cache_lookups_total", "result" => "hit").increment(1);
                return Ok(Some(Verification {
                    trust_score,
                    source: ScoreSource::Cache,
                }));
            },
            Ok(None) => {
                metrics::counter!("score_cache_lookups_total", "result" => "miss").increment(1);
            },
            Err(e) => {
                metrics::counter!("score_cache_lookups_total", "result" => "error").increment(1);
                tracing::warn!(
                    cache = self.cache.name(),
                    content_hash = %hash,
                    error = %e,
                    "Cache lookup failed; falling back to the store"
                );
            },
        }

        let record = self.store.find_by_hash(hash).map_err(|e| {
            tracing::error!(
                store = self.store.name(),
                content_hash = %hash,
                error = %e,
                "Trust store lookup failed"
            );
            e
        })?;

        let Some(record) = record else {
            tracing::debug!(content_hash = %hash, "Content not found");
            return Ok(None);
        };

        if self.options.repopulate_cache_on_miss
            && let Err(e) = self.cache.set(hash, record.trust_score)
        {
            tracing::warn!(
                cache = self.cache.name(),
                content_hash = %hash,
                error = %e,
                "Cache repopulation failed"
            );
        }

        Ok(Some(Verification {
            trust_score: record.trust_score,
            source: ScoreSource::Database,
        }))
    }
}
