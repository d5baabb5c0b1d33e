//! # Trustscore
//!
//! Content identity and trust-score resolution.
//!
//! Trustscore accepts arbitrary text, derives a deterministic content hash and a
//! normalized trust score, persists the result, and resolves the score later by
//! hash through a two-tier lookup (score cache first, trust store second).
//!
//! ## Features
//!
//! - Deterministic Keccak-256 content identifiers
//! - Durable append-only trust store (`SQLite`)
//! - Pluggable score cache (in-process LRU, Redis, or disabled)
//! - Lexicon sentiment classifier with optional translation step
//! - HTTP surface (`POST /submit`, `GET /verify/{hash}`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trustscore::classifier::LexiconClassifier;
//! use trustscore::services::ResolutionPipeline;
//! use trustscore::storage::{MemoryScoreCache, SqliteTrustStore};
//!
//! let pipeline = ResolutionPipeline::new(
//!     Arc::new(SqliteTrustStore::in_memory()?),
//!     Arc::new(MemoryScoreCache::default()),
//!     Arc::new(LexiconClassifier::default()),
//! );
//! let submitted = pipeline.submit("I love this")?;
//! let verified = pipeline.verify(&submitted.content_hash)?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod classifier;
pub mod config;
pub mod models;
pub mod observability;
#[cfg(feature = "http")]
pub mod server;
pub mod services;
pub mod storage;

pub use classifier::{Classification, Classifier, LexiconClassifier};
pub use config::TrustConfig;
pub use models::{ContentHash, ContentRecord, RecordId, ScoreSource, SubmitResult, Verification};
pub use services::{ContentHasher, PipelineOptions, ResolutionPipeline};
pub use storage::{ScoreCache, TrustStore};

/// Error type for trustscore operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Validation` | Submitted text is missing, blank or too long |
/// | `Classification` | The classifier cannot produce a result |
/// | `Storage` | The trust store cannot append or query |
/// | `Cache` | A score cache backend fails (absorbed by the pipeline) |
/// | `OperationFailed` | Config, I/O or server startup failures |
/// | `FeatureNotEnabled` | A backend that was not compiled in is requested |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Submitted input failed validation.
    ///
    /// Raised before any classification or persistence happens, so a
    /// validation failure never changes state.
    #[error("invalid {field}: {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// Human-readable reason.
        message: String,
    },

    /// The classifier failed unrecoverably.
    ///
    /// Translation failures are not reported here; the classifier falls back to
    /// the original text instead.
    #[error("classification failed: {0}")]
    Classification(String),

    /// The trust store was unavailable.
    #[error("storage operation '{operation}' failed: {cause}")]
    Storage {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A score cache backend failed.
    #[error("cache operation '{operation}' failed: {cause}")]
    Cache {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// An operation failed.
    ///
    /// Raised when:
    /// - Config files cannot be read or parsed
    /// - Observability cannot be initialized
    /// - The HTTP listener cannot bind
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Feature not enabled (requires feature flag).
    #[error("feature not enabled: {0} (compile with --features {0})")]
    FeatureNotEnabled(String),
}

impl Error {
    /// Shorthand for a validation error on `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable kind, used for log fields and metric labels.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Classification(_) => "classification",
            Self::Storage { .. } => "storage",
            Self::Cache { .. } => "cache",
            Self::OperationFailed { .. } => "operation_failed",
            Self::FeatureNotEnabled(_) => "feature_not_enabled",
        }
    }
}

/// Result type alias for trustscore operations.
pub type Result<T> = std::result::Result<T, Error>;
