//! Results of the submit and verify operations.

use super::{ContentHash, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResult {
    /// Identity of the appended record.
    pub id: RecordId,
    /// Trust score in `[0, 1]`.
    pub trust_score: f64,
    /// Detected language code.
    pub language: String,
    /// Digest of the original, untranslated text.
    pub content_hash: ContentHash,
}

/// Which tier answered a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    /// The score cache.
    Cache,
    /// The trust store.
    Database,
}

impl ScoreSource {
    /// Returns the wire name of the source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Database => "database",
        }
    }
}

impl fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved trust score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    /// Trust score in `[0, 1]`.
    pub trust_score: f64,
    /// Tier that produced the score.
    pub source: ScoreSource,
}
