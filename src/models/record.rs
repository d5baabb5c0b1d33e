//! Content record types and identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a trust store record.
///
/// Assigned by the store on append and strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wraps a raw row identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content digest used as the global lookup key.
///
/// Any string is accepted so that arbitrary lookup keys resolve to
/// "not found" rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Creates a content hash from its string form.
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Returns the hash as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ContentHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ContentHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A record about to be appended to the trust store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    /// Submitted text, verbatim.
    pub text: String,
    /// Detected language code.
    pub language: String,
    /// Trust score in `[0, 1]`.
    pub trust_score: f64,
    /// Digest of `text`.
    pub content_hash: ContentHash,
}

/// A persisted submission.
///
/// Created once per successful submission and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Store-assigned identity.
    pub id: RecordId,
    /// Submitted text, verbatim.
    pub text: String,
    /// Detected language code.
    pub language: String,
    /// Trust score in `[0, 1]`.
    pub trust_score: f64,
    /// Digest of `text`.
    pub content_hash: ContentHash,
    /// When the record was appended.
    pub created_at: DateTime<Utc>,
}
