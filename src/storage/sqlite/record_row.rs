//! Row conversion for content records.

use crate::models::{ContentHash, ContentRecord, RecordId};
use chrono::{DateTime, Utc};
use rusqlite::Row;

/// Column list matching [`RecordRow::from_row`].
pub const RECORD_COLUMNS: &str = "id, text, language, trust_score, content_hash, created_at";

/// Raw row from the `contents` table.
#[derive(Debug, Clone)]
pub struct RecordRow {
    /// Row identity.
    pub id: i64,
    /// Submitted text.
    pub text: String,
    /// Language code.
    pub language: String,
    /// Trust score.
    pub trust_score: f64,
    /// Content digest.
    pub content_hash: String,
    /// Creation time in Unix milliseconds (0 for rows migrated from the legacy schema).
    pub created_at: i64,
}

impl RecordRow {
    /// Reads a row selected with [`RECORD_COLUMNS`].
    ///
    /// # Errors
    ///
    /// Returns a `rusqlite` error if a column is missing or mistyped.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            text: row.get(1)?,
            language: row.get(2)?,
            trust_score: row.get(3)?,
            content_hash: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

/// Builds a [`ContentRecord`] from a raw row.
#[must_use]
pub fn build_record_from_row(row: RecordRow) -> ContentRecord {
    ContentRecord {
        id: RecordId::new(row.id),
        text: row.text,
        language: row.language,
        trust_score: row.trust_score,
        content_hash: ContentHash::new(row.content_hash),
        created_at: DateTime::<Utc>::from_timestamp_millis(row.created_at).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(created_at: i64) -> RecordRow {
        RecordRow {
            id: 3,
            text: "I love this".to_string(),
            language: "en".to_string(),
            trust_score: 0.75,
            content_hash: "0xabc".to_string(),
            created_at,
        }
    }

    #[test]
    fn test_build_record_from_row() {
        let record = build_record_from_row(sample_row(1_700_000_000_000));
        assert_eq!(record.id, RecordId::new(3));
        assert_eq!(record.text, "I love this");
        assert_eq!(record.content_hash.as_str(), "0xabc");
        assert_eq!(record.created_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_legacy_row_gets_epoch_timestamp() {
        let record = build_record_from_row(sample_row(0));
        assert_eq!(record.created_at.timestamp(), 0);
    }
}
