//! `SQLite`-based trust store.
//!
//! Provides durable, append-only storage of content records using `SQLite` as
//! the authoritative source of truth.

use crate::models::{ContentHash, ContentRecord, NewRecord, RecordId};
use crate::storage::metrics::status_label;
use crate::storage::migrations::{MigrationRunner, TRUST_STORE_MIGRATIONS};
use crate::storage::sqlite::{
    RECORD_COLUMNS, RecordRow, build_record_from_row, open_connection, open_in_memory,
};
use crate::storage::traits::TrustStore;
use crate::storage::{acquire_lock, record_operation_metrics};
use crate::{Error, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Params, params};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing::instrument;

const BACKEND: &str = "sqlite";

/// `SQLite`-based trust store.
///
/// # Concurrency Model
///
/// Uses a `Mutex<Connection>` because `rusqlite::Connection` is not `Sync`.
/// WAL mode and `busy_timeout` handle contention from other processes sharing
/// the same database file.
///
/// # Schema
///
/// `contents(id INTEGER PRIMARY KEY AUTOINCREMENT, text, language,
/// trust_score, content_hash, created_at)` with an index on
/// `(content_hash, id DESC)`. `AUTOINCREMENT` guarantees identities are never
/// reused, so the largest id is always the most recent record.
pub struct SqliteTrustStore {
    conn: Mutex<Connection>,
    /// Path to the database (None for in-memory).
    db_path: Option<PathBuf>,
}

impl SqliteTrustStore {
    /// Opens (or creates) a file-backed trust store and migrates its schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the database cannot be opened or migrated.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use trustscore::storage::SqliteTrustStore;
    ///
    /// let store = SqliteTrustStore::new("./content.db")?;
    /// # Ok::<(), trustscore::Error>(())
    /// ```
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let conn = open_connection(&db_path)?;
        Self::with_connection(conn, Some(db_path))
    }

    /// Creates an in-memory trust store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the database cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(open_in_memory()?, None)
    }

    fn with_connection(mut conn: Connection, db_path: Option<PathBuf>) -> Result<Self> {
        MigrationRunner::new(TRUST_STORE_MIGRATIONS).run(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub const fn db_path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }

    fn query_one<P: Params>(&self, sql: &str, params: P) -> Result<Option<ContentRecord>> {
        let conn = acquire_lock(&self.conn);
        let row = conn
            .query_row(sql, params, RecordRow::from_row)
            .optional()
            .map_err(|e| Error::Storage {
                operation: "query_record".to_string(),
                cause: e.to_string(),
            })?;
        Ok(row.map(build_record_from_row))
    }
}

impl TrustStore for SqliteTrustStore {
    fn name(&self) -> &'static str {
        BACKEND
    }

    #[instrument(
        skip(self, record),
        fields(operation = "append", backend = BACKEND, content_hash = %record.content_hash)
    )]
    fn append(&self, record: &NewRecord) -> Result<RecordId> {
        let start = Instant::now();
        let result = (|| {
            let conn = acquire_lock(&self.conn);
            conn.execute(
                "INSERT INTO contents (text, language, trust_score, content_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.text,
                    record.language,
                    record.trust_score,
                    record.content_hash.as_str(),
                    Utc::now().timestamp_millis(),
                ],
            )
            .map_err(|e| Error::Storage {
                operation: "insert_record".to_string(),
                cause: e.to_string(),
            })?;

            Ok(RecordId::new(conn.last_insert_rowid()))
        })();

        record_operation_metrics(BACKEND, "append", start, status_label(&result));
        result
    }

    #[instrument(
        skip(self),
        fields(operation = "find_by_hash", backend = BACKEND, content_hash = %hash)
    )]
    fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<ContentRecord>> {
        let start = Instant::now();
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM contents WHERE content_hash = ?1 ORDER BY id DESC LIMIT 1"
        );
        let result = self.query_one(&sql, params![hash.as_str()]);

        record_operation_metrics(BACKEND, "find_by_hash", start, status_label(&result));
        result
    }

    #[instrument(skip(self), fields(operation = "get", backend = BACKEND, record.id = %id))]
    fn get(&self, id: RecordId) -> Result<Option<ContentRecord>> {
        let start = Instant::now();
        let sql = format!("SELECT {RECORD_COLUMNS} FROM contents WHERE id = ?1");
        let result = self.query_one(&sql, params![id.get()]);

        record_operation_metrics(BACKEND, "get", start, status_label(&result));
        result
    }

    fn count(&self) -> Result<usize> {
        let start = Instant::now();
        let result = (|| {
            let conn = acquire_lock(&self.conn);
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM contents", [], |row| row.get(0))
                .map_err(|e| Error::Storage {
                    operation: "count_records".to_string(),
                    cause: e.to_string(),
                })?;
            Ok(usize::try_from(count).unwrap_or(0))
        })();

        record_operation_metrics(BACKEND, "count", start, status_label(&result));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn new_record(text: &str, score: f64, hash: &str) -> NewRecord {
        NewRecord {
            text: text.to_string(),
            language: "en".to_string(),
            trust_score: score,
            content_hash: ContentHash::new(hash),
        }
    }

    #[test]
    fn test_append_assigns_increasing_ids() {
        let store = SqliteTrustStore::in_memory().unwrap();

        let first = store.append(&new_record("a", 0.1, "0x1")).unwrap();
        let second = store.append(&new_record("b", 0.2, "0x2")).unwrap();

        assert!(second > first);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_get_roundtrip() {
        let store = SqliteTrustStore::in_memory().unwrap();
        let id = store.append(&new_record("I love this", 0.8, "0xabc")).unwrap();

        let record = store.get(id).unwrap().unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.text, "I love this");
        assert_eq!(record.language, "en");
        assert!((record.trust_score - 0.8).abs() < f64::EPSILON);
        assert_eq!(record.content_hash.as_str(), "0xabc");
        assert!(record.created_at.timestamp() > 0);
    }

    #[test]
    fn test_find_by_hash_missing_is_none() {
        let store = SqliteTrustStore::in_memory().unwrap();
        store.append(&new_record("a", 0.1, "0x1")).unwrap();

        assert!(store.find_by_hash(&ContentHash::new("0xnope")).unwrap().is_none());
        assert!(store.get(RecordId::new(999)).unwrap().is_none());
    }

    #[test]
    fn test_find_by_hash_returns_most_recent() {
        let store = SqliteTrustStore::in_memory().unwrap();
        store.append(&new_record("first", 0.2, "0xsame")).unwrap();
        store.append(&new_record("other", 0.5, "0xother")).unwrap();
        let latest = store.append(&new_record("second", 0.9, "0xsame")).unwrap();

        for _ in 0..5 {
            let found = store.find_by_hash(&ContentHash::new("0xsame")).unwrap().unwrap();
            assert_eq!(found.id, latest);
            assert_eq!(found.text, "second");
        }
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("content.db");

        let id = {
            let store = SqliteTrustStore::new(&path).unwrap();
            store.append(&new_record("durable", 0.7, "0xdur")).unwrap()
        };

        let reopened = SqliteTrustStore::new(&path).unwrap();
        let found = reopened.find_by_hash(&ContentHash::new("0xdur")).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(reopened.db_path(), Some(&path));
    }

    #[test]
    fn test_ids_not_reused_after_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("content.db");

        let first = SqliteTrustStore::new(&path)
            .unwrap()
            .append(&new_record("a", 0.1, "0x1"))
            .unwrap();
        let second = SqliteTrustStore::new(&path)
            .unwrap()
            .append(&new_record("b", 0.1, "0x2"))
            .unwrap();

        assert!(second > first);
    }

    #[test]
    fn test_concurrent_appends() {
        let store = Arc::new(SqliteTrustStore::in_memory().unwrap());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .append(&new_record(&format!("t{i}"), 0.5, &format!("0x{i}")))
                        .unwrap()
                })
            })
            .collect();

        let mut ids: Vec<RecordId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 8);
        assert_eq!(store.count().unwrap(), 8);
    }
}
