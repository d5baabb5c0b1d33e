//! `SQLite` migration system for the trust store schema.
//!
//! Migrations are embedded at compile time and tracked through
//! `PRAGMA user_version`, so opening a database always upgrades it to the
//! latest schema before any record is read or written.
//!
//! # Usage
//!
//! ```rust,ignore
//! use trustscore::storage::migrations::{MigrationRunner, TRUST_STORE_MIGRATIONS};
//!
//! MigrationRunner::new(TRUST_STORE_MIGRATIONS).run(&mut conn)?;
//! ```

use crate::{Error, Result};
use rusqlite::Connection;

/// A single migration with version and SQL.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    /// Migration version (sequential, starting at 1).
    pub version: i64,
    /// Human-readable description.
    pub description: &'static str,
    /// SQL to apply (may contain multiple statements separated by semicolons).
    pub sql: &'static str,
}

/// Trust store schema history.
///
/// Version 1 is the legacy layout, where the digest column was named
/// `blockchain_hash` and no creation time was kept. Databases created by that
/// layout are picked up unchanged and upgraded in place.
pub const TRUST_STORE_MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create contents table",
        sql: "CREATE TABLE IF NOT EXISTS contents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                language TEXT NOT NULL,
                trust_score REAL NOT NULL,
                blockchain_hash TEXT NOT NULL
            );",
    },
    Migration {
        version: 2,
        description: "rename digest column and record creation time",
        sql: "ALTER TABLE contents RENAME COLUMN blockchain_hash TO content_hash;
              ALTER TABLE contents ADD COLUMN created_at INTEGER NOT NULL DEFAULT 0;",
    },
    Migration {
        version: 3,
        description: "index hash lookups newest-first",
        sql: "CREATE INDEX IF NOT EXISTS idx_contents_hash_id ON contents(content_hash, id DESC);",
    },
];

/// Applies pending migrations to a connection.
pub struct MigrationRunner {
    migrations: &'static [Migration],
}

impl MigrationRunner {
    /// Creates a runner over an ordered migration list.
    #[must_use]
    pub const fn new(migrations: &'static [Migration]) -> Self {
        Self { migrations }
    }

    /// Returns the version the schema reaches once all migrations are applied.
    #[must_use]
    pub fn latest_version(&self) -> i64 {
        self.migrations.iter().map(|m| m.version).max().unwrap_or(0)
    }

    /// Returns the schema version recorded in the database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the pragma cannot be read.
    pub fn current_version(conn: &Connection) -> Result<i64> {
        conn.pragma_query_value(None, "user_version", |row| row.get(0))
            .map_err(|e| Error::Storage {
                operation: "read_schema_version".to_string(),
                cause: e.to_string(),
            })
    }

    /// Runs all pending migrations, each in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if a migration fails; the failing migration
    /// is rolled back and later ones are not attempted.
    pub fn run(&self, conn: &mut Connection) -> Result<()> {
        let current = Self::current_version(conn)?;

        for migration in self.migrations.iter().filter(|m| m.version > current) {
            Self::apply(conn, migration)?;
            tracing::info!(
                version = migration.version,
                description = migration.description,
                "Applied trust store migration"
            );
        }

        Ok(())
    }

    fn apply(conn: &mut Connection, migration: &Migration) -> Result<()> {
        let map_err = |e: rusqlite::Error| Error::Storage {
            operation: format!("migration_v{}", migration.version),
            cause: e.to_string(),
        };

        let tx = conn.transaction().map_err(map_err)?;
        tx.execute_batch(migration.sql).map_err(map_err)?;
        tx.pragma_update(None, "user_version", migration.version)
            .map_err(map_err)?;
        tx.commit().map_err(map_err)
    }
}
