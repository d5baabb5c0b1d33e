//! Connection handling for `SQLite` backends.

use crate::{Error, Result};
use rusqlite::Connection;
use std::path::Path;

/// Busy timeout applied to every connection, in milliseconds.
pub const BUSY_TIMEOUT_MS: u32 = 5000;

/// Opens a file-backed connection, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`Error::Storage`] if the directory or database cannot be opened.
pub fn open_connection(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::Storage {
            operation: "create_data_dir".to_string(),
            cause: format!("{}: {e}", parent.display()),
        })?;
    }

    let conn = Connection::open(path).map_err(|e| Error::Storage {
        operation: "open_sqlite".to_string(),
        cause: e.to_string(),
    })?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Opens an in-memory connection (useful for tests and ephemeral runs).
///
/// # Errors
///
/// Returns [`Error::Storage`] if the connection cannot be created.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(|e| Error::Storage {
        operation: "open_sqlite_in_memory".to_string(),
        cause: e.to_string(),
    })?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Configures a connection for concurrent access.
///
/// - **WAL mode**: concurrent readers with a single writer
/// - **NORMAL synchronous**: durability/performance balance
/// - **`busy_timeout`**: wait for locks instead of failing with `SQLITE_BUSY`
///
/// # Errors
///
/// Returns [`Error::Storage`] if the busy timeout cannot be applied.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    // journal_mode returns a row ("wal", or "memory" for in-memory databases),
    // so its result is not meaningful here.
    let _ = conn.pragma_update(None, "journal_mode", "WAL");
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    conn.busy_timeout(std::time::Duration::from_millis(u64::from(BUSY_TIMEOUT_MS)))
        .map_err(|e| Error::Storage {
            operation: "configure_sqlite".to_string(),
            cause: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_in_memory() {
        let conn = open_in_memory().unwrap();
        let one: i64 = conn.query_row("SELECT 1", [], |row| row.get(0)).unwrap();
        assert_eq!(one, 1);
    }

    #[test]
    fn test_open_connection_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("content.db");

        let conn = open_connection(&path).unwrap();
        drop(conn);

        assert!(path.exists());
    }

    #[test]
    fn test_configure_connection_sets_wal() {
        let dir = TempDir::new().unwrap();
        let conn = open_connection(&dir.path().join("wal.db")).unwrap();
        let mode: String = conn
            .pragma_query_value(None, "journal_mode", |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }
}
