//! Shared `SQLite` infrastructure for the trust store.
//!
//! - [`connection`]: opening and configuring connections
//! - [`record_row`]: row conversion for [`ContentRecord`](crate::models::ContentRecord)

mod connection;
mod record_row;

pub use connection::{BUSY_TIMEOUT_MS, configure_connection, open_connection, open_in_memory};
pub use record_row::{RECORD_COLUMNS, RecordRow, build_record_from_row};
