//! Trust store implementations.

mod sqlite;

pub use sqlite::SqliteTrustStore;
