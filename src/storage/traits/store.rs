//! Trust store trait.

use crate::Result;
use crate::models::{ContentHash, ContentRecord, NewRecord, RecordId};

/// Trait for durable trust store backends.
///
/// The trust store is the authoritative record of every submission. Records
/// are appended once and never updated or deleted through this trait.
pub trait TrustStore: Send + Sync {
    /// Backend name, used for logging and metric labels.
    fn name(&self) -> &'static str;

    /// Appends a record and returns its identity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] if the backend is unavailable.
    fn append(&self, record: &NewRecord) -> Result<RecordId>;

    /// Returns the most recently appended record with the given hash.
    ///
    /// Several records may share a hash (repeat submissions or a digest
    /// collision); the newest one wins so that the result agrees with what
    /// the write-through cache reflects after the latest submission.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] if the backend is unavailable.
    fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<ContentRecord>>;

    /// Retrieves a record by identity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] if the backend is unavailable.
    fn get(&self, id: RecordId) -> Result<Option<ContentRecord>>;

    /// Returns the total number of records.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] if the backend is unavailable.
    fn count(&self) -> Result<usize>;
}
