//! Score cache trait.

use crate::Result;
use crate::models::ContentHash;

/// Trait for score cache backends.
///
/// A score cache is a passive accelerator in front of the trust store. It
/// performs no validation and never reads the store itself. An absent entry
/// may mean "never written" or "evicted"; callers treat both the same way.
pub trait ScoreCache: Send + Sync {
    /// Backend name, used for logging and metric labels.
    fn name(&self) -> &'static str;

    /// Returns the cached score for `hash`, if present and not expired.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Cache`] if the backend is unreachable.
    fn get(&self, hash: &ContentHash) -> Result<Option<f64>>;

    /// Stores `score` under `hash`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Cache`] if the backend is unreachable.
    fn set(&self, hash: &ContentHash, score: f64) -> Result<()>;

    /// Removes the entry for `hash`. Returns whether an entry was removed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Cache`] if the backend is unreachable.
    fn invalidate(&self, hash: &ContentHash) -> Result<bool>;
}
