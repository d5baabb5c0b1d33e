//! Disabled score cache.

use crate::Result;
use crate::models::ContentHash;
use crate::storage::traits::ScoreCache;

/// A score cache that stores nothing.
///
/// Every lookup misses, so verification always resolves through the trust
/// store. Selected with `cache.backend = "none"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScoreCache;

impl ScoreCache for NoopScoreCache {
    fn name(&self) -> &'static str {
        "none"
    }

    fn get(&self, _hash: &ContentHash) -> Result<Option<f64>> {
        Ok(None)
    }

    fn set(&self, _hash: &ContentHash, _score: f64) -> Result<()> {
        Ok(())
    }

    fn invalidate(&self, _hash: &ContentHash) -> Result<bool> {
        Ok(false)
    }
}
