//! In-process LRU score cache.

use crate::Result;
use crate::models::ContentHash;
use crate::storage::traits::ScoreCache;
use crate::storage::{acquire_lock, record_operation_metrics};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const BACKEND: &str = "memory";

/// Default number of entries kept.
pub const DEFAULT_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    score: f64,
    stored_at: Instant,
}

/// LRU score cache with optional time-to-live.
///
/// # How it works
///
/// 1. Maps content hashes to the most recently written score
/// 2. Evicts the least recently used entry once `capacity` is reached
/// 3. Treats entries older than `ttl` as absent and drops them on access
///
/// # Thread Safety
///
/// `LruCache::get` reorders entries, so reads need exclusive access; a
/// `Mutex` guards the map and recovers from poisoning.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use trustscore::models::ContentHash;
/// use trustscore::storage::{MemoryScoreCache, ScoreCache};
///
/// let cache = MemoryScoreCache::new(100, Some(Duration::from_secs(60)));
/// let hash = ContentHash::new("0xabc");
/// cache.set(&hash, 0.75)?;
/// assert_eq!(cache.get(&hash)?, Some(0.75));
/// # Ok::<(), trustscore::Error>(())
/// ```
pub struct MemoryScoreCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Option<Duration>,
}

impl MemoryScoreCache {
    /// Creates a cache holding at most `capacity` entries (minimum 1).
    ///
    /// `ttl` of `None` keeps entries until they are evicted by capacity.
    #[must_use]
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Number of entries currently held, including expired ones not yet dropped.
    #[must_use]
    pub fn len(&self) -> usize {
        acquire_lock(&self.entries).len()
    }

    /// Returns true if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    pub fn clear(&self) {
        acquire_lock(&self.entries).clear();
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        self.ttl.is_some_and(|ttl| entry.stored_at.elapsed() > ttl)
    }
}

impl Default for MemoryScoreCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, None)
    }
}

impl ScoreCache for MemoryScoreCache {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn get(&self, hash: &ContentHash) -> Result<Option<f64>> {
        let start = Instant::now();
        let mut entries = acquire_lock(&self.entries);

        let score = match entries.get(hash.as_str()).copied() {
            Some(entry) if self.is_expired(&entry) => {
                entries.pop(hash.as_str());
                None
            },
            Some(entry) => Some(entry.score),
            None => None,
        };
        drop(entries);

        record_operation_metrics(BACKEND, "get", start, "success");
        Ok(score)
    }

    fn set(&self, hash: &ContentHash, score: f64) -> Result<()> {
        let start = Instant::now();
        acquire_lock(&self.entries).put(
            hash.as_str().to_string(),
            CacheEntry {
                score,
                stored_at: Instant::now(),
            },
        );

        record_operation_metrics(BACKEND, "set", start, "success");
        Ok(())
    }

    fn invalidate(&self, hash: &ContentHash) -> Result<bool> {
        let start = Instant::now();
        let removed = acquire_lock(&self.entries).pop(hash.as_str()).is_some();

        record_operation_metrics(BACKEND, "invalidate", start, "success");
        Ok(removed)
    }
}
