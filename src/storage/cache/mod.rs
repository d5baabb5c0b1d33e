//! Score cache implementations.
//!
//! | Backend | Retention | Shared across processes |
//! |---------|-----------|-------------------------|
//! | [`MemoryScoreCache`] | LRU capacity + optional TTL | No |
//! | [`RedisScoreCache`] | Optional `EX` TTL | Yes (feature `redis`) |
//! | [`NoopScoreCache`] | None, every lookup misses | n/a |

mod memory;
mod noop;
mod redis;

pub use memory::MemoryScoreCache;
pub use noop::NoopScoreCache;
pub use redis::RedisScoreCache;
