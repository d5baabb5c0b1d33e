//! Storage layer abstraction.
//!
//! Two tiers sit behind the resolution pipeline:
//! - **Trust store**: authoritative, append-only record keeper (`SQLite`)
//! - **Score cache**: non-authoritative accelerator keyed by content hash
//!   (in-process LRU, Redis, or disabled)
//!
//! Both tiers synchronize their own internal writes; the pipeline never locks.

// Allow significant_drop_tightening - dropping database connections slightly early
// provides no meaningful benefit.
#![allow(clippy::significant_drop_tightening)]

pub mod cache;
mod lock;
mod metrics;
pub mod migrations;
pub mod persistence;
pub mod sqlite;
pub mod traits;

pub use cache::{MemoryScoreCache, NoopScoreCache, RedisScoreCache};
pub use lock::acquire_lock;
pub use metrics::record_operation_metrics;
pub use persistence::SqliteTrustStore;
pub use traits::{ScoreCache, TrustStore};
