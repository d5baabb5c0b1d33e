//! Storage backend traits.

mod cache;
mod store;

pub use cache::ScoreCache;
pub use store::TrustStore;
