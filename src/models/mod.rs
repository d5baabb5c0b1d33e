//! Data models for trustscore.
//!
//! This module contains the core data structures shared by the store, the
//! cache, the pipeline and the HTTP surface.

mod record;
mod resolution;

pub use record::{ContentHash, ContentRecord, NewRecord, RecordId};
pub use resolution::{ScoreSource, SubmitResult, Verification};
