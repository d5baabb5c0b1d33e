//! Business logic services.
//!
//! Services orchestrate the storage backends and the classifier into the
//! submit and verify operations.

mod backend_factory;
mod hasher;
mod pipeline;

pub use backend_factory::BackendFactory;
pub use hasher::ContentHasher;
pub use pipeline::{DEFAULT_MAX_TEXT_BYTES, PipelineOptions, ResolutionPipeline};
