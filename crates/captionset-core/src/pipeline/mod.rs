//! The caption loading pipeline.
//!
//! - **pass**: one pairing + caption fetch run over a listing
//! - **snapshot**: immutable state handed to consumers
//! - **actor**: owns the record set, runs passes, publishes snapshots

pub mod actor;
pub mod pass;
pub mod snapshot;

pub use actor::CaptionPipeline;
pub use pass::{run_pass, PassOutput};
pub use snapshot::PipelineSnapshot;
