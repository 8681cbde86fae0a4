//! Tag statistics over caption text.
//!
//! Captions are comma-separated tag lists by convention. The aggregator
//! splits them on a configurable delimiter and counts every trimmed tag.
//! The token counter estimates how much of a CLIP context each caption uses.

pub mod aggregate;
pub mod tokens;

pub use aggregate::{TagAggregator, TagFrequencyTable, TagStats};
pub use tokens::TokenCounter;
