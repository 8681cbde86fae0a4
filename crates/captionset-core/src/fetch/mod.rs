//! Caption fetching from the file server.
//!
//! Provides a source abstraction over where caption text comes from and a
//! loader that fetches captions for a whole batch of records concurrently.

pub(crate) mod loader;
pub(crate) mod source;

pub use loader::CaptionLoader;
pub use source::{CaptionSource, HttpCaptionSource};
