//! Command implementations.

pub mod config;
pub mod input;
pub mod pair;
pub mod tags;
pub mod types;
