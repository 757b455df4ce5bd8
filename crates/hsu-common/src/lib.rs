//! # HSU Common
//!
//! Error types shared across the HSU command runner crates.
//!
//! Every fallible operation in the workspace returns [`ProcessResult`], so
//! callers can match on a single [`ProcessError`] enum regardless of which
//! layer (spawning, signalling, configuration) produced the failure.

pub mod errors;

// Re-export commonly used items
pub use errors::{ProcessError, ProcessResult};
