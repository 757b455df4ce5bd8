//! # HSU Process
//!
//! Low-level process operations for the HSU command runner.
//!
//! This crate provides cross-platform primitives for:
//! - Process spawning with captured output
//! - Interrupt and force-kill signalling by PID
//! - Decoding an OS wait result into a [`Termination`]
//! - Executable path validation

pub mod execute;
pub mod status;
pub mod terminate;
pub mod validation;

// Re-export main types
pub use execute::*;
pub use status::*;
pub use terminate::*;
pub use validation::*;
