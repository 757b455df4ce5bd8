//! # HSU Cmd
//!
//! Run a single external executable, capture its output and report how it
//! exited.
//!
//! This crate provides:
//! - [`Cmd`]: the single-use process handle (start, run, wait, stop, kill)
//! - [`Params`]: ordered `key value` launch parameters
//! - [`OutputBuffer`]: shared, append-only capture buffers
//! - [`CmdConfig`]: YAML configuration for a handle
//!
//! There is no shell: the binary is launched directly with the flattened
//! parameter list as its arguments.

pub mod capture;
pub mod cmd;
pub mod config;
pub mod params;
pub mod state;

pub use capture::{OutputBuffer, StreamType};
pub use cmd::{Cmd, CmdOutput};
pub use config::CmdConfig;
pub use params::Params;
pub use state::CmdState;

pub use hsu_process::{Termination, SIGNALED_EXIT_STATUS, UNKNOWN_EXIT_STATUS};
