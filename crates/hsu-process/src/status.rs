//! Exit status decoding.
//!
//! Maps the result of waiting on a child into a [`Termination`] and from
//! there into the single integer status reported to callers.

use std::fmt;
use std::process::ExitStatus;

/// Status reported when the wait result cannot be decoded.
///
/// Shares its value with a plain `exit 1`; use [`Termination::Unknown`] to
/// tell the two apart.
pub const UNKNOWN_EXIT_STATUS: i32 = 1;

/// Status reported for a process that did not exit on its own (killed by a
/// signal).
pub const SIGNALED_EXIT_STATUS: i32 = -1;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Exited with the given platform exit code
    Exited(i32),
    /// Terminated by the given signal number (Unix only)
    Signaled(i32),
    /// The wait result carried neither an exit code nor a signal
    Unknown,
}

impl Termination {
    /// Decode a completed wait.
    pub fn from_exit_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Termination::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Termination::Signaled(signal);
            }
        }

        Termination::Unknown
    }

    /// Decode the raw result of `Child::wait`. A wait error is lossy and
    /// becomes [`Termination::Unknown`].
    pub fn from_wait_result(result: &std::io::Result<ExitStatus>) -> Self {
        match result {
            Ok(status) => Self::from_exit_status(*status),
            Err(_) => Termination::Unknown,
        }
    }

    /// The integer exit status for this termination.
    pub fn exit_status(&self) -> i32 {
        match self {
            Termination::Exited(code) => *code,
            Termination::Signaled(_) => SIGNALED_EXIT_STATUS,
            Termination::Unknown => UNKNOWN_EXIT_STATUS,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, Termination::Exited(0))
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exited(code) => write!(f, "exited with code {}", code),
            Termination::Signaled(signal) => write!(f, "terminated by signal {}", signal),
            Termination::Unknown => write!(f, "terminated for an unknown reason"),
        }
    }
}
