//! Lifecycle state of a command handle.

use std::fmt;

/// `Created → Running → Terminated`. A failed start stays in `Created`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdState {
    /// Not started, or the start failed
    Created,
    /// Started and termination not yet observed
    Running,
    /// Termination observed; exit status is final
    Terminated,
}

impl fmt::Display for CmdState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmdState::Created => write!(f, "created"),
            CmdState::Running => write!(f, "running"),
            CmdState::Terminated => write!(f, "terminated"),
        }
    }
}
