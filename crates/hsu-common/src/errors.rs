//! Error types for process execution.
//!
//! # Rust Learning Note
//!
//! Rust doesn't have exceptions - it uses `Result<T, E>` for error handling.
//! Launch and signal failures are returned synchronously as a
//! [`ProcessError`]. The asynchronous termination path never produces an
//! error: it only updates the exit status of the handle.
//!
//! ```rust
//! use hsu_common::{ProcessError, ProcessResult};
//!
//! fn launch() -> ProcessResult<()> {
//!     Err(ProcessError::spawn_failed("/no/such/binary", "No such file or directory"))
//! }
//!
//! fn caller() -> ProcessResult<()> {
//!     // Caller uses ? operator (automatic propagation)
//!     launch()?;
//!     Ok(())
//! }
//!
//! assert!(caller().is_err());
//! ```

use thiserror::Error;

/// Process-specific error types.
///
/// The `id` field carries whatever identifies the process in the failing
/// operation: the binary path for launch errors, the PID for signal errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// The OS could not create the child process.
    #[error("Process spawn failed: {id} - {reason}")]
    SpawnFailed { id: String, reason: String },

    /// A termination signal could not be delivered.
    #[error("Process signal failed: {id} - {signal}: {reason}")]
    SignalFailed {
        id: String,
        signal: String,
        reason: String,
    },

    /// The process already terminated and was reaped.
    #[error("Process already finished: {id}")]
    AlreadyFinished { id: String },

    #[error("Process operation not allowed: {id} - {operation} (state: {state})")]
    OperationNotAllowed {
        id: String,
        operation: String,
        state: String,
    },

    #[error("Process configuration error: {id} - {reason}")]
    Configuration { id: String, reason: String },

    /// The background wait task went away without reporting termination.
    #[error("Completion channel closed unexpectedly for process '{id}'")]
    CompletionChannelClosed { id: String },
}

impl ProcessError {
    pub fn spawn_failed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SpawnFailed {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn signal_failed(
        id: impl Into<String>,
        signal: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::SignalFailed {
            id: id.into(),
            signal: signal.into(),
            reason: reason.into(),
        }
    }

    pub fn already_finished(id: impl Into<String>) -> Self {
        Self::AlreadyFinished { id: id.into() }
    }

    pub fn operation_not_allowed(
        id: impl Into<String>,
        operation: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self::OperationNotAllowed {
            id: id.into(),
            operation: operation.into(),
            state: state.into(),
        }
    }

    pub fn configuration(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn completion_channel_closed(id: impl Into<String>) -> Self {
        Self::CompletionChannelClosed { id: id.into() }
    }
}

/// Result type for process operations.
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_construction() {
        let error = ProcessError::spawn_failed("/usr/bin/missing", "executable not found");
        assert!(matches!(error, ProcessError::SpawnFailed { .. }));
        assert_eq!(
            format!("{}", error),
            "Process spawn failed: /usr/bin/missing - executable not found"
        );

        let error = ProcessError::already_finished("4242");
        assert_eq!(format!("{}", error), "Process already finished: 4242");
    }

    #[test]
    fn test_signal_error_message() {
        let error = ProcessError::signal_failed("17", "SIGINT", "ESRCH: No such process");
        let message = error.to_string();
        assert!(message.contains("17"));
        assert!(message.contains("SIGINT"));
        assert!(message.contains("No such process"));
    }

    #[test]
    fn test_error_pattern_matching() {
        let err = ProcessError::operation_not_allowed("echo", "start", "running");

        match err {
            ProcessError::OperationNotAllowed { id, operation, state } => {
                assert_eq!(id, "echo");
                assert_eq!(operation, "start");
                assert_eq!(state, "running");
            }
            _ => panic!("Wrong error type"),
        }
    }
}
