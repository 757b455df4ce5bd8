//! Process termination primitives.
//!
//! Signals are addressed by PID: the `Child` handle itself lives in the
//! background task that waits on it.

use hsu_common::{ProcessError, ProcessResult};
use tracing::debug;

/// Ask a process to stop (SIGINT on Unix).
///
/// Windows has no per-process interrupt, so this always fails there.
pub fn interrupt(pid: u32) -> ProcessResult<()> {
    debug!("Sending interrupt to PID {}", pid);

    #[cfg(unix)]
    {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let nix_pid = Pid::from_raw(pid as i32);
        kill(nix_pid, Signal::SIGINT)
            .map_err(|e| ProcessError::signal_failed(pid.to_string(), "SIGINT", e.to_string()))
    }

    #[cfg(windows)]
    {
        Err(ProcessError::signal_failed(
            pid.to_string(),
            "interrupt",
            "not supported on Windows",
        ))
    }
}

/// Force kill a process (SIGKILL on Unix, TerminateProcess on Windows).
///
/// Like [`interrupt`], the process is addressed by PID. Callers holding the
/// `Child` elsewhere must stop signalling once it has been reaped; a PID
/// freed by the reap can be reused by an unrelated process.
pub fn force_kill(pid: u32) -> ProcessResult<()> {
    debug!("Sending kill to PID {}", pid);

    #[cfg(unix)]
    {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let nix_pid = Pid::from_raw(pid as i32);
        kill(nix_pid, Signal::SIGKILL)
            .map_err(|e| ProcessError::signal_failed(pid.to_string(), "SIGKILL", e.to_string()))
    }

    #[cfg(windows)]
    {
        use windows::Win32::Foundation::CloseHandle;
        use windows::Win32::System::Threading::{OpenProcess, TerminateProcess, PROCESS_TERMINATE};

        unsafe {
            let handle = match OpenProcess(PROCESS_TERMINATE, false, pid) {
                Ok(h) if !h.is_invalid() => h,
                _ => {
                    return Err(ProcessError::signal_failed(
                        pid.to_string(),
                        "TerminateProcess",
                        "Failed to open process for termination",
                    ));
                }
            };

            // Exit code 1, same as a failed run
            let result = TerminateProcess(handle, 1);

            let _ = CloseHandle(handle);

            result.map_err(|e| {
                ProcessError::signal_failed(pid.to_string(), "TerminateProcess", e.to_string())
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    // Far above the default pid_max, so nothing can be running there.
    const UNUSED_PID: u32 = 99_999_999;

    #[test]
    fn test_interrupt_missing_process() {
        let err = interrupt(UNUSED_PID).unwrap_err();
        assert!(matches!(err, ProcessError::SignalFailed { ref signal, .. } if signal == "SIGINT"));
    }

    #[test]
    fn test_force_kill_missing_process() {
        let err = force_kill(UNUSED_PID).unwrap_err();
        assert!(matches!(err, ProcessError::SignalFailed { ref signal, .. } if signal == "SIGKILL"));
    }

    #[tokio::test]
    async fn test_force_kill_live_process() {
        let mut child = crate::spawn_piped("sleep", &["30".to_string()]).unwrap();
        let pid = child.id().unwrap();

        force_kill(pid).unwrap();

        let status = child.wait().await.unwrap();
        assert_eq!(crate::Termination::from_exit_status(status), crate::Termination::Signaled(9));
    }
}
