//! Process execution primitives.
//!
//! This module provides low-level process spawning.

use hsu_common::{ProcessError, ProcessResult};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::debug;

/// Spawn `executable` with `args`, piping stdout and stderr back to the caller.
///
/// Stdin is connected to the null device. The arguments are passed verbatim;
/// no shell is involved and nothing is quoted or escaped.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_piped(executable: &str, args: &[String]) -> ProcessResult<Child> {
    debug!("Spawning {} with {} argument(s)", executable, args.len());

    Command::new(executable)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ProcessError::spawn_failed(executable, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_missing_executable() {
        let result = spawn_piped("/definitely/not/a/real/binary", &[]);
        match result {
            Err(ProcessError::SpawnFailed { id, .. }) => {
                assert_eq!(id, "/definitely/not/a/real/binary");
            }
            other => panic!("expected SpawnFailed, got {:?}", other.map(|c| c.id())),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_pipes_output() {
        let mut child = spawn_piped("echo", &["hello".to_string()]).unwrap();
        assert!(child.stdout.is_some());
        assert!(child.stderr.is_some());
        assert!(child.stdin.is_none());

        let status = child.wait().await.unwrap();
        assert!(status.success());
    }
}
