//! Process validation utilities.

use hsu_common::{ProcessError, ProcessResult};

/// Validate that an executable path is usable as a launch target.
///
/// Only rejects the empty path; whether the file exists is left to the OS at
/// spawn time, which reports it as a launch error.
pub fn validate_executable(path: &str) -> ProcessResult<()> {
    if path.trim().is_empty() {
        return Err(ProcessError::configuration(
            "validation",
            "Executable path cannot be empty",
        ));
    }

    Ok(())
}
