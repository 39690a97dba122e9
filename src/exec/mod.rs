//! Process output capture.
//!
//! Runs a command to completion and returns its standard output. Non-zero
//! exits carry the captured standard error in the returned error.

use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ExecError {
    /// The process could not be started.
    #[error("failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully.
    #[error("{program} failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Run `program` with `args` and return its stdout.
///
/// An empty program name is a no-op returning empty output.
pub async fn capture_output<I, S>(program: &str, args: I) -> Result<Vec<u8>, ExecError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    if program.is_empty() {
        return Ok(Vec::new());
    }

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| ExecError::Launch {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::debug!(program, status = %output.status, stderr = %stderr, "Command failed");
        return Err(ExecError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr,
        });
    }

    Ok(output.stdout)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_stdout_on_success() {
        let out = capture_output("echo", ["hello"]).await.unwrap();
        assert_eq!(out, b"hello\n");
    }

    #[tokio::test]
    async fn empty_output_is_not_an_error() {
        let out = capture_output("true", std::iter::empty::<&str>()).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn empty_program_is_a_no_op() {
        let out = capture_output("", ["ignored"]).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn non_zero_exit_carries_stderr() {
        let err = capture_output("sh", ["-c", "echo disk full >&2; exit 3"])
            .await
            .unwrap_err();
        match &err {
            ExecError::Failed { stderr, status, .. } => {
                assert_eq!(stderr, "disk full");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("disk full"));
    }

    #[tokio::test]
    async fn missing_binary_is_launch_error() {
        let err = capture_output("definitely-not-a-real-binary-7f3a", ["x"])
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Launch { .. }));
    }
}
