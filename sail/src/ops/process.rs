//! Cancellable subprocess execution.

use std::{
    io,
    path::Path,
    process::{ExitStatus, Stdio},
};

use thiserror::Error;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("operation cancelled")]
    Cancelled,

    #[error("failed to run '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' exited with {status}{}", stderr_suffix(.stderr))]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl ProcessError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ProcessError::Cancelled)
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Run `program` in `dir` and wait for it to exit successfully.
///
/// The child is killed if `token` fires first. Output is captured; stderr is
/// attached to the error when the command fails.
pub async fn run(
    token: &CancellationToken,
    dir: &Path,
    program: &str,
    args: &[&str],
) -> Result<(), ProcessError> {
    if token.is_cancelled() {
        return Err(ProcessError::Cancelled);
    }

    let command = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    debug!(%command, dir = %dir.display(), "running");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let output = tokio::select! {
        _ = token.cancelled() => {
            debug!(%command, "cancelled, killing child");
            return Err(ProcessError::Cancelled);
        }
        output = cmd.output() => output.map_err(|source| ProcessError::Spawn {
            program: program.to_string(),
            source,
        })?,
    };

    if !output.status.success() {
        return Err(ProcessError::Failed {
            command,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}
