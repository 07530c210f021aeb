//! Child process helpers for the ffmpeg tools.

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Output};

use tracing::trace;

use crate::error::{Error, Result};

/// Owns a running child process; kills and reaps it if dropped unfinished.
pub(crate) struct ChildGuard {
    program: String,
    child: Option<Child>,
}

impl ChildGuard {
    /// Spawn `command`, mapping a missing executable to [`Error::ToolNotFound`].
    pub(crate) fn spawn(program: &Path, command: &mut Command) -> Result<Self> {
        trace!("Spawning {command:?}");
        let child = command.spawn().map_err(|e| spawn_error(program, e))?;
        Ok(Self {
            program: display_name(program),
            child: Some(child),
        })
    }

    /// Take the child's piped stdin.
    pub(crate) fn take_stdin(&mut self) -> Result<ChildStdin> {
        self.child
            .as_mut()
            .and_then(|c| c.stdin.take())
            .ok_or_else(|| Error::FramePipe {
                message: format!("failed to capture {} stdin", self.program),
            })
    }

    /// Take the child's piped stdout.
    pub(crate) fn take_stdout(&mut self) -> Result<ChildStdout> {
        self.child
            .as_mut()
            .and_then(|c| c.stdout.take())
            .ok_or_else(|| Error::FramePipe {
                message: format!("failed to capture {} stdout", self.program),
            })
    }

    /// Wait for the child and check its exit status.
    pub(crate) fn finish(mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::ToolFailed {
                program: self.program.clone(),
                status: status.to_string(),
                stderr: "see diagnostics above".to_string(),
            })
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Run `command` to completion, capturing its output.
///
/// Returns stdout on success; a non-zero exit becomes [`Error::ToolFailed`]
/// carrying the trimmed stderr.
pub(crate) fn run_captured(program: &Path, command: &mut Command) -> Result<Vec<u8>> {
    trace!("Running {command:?}");
    let Output {
        status,
        stdout,
        stderr,
    } = command.output().map_err(|e| spawn_error(program, e))?;

    if status.success() {
        Ok(stdout)
    } else {
        Err(Error::ToolFailed {
            program: display_name(program),
            status: status.to_string(),
            stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
        })
    }
}

fn spawn_error(program: &Path, error: std::io::Error) -> Error {
    if error.kind() == ErrorKind::NotFound {
        Error::ToolNotFound {
            program: display_name(program),
        }
    } else {
        Error::ToolSpawn {
            program: program.to_path_buf(),
            source: error,
        }
    }
}

fn display_name(program: &Path) -> String {
    program
        .file_name()
        .map_or_else(|| program.display().to_string(), |n| n.to_string_lossy().into_owned())
}
