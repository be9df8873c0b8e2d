// src/services/command.rs

//! External command execution.
//!
//! The [`CommandRunner`] trait is the seam between the dispatch pipeline and
//! the operating system; tests substitute a recording implementation.

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{AppError, Result};

/// Captured result of one command invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Whether the process exited with status zero
    pub success: bool,

    /// Exit code, when the process exited normally
    pub exit_code: Option<i32>,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

/// Runs an executable with an argument list, capturing output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion. `Err` means the process could not be
    /// started at all; a nonzero exit is an `Ok` output with
    /// `success == false`.
    async fn run(&self, executable: &str, args: &[String]) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by real OS processes.
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, executable: &str, args: &[String]) -> Result<CommandOutput> {
        let output = Command::new(executable)
            .args(args)
            .output()
            .await
            .map_err(|e| AppError::command(executable, e))?;

        Ok(CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
