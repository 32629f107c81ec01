#![allow(async_fn_in_trait)]

use std::ffi::OsString;
use std::io::Read as _;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::process::Stdio;

#[cfg(test)]
use mockall::automock;
use tokio::process::Command;

// -----------------------------------------------------------------------------
// Types

/// A single child-process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Variables layered on top of the inherited environment.
    pub env: Vec<(String, OsString)>,
    /// Capture stderr on its own; otherwise it is merged into stdout.
    pub capture_stderr: bool,
}

/// What a finished child process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit status, or the negated signal number if the child was killed.
    pub code: i32,
    pub stdout: Vec<u8>,
    /// `None` when stderr was merged into stdout.
    pub stderr: Option<Vec<u8>>,
}

// -----------------------------------------------------------------------------
// Executor trait

/// Runs a child process to completion.
#[cfg_attr(test, automock)]
pub trait Executor {
    /// Spawn the child, close its stdin, wait for it to exit and collect its
    /// output. Spawn failures surface as the raw `io::Error`.
    async fn execute(&self, invocation: &Invocation) -> std::io::Result<ExecOutput>;
}

// -----------------------------------------------------------------------------
// RealExecutor

/// Real implementation that spawns the process with `tokio::process`
pub struct RealExecutor;

impl Executor for RealExecutor {
    async fn execute(&self, invocation: &Invocation) -> std::io::Result<ExecOutput> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .envs(invocation.env.iter().map(|(key, value)| (key, value)))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped());

        if invocation.capture_stderr {
            command.stderr(Stdio::piped());
            let output = command.spawn()?.wait_with_output().await?;
            return Ok(ExecOutput {
                code: exit_code(output.status),
                stdout: output.stdout,
                stderr: Some(output.stderr),
            });
        }

        // Both streams share one pipe so diagnostics stay interleaved with output.
        let (mut reader, writer) = std::io::pipe()?;
        command.stdout(writer.try_clone()?).stderr(writer);
        let mut child = command.spawn()?;
        // The command still owns the write ends; the reader only sees EOF once
        // they are gone.
        drop(command);
        drop(child.stdin.take());

        let collector = tokio::task::spawn_blocking(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).map(|_| buf)
        });
        let status = child.wait().await?;
        let stdout = collector.await.map_err(std::io::Error::other)??;

        Ok(ExecOutput {
            code: exit_code(status),
            stdout,
            stderr: None,
        })
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt as _;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    status.code().unwrap_or(-1)
}
