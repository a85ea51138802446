// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process lifecycle controller.
//!
//! One invocation moves through `spawned -> running -> closed -> finalizing
//! -> resolved | rejected`: spawn the child with the built command, drain
//! stdout/stderr while events chain through the serialization queue,
//! observe the exit code, drain the queue, then produce the result.

use crate::ack::AckChannel;
use crate::command::{build_command, Invocation, InvokeOptions};
use crate::queue::EventQueue;
use relay_adapters::TaskAdapter;
use relay_core::{decode_event_line, RuntimeConfig};
use std::path::PathBuf;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::Instrument;

/// Internal sentinel exit code for signal-terminated children. Distinct
/// from any valid process exit code.
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// Captured result of a resolved invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Plain-output lines joined by newline. Event lines never appear here.
    pub stdout: String,
    /// Raw stderr, concatenated.
    pub stderr: String,
    /// Always 0 for a resolved invocation.
    pub exit_code: i32,
}

/// Errors from one invocation.
///
/// Only spawn failures and non-zero/signal exits escape the invocation
/// boundary; malformed event lines and handler failures are absorbed
/// upstream so a single flaky event never aborts a long-running script.
#[derive(Debug, Error)]
pub enum RunError {
    /// Precondition: the script path must name an existing file.
    #[error("script not found: {}", .path.display())]
    ScriptNotFound { path: PathBuf },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The error is self-contained: it embeds the captured streams so the
    /// caller can diagnose the failure without separate log correlation.
    #[error(
        "script {} exited with a non-zero code {code}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}",
        .path.display()
    )]
    NonZeroExit {
        path: PathBuf,
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error(
        "script {} terminated by a signal\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}",
        .path.display()
    )]
    Signaled {
        path: PathBuf,
        stdout: String,
        stderr: String,
    },
}

impl RunError {
    /// Exit code carried by a terminal error, if it has one. Signal
    /// termination reports [`SIGNAL_EXIT_CODE`].
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunError::NonZeroExit { code, .. } => Some(*code),
            RunError::Signaled { .. } => Some(SIGNAL_EXIT_CODE),
            _ => None,
        }
    }
}

/// Runs scripts and coordinates the event protocol for each invocation.
///
/// Each call to [`ScriptRunner::run`] owns exactly one child process and
/// its three standard streams; nothing is shared across concurrent
/// invocations.
pub struct ScriptRunner<A> {
    adapter: A,
    runtime: RuntimeConfig,
}

impl<A: TaskAdapter> ScriptRunner<A> {
    pub fn new(adapter: A, runtime: RuntimeConfig) -> Self {
        Self { adapter, runtime }
    }

    /// Run one script to completion.
    ///
    /// Resolves with the captured output on exit code 0; rejects with a
    /// descriptive [`RunError`] otherwise. Every event detected before the
    /// child exited has finished handling (including pending
    /// acknowledgment writes) by the time this returns.
    pub async fn run(
        &self,
        invocation: Invocation,
        options: InvokeOptions,
    ) -> Result<ScriptOutput, RunError> {
        let script = invocation.script().to_path_buf();
        if !script.is_file() {
            return Err(RunError::ScriptNotFound { path: script });
        }

        let run_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("script_run", %run_id, script = %script.display());
        self.run_inner(script, &invocation, &options)
            .instrument(span)
            .await
    }

    async fn run_inner(
        &self,
        script: PathBuf,
        invocation: &Invocation,
        options: &InvokeOptions,
    ) -> Result<ScriptOutput, RunError> {
        let mut command = build_command(invocation, options, &self.runtime);
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let program = command.as_std().get_program().to_string_lossy().into_owned();
        let mut child = command
            .spawn()
            .map_err(|source| RunError::Spawn { program, source })?;
        tracing::debug!("child spawned");

        let stdin = child.stdin.take().ok_or_else(|| pipe_error("stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| pipe_error("stdout"))?;
        let stderr = child.stderr.take().ok_or_else(|| pipe_error("stderr"))?;

        let queue = EventQueue::spawn(self.adapter.clone(), AckChannel::new(stdin));

        let echo = options.echo;
        let stderr_task = tokio::spawn(capture_stderr(stderr, echo));

        // Demultiplex stdout line by line as it streams. Event lines go to
        // the queue; everything else is program output.
        let mut lines = BufReader::new(stdout).lines();
        let mut output_lines = Vec::new();
        while let Some(line) = lines.next_line().await? {
            match decode_event_line(&line) {
                Some(event) => {
                    tracing::debug!(kind = event.kind(), "event line");
                    queue.push(event);
                }
                None => {
                    if echo {
                        println!("{line}");
                    }
                    output_lines.push(line);
                }
            }
        }

        // closed: exit observed.
        let status = child.wait().await?;
        let stderr_output = stderr_task
            .await
            .map_err(|e| RunError::Io(std::io::Error::other(e)))?;

        // finalizing: every already-detected event must finish handling,
        // including any still-pending acknowledgment writes.
        queue.drain().await;

        let stdout_output = output_lines.join("\n");
        match status.code() {
            Some(0) => {
                tracing::info!(exit_code = 0, "script completed");
                Ok(ScriptOutput {
                    stdout: stdout_output,
                    stderr: stderr_output,
                    exit_code: 0,
                })
            }
            Some(code) => {
                tracing::warn!(exit_code = code, "script failed");
                Err(RunError::NonZeroExit {
                    path: script,
                    code,
                    stdout: stdout_output,
                    stderr: stderr_output,
                })
            }
            None => {
                tracing::warn!(exit_code = SIGNAL_EXIT_CODE, "script terminated by signal");
                Err(RunError::Signaled {
                    path: script,
                    stdout: stdout_output,
                    stderr: stderr_output,
                })
            }
        }
    }
}

/// Capture stderr verbatim, optionally mirroring it live.
async fn capture_stderr(mut stderr: tokio::process::ChildStderr, echo: bool) -> String {
    let mut captured = Vec::new();
    if echo {
        let mut chunk = [0u8; 4096];
        loop {
            match stderr.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => {
                    captured.extend_from_slice(&chunk[..n]);
                    eprint!("{}", String::from_utf8_lossy(&chunk[..n]));
                }
                Err(e) => {
                    tracing::debug!(error = %e, "stderr read failed");
                    break;
                }
            }
        }
    } else if let Err(e) = stderr.read_to_end(&mut captured).await {
        tracing::debug!(error = %e, "stderr read failed");
    }
    String::from_utf8_lossy(&captured).into_owned()
}

fn pipe_error(stream: &str) -> RunError {
    RunError::Io(std::io::Error::other(format!(
        "child {stream} pipe unavailable"
    )))
}
