//! # Command Execution Module / 命令执行模块
//!
//! Spawns a shell command as a child process and captures its exit status,
//! stdout and stderr in full, optionally bounded by a timeout.
//!
//! 以子进程方式启动 shell 命令，完整捕获其退出状态、stdout 和 stderr，
//! 并可选地设置超时。

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

/// Everything a finished child process left behind.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Why a child process produced no exit status of its own.
/// 子进程未产生自身退出状态的原因。
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to launch command: {0}")]
    Launch(#[source] io::Error),
    #[error("timed out after {:.1}s", .0.as_secs_f64())]
    TimedOut(Duration),
    #[error("failed to wait for command: {0}")]
    Wait(#[source] io::Error),
}

/// Builds a command that runs `script` through the platform shell, so that
/// quoting, pipes and `||` fallbacks behave as they do in a terminal.
pub fn shell_command(script: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", script]);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", script]);
        cmd
    }
}

/// Maps an exit status to an integer. A process killed by a signal reports
/// `128 + signal`, as shells do.
pub fn exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Spawns a command and captures its stdout and stderr separately.
/// Both streams are drained concurrently so a chatty child cannot block on a
/// full pipe while we wait for it.
///
/// When `timeout` elapses the child is killed and its output readers are
/// abandoned; whatever it printed so far is discarded.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
/// * `timeout` - Optional upper bound on the run time.
///
/// 派生一个命令，分别捕获其 stdout 和 stderr。
/// 两个输出流被并发读取，避免子进程因管道写满而阻塞。
pub async fn spawn_and_capture(
    mut cmd: Command,
    timeout: Option<Duration>,
) -> Result<CapturedOutput, CaptureError> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(CaptureError::Launch)?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| CaptureError::Wait(io::Error::other("failed to capture stdout")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| CaptureError::Wait(io::Error::other("failed to capture stderr")))?;

    let stdout_handle = tokio::spawn(read_all(stdout));
    let stderr_handle = tokio::spawn(read_all(stderr));
    let stdout_abort = stdout_handle.abort_handle();
    let stderr_abort = stderr_handle.abort_handle();

    // Output is only complete once both pipes hit EOF, so the readers run
    // under the same deadline as the process itself.
    let finished = async {
        let status = child.wait().await;
        let stdout = stdout_handle.await.unwrap_or_default();
        let stderr = stderr_handle.await.unwrap_or_default();
        (status, stdout, stderr)
    };

    let completed = match timeout {
        Some(limit) => tokio::time::timeout(limit, finished)
            .await
            .map_err(|_| limit),
        None => Ok(finished.await),
    };

    let (status, stdout, stderr) = match completed {
        Ok(done) => done,
        Err(limit) => {
            stdout_abort.abort();
            stderr_abort.abort();
            if let Err(e) = child.kill().await {
                tracing::debug!(error = %e, "failed to kill timed-out child");
            }
            return Err(CaptureError::TimedOut(limit));
        }
    };

    Ok(CapturedOutput {
        status: status.map_err(CaptureError::Wait)?,
        stdout,
        stderr,
    })
}

async fn read_all<R: AsyncRead + Unpin>(mut reader: R) -> String {
    let mut buf = Vec::new();
    if let Err(e) = reader.read_to_end(&mut buf).await {
        tracing::debug!(error = %e, "output stream closed with an error");
    }
    String::from_utf8_lossy(&buf).into_owned()
}
