//! Subject execution
//!
//! The subject is invoked directly as `<executable> <staged-input>`; no shell is
//! involved, so staged paths never need quoting. The subject's own exit status is
//! recorded but never judged: only launch failures and timeouts are errors here.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::errors::HarnessError;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured output of one subject run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when terminated by a signal
    pub status: Option<i32>,
}

/// Runs the subject against a staged input file.
///
/// Implementations are shared across worker threads.
pub trait CaseExecutor: Sync {
    fn execute(&self, input: &Path) -> Result<ExecutionResult, HarnessError>;
}

/// Executes a real subprocess.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    executable: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessExecutor {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn describe(&self, input: &Path) -> String {
        format!("{} {}", self.executable.display(), input.display())
    }
}

impl CaseExecutor for ProcessExecutor {
    fn execute(&self, input: &Path) -> Result<ExecutionResult, HarnessError> {
        let command = self.describe(input);
        tracing::debug!(%command, "running subject");

        let mut cmd = Command::new(&self.executable);
        cmd.arg(input).stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());

        let Some(timeout) = self.timeout else {
            let output = cmd.output().map_err(|source| HarnessError::Spawn { command, source })?;
            return Ok(ExecutionResult {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                status: output.status.code(),
            });
        };

        let child = cmd.spawn().map_err(|source| HarnessError::Spawn {
            command: command.clone(),
            source,
        })?;
        wait_with_timeout(child, timeout, command)
    }
}

/// Wait for `child`, draining its pipes, and kill it once `timeout` elapses.
fn wait_with_timeout(mut child: Child, timeout: Duration, command: String) -> Result<ExecutionResult, HarnessError> {
    // Pipes are drained concurrently so a chatty subject cannot block on a full pipe.
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_reader = thread::spawn(move || drain(stdout));
    let stderr_reader = thread::spawn(move || drain(stderr));

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(%command, "subject timed out and was killed");
                // Readers are detached: a grandchild may still hold the pipes open.
                return Err(HarnessError::Timeout { command, timeout });
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(HarnessError::Spawn { command, source });
            }
        }
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();
    Ok(ExecutionResult {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        status: status.code(),
    })
}

fn drain<R: Read>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}
