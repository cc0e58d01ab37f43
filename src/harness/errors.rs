//! Harness error taxonomy
//!
//! Errors fall in two groups:
//! - **Fatal** (`DirectoryList`, `Build`, `Config`): abort the run before any case executes.
//! - **Per-case** (`Load`, `MalformedCase`, `Spawn`, `Timeout`, `Stage`): converted into a
//!   [`Verdict::ExecutionError`](super::compare::Verdict) by the driver and reported for that case only.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Process exit code of a harness run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// Output mismatch, or any failure in collect-all mode
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Case could not be loaded, staged, or executed; cases could not be listed
    pub const ERROR: ExitCode = ExitCode(2);
    pub const BUILD_FAILURE: ExitCode = ExitCode(3);
}

/// Errors raised while building, discovering, staging, or executing cases.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("cannot list case directory '{}': {source}", path.display())]
    DirectoryList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read case file '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed case file '{}': {reason}", path.display())]
    MalformedCase { path: PathBuf, reason: String },

    #[error("build command `{command}` failed:\n{diagnostics}")]
    Build { command: String, diagnostics: String },

    #[error("cannot execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` timed out after {:.1}s", timeout.as_secs_f64())]
    Timeout { command: String, timeout: Duration },

    #[error("cannot stage case input: {0}")]
    Stage(#[source] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl HarnessError {
    /// Process exit code associated with this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            HarnessError::Build { .. } => ExitCode::BUILD_FAILURE,
            _ => ExitCode::ERROR,
        }
    }
}
