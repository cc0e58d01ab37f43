//! Harness configuration
//!
//! Defaults match the layout the harness was written for: cases in `./tests`,
//! named `*.test`, run against `./vyq` after a `zig build`.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that turns the build step off.
pub const SKIP_BUILD_ENV: &str = "GOLDTEST_SKIP_BUILD";

/// How the driver reacts to a non-passing case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Run every case, fail at the end if any case failed.
    #[default]
    CollectAll,
    /// Stop at the first failing or erroring case.
    FailFast,
}

/// Harness configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory holding the case files
    pub cases_dir: PathBuf,
    /// File name suffix selecting case files
    pub suffix: String,
    /// Subject executable, invoked as `<executable> <staged-input>`
    pub executable: PathBuf,
    /// Build command, split on whitespace into program and arguments
    pub build_command: String,
    /// Whether the build step runs before testing
    pub run_build: bool,
    pub mode: RunMode,
    /// Number of cases executed concurrently
    pub jobs: usize,
    /// Per-case limit; `None` waits forever
    pub timeout: Option<Duration>,
    /// Only run cases whose path contains this keyword
    pub filter: Option<String>,
    /// Directory for staged inputs; `None` uses the system temp dir
    pub stage_dir: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            cases_dir: PathBuf::from("./tests"),
            suffix: ".test".to_string(),
            executable: PathBuf::from("./vyq"),
            build_command: "zig build".to_string(),
            run_build: true,
            mode: RunMode::CollectAll,
            jobs: 1,
            timeout: None,
            filter: None,
            stage_dir: None,
        }
    }
}

impl HarnessConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings with the build switch read from the environment
    pub fn from_env() -> Self {
        let skip = env::var(SKIP_BUILD_ENV).ok();
        Self::default().with_build(!parse_switch(skip.as_deref()))
    }

    pub fn with_cases_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cases_dir = dir.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_build_command(mut self, command: impl Into<String>) -> Self {
        self.build_command = command.into();
        self
    }

    /// Enable or disable the build step
    pub fn with_build(mut self, run_build: bool) -> Self {
        self.run_build = run_build;
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the worker count (clamped to at least one)
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_stage_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.stage_dir = dir;
        self
    }
}

/// Interpret an on/off environment value. Unset or unrecognized means off.
pub fn parse_switch(value: Option<&str>) -> bool {
    match value {
        Some(raw) => matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => false,
    }
}
