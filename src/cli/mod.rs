//! CLI module for goldtest
//!
//! This module provides the command-line interface for the harness.
//!
//! ## Usage
//!
//! - `goldtest [DIR]` - Build the subject, then run every `*.test` case in `DIR`
//! - `goldtest --no-build -x` - Skip the build and stop at the first failure
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! `execute()` returns `CliResult<ExitCode>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

pub use crate::harness::ExitCode;
use crate::harness::{CommandBuilder, ConsoleReporter, HarnessConfig, ProcessExecutor, RunMode, run_suite};
use crate::version::GOLDTEST_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Error whose message was already printed by the reporter.
    pub fn reported(exit_code: ExitCode) -> Self {
        Self::new("", exit_code)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Golden-file test harness for compiled executables
#[derive(Parser, Debug)]
#[command(name = "goldtest")]
#[command(version = GOLDTEST_VERSION)]
#[command(about = "Run an executable against golden case files", long_about = None)]
pub struct Cli {
    /// Directory containing case files (default: ./tests)
    #[arg(value_name = "DIR")]
    pub cases_dir: Option<PathBuf>,

    /// Executable under test (default: ./vyq)
    #[arg(short, long, value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// Case file suffix (default: .test)
    #[arg(long, value_name = "EXT")]
    pub suffix: Option<String>,

    /// Build command run once before testing (default: "zig build")
    #[arg(long = "build-command", value_name = "CMD")]
    pub build_command: Option<String>,

    /// Skip the build step (also: GOLDTEST_SKIP_BUILD=1)
    #[arg(long = "no-build")]
    pub no_build: bool,

    /// Stop on first failure
    #[arg(short = 'x', long = "exitfirst")]
    pub stop_on_fail: bool,

    /// Number of cases to run concurrently
    #[arg(short = 'j', long, value_name = "N", default_value_t = 1)]
    pub jobs: usize,

    /// Kill a case's subject after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Only run cases whose file name contains EXPR
    #[arg(short = 'k', value_name = "EXPR")]
    pub filter: Option<String>,

    /// Disable colored output (also: NO_COLOR)
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply the command-line overrides on top of `base`.
    pub fn to_config(&self, base: HarnessConfig) -> CliResult<HarnessConfig> {
        let mut config = base;
        if let Some(dir) = &self.cases_dir {
            config = config.with_cases_dir(dir);
        }
        if let Some(executable) = &self.executable {
            config = config.with_executable(executable);
        }
        if let Some(suffix) = &self.suffix {
            config = config.with_suffix(suffix);
        }
        if let Some(command) = &self.build_command {
            config = config.with_build_command(command);
        }
        if self.no_build {
            config = config.with_build(false);
        }
        if self.stop_on_fail {
            config = config.with_mode(RunMode::FailFast);
        }

        let timeout = match self.timeout {
            Some(secs) => match Duration::try_from_secs_f64(secs) {
                Ok(timeout) if !timeout.is_zero() => Some(timeout),
                _ => {
                    return Err(CliError::new(
                        format!("Error: --timeout must be a positive number of seconds, got {secs}"),
                        ExitCode::ERROR,
                    ));
                }
            },
            None => None,
        };

        Ok(config
            .with_jobs(self.jobs)
            .with_timeout(timeout)
            .with_filter(self.filter.clone()))
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Run the harness as configured by `cli` and the environment.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.to_config(HarnessConfig::from_env())?;
    let color = !cli.no_color && env::var_os("NO_COLOR").is_none();
    tracing::debug!(?config, "harness configuration");

    let builder = CommandBuilder::parse(&config.build_command);
    let executor = ProcessExecutor::new(&config.executable).with_timeout(config.timeout);
    let mut reporter = ConsoleReporter::stdout(color, cli.verbose);

    match run_suite(&config, &builder, &executor, &mut reporter) {
        Ok(summary) => {
            let exit_code = summary.exit_code(config.mode);
            if exit_code == ExitCode::SUCCESS {
                Ok(exit_code)
            } else {
                // Failures already printed by the reporter
                Err(CliError::reported(exit_code))
            }
        }
        Err(e) => Err(CliError::reported(e.exit_code())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::try_parse_from(["goldtest"]).unwrap();
        assert!(cli.cases_dir.is_none());
        assert!(!cli.no_build);
        assert!(!cli.stop_on_fail);
        assert_eq!(cli.jobs, 1);

        let config = cli.to_config(HarnessConfig::default()).unwrap();
        assert_eq!(config.cases_dir, PathBuf::from("./tests"));
        assert_eq!(config.executable, PathBuf::from("./vyq"));
        assert!(config.run_build);
        assert_eq!(config.mode, RunMode::CollectAll);
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::try_parse_from([
            "goldtest",
            "cases",
            "-e",
            "bin/subject",
            "--no-build",
            "-x",
            "-j",
            "4",
            "-k",
            "math",
            "--timeout",
            "2.5",
        ])
        .unwrap();

        let config = cli.to_config(HarnessConfig::default()).unwrap();
        assert_eq!(config.cases_dir, PathBuf::from("cases"));
        assert_eq!(config.executable, PathBuf::from("bin/subject"));
        assert!(!config.run_build);
        assert_eq!(config.mode, RunMode::FailFast);
        assert_eq!(config.jobs, 4);
        assert_eq!(config.filter.as_deref(), Some("math"));
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_cli_build_command_and_suffix() {
        let cli = Cli::try_parse_from(["goldtest", "--build-command", "make all", "--suffix", ".golden"]).unwrap();
        let config = cli.to_config(HarnessConfig::default()).unwrap();
        assert_eq!(config.build_command, "make all");
        assert_eq!(config.suffix, ".golden");
    }

    #[test]
    fn test_env_skip_survives_without_flag() {
        let cli = Cli::try_parse_from(["goldtest"]).unwrap();
        let config = cli.to_config(HarnessConfig::default().with_build(false)).unwrap();
        assert!(!config.run_build);
    }

    #[test]
    fn test_cli_rejects_bad_timeout() {
        for secs in ["0", "NaN", "inf", "1e30"] {
            let cli = Cli::try_parse_from(["goldtest", "--timeout", secs]).unwrap();
            let err = cli.to_config(HarnessConfig::default()).unwrap_err();
            assert_eq!(err.exit_code, ExitCode::ERROR, "--timeout {secs}");
            assert!(err.message.contains("--timeout"));
        }
    }
}
