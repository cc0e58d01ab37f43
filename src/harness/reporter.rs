//! Run reporting
//!
//! ## Reporter Trait
//!
//! The driver never prints. Every observable event goes through [`Reporter`], so
//! output formats can be swapped and tests can record what the driver did.
//!
//! ## Run Summary
//!
//! [`RunSummary`] is the one piece of state spanning cases. The driver owns it and
//! updates it from a single thread; it is never stored globally.

use std::fmt::Display;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::time::Duration;

use super::compare::Verdict;
use super::config::RunMode;
use super::errors::{ExitCode, HarnessError};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD_GREEN: &str = "\x1b[1;32m";
const BOLD_RED: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[0m";

/// Everything the reporter learns about one finished case.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub path: PathBuf,
    pub verdict: Verdict,
    /// Subject stderr, kept only for non-passing cases that wrote any
    pub stderr: Option<String>,
    pub duration: Duration,
}

/// Accumulated outcome of the cases processed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    /// Exit code of the first non-passing verdict
    pub first_failure: Option<ExitCode>,
    pub duration: Duration,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, verdict: &Verdict) {
        self.total += 1;
        match verdict {
            Verdict::Passed => self.passed += 1,
            Verdict::Failed { .. } => self.failed += 1,
            Verdict::ExecutionError { .. } => self.errored += 1,
        }
        if !verdict.is_passed() && self.first_failure.is_none() {
            self.first_failure = Some(verdict.exit_code());
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }

    /// Final process exit code for this run.
    ///
    /// Fail-fast propagates the failing case's code; collect-all uses the
    /// generic failure code.
    pub fn exit_code(&self, mode: RunMode) -> ExitCode {
        match (self.first_failure, mode) {
            (None, _) => ExitCode::SUCCESS,
            (Some(code), RunMode::FailFast) => code,
            (Some(_), RunMode::CollectAll) => ExitCode::FAILURE,
        }
    }
}

/// Trait for reporting harness progress.
///
/// Implement this trait to customize output (JSON, TAP, etc.)
pub trait Reporter {
    /// Called before the build command runs
    fn on_build_start(&mut self, _command: &str) {}

    /// Called after the build command succeeded, with its captured output
    fn on_build_complete(&mut self, _command: &str, _output: &str) {}

    /// Called once the case list is known
    fn on_collection_complete(&mut self, case_count: usize);

    /// Called when a case has a verdict
    fn on_case_complete(&mut self, report: &CaseReport);

    /// Called when testing stops, after the last case or the first failure in fail-fast mode
    fn on_run_complete(&mut self, summary: &RunSummary);

    /// Called when a fatal error aborts the run
    fn on_fatal(&mut self, error: &HarnessError);
}

/// Line-oriented console reporter.
pub struct ConsoleReporter<W: Write> {
    out: W,
    color: bool,
    verbose: bool,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout(color: bool, verbose: bool) -> Self {
        Self::new(io::stdout(), color, verbose)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, color: bool, verbose: bool) -> Self {
        Self { out, color, verbose }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    // Console output is best effort; a closed stdout must not abort the run.
    fn line(&mut self, text: impl Display) {
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_build_start(&mut self, command: &str) {
        if self.verbose {
            self.line(format_args!("Building: {command}"));
        }
    }

    fn on_build_complete(&mut self, _command: &str, output: &str) {
        if self.verbose && !output.is_empty() {
            self.line(output);
        }
        let ok = self.paint(GREEN, "successfully.");
        self.line(format_args!("Project built {ok}\n"));
    }

    fn on_collection_complete(&mut self, case_count: usize) {
        if case_count == 0 {
            let msg = self.paint(YELLOW, "No test cases collected");
            self.line(msg);
        } else if self.verbose {
            self.line(format_args!("collected {case_count} case(s)\n"));
        }
    }

    fn on_case_complete(&mut self, report: &CaseReport) {
        let path = report.path.display();
        let timing = if self.verbose {
            format!(" ({}ms)", report.duration.as_millis())
        } else {
            String::new()
        };

        match &report.verdict {
            Verdict::Passed => {
                let label = self.paint(GREEN, "Passed:");
                self.line(format_args!("{label} {path}{timing}"));
            }
            Verdict::Failed { expected, actual } => {
                let label = self.paint(RED, "Failed:");
                self.line(format_args!("{label} {path}{timing}"));
                self.line(format_args!("Expected Output:\n{expected}"));
                self.line(format_args!("Actual Output:\n{actual}"));
            }
            Verdict::ExecutionError { message } => {
                let label = self.paint(RED, "Error:");
                self.line(format_args!("{label} {path}{timing}"));
                let label = self.paint(RED, "Error message:");
                self.line(format_args!("{label} {message}"));
            }
        }

        if let Some(stderr) = &report.stderr {
            self.line(format_args!("Stderr:\n{}", stderr.trim_end()));
        }
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        let mut parts = Vec::new();
        if summary.passed > 0 {
            parts.push(format!("{} passed", summary.passed));
        }
        if summary.failed > 0 {
            parts.push(format!("{} failed", summary.failed));
        }
        if summary.errored > 0 {
            parts.push(format!("{} errors", summary.errored));
        }
        if parts.is_empty() {
            parts.push("no cases run".to_string());
        }

        let color = if summary.all_passed() { BOLD_GREEN } else { BOLD_RED };
        let text = format!(
            "====== {} in {:.2}s ======",
            parts.join(", "),
            summary.duration.as_secs_f64()
        );
        let text = self.paint(color, &text);
        self.line(format_args!("\n{text}"));
    }

    fn on_fatal(&mut self, error: &HarnessError) {
        let label = match error {
            HarnessError::Build { .. } => "Error building project:",
            _ => "Error:",
        };
        let label = self.paint(RED, label);
        self.line(format_args!("{label} {error}"));
    }
}
