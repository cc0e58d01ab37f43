//! Golden-file test harness
//!
//! Builds the subject once, then runs it against every case file in a
//! directory and compares its stdout with the expected transcript.
//!
//! ## Modules
//!
//! - `case` - Case discovery and parsing
//! - `build` - Build step
//! - `stage` - Temporary input files
//! - `executor` - Subject invocation and output capture
//! - `compare` - Whitespace-trimmed comparison and verdicts
//! - `reporter` - Console reporting and the run summary
//! - `driver` - Run orchestration (collect-all, fail-fast, worker pool)
//!
//! ## I/O Boundaries
//!
//! Building, executing, and reporting sit behind the [`Builder`], [`CaseExecutor`],
//! and [`Reporter`] traits so the driver can be exercised without real processes.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod build;
pub mod case;
pub mod compare;
pub mod config;
pub mod driver;
pub mod errors;
pub mod executor;
pub mod reporter;
pub mod stage;

pub use build::{Builder, CommandBuilder};
pub use case::{CaseLoader, TestCase};
pub use compare::{Verdict, compare, normalize};
pub use config::{HarnessConfig, RunMode};
pub use driver::{run_case, run_suite};
pub use errors::{ExitCode, HarnessError};
pub use executor::{CaseExecutor, ExecutionResult, ProcessExecutor};
pub use reporter::{CaseReport, ConsoleReporter, Reporter, RunSummary};
pub use stage::StagedInput;
