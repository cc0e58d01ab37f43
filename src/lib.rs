#![forbid(unsafe_code)]
//! goldtest: golden-file test harness
//!
//! Runs a compiled executable once per case file, feeding it the case input
//! through a temporary file, and compares its stdout with the expected
//! transcript. The exit code gates CI: `0` only when the build succeeded and
//! every case passed.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `harness` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod harness;
pub mod version;

pub use harness::{
    CaseExecutor, CaseLoader, CommandBuilder, ConsoleReporter, HarnessConfig, HarnessError, ProcessExecutor,
    Reporter, RunMode, RunSummary, TestCase, Verdict, run_suite,
};
