//! Run driver
//!
//! ```text
//! Init → (Building → BuildFailed | BuildOk) → Testing(case₀..caseₙ) → Done
//! ```
//!
//! Each case is loaded, staged, executed, and compared in isolation; its staged
//! input is released before the next step sees the verdict. With `jobs > 1`
//! cases run on a scoped worker pool, but the summary and the reporter are only
//! touched from the calling thread.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use super::build::Builder;
use super::case::{CaseLoader, TestCase};
use super::compare::{Verdict, compare};
use super::config::{HarnessConfig, RunMode};
use super::errors::HarnessError;
use super::executor::CaseExecutor;
use super::reporter::{CaseReport, Reporter, RunSummary};
use super::stage::StagedInput;

/// Build (when enabled), then run every selected case.
///
/// Fatal errors are reported through `reporter` and returned; per-case errors
/// become [`Verdict::ExecutionError`] and only show up in the summary.
pub fn run_suite(
    config: &HarnessConfig,
    builder: &dyn Builder,
    executor: &dyn CaseExecutor,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary, HarnessError> {
    let start = Instant::now();

    if config.run_build {
        let command = builder.describe();
        reporter.on_build_start(&command);
        match builder.build() {
            Ok(output) => reporter.on_build_complete(&command, &output),
            Err(e) => {
                reporter.on_fatal(&e);
                return Err(e);
            }
        }
    } else {
        tracing::debug!("build step skipped");
    }

    let loader = CaseLoader::new(&config.cases_dir, &config.suffix).with_filter(config.filter.clone());
    let paths = match loader.discover() {
        Ok(paths) => paths,
        Err(e) => {
            reporter.on_fatal(&e);
            return Err(e);
        }
    };
    reporter.on_collection_complete(paths.len());

    let mut summary = if config.jobs > 1 && paths.len() > 1 {
        run_parallel(&paths, config, executor, reporter)
    } else {
        run_sequential(&paths, config, executor, reporter)
    };

    summary.duration = start.elapsed();
    reporter.on_run_complete(&summary);
    Ok(summary)
}

fn run_sequential(
    paths: &[PathBuf],
    config: &HarnessConfig,
    executor: &dyn CaseExecutor,
    reporter: &mut dyn Reporter,
) -> RunSummary {
    let mut summary = RunSummary::new();

    for path in paths {
        let report = run_case(path, executor, config.stage_dir.as_deref());
        summary.record(&report.verdict);
        reporter.on_case_complete(&report);

        if config.mode == RunMode::FailFast && !report.verdict.is_passed() {
            tracing::debug!(path = %path.display(), "stopping at first failure");
            break;
        }
    }

    summary
}

fn run_parallel(
    paths: &[PathBuf],
    config: &HarnessConfig,
    executor: &dyn CaseExecutor,
    reporter: &mut dyn Reporter,
) -> RunSummary {
    let mut summary = RunSummary::new();
    let next = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let stage_dir = config.stage_dir.as_deref();
    let workers = config.jobs.min(paths.len());

    thread::scope(|scope| {
        let (tx, rx) = mpsc::channel::<CaseReport>();

        for _ in 0..workers {
            let tx = tx.clone();
            let (next, stop) = (&next, &stop);
            scope.spawn(move || {
                while !stop.load(Ordering::SeqCst) {
                    let Some(path) = paths.get(next.fetch_add(1, Ordering::SeqCst)) else {
                        break;
                    };
                    if tx.send(run_case(path, executor, stage_dir)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        for report in rx {
            // In-flight cases finish after a fail-fast stop but are not counted.
            if stop.load(Ordering::SeqCst) {
                tracing::debug!(path = %report.path.display(), "discarding case finished after stop");
                continue;
            }
            summary.record(&report.verdict);
            reporter.on_case_complete(&report);

            if config.mode == RunMode::FailFast && !report.verdict.is_passed() {
                stop.store(true, Ordering::SeqCst);
            }
        }
    });

    summary
}

/// Load, stage, execute, and compare one case. Never fails: errors become verdicts.
pub fn run_case(path: &Path, executor: &dyn CaseExecutor, stage_dir: Option<&Path>) -> CaseReport {
    let start = Instant::now();

    let (verdict, stderr) = match evaluate(path, executor, stage_dir) {
        Ok((verdict, stderr)) => (verdict, Some(stderr)),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "case errored");
            (Verdict::ExecutionError { message: e.to_string() }, None)
        }
    };

    let stderr = stderr.filter(|s| !verdict.is_passed() && !s.trim().is_empty());
    CaseReport {
        path: path.to_path_buf(),
        verdict,
        stderr,
        duration: start.elapsed(),
    }
}

fn evaluate(
    path: &Path,
    executor: &dyn CaseExecutor,
    stage_dir: Option<&Path>,
) -> Result<(Verdict, String), HarnessError> {
    let case = TestCase::load(path)?;
    let staged = StagedInput::create_in(&case.input, stage_dir)?;

    let result = executor.execute(staged.path());
    if let Err(e) = staged.release() {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove staged input");
    }
    let result = result?;

    Ok((compare(&case.expected, &result.stdout), result.stderr))
}
