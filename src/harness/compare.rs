//! Output comparison
//!
//! The only normalization is trimming leading and trailing whitespace. Interior
//! whitespace, case, and numeric formatting must match exactly.

use super::errors::ExitCode;

/// Per-case outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    /// Normalized expected and actual texts
    Failed { expected: String, actual: String },
    /// The subject could not be run, or the case could not be loaded or staged
    ExecutionError { message: String },
}

impl Verdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    /// Exit code a fail-fast run terminates with for this verdict.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Verdict::Passed => ExitCode::SUCCESS,
            Verdict::Failed { .. } => ExitCode::FAILURE,
            Verdict::ExecutionError { .. } => ExitCode::ERROR,
        }
    }
}

pub fn normalize(text: &str) -> &str {
    text.trim()
}

/// Compare captured stdout against the expected transcript.
pub fn compare(expected: &str, actual: &str) -> Verdict {
    let expected = normalize(expected);
    let actual = normalize(actual);
    if expected == actual {
        Verdict::Passed
    } else {
        Verdict::Failed {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
