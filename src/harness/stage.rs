//! Staged case input
//!
//! Each case gets its own uniquely named temporary file. The handle owns the
//! file: dropping it (or calling [`StagedInput::release`]) deletes it, so cleanup
//! happens on pass, mismatch, error, and unwinding alike.

use std::io::Write;
use std::path::Path;

use tempfile::{Builder, TempPath};

use super::errors::HarnessError;

const STAGE_PREFIX: &str = "goldtest-";
const STAGE_SUFFIX: &str = ".in";

/// A temporary file holding exactly one case's input text.
#[derive(Debug)]
pub struct StagedInput {
    path: TempPath,
}

impl StagedInput {
    /// Stage `input` in the system temp directory.
    pub fn create(input: &str) -> Result<Self, HarnessError> {
        Self::create_in(input, None)
    }

    /// Stage `input` in `dir`, or the system temp directory when `None`.
    ///
    /// The text is written as given; no newline is appended.
    pub fn create_in(input: &str, dir: Option<&Path>) -> Result<Self, HarnessError> {
        let mut builder = Builder::new();
        builder.prefix(STAGE_PREFIX).suffix(STAGE_SUFFIX);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(HarnessError::Stage)?;

        file.write_all(input.as_bytes()).map_err(HarnessError::Stage)?;
        file.flush().map_err(HarnessError::Stage)?;

        // Close our handle so the subject can open the file on every platform.
        let path = file.into_temp_path();
        tracing::debug!(path = %path.display(), "staged case input");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now, surfacing any I/O error.
    pub fn release(self) -> Result<(), HarnessError> {
        self.path.close().map_err(HarnessError::Stage)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_stage_writes_raw_input() {
        let staged = StagedInput::create("hello world").unwrap();
        assert_eq!(fs::read_to_string(staged.path()).unwrap(), "hello world");
    }

    #[test]
    fn test_stage_name_shape() {
        let staged = StagedInput::create("x").unwrap();
        let name = staged.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(STAGE_PREFIX));
        assert!(name.ends_with(STAGE_SUFFIX));
    }

    #[test]
    fn test_drop_deletes_file() {
        let staged = StagedInput::create("x").unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        drop(staged);
        assert!(!path.exists());
    }

    #[test]
    fn test_release_deletes_file() {
        let staged = StagedInput::create("x").unwrap();
        let path = staged.path().to_path_buf();
        staged.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_identical_inputs_get_distinct_files() {
        let a = StagedInput::create("same").unwrap();
        let b = StagedInput::create("same").unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_stage_in_custom_dir() {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedInput::create_in("x", Some(dir.path())).unwrap();
        assert_eq!(staged.path().parent().unwrap(), dir.path());
    }

    #[test]
    fn test_stage_in_missing_dir_fails() {
        let err = StagedInput::create_in("x", Some(Path::new("definitely/not/a/dir"))).unwrap_err();
        assert!(matches!(err, HarnessError::Stage(_)));
    }
}
