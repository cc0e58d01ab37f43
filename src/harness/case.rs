//! Case discovery and parsing
//!
//! A case file is plain text: the first line is the input handed to the subject,
//! everything after the first line terminator is the expected output.
//!
//! ```text
//! 5
//! 25
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::HarnessError;

/// One (input, expected-output) pair, identified by its source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub path: PathBuf,
    pub input: String,
    pub expected: String,
}

impl TestCase {
    /// Read and parse a case file.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let text = fs::read_to_string(path).map_err(|source| HarnessError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    /// Parse case text. An empty file has no input line and is rejected.
    pub fn parse(path: &Path, text: &str) -> Result<Self, HarnessError> {
        if text.is_empty() {
            return Err(HarnessError::MalformedCase {
                path: path.to_path_buf(),
                reason: "file is empty, expected an input line".to_string(),
            });
        }

        let (first, rest) = match text.find('\n') {
            Some(idx) => (&text[..idx], &text[idx + 1..]),
            None => (text, ""),
        };

        Ok(Self {
            path: path.to_path_buf(),
            input: first.trim().to_string(),
            expected: rest.to_string(),
        })
    }
}

/// Enumerates case files in a single directory.
#[derive(Debug, Clone)]
pub struct CaseLoader {
    dir: PathBuf,
    suffix: String,
    filter: Option<String>,
}

impl CaseLoader {
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            suffix: suffix.into(),
            filter: None,
        }
    }

    /// Keep only cases whose file name contains `keyword`.
    pub fn with_filter(mut self, keyword: Option<String>) -> Self {
        self.filter = keyword;
        self
    }

    /// List case paths, sorted lexicographically.
    ///
    /// Entries that do not end with the suffix, directories, and names not
    /// matching the keyword filter are skipped. Failing to list the directory is fatal since nothing can be discovered.
    pub fn discover(&self) -> Result<Vec<PathBuf>, HarnessError> {
        let list_err = |source| HarnessError::DirectoryList {
            path: self.dir.clone(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(list_err)? {
            let path = entry.map_err(list_err)?.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| self.selects(name));
            if matches && !path.is_dir() {
                paths.push(path);
            }
        }

        paths.sort();
        Ok(paths)
    }

    fn selects(&self, name: &str) -> bool {
        name.ends_with(&self.suffix) && self.filter.as_deref().is_none_or(|k| name.contains(k))
    }

    /// Lazily load every discovered case. Calling again restarts from a fresh listing.
    ///
    /// Library convenience for callers that want parsed cases directly. The
    /// driver works from [`CaseLoader::discover`] and loads each path inside
    /// [`run_case`](super::driver::run_case) so a load failure becomes that case's verdict.
    pub fn cases(&self) -> Result<impl Iterator<Item = Result<TestCase, HarnessError>> + use<>, HarnessError> {
        let paths = self.discover()?;
        Ok(paths.into_iter().map(|path| TestCase::load(&path)))
    }
}
