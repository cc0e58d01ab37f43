//! Build step
//!
//! Runs the subject's build command once before any case. The command string is
//! split on whitespace into a program and its arguments and executed without a
//! shell.

use std::process::Command;

use super::errors::HarnessError;

/// Produces the subject executable.
pub trait Builder {
    /// Human-readable command, used in reports.
    fn describe(&self) -> String;

    /// Run the build, returning whatever it printed.
    fn build(&self) -> Result<String, HarnessError>;
}

/// Runs an external build command.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    argv: Vec<String>,
}

impl CommandBuilder {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    /// Split a command line such as `zig build`.
    pub fn parse(command: &str) -> Self {
        Self::new(command.split_whitespace().map(str::to_string).collect())
    }
}

impl Builder for CommandBuilder {
    fn describe(&self) -> String {
        self.argv.join(" ")
    }

    fn build(&self) -> Result<String, HarnessError> {
        let Some((program, args)) = self.argv.split_first() else {
            return Err(HarnessError::Config("build command is empty".to_string()));
        };
        let command = self.describe();
        tracing::info!(%command, "building subject");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| HarnessError::Build {
                command: command.clone(),
                diagnostics: e.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);

        if output.status.success() {
            let log = [stdout.trim_end(), stderr.trim_end()]
                .into_iter()
                .filter(|text| !text.trim().is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            return Ok(log);
        }

        let diagnostics = if !stderr.trim().is_empty() {
            stderr.trim_end().to_string()
        } else if !stdout.trim().is_empty() {
            stdout.trim_end().to_string()
        } else {
            format!("exited with {}", output.status)
        };

        Err(HarnessError::Build { command, diagnostics })
    }
}
