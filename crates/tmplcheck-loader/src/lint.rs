//! # Format Linting
//!
//! Optional format-correctness check run on the raw configuration file
//! before it is parsed. A lint failure aborts the run; it is never
//! downgraded to a warning.

use std::io;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

use crate::load::FileType;

/// Error from a lint run.
#[derive(Error, Debug)]
pub enum LintError {
    /// The linter executable could not be found.
    #[error("linter '{tool}' not found; install it or run without --lint")]
    ToolMissing {
        /// Program name that was looked up.
        tool: String,
    },

    /// The linter ran and reported problems.
    #[error("{tool} failed for {path} ({status}):\n{output}")]
    Rejected {
        /// Program that rejected the file.
        tool: String,
        /// File that was linted.
        path: String,
        /// Exit status description.
        status: String,
        /// Diagnostics printed by the linter: stderr, or stdout when stderr
        /// is empty.
        output: String,
    },

    /// The linter could not be started for another reason.
    #[error("failed to run linter '{tool}': {source}")]
    Spawn {
        /// Program that failed to start.
        tool: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// A format check over a document file.
pub trait Linter {
    /// Lint the file at `path` as `file_type`.
    ///
    /// # Errors
    ///
    /// Returns a [`LintError`] if the file fails the check or the check
    /// could not be run.
    fn lint(&self, path: &Path, file_type: FileType) -> Result<(), LintError>;
}

/// Runs `yamllint <path>` or `jsonlint -q <path>` as a child process.
#[derive(Debug, Clone)]
pub struct ExternalLinter {
    yaml_program: String,
    json_program: String,
}

impl Default for ExternalLinter {
    fn default() -> Self {
        Self {
            yaml_program: "yamllint".to_string(),
            json_program: "jsonlint".to_string(),
        }
    }
}

impl ExternalLinter {
    /// Linter using `yamllint` and `jsonlint` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Linter using the given programs instead of the defaults.
    pub fn with_programs(yaml_program: impl Into<String>, json_program: impl Into<String>) -> Self {
        Self {
            yaml_program: yaml_program.into(),
            json_program: json_program.into(),
        }
    }

    fn command(&self, path: &Path, file_type: FileType) -> (&str, Command) {
        match file_type {
            FileType::Yaml => {
                let mut command = Command::new(&self.yaml_program);
                command.arg(path);
                (self.yaml_program.as_str(), command)
            }
            FileType::Json => {
                let mut command = Command::new(&self.json_program);
                command.arg("-q").arg(path);
                (self.json_program.as_str(), command)
            }
        }
    }
}

impl Linter for ExternalLinter {
    fn lint(&self, path: &Path, file_type: FileType) -> Result<(), LintError> {
        let (tool, mut command) = self.command(path, file_type);

        let output = command.output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                LintError::ToolMissing {
                    tool: tool.to_string(),
                }
            } else {
                LintError::Spawn {
                    tool: tool.to_string(),
                    source: e,
                }
            }
        })?;

        if output.status.success() {
            tracing::info!(tool, path = %path.display(), "lint passed");
            return Ok(());
        }

        // yamllint reports on stdout, jsonlint on stderr.
        let stderr = String::from_utf8_lossy(&output.stderr);
        let diagnostics = if stderr.trim().is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr.trim().to_string()
        };

        Err(LintError::Rejected {
            tool: tool.to_string(),
            path: path.display().to_string(),
            status: output.status.to_string(),
            output: diagnostics,
        })
    }
}
