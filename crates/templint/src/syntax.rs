//! External shell syntax checking
//!
//! Snippets are handed to `bash -n` on stdin: bash parses the input without
//! executing any of it. A non-zero exit is a syntax error and stderr carries
//! the diagnostic.
//!
//! There is no timeout. `bash -n` never runs the snippet, so the only way to
//! hang is a hung shell, and then the validation run hangs with it.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use crate::errors;

/// Outcome of checking one snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxVerdict {
    Valid,
    Invalid {
        exit_code: Option<i32>,
        diagnostic: String,
    },
}

/// Checks shell snippets for syntax errors without executing them
pub trait SyntaxChecker {
    /// Name shown in reports (e.g. `bash -n`)
    fn describe(&self) -> String;

    /// Check `snippet`.
    ///
    /// `Err` means the checker itself could not run, not that the snippet
    /// is invalid.
    fn check(&self, snippet: &str) -> Result<SyntaxVerdict>;
}

/// `bash -n` as a subprocess
#[derive(Debug, Clone)]
pub struct BashSyntaxChecker {
    program: String,
    resolved: Option<PathBuf>,
}

impl BashSyntaxChecker {
    /// Locate `program` on `PATH` (or use it directly if it is a path).
    ///
    /// A missing program is not an error here; [`check`](SyntaxChecker::check)
    /// reports it for each snippet that needed it.
    pub fn locate(program: &str) -> Self {
        let resolved = which::which(program).ok();
        match &resolved {
            Some(path) => debug!(program, path = %path.display(), "resolved shell syntax checker"),
            None => debug!(program, "shell syntax checker not found"),
        }
        Self {
            program: program.to_string(),
            resolved,
        }
    }

    pub fn resolved_path(&self) -> Option<&Path> {
        self.resolved.as_deref()
    }
}

impl SyntaxChecker for BashSyntaxChecker {
    fn describe(&self) -> String {
        format!("{} -n", self.program)
    }

    fn check(&self, snippet: &str) -> Result<SyntaxVerdict> {
        let program = self
            .resolved
            .as_ref()
            .ok_or_else(|| errors::shell_checker_not_found(&self.program))?;

        let mut child = Command::new(program)
            .arg("-n")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn {}", self.describe()))?;

        // bash stops reading at the first syntax error; its exit status
        // and stderr still carry the verdict.
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(snippet.as_bytes()) {
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("shell syntax checker closed stdin early");
                }
                result => result.context("Failed to write snippet to shell syntax checker")?,
            }
        }

        let output = child
            .wait_with_output()
            .context("Failed to wait for shell syntax checker")?;

        if output.status.success() {
            Ok(SyntaxVerdict::Valid)
        } else {
            Ok(SyntaxVerdict::Invalid {
                exit_code: output.status.code(),
                diagnostic: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
