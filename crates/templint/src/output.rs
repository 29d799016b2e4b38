//! Structured output formatting for CLI commands.
//!
//! Human output goes through [`OutputContext`], which honours `--quiet` and
//! `--json`. Machine output wraps command data in [`JsonOutput`] (or
//! [`JsonError`] on failure) with a metadata block.

use chrono::Utc;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Write as _};
use std::io::{self, Write};

use crate::checks::{CheckResult, CheckStatus};
use crate::errors::ActionableError;
use crate::validator::{Summary, ValidationReport};

/// Version of the JSON output format
const OUTPUT_VERSION: &str = "0.1.0";

// ============================================================================
// Output Context for Quiet Mode
// ============================================================================

/// Context for controlling output verbosity
pub struct OutputContext {
    quiet: bool,
    json: bool,
}

impl OutputContext {
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Print essential output (always shown unless --json)
    pub fn print_data(&self, msg: impl Display) -> io::Result<()> {
        if !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Print informational message (suppressed by --quiet or --json)
    pub fn print_info(&self, msg: impl Display) -> io::Result<()> {
        if !self.quiet && !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Print warning (suppressed by --quiet or --json)
    pub fn print_warning(&self, msg: impl Display) -> io::Result<()> {
        if !self.quiet && !self.json {
            writeln_safe_stderr(&format!("Warning: {}", msg))
        } else {
            Ok(())
        }
    }

    /// Print a JSON document (only in --json mode)
    pub fn print_json<T: Serialize>(&self, output: &JsonOutput<T>) -> anyhow::Result<()> {
        if self.json {
            writeln_safe(&output.to_json_string()?)?;
        }
        Ok(())
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

/// Safe println that handles broken pipes gracefully
fn writeln_safe(msg: &str) -> io::Result<()> {
    match writeln!(io::stdout(), "{}", msg) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            // Expected when piping to head, etc.
            std::process::exit(0);
        }
        Err(e) => Err(e),
    }
}

/// Safe eprintln that handles broken pipes gracefully
fn writeln_safe_stderr(msg: &str) -> io::Result<()> {
    match writeln!(io::stderr(), "{}", msg) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            std::process::exit(0);
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// JSON Output Types
// ============================================================================

/// Wrapper for command output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub metadata: Metadata,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T, command: impl Into<String>) -> Self {
        Self::new(true, data, command)
    }

    /// Output for a command that ran to completion but found problems
    pub fn new(success: bool, data: T, command: impl Into<String>) -> Self {
        Self {
            success,
            data,
            metadata: Metadata::new(command),
        }
    }

    /// Serialize to JSON string with pretty formatting
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Wrapper for error output with suggestions
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub success: bool,
    pub error: ErrorDetail,
    pub metadata: Metadata,
}

/// Error details including code, message, and suggestions
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code (e.g., "NOT_FOUND", "EXTERNAL_ERROR")
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl JsonError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                suggestions: Vec::new(),
            },
            metadata: Metadata::new(command),
        }
    }

    /// Build an error response from an operational error.
    ///
    /// The message joins the error chain like `{:#}`. An [`ActionableError`]
    /// in the chain contributes its short message, and its remedies become
    /// suggestions.
    pub fn from_error(
        code: impl Into<String>,
        error: &anyhow::Error,
        command: impl Into<String>,
    ) -> Self {
        let mut parts = Vec::new();
        let mut suggestions = Vec::new();
        for cause in error.chain() {
            match cause.downcast_ref::<ActionableError>() {
                Some(actionable) => {
                    parts.push(actionable.message().to_string());
                    suggestions.extend_from_slice(actionable.remedies());
                }
                None => parts.push(cause.to_string()),
            }
        }
        Self::new(code, parts.join(": "), command).with_suggestions(suggestions)
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.error.suggestions.extend(suggestions);
        self
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Metadata included in all responses
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Timestamp when the response was generated
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: chrono::DateTime<Utc>,
    /// Version of the output format
    pub version: String,
    /// Command that generated this response
    pub command: String,
}

impl Metadata {
    fn new(command: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            version: OUTPUT_VERSION.to_string(),
            command: command.into(),
        }
    }
}

/// Serialize timestamp in ISO 8601 format
fn serialize_timestamp<S>(dt: &chrono::DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// Command Response Types
// ============================================================================

/// Response for `validate`
#[derive(Debug, Serialize)]
pub struct ValidateResponse<'a> {
    pub passed: bool,
    pub summary: Summary,
    #[serde(flatten)]
    pub report: &'a ValidationReport,
}

impl<'a> ValidateResponse<'a> {
    pub fn new(report: &'a ValidationReport) -> Self {
        Self {
            passed: report.passed(),
            summary: report.summary(),
            report,
        }
    }
}

// ============================================================================
// Exit Codes
// ============================================================================

/// Standardized exit codes for the templint CLI
///
/// ```rust
/// use templint::ExitCode;
///
/// assert_eq!(ExitCode::Failure.code(), 1);
/// assert_eq!(ExitCode::ExternalError.code(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command succeeded (0)
    Success = 0,

    /// Validation failed, commit message rejected, or generic error (1)
    Failure = 1,

    /// Invalid arguments or configuration (2)
    InvalidArgument = 2,

    /// Document, config, or repository not found (3)
    NotFound = 3,

    /// External dependency failed - shell, file system, etc. (10)
    ExternalError = 10,
}

impl ExitCode {
    /// Convert exit code to i32 for `std::process::exit`
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Command succeeded",
            ExitCode::Failure => "Validation failed or commit message rejected",
            ExitCode::InvalidArgument => "Invalid arguments or configuration",
            ExitCode::NotFound => "Resource not found (document, config, git directory)",
            ExitCode::ExternalError => "External dependency failed (shell, file system, etc.)",
        }
    }

    /// String code used in [`JsonError`] responses
    pub fn error_code(self) -> &'static str {
        match self {
            ExitCode::Success => "OK",
            ExitCode::Failure => "FAILED",
            ExitCode::InvalidArgument => "INVALID_ARGUMENT",
            ExitCode::NotFound => "NOT_FOUND",
            ExitCode::ExternalError => "EXTERNAL_ERROR",
        }
    }

    /// All exit codes as a formatted string for `--help`.
    ///
    /// Used as the CLI's `after_help` text.
    pub fn all_codes_documentation() -> String {
        let codes = [
            ExitCode::Success,
            ExitCode::Failure,
            ExitCode::InvalidArgument,
            ExitCode::NotFound,
            ExitCode::ExternalError,
        ];
        let mut doc = String::from("Exit Codes:");
        for code in codes {
            let _ = write!(doc, "\n{:<3}- {}", code.code(), code.description());
        }
        doc
    }
}

// ============================================================================
// Validation Report Rendering
// ============================================================================

fn status_marker(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Passed => "✓",
        CheckStatus::Failed => "✗",
        CheckStatus::Skipped => "-",
    }
}

fn render_result(out: &mut String, result: &CheckResult, show_passed: bool) {
    match result.status {
        CheckStatus::Passed if !show_passed => {}
        CheckStatus::Passed => {
            let _ = writeln!(out, "  {} {}", status_marker(result.status), result.check);
        }
        CheckStatus::Skipped => {
            let _ = writeln!(
                out,
                "  {} {} skipped: {}",
                status_marker(result.status),
                result.check,
                result.skip_reason.as_deref().unwrap_or("no reason given")
            );
        }
        CheckStatus::Failed => {
            let _ = writeln!(out, "  {} {}", status_marker(result.status), result.check);
            for violation in &result.violations {
                let _ = writeln!(out, "      {}", violation);
            }
        }
    }
}

/// Render a report for terminal output.
///
/// With `show_passed == false` (quiet mode) only failures, skips and the
/// summary line are included.
pub fn render_report(report: &ValidationReport, show_passed: bool) -> String {
    let mut out = String::new();

    for doc in &report.documents {
        let _ = writeln!(out, "{} ({})", doc.path.display(), doc.flavor);
        for result in &doc.results {
            render_result(&mut out, result, show_passed);
        }
    }

    for pair in &report.cross_document {
        let _ = writeln!(
            out,
            "{} <-> {}",
            pair.left.display(),
            pair.right.display()
        );
        render_result(&mut out, &pair.result, show_passed);
    }

    let summary = report.summary();
    let verdict = if report.passed() { "PASSED" } else { "FAILED" };
    let _ = write!(
        out,
        "{}: {} document(s), {} check(s), {} passed, {} failed, {} skipped, {} violation(s)",
        verdict,
        summary.documents,
        summary.checks,
        summary.passed,
        summary.failed,
        summary.skipped,
        summary.violations
    );
    out
}
