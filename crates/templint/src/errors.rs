//! Actionable error formatting for improved user experience.
//!
//! Operational failures (a config that does not parse, a shell that is not
//! installed, a hook target outside any git repository) are reported with:
//! - Clear error description
//! - Possible causes (diagnostics)
//! - Remediation steps (actionable fixes)
//!
//! Documentation violations are *not* errors; they are data in a
//! [`ValidationReport`](crate::validator::ValidationReport).

use std::fmt;
use std::path::Path;

/// An error with diagnostic context and remediation steps.
///
/// # Example
///
/// ```
/// use templint::errors::ActionableError;
///
/// let error = ActionableError::new("Document docs/GUIDE.md is not configured")
///     .with_cause("The path is not listed under [[documents]] in templint.toml")
///     .with_remedy("Pass --flavor to validate an unconfigured document");
///
/// eprintln!("{}", error);
/// ```
#[derive(Debug, Clone)]
pub struct ActionableError {
    /// The main error message
    error: String,
    /// Possible causes (diagnostic hints)
    causes: Vec<String>,
    /// Remediation steps (how to fix)
    remediation: Vec<String>,
}

impl ActionableError {
    /// Create a new actionable error with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            causes: Vec::new(),
            remediation: Vec::new(),
        }
    }

    /// Add a possible cause (diagnostic hint).
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Add a remediation step (actionable fix).
    pub fn with_remedy(mut self, remedy: impl Into<String>) -> Self {
        self.remediation.push(remedy.into());
        self
    }

    /// The main message without causes or remedies
    pub fn message(&self) -> &str {
        &self.error
    }

    pub fn remedies(&self) -> &[String] {
        &self.remediation
    }

    /// Convert to a formatted error message suitable for display.
    pub fn to_error_message(&self) -> String {
        let mut msg = format!("{}\n", self.error);

        if !self.causes.is_empty() {
            msg.push_str("\nPossible causes:\n");
            for cause in &self.causes {
                msg.push_str(&format!("  • {}\n", cause));
            }
        }

        if !self.remediation.is_empty() {
            msg.push_str("\nTo fix:\n");
            for remedy in &self.remediation {
                msg.push_str(&format!("  • {}\n", remedy));
            }
        }

        msg
    }
}

impl fmt::Display for ActionableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_error_message())
    }
}

impl std::error::Error for ActionableError {}

/// The shell used for `-n` syntax checks is not on `PATH`.
pub fn shell_checker_not_found(program: &str) -> ActionableError {
    ActionableError::new(format!(
        "Shell syntax checker '{}' not found on PATH",
        program
    ))
    .with_cause(format!("{} is not installed", program))
    .with_cause("PATH does not include the directory containing it")
    .with_remedy(format!("Verify the shell is installed: {} --version", program))
    .with_remedy("Point templint at another shell: set [shell] program in templint.toml")
}

/// A document given on the command line has no entry in the config.
pub fn document_not_configured(path: &Path) -> ActionableError {
    ActionableError::new(format!(
        "Document {} is not configured",
        path.display()
    ))
    .with_cause("The path is not listed under [[documents]] in templint.toml")
    .with_cause("The path is spelled differently from the configured entry")
    .with_remedy("List configured documents: templint config show")
    .with_remedy(format!(
        "Validate it ad hoc: templint validate {} --flavor <python|shell>",
        path.display()
    ))
}

/// Not inside a git repository when installing hooks.
pub fn not_in_git_repo() -> ActionableError {
    ActionableError::new("Not in a git repository (no .git directory found)")
        .with_cause("Current directory is not part of a git repository")
        .with_remedy("Initialize a git repository: git init")
        .with_remedy("Pass the git directory explicitly: templint hooks install --git-dir <path>")
}
