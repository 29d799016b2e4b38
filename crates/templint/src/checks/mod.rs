//! Documentation contract checks
//!
//! Every check is an independent function from a [`Document`](crate::document::Document)
//! (plus whatever configuration it needs) to a [`CheckResult`]. Checks never
//! stop at the first problem: each one collects every violation it finds, and
//! the validator runs all of them regardless of earlier failures.

mod branches;
mod consistency;
mod conventions;
mod references;
mod sections;
mod shell;
mod yaml;

pub use branches::check_branch_references;
pub use consistency::check_cross_document;
pub use conventions::{check_checklist_format, check_forbidden_commands, check_link_format};
pub use references::check_file_references;
pub use sections::{check_completeness, check_required_sections};
pub use shell::{
    check_shell_best_practices, check_shell_syntax, check_shellcheck_examples,
    is_placeholder_block,
};
pub use yaml::{check_yaml_syntax, yaml_parser_available};

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::document::Flavor;

/// Identifies one check in the battery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    DocumentExists,
    FileReferences,
    BranchReferences,
    ShellSyntax,
    YamlSyntax,
    PackageManagerCommands,
    RequiredSections,
    LinkFormat,
    ChecklistFormat,
    ShellBestPractices,
    ShellcheckExamples,
    Completeness,
    CrossDocumentConsistency,
}

impl CheckKind {
    pub fn id(self) -> &'static str {
        match self {
            CheckKind::DocumentExists => "document-exists",
            CheckKind::FileReferences => "file-references",
            CheckKind::BranchReferences => "branch-references",
            CheckKind::ShellSyntax => "shell-syntax",
            CheckKind::YamlSyntax => "yaml-syntax",
            CheckKind::PackageManagerCommands => "package-manager-commands",
            CheckKind::RequiredSections => "required-sections",
            CheckKind::LinkFormat => "link-format",
            CheckKind::ChecklistFormat => "checklist-format",
            CheckKind::ShellBestPractices => "shell-best-practices",
            CheckKind::ShellcheckExamples => "shellcheck-examples",
            CheckKind::Completeness => "completeness",
            CheckKind::CrossDocumentConsistency => "cross-document-consistency",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A check run against a single document.
///
/// [`CheckKind::DocumentExists`] and [`CheckKind::CrossDocumentConsistency`]
/// are produced by the validator itself and have no counterpart here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentCheck {
    FileReferences,
    BranchReferences,
    ShellSyntax,
    YamlSyntax,
    PackageManagerCommands,
    RequiredSections,
    LinkFormat,
    ChecklistFormat,
    ShellBestPractices,
    ShellcheckExamples,
    Completeness,
}

impl DocumentCheck {
    /// Checks run against every document, in report order
    pub const COMMON: [DocumentCheck; 9] = [
        DocumentCheck::FileReferences,
        DocumentCheck::BranchReferences,
        DocumentCheck::ShellSyntax,
        DocumentCheck::YamlSyntax,
        DocumentCheck::PackageManagerCommands,
        DocumentCheck::RequiredSections,
        DocumentCheck::LinkFormat,
        DocumentCheck::ChecklistFormat,
        DocumentCheck::Completeness,
    ];

    /// Additional checks for shell-flavored documents
    pub const SHELL_ONLY: [DocumentCheck; 2] = [
        DocumentCheck::ShellBestPractices,
        DocumentCheck::ShellcheckExamples,
    ];

    /// The per-document battery for a flavor
    pub fn battery(flavor: Flavor) -> Vec<DocumentCheck> {
        let mut checks = Self::COMMON.to_vec();
        if flavor == Flavor::Shell {
            checks.extend(Self::SHELL_ONLY);
        }
        checks
    }

    pub fn kind(self) -> CheckKind {
        match self {
            DocumentCheck::FileReferences => CheckKind::FileReferences,
            DocumentCheck::BranchReferences => CheckKind::BranchReferences,
            DocumentCheck::ShellSyntax => CheckKind::ShellSyntax,
            DocumentCheck::YamlSyntax => CheckKind::YamlSyntax,
            DocumentCheck::PackageManagerCommands => CheckKind::PackageManagerCommands,
            DocumentCheck::RequiredSections => CheckKind::RequiredSections,
            DocumentCheck::LinkFormat => CheckKind::LinkFormat,
            DocumentCheck::ChecklistFormat => CheckKind::ChecklistFormat,
            DocumentCheck::ShellBestPractices => CheckKind::ShellBestPractices,
            DocumentCheck::ShellcheckExamples => CheckKind::ShellcheckExamples,
            DocumentCheck::Completeness => CheckKind::Completeness,
        }
    }
}

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Failed,
    /// Optional tooling was unavailable; not a failure
    Skipped,
}

/// One discrepancy between what a document claims and what holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub reason: String,
}

impl Violation {
    pub fn new(file: &Path, line: Option<usize>, reason: impl Into<String>) -> Self {
        Self {
            file: file.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    pub fn at_line(file: &Path, line: usize, reason: impl Into<String>) -> Self {
        Self::new(file, Some(line), reason)
    }

    pub fn whole_file(file: &Path, reason: impl Into<String>) -> Self {
        Self::new(file, None, reason)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.file.display(), line, self.reason),
            None => write!(f, "{}: {}", self.file.display(), self.reason),
        }
    }
}

/// Result of running one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub check: CheckKind,
    pub status: CheckStatus,
    pub violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
}

impl CheckResult {
    /// Passed when `violations` is empty, failed otherwise
    pub fn from_violations(check: CheckKind, violations: Vec<Violation>) -> Self {
        let status = if violations.is_empty() {
            CheckStatus::Passed
        } else {
            CheckStatus::Failed
        };
        Self {
            check,
            status,
            violations,
            skip_reason: None,
        }
    }

    pub fn skipped(check: CheckKind, reason: impl Into<String>) -> Self {
        Self {
            check,
            status: CheckStatus::Skipped,
            violations: Vec::new(),
            skip_reason: Some(reason.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == CheckStatus::Failed
    }
}
