//! Conventional-commit message check
//!
//! Accepts headers of the form `<type>[(scope)][!]: <description>` where the
//! type is one of [`COMMIT_TYPES`]. Surrounding whitespace is ignored.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Accepted commit types
pub const COMMIT_TYPES: [&str; 11] = [
    "feat", "fix", "docs", "style", "refactor", "test", "chore", "perf", "ci", "build", "revert",
];

static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();

fn header_regex() -> &'static Regex {
    HEADER_REGEX.get_or_init(|| {
        let pattern = format!(r"^({})(\((.+)\))?(!)?: (.+)", COMMIT_TYPES.join("|"));
        Regex::new(&pattern).expect("Invalid commit header regex")
    })
}

/// Parsed conventional-commit header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConventionalCommit {
    #[serde(rename = "type")]
    pub kind: String,
    pub scope: Option<String>,
    pub breaking: bool,
    pub description: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommitFormatError {
    #[error("commit message does not use conventional commit format: {0:?}")]
    InvalidFormat(String),
}

/// Parse a commit message, ignoring leading and trailing whitespace.
///
/// Only the start of the trimmed message is matched; anything after the
/// header (further lines, a body) is accepted as-is.
pub fn parse_commit_message(raw: &str) -> Result<ConventionalCommit, CommitFormatError> {
    let message = raw.trim();
    let first_line = message.lines().next().unwrap_or_default();

    let caps = header_regex()
        .captures(message)
        .ok_or_else(|| CommitFormatError::InvalidFormat(first_line.to_string()))?;

    Ok(ConventionalCommit {
        kind: caps[1].to_string(),
        scope: caps.get(3).map(|m| m.as_str().to_string()),
        breaking: caps.get(4).is_some(),
        description: caps[5].to_string(),
    })
}

pub fn read_commit_message(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read commit message file {}", path.display()))
}

/// Usage guide printed when a message is rejected
pub fn usage_guide() -> String {
    format!(
        "❌ ERROR: Commit message must use conventional commit format\n\
         \n\
         Format: <type>[optional scope]: <description>\n\
         \n\
         Examples:\n  \
         feat(template): add new project type\n  \
         fix(workflow): resolve validation issue\n  \
         docs: update template usage guide\n\
         \n\
         Types: {}\n",
        COMMIT_TYPES.join(", ")
    )
}


// Include property-based tests
#[cfg(test)]
#[path = "commit_proptests.rs"]
mod proptests;
