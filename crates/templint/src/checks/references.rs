//! Referenced template files must exist

use tracing::debug;

use super::{CheckKind, CheckResult, Violation};
use crate::document::Document;

/// Verify every `File: `path`` reference exists under the template root.
///
/// Paths listed in `optional_files` are documented as user-created and are
/// exempt.
pub fn check_file_references(doc: &Document, optional_files: &[String]) -> CheckResult {
    let mut violations = Vec::new();

    for reference in doc.file_references() {
        if optional_files.iter().any(|f| f == &reference.path) {
            debug!(path = %reference.path, "skipping optional file reference");
            continue;
        }

        let full_path = doc.template_root().join(&reference.path);
        if !full_path.exists() {
            violations.push(Violation::at_line(
                doc.path(),
                reference.line,
                format!(
                    "Referenced file not found: {} (resolved to {})",
                    reference.path,
                    full_path.display()
                ),
            ));
        }
    }

    CheckResult::from_violations(CheckKind::FileReferences, violations)
}
