//! Text conventions: forbidden command forms, link syntax, checklist markup

use super::{CheckKind, CheckResult, Violation};
use crate::config::ForbiddenPattern;
use crate::document::Document;

/// Fail on every forbidden substring, reporting how often it occurs.
pub fn check_forbidden_commands(doc: &Document, forbidden: &[ForbiddenPattern]) -> CheckResult {
    let text = doc.text();
    let mut violations = Vec::new();

    for rule in forbidden {
        if rule.pattern.is_empty() {
            continue;
        }
        let mut occurrences = text.match_indices(rule.pattern.as_str());
        let Some((first, _)) = occurrences.next() else {
            continue;
        };
        let count = 1 + occurrences.count();
        violations.push(Violation::at_line(
            doc.path(),
            doc.line_of(first),
            format!("{}: found {} occurrences", rule.message, count),
        ));
    }

    CheckResult::from_violations(CheckKind::PackageManagerCommands, violations)
}

/// Flag HTTP(S) targets containing spaces and links with blank targets.
pub fn check_link_format(doc: &Document) -> CheckResult {
    let mut violations = Vec::new();

    for link in doc.links() {
        if link.is_http() && link.target.contains(' ') {
            violations.push(Violation::at_line(
                doc.path(),
                link.line,
                format!("URL contains spaces: {}", link.target),
            ));
        }
        if link.target.trim().is_empty() {
            violations.push(Violation::at_line(
                doc.path(),
                link.line,
                format!("Empty URL for text: {}", link.text),
            ));
        }
    }

    CheckResult::from_violations(CheckKind::LinkFormat, violations)
}

/// Flag lines that contain `[ ]` without the `- [ ]` checklist form.
///
/// This is the literal rule: `-[ ]` and `* [ ]` are flagged, while `- []`
/// contains no `[ ]` at all and passes.
pub fn check_checklist_format(doc: &Document) -> CheckResult {
    let violations = doc
        .numbered_lines()
        .filter(|(_, line)| line.contains("[ ]") && !line.contains("- [ ]"))
        .map(|(number, line)| {
            Violation::at_line(
                doc.path(),
                number,
                format!("Incorrectly formatted checklist item: {}", line.trim()),
            )
        })
        .collect();

    CheckResult::from_violations(CheckKind::ChecklistFormat, violations)
}
