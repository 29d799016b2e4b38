//! Required sections and completeness heuristics

use super::{CheckKind, CheckResult, Violation};
use crate::config::CompletenessConfig;
use crate::document::{count_fence_markers, Document};

/// Each required section name must appear verbatim somewhere in the text.
pub fn check_required_sections(doc: &Document, required: &[String]) -> CheckResult {
    let missing: Vec<&str> = required
        .iter()
        .map(String::as_str)
        .filter(|section| !doc.text().contains(section))
        .collect();

    let violations = missing
        .iter()
        .map(|section| {
            Violation::whole_file(doc.path(), format!("Missing required section: {}", section))
        })
        .collect();

    CheckResult::from_violations(CheckKind::RequiredSections, violations)
}

/// Footer, help section, enough checklist items, enough code examples, and a
/// pointer to the workflow documentation.
pub fn check_completeness(doc: &Document, config: &CompletenessConfig) -> CheckResult {
    let text = doc.text();
    let mut violations = Vec::new();

    for marker in &config.footer_markers {
        if !text.contains(marker.as_str()) {
            violations.push(Violation::whole_file(
                doc.path(),
                format!("Missing version footer marker: {}", marker),
            ));
        }
    }

    if !config.help_markers.is_empty()
        && !config.help_markers.iter().any(|m| text.contains(m.as_str()))
    {
        violations.push(Violation::whole_file(
            doc.path(),
            format!(
                "Missing help section (expected one of: {})",
                config.help_markers.join(", ")
            ),
        ));
    }

    let checklist_items = text.matches("- [ ]").count();
    if checklist_items <= config.min_checklist_items {
        violations.push(Violation::whole_file(
            doc.path(),
            format!(
                "Not enough checklist items for actionable guide: found {}, need more than {}",
                checklist_items, config.min_checklist_items
            ),
        ));
    }

    let code_blocks = count_fence_markers(text) / 2;
    if code_blocks <= config.min_code_blocks {
        violations.push(Violation::whole_file(
            doc.path(),
            format!(
                "Not enough code examples: found {}, need more than {}",
                code_blocks, config.min_code_blocks
            ),
        ));
    }

    if let Some(host) = &config.workflow_docs_host {
        if !(text.to_lowercase().contains("workflow") && text.contains(host.as_str())) {
            violations.push(Violation::whole_file(
                doc.path(),
                format!("Missing link to workflow documentation ({})", host),
            ));
        }
    }

    CheckResult::from_violations(CheckKind::Completeness, violations)
}
