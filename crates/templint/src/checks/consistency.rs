//! Consistency between paired guides
//!
//! Both guides of a pair describe the same workflow for different templates,
//! so they share headings, point at the same reusable-workflow source and
//! present the common sections in the same relative order. Ordering is
//! checked within each document on its own.

use super::{CheckKind, CheckResult, Violation};
use crate::config::ConsistencyConfig;
use crate::document::Document;

pub fn check_cross_document(
    left: &Document,
    right: &Document,
    config: &ConsistencyConfig,
) -> CheckResult {
    let mut violations = Vec::new();

    for doc in [left, right] {
        let text = doc.text();

        for section in &config.shared_sections {
            if !text.contains(section.as_str()) {
                violations.push(Violation::whole_file(
                    doc.path(),
                    format!("Missing section shared by paired guides: {}", section),
                ));
            }
        }

        if !text.contains(config.workflow_source.as_str()) {
            violations.push(Violation::whole_file(
                doc.path(),
                format!(
                    "Does not reference reusable workflow source {}",
                    config.workflow_source
                ),
            ));
        }

        violations.extend(section_order_violations(doc, &config.ordered_sections));
    }

    CheckResult::from_violations(CheckKind::CrossDocumentConsistency, violations)
}

/// First-occurrence offsets must be positive and increase in list order.
fn section_order_violations(doc: &Document, ordered: &[String]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut previous: Option<(&str, usize)> = None;

    for section in ordered {
        match doc.text().find(section.as_str()) {
            Some(offset) if offset > 0 => {
                if let Some((prev_section, prev_offset)) = previous {
                    if offset < prev_offset {
                        violations.push(Violation::at_line(
                            doc.path(),
                            doc.line_of(offset),
                            format!(
                                "Sections out of order: '{}' appears before '{}'",
                                section, prev_section
                            ),
                        ));
                    }
                }
                previous = Some((section.as_str(), offset));
            }
            _ => violations.push(Violation::whole_file(
                doc.path(),
                format!("Section missing for ordering check: {}", section),
            )),
        }
    }

    violations
}
