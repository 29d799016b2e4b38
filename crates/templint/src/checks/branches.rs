//! Workflow references must pin `@master`

use regex::Regex;
use std::sync::OnceLock;

use super::{CheckKind, CheckResult, Violation};
use crate::document::Document;

static BRANCH_REF_REGEX: OnceLock<Regex> = OnceLock::new();

fn branch_ref_regex() -> &'static Regex {
    BRANCH_REF_REGEX
        .get_or_init(|| Regex::new(r"@(master|main)").expect("Branch regex should compile"))
}

/// Fail on every `@main` reference; `@master` is the standard pin.
///
/// The match is a plain prefix match, so `@mainline` counts as `@main` too.
pub fn check_branch_references(doc: &Document) -> CheckResult {
    let text = doc.text();
    let main_refs: Vec<usize> = branch_ref_regex()
        .captures_iter(text)
        .filter_map(|cap| {
            let branch = cap.get(1)?;
            (branch.as_str() == "main").then(|| doc.line_of(branch.start()))
        })
        .collect();

    let total = main_refs.len();
    let violations = main_refs
        .into_iter()
        .map(|line| {
            Violation::at_line(
                doc.path(),
                line,
                format!(
                    "Workflow reference uses @main (should be @master); {} reference(s) to @main in total",
                    total
                ),
            )
        })
        .collect();

    CheckResult::from_violations(CheckKind::BranchReferences, violations)
}
