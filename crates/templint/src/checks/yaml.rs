//! YAML samples must parse
//!
//! Parsing uses `serde_yaml` into an untyped `Value`: a safe load, no tags are
//! resolved into code. The parser is an optional feature; without it the
//! check is skipped rather than failed.

use super::{CheckKind, CheckResult};
use crate::document::Document;

/// Whether this build can parse YAML
pub fn yaml_parser_available() -> bool {
    cfg!(feature = "yaml")
}

#[cfg(feature = "yaml")]
pub fn check_yaml_syntax(doc: &Document) -> CheckResult {
    use super::Violation;

    let violations = doc
        .fenced_blocks("yaml")
        .into_iter()
        .filter_map(|block| {
            serde_yaml::from_str::<serde_yaml::Value>(&block.content)
                .err()
                .map(|err| {
                    Violation::at_line(
                        doc.path(),
                        block.line,
                        format!("Invalid YAML syntax in block {}: {}", block.index, err),
                    )
                })
        })
        .collect();

    CheckResult::from_violations(CheckKind::YamlSyntax, violations)
}

#[cfg(not(feature = "yaml"))]
pub fn check_yaml_syntax(_doc: &Document) -> CheckResult {
    CheckResult::skipped(
        CheckKind::YamlSyntax,
        "YAML parser not available (built without the `yaml` feature)",
    )
}
