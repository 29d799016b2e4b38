//! Documentation contract validator
//!
//! Runs the per-flavor check battery over every configured guide, then the
//! cross-document comparison over every configured pair, and merges the
//! results into one [`ValidationReport`]. Nothing short-circuits: a guide that
//! fails one check still gets every other check, and the report lists every
//! violation found.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::checks::{self, CheckKind, CheckResult, CheckStatus, DocumentCheck, Violation};
use crate::config::{DocumentConfig, ValidatorConfig};
use crate::document::{Document, Flavor};
use crate::errors;
use crate::syntax::SyntaxChecker;

/// Results for one guide
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub flavor: Flavor,
    pub results: Vec<CheckResult>,
}

/// Results for one compared pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairReport {
    pub left: PathBuf,
    pub right: PathBuf,
    pub result: CheckResult,
}

/// Counts of check outcomes across a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub documents: usize,
    pub checks: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub violations: usize,
}

/// Everything one validation run found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub documents: Vec<DocumentReport>,
    pub cross_document: Vec<PairReport>,
}

impl ValidationReport {
    /// All check results, documents first, in run order
    pub fn results(&self) -> impl Iterator<Item = &CheckResult> {
        self.documents
            .iter()
            .flat_map(|d| d.results.iter())
            .chain(self.cross_document.iter().map(|p| &p.result))
    }

    /// True when no check failed (skipped checks do not count)
    pub fn passed(&self) -> bool {
        !self.results().any(CheckResult::is_failure)
    }

    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.results().flat_map(|r| r.violations.iter())
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            documents: self.documents.len(),
            ..Summary::default()
        };
        for result in self.results() {
            summary.checks += 1;
            summary.violations += result.violations.len();
            match result.status {
                CheckStatus::Passed => summary.passed += 1,
                CheckStatus::Failed => summary.failed += 1,
                CheckStatus::Skipped => summary.skipped += 1,
            }
        }
        summary
    }
}

/// Resolve command-line paths to document configs.
///
/// A path matches a configured document when the two are equal or name the
/// same file. Unconfigured paths are validated ad hoc with `flavor`, which is
/// then required.
pub fn select_documents(
    config: &ValidatorConfig,
    paths: &[PathBuf],
    flavor: Option<Flavor>,
    template_root: Option<&Path>,
) -> Result<Vec<DocumentConfig>> {
    let mut selected = Vec::with_capacity(paths.len());

    for path in paths {
        if let Some(configured) = find_configured(config, path) {
            selected.push(configured.clone());
            continue;
        }

        let flavor = flavor.ok_or_else(|| errors::document_not_configured(path))?;
        let mut ad_hoc = DocumentConfig::new(path, flavor);
        ad_hoc.template_root = template_root.map(Path::to_path_buf);
        debug!(path = %path.display(), %flavor, "validating unconfigured document");
        selected.push(ad_hoc);
    }

    Ok(selected)
}

fn find_configured<'a>(config: &'a ValidatorConfig, path: &Path) -> Option<&'a DocumentConfig> {
    config.document(path).or_else(|| {
        let wanted = std::fs::canonicalize(path).ok()?;
        config
            .documents
            .iter()
            .find(|d| std::fs::canonicalize(&d.path).ok().as_ref() == Some(&wanted))
    })
}

/// Runs the check battery with a given shell syntax checker
pub struct Validator<C: SyntaxChecker> {
    config: ValidatorConfig,
    checker: C,
}

impl<C: SyntaxChecker> Validator<C> {
    pub fn new(config: ValidatorConfig, checker: C) -> Self {
        Self { config, checker }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate every configured document and every configured pair.
    pub fn validate_all(&self) -> ValidationReport {
        let selected: Vec<&DocumentConfig> = self.config.documents.iter().collect();
        self.validate_selected(&selected)
    }

    /// Validate the given documents.
    ///
    /// Pairs are compared only when both members are among `selected`.
    pub fn validate_selected(&self, selected: &[&DocumentConfig]) -> ValidationReport {
        let mut report = ValidationReport::default();
        let mut loaded: HashMap<&Path, Document> = HashMap::new();

        for doc_config in selected {
            let (doc_report, document) = self.validate_configured(doc_config);
            report.documents.push(doc_report);
            if let Some(document) = document {
                loaded.insert(doc_config.path.as_path(), document);
            }
        }

        for [left, right] in &self.config.consistency.pairs {
            let selected_pair = |p: &PathBuf| selected.iter().any(|d| &d.path == p);
            if !(selected_pair(left) && selected_pair(right)) {
                continue;
            }

            let result = match (loaded.get(left.as_path()), loaded.get(right.as_path())) {
                (Some(l), Some(r)) => {
                    checks::check_cross_document(l, r, &self.config.consistency)
                }
                _ => {
                    let unreadable = [left, right]
                        .into_iter()
                        .filter(|p| !loaded.contains_key(p.as_path()))
                        .map(|p| {
                            Violation::whole_file(p, "Cannot compare: document could not be read")
                        })
                        .collect();
                    CheckResult::from_violations(CheckKind::CrossDocumentConsistency, unreadable)
                }
            };
            debug!(left = %left.display(), right = %right.display(), status = ?result.status, "compared pair");

            report.cross_document.push(PairReport {
                left: left.clone(),
                right: right.clone(),
                result,
            });
        }

        let summary = report.summary();
        info!(
            documents = summary.documents,
            checks = summary.checks,
            failed = summary.failed,
            violations = summary.violations,
            "validation finished"
        );
        report
    }

    /// Load and check one configured document.
    ///
    /// An unreadable document yields a failed `document-exists` result and
    /// no other checks.
    fn validate_configured(&self, doc_config: &DocumentConfig) -> (DocumentReport, Option<Document>) {
        let path = doc_config.path.clone();
        let template_root = doc_config.template_root();

        match Document::load(&path, &template_root, doc_config.flavor) {
            Ok(document) => {
                let results = self.validate_document(&document, doc_config);
                let report = DocumentReport {
                    path,
                    flavor: doc_config.flavor,
                    results,
                };
                (report, Some(document))
            }
            Err(err) => {
                warn!(path = %path.display(), "document could not be read");
                let result = CheckResult::from_violations(
                    CheckKind::DocumentExists,
                    vec![Violation::whole_file(&path, format!("{:#}", err))],
                );
                let report = DocumentReport {
                    path,
                    flavor: doc_config.flavor,
                    results: vec![result],
                };
                (report, None)
            }
        }
    }

    /// Run the full battery for the document's flavor.
    pub fn validate_document(&self, doc: &Document, doc_config: &DocumentConfig) -> Vec<CheckResult> {
        info!(path = %doc.path().display(), flavor = %doc.flavor(), "validating document");

        DocumentCheck::battery(doc.flavor())
            .into_iter()
            .map(|check| {
                let kind = check.kind();
                let result = self.run_check(check, doc, doc_config);
                match result.status {
                    CheckStatus::Skipped => warn!(
                        check = %kind,
                        reason = result.skip_reason.as_deref().unwrap_or(""),
                        "check skipped"
                    ),
                    status => debug!(
                        check = %kind,
                        ?status,
                        violations = result.violations.len(),
                        "check finished"
                    ),
                }
                result
            })
            .collect()
    }

    fn run_check(&self, check: DocumentCheck, doc: &Document, doc_config: &DocumentConfig) -> CheckResult {
        match check {
            DocumentCheck::FileReferences => {
                checks::check_file_references(doc, &doc_config.optional_files())
            }
            DocumentCheck::BranchReferences => checks::check_branch_references(doc),
            DocumentCheck::ShellSyntax => checks::check_shell_syntax(doc, &self.checker),
            DocumentCheck::YamlSyntax => checks::check_yaml_syntax(doc),
            DocumentCheck::PackageManagerCommands => {
                checks::check_forbidden_commands(doc, &self.config.conventions.forbidden)
            }
            DocumentCheck::RequiredSections => {
                checks::check_required_sections(doc, &doc_config.required_sections())
            }
            DocumentCheck::LinkFormat => checks::check_link_format(doc),
            DocumentCheck::ChecklistFormat => checks::check_checklist_format(doc),
            DocumentCheck::ShellBestPractices => checks::check_shell_best_practices(doc),
            DocumentCheck::ShellcheckExamples => checks::check_shellcheck_examples(doc),
            DocumentCheck::Completeness => checks::check_completeness(doc, &self.config.completeness),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxVerdict;
    use anyhow::Result;
    use std::fs;
    use tempfile::TempDir;

    /// Accepts everything; keeps these tests independent of an installed bash
    struct AcceptAll;

    impl SyntaxChecker for AcceptAll {
        fn describe(&self) -> String {
            "accept-all".to_string()
        }

        fn check(&self, _snippet: &str) -> Result<SyntaxVerdict> {
            Ok(SyntaxVerdict::Valid)
        }
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn setup() -> (TempDir, ValidatorConfig) {
        let temp = TempDir::new().unwrap();
        let config = ValidatorConfig::default().resolve_paths(temp.path());
        (temp, config)
    }

    #[test]
    fn test_missing_documents_fail_without_aborting() {
        let (_temp, config) = setup();
        let validator = Validator::new(config, AcceptAll);

        let report = validator.validate_all();

        assert!(!report.passed());
        assert_eq!(report.documents.len(), 2);
        for doc in &report.documents {
            assert_eq!(doc.results.len(), 1);
            assert_eq!(doc.results[0].check, CheckKind::DocumentExists);
        }
        assert_eq!(report.cross_document.len(), 1);
        assert_eq!(report.cross_document[0].result.violations.len(), 2);
    }

    #[test]
    fn test_all_checks_run_even_after_failures() {
        let (temp, config) = setup();
        write(temp.path(), "python-project/CUSTOMIZATION.md", "uses x@main\nFile: `missing/path.txt`\n");
        write(temp.path(), "shell-project/CUSTOMIZATION.md", "");
        let validator = Validator::new(config, AcceptAll);

        let report = validator.validate_all();
        let python = &report.documents[0];

        assert_eq!(python.results.len(), DocumentCheck::COMMON.len());
        let failed: Vec<_> = python
            .results
            .iter()
            .filter(|r| r.is_failure())
            .map(|r| r.check)
            .collect();
        assert!(failed.contains(&CheckKind::FileReferences));
        assert!(failed.contains(&CheckKind::BranchReferences));
        assert!(failed.contains(&CheckKind::RequiredSections));
        assert!(failed.contains(&CheckKind::Completeness));

        let shell = &report.documents[1];
        let reported: Vec<_> = shell.results.iter().map(|r| r.check).collect();
        let expected: Vec<_> = DocumentCheck::battery(Flavor::Shell)
            .into_iter()
            .map(DocumentCheck::kind)
            .collect();
        assert_eq!(reported, expected);
    }

    #[test]
    fn test_selection_limits_pairs() {
        let (temp, config) = setup();
        write(temp.path(), "python-project/CUSTOMIZATION.md", "Quick Start");
        let validator = Validator::new(config, AcceptAll);

        let python = validator.config().documents[0].clone();
        let report = validator.validate_selected(&[&python]);

        assert_eq!(report.documents.len(), 1);
        assert!(report.cross_document.is_empty());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let (temp, config) = setup();
        write(temp.path(), "python-project/CUSTOMIZATION.md", "-[ ] bad\n[x]( )\nuv pip install y\n");
        write(temp.path(), "shell-project/CUSTOMIZATION.md", "```bash\n#!/bin/bash\nmain() { :; }\n```\n");
        let validator = Validator::new(config, AcceptAll);

        let first = validator.validate_all();
        let second = validator.validate_all();

        assert_eq!(first, second);
        assert!(first.summary().violations > 0);
    }

    #[test]
    fn test_select_configured_and_ad_hoc_documents() {
        let config = ValidatorConfig::default();
        let paths = vec![
            PathBuf::from("shell-project/CUSTOMIZATION.md"),
            PathBuf::from("docs/GUIDE.md"),
        ];

        let selected =
            select_documents(&config, &paths, Some(Flavor::Python), Some(Path::new("."))).unwrap();

        assert_eq!(selected[0].flavor, Flavor::Shell);
        assert_eq!(selected[1].flavor, Flavor::Python);
        assert_eq!(selected[1].template_root(), PathBuf::from("."));
    }

    #[test]
    fn test_unconfigured_document_needs_flavor() {
        let config = ValidatorConfig::default();
        let err = select_documents(&config, &[PathBuf::from("docs/GUIDE.md")], None, None)
            .unwrap_err();
        assert!(err.to_string().contains("docs/GUIDE.md is not configured"));
    }

    #[test]
    fn test_summary_counts() {
        let report = ValidationReport {
            documents: vec![DocumentReport {
                path: PathBuf::from("a.md"),
                flavor: Flavor::Python,
                results: vec![
                    CheckResult::from_violations(CheckKind::LinkFormat, vec![]),
                    CheckResult::skipped(CheckKind::YamlSyntax, "no parser"),
                    CheckResult::from_violations(
                        CheckKind::ChecklistFormat,
                        vec![
                            Violation::at_line(Path::new("a.md"), 1, "x"),
                            Violation::at_line(Path::new("a.md"), 2, "y"),
                        ],
                    ),
                ],
            }],
            cross_document: vec![],
        };

        let summary = report.summary();
        assert_eq!(summary.checks, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.violations, 2);
        assert!(!report.passed());
    }
}
