//! Shell code samples: syntax, script conventions and ShellCheck usage

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use super::{CheckKind, CheckResult, Violation};
use crate::document::Document;
use crate::errors::ActionableError;
use crate::syntax::{SyntaxChecker, SyntaxVerdict};

/// Literal markers of illustrative snippets that are not meant to parse
const PLACEHOLDER_MARKERS: [&str; 4] = ["your-project", "...", "echo ", "curl "];

const SHEBANG: &str = "#!/bin/bash";
const MAIN_FUNCTION: &str = "main()";
const ABOUTME_PREFIX: &str = "# ABOUTME:";
const STRICT_MODE: &str = "set -euo pipefail";

static SHELLCHECK_CMD_REGEX: OnceLock<Regex> = OnceLock::new();

fn shellcheck_cmd_regex() -> &'static Regex {
    SHELLCHECK_CMD_REGEX.get_or_init(|| {
        Regex::new(r"shellcheck\s+([^\n]+)").expect("ShellCheck regex should compile")
    })
}

/// True if a bash block is illustrative rather than runnable.
///
/// Placeholders: `your-project`, `...`, `echo `, `curl `, or any line that
/// starts with `# ` once leading whitespace is removed.
pub fn is_placeholder_block(content: &str) -> bool {
    PLACEHOLDER_MARKERS.iter().any(|m| content.contains(m))
        || content
            .lines()
            .any(|line| line.trim_start().starts_with("# "))
}

/// Run every non-placeholder ```` ```bash ```` block through `checker`.
pub fn check_shell_syntax<C: SyntaxChecker + ?Sized>(doc: &Document, checker: &C) -> CheckResult {
    let mut violations = Vec::new();

    for block in doc.fenced_blocks("bash") {
        if is_placeholder_block(&block.content) {
            debug!(block = block.index, line = block.line, "skipping placeholder bash block");
            continue;
        }

        match checker.check(&block.content) {
            Ok(SyntaxVerdict::Valid) => {}
            Ok(SyntaxVerdict::Invalid {
                exit_code,
                diagnostic,
            }) => {
                let status = exit_code
                    .map(|c| format!("exit {}", c))
                    .unwrap_or_else(|| "terminated by signal".to_string());
                violations.push(Violation::at_line(
                    doc.path(),
                    block.line,
                    format!(
                        "Invalid bash syntax in block {} ({}): {}",
                        block.index, status, diagnostic
                    ),
                ));
            }
            Err(err) => {
                let detail = err
                    .downcast_ref::<ActionableError>()
                    .map(|e| e.message().to_string())
                    .unwrap_or_else(|| format!("{:#}", err));
                violations.push(Violation::at_line(
                    doc.path(),
                    block.line,
                    format!(
                        "Could not check bash block {} with {}: {}",
                        block.index,
                        checker.describe(),
                        detail
                    ),
                ));
            }
        }
    }

    CheckResult::from_violations(CheckKind::ShellSyntax, violations)
}

/// Complete script examples must carry the project header conventions.
///
/// A block is a complete script when it contains both `#!/bin/bash` and
/// `main()`. Its second line must start with `# ABOUTME:` and it must enable
/// `set -euo pipefail`.
pub fn check_shell_best_practices(doc: &Document) -> CheckResult {
    let mut violations = Vec::new();

    let scripts = doc
        .fenced_blocks("bash")
        .into_iter()
        .filter(|b| b.content.contains(SHEBANG) && b.content.contains(MAIN_FUNCTION));

    for (idx, block) in scripts.enumerate() {
        let lines: Vec<&str> = block.content.split('\n').collect();
        if lines.len() > 1 && !lines[1].starts_with(ABOUTME_PREFIX) {
            violations.push(Violation::at_line(
                doc.path(),
                block.line + 2,
                format!("Script block {}: Missing ABOUTME comment after shebang", idx),
            ));
        }

        if !block.content.contains(STRICT_MODE) {
            violations.push(Violation::at_line(
                doc.path(),
                block.line,
                format!("Script block {}: Missing '{}'", idx, STRICT_MODE),
            ));
        }
    }

    CheckResult::from_violations(CheckKind::ShellBestPractices, violations)
}

/// The guide must show at least one `shellcheck` invocation, none of them
/// misspelled.
pub fn check_shellcheck_examples(doc: &Document) -> CheckResult {
    let text = doc.text();
    let mut violations = Vec::new();
    let mut found = 0usize;

    for cap in shellcheck_cmd_regex().captures_iter(text) {
        let Some(args) = cap.get(1) else { continue };
        found += 1;
        if args.as_str().contains("shellchec") {
            violations.push(Violation::at_line(
                doc.path(),
                doc.line_of(args.start()),
                format!("Possible typo in: shellcheck {}", args.as_str()),
            ));
        }
    }

    if found == 0 {
        violations.push(Violation::whole_file(
            doc.path(),
            "No shellcheck examples found in documentation",
        ));
    }

    CheckResult::from_violations(CheckKind::ShellcheckExamples, violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckStatus;
    use crate::document::Flavor;
    use anyhow::Result;
    use std::cell::RefCell;

    /// Records snippets and rejects any containing `BROKEN`
    #[derive(Default)]
    struct RecordingChecker {
        seen: RefCell<Vec<String>>,
    }

    impl SyntaxChecker for RecordingChecker {
        fn describe(&self) -> String {
            "fake -n".to_string()
        }

        fn check(&self, snippet: &str) -> Result<SyntaxVerdict> {
            self.seen.borrow_mut().push(snippet.to_string());
            if snippet.contains("BROKEN") {
                Ok(SyntaxVerdict::Invalid {
                    exit_code: Some(2),
                    diagnostic: "syntax error near unexpected token".to_string(),
                })
            } else {
                Ok(SyntaxVerdict::Valid)
            }
        }
    }

    struct UnavailableChecker;

    impl SyntaxChecker for UnavailableChecker {
        fn describe(&self) -> String {
            "missing -n".to_string()
        }

        fn check(&self, _snippet: &str) -> Result<SyntaxVerdict> {
            Err(crate::errors::shell_checker_not_found("missing").into())
        }
    }

    fn shell_doc(text: &str) -> Document {
        Document::new("shell-project/CUSTOMIZATION.md", "shell-project", Flavor::Shell, text)
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder_block("cd your-project"));
        assert!(is_placeholder_block("make ..."));
        assert!(is_placeholder_block("echo done"));
        assert!(is_placeholder_block("curl -sSL https://example.com"));
        assert!(is_placeholder_block("ls\n  # list files\n"));

        assert!(!is_placeholder_block("ls -la\nmake test"));
        assert!(!is_placeholder_block("#!/bin/bash\nmake"));
    }

    #[test]
    fn test_placeholder_blocks_are_not_checked() {
        let doc = shell_doc("```bash\necho BROKEN\n```\n\n```bash\nmake test\n```\n");
        let checker = RecordingChecker::default();

        let result = check_shell_syntax(&doc, &checker);

        assert_eq!(result.status, CheckStatus::Passed);
        assert_eq!(checker.seen.borrow().as_slice(), ["make test"]);
    }

    #[test]
    fn test_invalid_block_reports_diagnostic_and_line() {
        let doc = shell_doc("intro\n```bash\nmake\n```\n```bash\nif BROKEN\n```\n");
        let result = check_shell_syntax(&doc, &RecordingChecker::default());

        assert_eq!(result.status, CheckStatus::Failed);
        assert_eq!(result.violations.len(), 1);
        let violation = &result.violations[0];
        assert_eq!(violation.line, Some(5));
        assert!(violation.reason.contains("block 1"));
        assert!(violation.reason.contains("exit 2"));
        assert!(violation.reason.contains("unexpected token"));
    }

    #[test]
    fn test_crlf_document_blocks_are_checked() {
        let doc = shell_doc("intro\r\n```bash\r\nif BROKEN\r\n```\r\n");
        let checker = RecordingChecker::default();

        let result = check_shell_syntax(&doc, &checker);

        assert_eq!(result.status, CheckStatus::Failed);
        assert_eq!(result.violations[0].line, Some(2));
        assert_eq!(checker.seen.borrow().as_slice(), ["if BROKEN"]);
    }

    #[test]
    fn test_unavailable_checker_fails_each_candidate_block() {
        let doc = shell_doc("```bash\nmake\n```\n```bash\nmake test\n```\n```bash\necho hi\n```\n");
        let result = check_shell_syntax(&doc, &UnavailableChecker);

        assert_eq!(result.status, CheckStatus::Failed);
        assert_eq!(result.violations.len(), 2);
        assert!(result.violations[0].reason.contains("'missing' not found on PATH"));
        assert!(!result.violations[0].reason.contains("To fix"));
    }

    #[test]
    fn test_complete_script_passes_best_practices() {
        let doc = shell_doc(
            "```bash\n#!/bin/bash\n# ABOUTME: Deploys the site\n\nset -euo pipefail\n\nmain() {\n  make\n}\n\nmain \"$@\"\n```\n",
        );
        assert_eq!(check_shell_best_practices(&doc).status, CheckStatus::Passed);
    }

    #[test]
    fn test_script_missing_header_and_strict_mode() {
        let doc = shell_doc("text\n```bash\n#!/bin/bash\nset -e\nmain() { :; }\n```\n");
        let result = check_shell_best_practices(&doc);

        assert_eq!(result.violations.len(), 2);
        assert!(result.violations[0].reason.contains("Missing ABOUTME"));
        assert_eq!(result.violations[0].line, Some(4));
        assert!(result.violations[1].reason.contains("set -euo pipefail"));
    }

    #[test]
    fn test_snippets_without_main_are_not_scripts() {
        let doc = shell_doc("```bash\n#!/bin/bash\nmake\n```\n");
        assert_eq!(check_shell_best_practices(&doc).status, CheckStatus::Passed);
    }

    #[test]
    fn test_shellcheck_examples_required() {
        let result = check_shellcheck_examples(&shell_doc("Run the linter."));
        assert_eq!(result.status, CheckStatus::Failed);
        assert!(result.violations[0].reason.contains("No shellcheck examples"));

        let ok = check_shellcheck_examples(&shell_doc("```bash\nshellcheck -x src/*.sh\n```"));
        assert_eq!(ok.status, CheckStatus::Passed);
    }

    #[test]
    fn test_shellcheck_typo_is_flagged() {
        let doc = shell_doc("shellcheck src/main.sh && shellchec tests/*.sh\n");
        let result = check_shellcheck_examples(&doc);

        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].reason.starts_with("Possible typo in: shellcheck"));
        assert_eq!(result.violations[0].line, Some(1));
    }
}
