//! Template repository linter
//!
//! Checks that the `CUSTOMIZATION.md` guides shipped with project templates
//! agree with the templates themselves: referenced files exist, embedded
//! shell and YAML samples parse, conventions are followed, and paired guides
//! stay structurally consistent. Also validates conventional commit messages.

pub mod checks;
pub mod cli;
pub mod commit;
pub mod config;
pub mod document;
pub mod errors;
pub mod hooks;
pub mod logging;
pub mod output;
pub mod syntax;
pub mod validator;

// Re-export commonly used types
pub use checks::{CheckKind, CheckResult, CheckStatus, DocumentCheck, Violation};
pub use config::ValidatorConfig;
pub use document::{Document, Flavor};
pub use output::{ExitCode, JsonError, JsonOutput};
pub use syntax::{BashSyntaxChecker, SyntaxChecker, SyntaxVerdict};
pub use validator::{ValidationReport, Validator};
