//! Configuration file loading and parsing.
//!
//! templint reads `templint.toml` from the working directory (or the path
//! given with `--config` / `TEMPLINT_CONFIG`). If no config file exists, the
//! built-in defaults describe the standard two-template layout: a Python
//! guide at `python-project/CUSTOMIZATION.md` and a shell guide at
//! `shell-project/CUSTOMIZATION.md`, compared with each other.
//!
//! Relative paths in the file are resolved against the directory that holds
//! the config file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::document::Flavor;

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "templint.toml";

/// Structural problems in an otherwise well-formed config
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("document {0} is configured more than once")]
    DuplicateDocument(PathBuf),

    #[error("consistency pair references {0}, which is not a configured document")]
    UnknownPairDocument(PathBuf),

    #[error("consistency pair compares {0} with itself")]
    SelfPair(PathBuf),
}

/// Root configuration structure loaded from `templint.toml`.
///
/// A config file replaces the built-in document list and pairs; sections it
/// leaves out take their own defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Guides to validate.
    #[serde(default)]
    pub documents: Vec<DocumentConfig>,
    /// Cross-document comparison settings.
    #[serde(default)]
    pub consistency: ConsistencyConfig,
    /// Forbidden command forms.
    #[serde(default)]
    pub conventions: ConventionsConfig,
    /// Completeness thresholds and markers.
    #[serde(default)]
    pub completeness: CompletenessConfig,
    /// External shell syntax checker.
    #[serde(default)]
    pub shell: ShellConfig,
}

/// One guide and the template it documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Path to the markdown file.
    pub path: PathBuf,
    /// Directory that file references resolve against (default: the
    /// document's parent directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_root: Option<PathBuf>,
    /// Template flavor; selects required sections and shell-only checks.
    pub flavor: Flavor,
    /// References exempt from the existence check (default: flavor-specific).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_files: Option<Vec<String>>,
    /// Section names that must appear (default: flavor-specific).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_sections: Option<Vec<String>>,
}

impl DocumentConfig {
    /// Ad hoc document with flavor defaults
    pub fn new(path: impl Into<PathBuf>, flavor: Flavor) -> Self {
        Self {
            path: path.into(),
            template_root: None,
            flavor,
            optional_files: None,
            required_sections: None,
        }
    }

    /// Template root with default fallback.
    pub fn template_root(&self) -> PathBuf {
        self.template_root.clone().unwrap_or_else(|| {
            self.path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    /// Optional files with default fallback.
    pub fn optional_files(&self) -> Vec<String> {
        self.optional_files
            .clone()
            .unwrap_or_else(|| default_optional_files(self.flavor))
    }

    /// Required sections with default fallback.
    pub fn required_sections(&self) -> Vec<String> {
        self.required_sections
            .clone()
            .unwrap_or_else(|| default_required_sections(self.flavor))
    }
}

/// Cross-document consistency settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsistencyConfig {
    /// Document pairs to compare, by configured path.
    pub pairs: Vec<[PathBuf; 2]>,
    /// Identifier of the reusable-workflow source both guides must cite.
    pub workflow_source: String,
    /// Headings both guides must contain.
    pub shared_sections: Vec<String>,
    /// Sections whose first occurrences must appear in this order.
    pub ordered_sections: Vec<String>,
}

/// A substring that must not appear in any guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenPattern {
    pub pattern: String,
    pub message: String,
}

impl ForbiddenPattern {
    pub fn new(pattern: &str, message: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            message: message.to_string(),
        }
    }
}

/// Command-form conventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConventionsConfig {
    pub forbidden: Vec<ForbiddenPattern>,
}

/// Completeness heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletenessConfig {
    /// A guide needs more than this many `- [ ]` items.
    pub min_checklist_items: usize,
    /// A guide needs more than this many fenced code blocks.
    pub min_code_blocks: usize,
    /// All of these must appear (version/date footer).
    pub footer_markers: Vec<String>,
    /// At least one of these must appear.
    pub help_markers: Vec<String>,
    /// Host of the workflow documentation the guide must link to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_docs_host: Option<String>,
}

/// External shell syntax checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Program invoked as `<program> -n` with the snippet on stdin.
    pub program: String,
}

pub fn default_required_sections(flavor: Flavor) -> Vec<String> {
    let sections: &[&str] = match flavor {
        Flavor::Python => &[
            "Quick Start",
            "Customization Checklist",
            "Update Project Metadata",
            "Update README",
            "Workflow Customization",
            "Testing Your Customizations",
            "Troubleshooting",
        ],
        Flavor::Shell => &["Required Header", "Error Handling", "Documentation"],
    };
    sections.iter().map(|s| s.to_string()).collect()
}

pub fn default_optional_files(flavor: Flavor) -> Vec<String> {
    match flavor {
        Flavor::Python => Vec::new(),
        Flavor::Shell => vec![".shellcheckrc".to_string(), ".editorconfig".to_string()],
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        let python = PathBuf::from("python-project/CUSTOMIZATION.md");
        let shell = PathBuf::from("shell-project/CUSTOMIZATION.md");
        Self {
            documents: vec![
                DocumentConfig::new(&python, Flavor::Python),
                DocumentConfig::new(&shell, Flavor::Shell),
            ],
            consistency: ConsistencyConfig {
                pairs: vec![[python, shell]],
                ..ConsistencyConfig::default()
            },
            conventions: ConventionsConfig::default(),
            completeness: CompletenessConfig::default(),
            shell: ShellConfig::default(),
        }
    }
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            pairs: Vec::new(),
            workflow_source: "maxrantil/.github".to_string(),
            shared_sections: strings(&[
                "Quick Start",
                "Testing Your Customizations",
                "Troubleshooting",
                "Workflow Customization",
            ]),
            ordered_sections: strings(&[
                "Quick Start",
                "Customization Checklist",
                "Workflow Customization",
                "Testing Your Customizations",
                "Troubleshooting",
            ]),
        }
    }
}

impl Default for ConventionsConfig {
    fn default() -> Self {
        Self {
            forbidden: vec![
                ForbiddenPattern::new("uv pip install", "Use 'uv add' not 'uv pip install'"),
                ForbiddenPattern::new("@latest", "UV doesn't support @latest syntax"),
            ],
        }
    }
}

impl Default for CompletenessConfig {
    fn default() -> Self {
        Self {
            min_checklist_items: 5,
            min_code_blocks: 10,
            footer_markers: strings(&["Template Version", "Last Updated"]),
            help_markers: strings(&["Getting Help", "Help"]),
            workflow_docs_host: Some("github.com/maxrantil".to_string()),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: "bash".to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from `path` if it exists.
    ///
    /// Returns the defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ValidatorConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .check()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Reject duplicate documents and pairs naming unknown documents.
    pub fn check(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for doc in &self.documents {
            if !seen.insert(&doc.path) {
                return Err(ConfigError::DuplicateDocument(doc.path.clone()));
            }
        }

        for [left, right] in &self.consistency.pairs {
            for member in [left, right] {
                if !seen.contains(member) {
                    return Err(ConfigError::UnknownPairDocument(member.clone()));
                }
            }
            if left == right {
                return Err(ConfigError::SelfPair(left.clone()));
            }
        }

        Ok(())
    }

    /// Look up the configured entry for `path`
    pub fn document(&self, path: &Path) -> Option<&DocumentConfig> {
        self.documents.iter().find(|d| d.path == path)
    }

    /// Rewrite relative document paths to be relative to `base_dir`.
    pub fn resolve_paths(mut self, base_dir: &Path) -> Self {
        let resolve = |p: &Path| -> PathBuf {
            if p.is_absolute() || base_dir.as_os_str().is_empty() {
                p.to_path_buf()
            } else {
                base_dir.join(p)
            }
        };

        for doc in &mut self.documents {
            if doc.template_root.is_none() {
                doc.template_root = Some(doc.template_root());
            }
            doc.path = resolve(&doc.path);
            doc.template_root = doc.template_root.as_deref().map(resolve);
        }
        for pair in &mut self.consistency.pairs {
            for member in pair.iter_mut() {
                *member = resolve(member);
            }
        }
        self
    }

    /// Render as TOML for `templint config show`
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ValidatorConfig::load(&temp.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(config.documents.len(), 2);
        assert_eq!(config.documents[0].flavor, Flavor::Python);
        assert_eq!(config.consistency.pairs.len(), 1);
        assert_eq!(config.shell.program, "bash");
        assert_eq!(config.completeness.min_code_blocks, 10);
    }

    #[test]
    fn test_flavor_defaults() {
        let shell = DocumentConfig::new("shell-project/CUSTOMIZATION.md", Flavor::Shell);
        assert_eq!(shell.template_root(), PathBuf::from("shell-project"));
        assert_eq!(shell.optional_files(), vec![".shellcheckrc", ".editorconfig"]);
        assert_eq!(
            shell.required_sections(),
            vec!["Required Header", "Error Handling", "Documentation"]
        );

        let python = DocumentConfig::new("CUSTOMIZATION.md", Flavor::Python);
        assert_eq!(python.template_root(), PathBuf::from(""));
        assert!(python.optional_files().is_empty());
        assert_eq!(python.required_sections().len(), 7);
    }

    #[test]
    fn test_load_partial_config_keeps_section_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
[[documents]]
path = "templates/shell-project/CUSTOMIZATION.md"
flavor = "shell"
optional_files = [".shellcheckrc"]

[completeness]
min_code_blocks = 3
"#,
        )
        .unwrap();

        let config = ValidatorConfig::load(&path).unwrap();
        assert_eq!(config.documents.len(), 1);
        assert_eq!(config.documents[0].optional_files(), vec![".shellcheckrc"]);
        assert!(config.consistency.pairs.is_empty());
        assert_eq!(config.completeness.min_code_blocks, 3);
        assert_eq!(config.completeness.min_checklist_items, 5);
        assert_eq!(config.conventions.forbidden.len(), 2);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[[documents]]\npath = 3\n").unwrap();

        let err = ValidatorConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }

    #[test]
    fn test_pair_must_reference_configured_documents() {
        let mut config = ValidatorConfig::default();
        config.consistency.pairs = vec![[
            PathBuf::from("python-project/CUSTOMIZATION.md"),
            PathBuf::from("docs/OTHER.md"),
        ]];

        assert_eq!(
            config.check(),
            Err(ConfigError::UnknownPairDocument(PathBuf::from("docs/OTHER.md")))
        );
    }

    #[test]
    fn test_duplicate_and_self_pairs_rejected() {
        let mut config = ValidatorConfig::default();
        config.documents.push(config.documents[0].clone());
        assert!(matches!(config.check(), Err(ConfigError::DuplicateDocument(_))));

        let mut config = ValidatorConfig::default();
        let python = config.documents[0].path.clone();
        config.consistency.pairs = vec![[python.clone(), python]];
        assert!(matches!(config.check(), Err(ConfigError::SelfPair(_))));
    }

    #[test]
    fn test_resolve_paths_against_config_dir() {
        let config = ValidatorConfig::default().resolve_paths(Path::new("/repo"));

        assert_eq!(
            config.documents[1].path,
            PathBuf::from("/repo/shell-project/CUSTOMIZATION.md")
        );
        assert_eq!(
            config.documents[1].template_root(),
            PathBuf::from("/repo/shell-project")
        );
        assert_eq!(
            config.consistency.pairs[0][0],
            PathBuf::from("/repo/python-project/CUSTOMIZATION.md")
        );
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let rendered = ValidatorConfig::default().to_toml_string().unwrap();
        let parsed: ValidatorConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.documents.len(), 2);
        assert_eq!(parsed.consistency.workflow_source, "maxrantil/.github");
    }
}
