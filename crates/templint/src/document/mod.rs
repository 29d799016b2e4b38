//! Markdown documents under validation
//!
//! A [`Document`] is an immutable snapshot of one `CUSTOMIZATION.md`-style guide,
//! read once per run and paired with the template root its file references
//! resolve against. The extractors in the submodules pull fenced code blocks,
//! links and file references out of the raw text; every check works from them.

mod fences;
mod links;
mod references;

pub use fences::{count_fence_markers, extract_fenced_blocks, CodeBlock};
pub use links::{extract_links, Link};
pub use references::{extract_file_references, FileReference};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which template a document belongs to.
///
/// The flavor selects the required-section list and enables the
/// shell-only checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Python,
    Shell,
}

impl Flavor {
    pub fn as_str(self) -> &'static str {
        match self {
            Flavor::Python => "python",
            Flavor::Shell => "shell",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A markdown document paired with its template root
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    template_root: PathBuf,
    flavor: Flavor,
    text: String,
}

impl Document {
    /// Create a document from text already in memory.
    ///
    /// `\r\n` and lone `\r` line endings are converted to `\n`.
    pub fn new(
        path: impl Into<PathBuf>,
        template_root: impl Into<PathBuf>,
        flavor: Flavor,
        text: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            template_root: template_root.into(),
            flavor,
            text: normalize_newlines(text.into()),
        }
    }

    /// Read a document from disk
    pub fn load(path: &Path, template_root: &Path, flavor: Flavor) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document {}", path.display()))?;
        Ok(Self::new(path, template_root, flavor, text))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Convert a byte offset into a 1-based line number
    pub fn line_of(&self, offset: usize) -> usize {
        line_at(&self.text, offset)
    }

    /// Iterate over `(line_number, line)` pairs, 1-based
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.text.split('\n').enumerate().map(|(idx, line)| (idx + 1, line))
    }

    pub fn fenced_blocks(&self, language: &str) -> Vec<CodeBlock> {
        extract_fenced_blocks(&self.text, language)
    }

    pub fn file_references(&self) -> Vec<FileReference> {
        extract_file_references(&self.text)
    }

    pub fn links(&self) -> Vec<Link> {
        extract_links(&self.text)
    }
}

fn normalize_newlines(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text
    }
}

/// 1-based line number of `offset` within `text`
pub(crate) fn line_at(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset.min(text.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
