//! File reference extraction
//!
//! Guides point at template files with a `File: `path`` convention. The
//! pattern is deliberately loose: the word `File`, then anything up to the
//! next backtick, then the backtick-quoted path. `File to edit: `x``,
//! `Files `a`` and a `File` whose path sits on the following line all match.

use regex::Regex;
use std::sync::OnceLock;

use super::line_at;

static FILE_REF_REGEX: OnceLock<Regex> = OnceLock::new();

fn file_ref_regex() -> &'static Regex {
    FILE_REF_REGEX.get_or_init(|| {
        Regex::new(r"File[^`]*`([^`]+)`").expect("File reference regex should compile")
    })
}

/// A path a document claims exists in its template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    /// Path exactly as written, relative to the template root
    pub path: String,
    /// Line of the quoted path (1-based)
    pub line: usize,
}

pub fn extract_file_references(text: &str) -> Vec<FileReference> {
    file_ref_regex()
        .captures_iter(text)
        .filter_map(|cap| {
            let path = cap.get(1)?;
            Some(FileReference {
                path: path.as_str().to_string(),
                line: line_at(text, path.start()),
            })
        })
        .collect()
}
