//! Markdown link extraction

use regex::Regex;
use std::sync::OnceLock;

use super::line_at;

/// Pattern for `[text](target)`; images match too since the `!` is outside.
static LINK_REGEX: OnceLock<Regex> = OnceLock::new();

fn link_regex() -> &'static Regex {
    LINK_REGEX.get_or_init(|| {
        Regex::new(r"\[([^\]]+)\]\(([^\)]+)\)").expect("Link regex should compile")
    })
}

/// A markdown link found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub target: String,
    pub line: usize,
}

impl Link {
    pub fn is_http(&self) -> bool {
        self.target.starts_with("http")
    }
}

pub fn extract_links(text: &str) -> Vec<Link> {
    link_regex()
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            Some(Link {
                text: cap.get(1)?.as_str().to_string(),
                target: cap.get(2)?.as_str().to_string(),
                line: line_at(text, whole.start()),
            })
        })
        .collect()
}
