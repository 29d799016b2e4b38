//! Fenced code block extraction

use regex::Regex;

use super::line_at;

/// A fenced code block with a declared language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language label after the opening fence (e.g. `bash`)
    pub language: String,
    /// Block body, without the fences and without the final newline
    pub content: String,
    /// Line of the opening fence (1-based)
    pub line: usize,
    /// Position among blocks of the same language (0-based)
    pub index: usize,
}

/// Extract every block that opens with exactly ```` ```<language>\n ````.
///
/// Matching is non-greedy: a block ends at the first `\n```` after its
/// opening fence.
pub fn extract_fenced_blocks(text: &str, language: &str) -> Vec<CodeBlock> {
    let pattern = format!(r"(?s)```{}\n(.*?)\n```", regex::escape(language));
    let fence = Regex::new(&pattern).expect("fence pattern should compile");

    fence
        .captures_iter(text)
        .enumerate()
        .filter_map(|(index, cap)| {
            let whole = cap.get(0)?;
            let body = cap.get(1)?;
            Some(CodeBlock {
                language: language.to_string(),
                content: body.as_str().to_string(),
                line: line_at(text, whole.start()),
                index,
            })
        })
        .collect()
}

/// Number of triple-backtick markers in `text`.
///
/// Each complete block contributes two markers.
pub fn count_fence_markers(text: &str) -> usize {
    text.matches("```").count()
}
