//! String-level convenience API.
//!
//! Prepares `&str` input with a [`Preparer`], runs the unit algorithms and
//! maps results back to text. All locations are char indices.

use compact_str::CompactString;

use crate::algo::{DiffConfig, MatchConfig, Op, diff_main, match_main};
use crate::error::DmpResult;
use crate::prepare::{Codepoints, Preparer};

/// One run of a text diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub op: Op,
    pub text: CompactString,
}

impl TextChunk {
    pub fn new(op: Op, text: impl Into<CompactString>) -> Self {
        Self { op, text: text.into() }
    }
}

/// Diff two strings char by char.
pub fn diff_text(text1: &str, text2: &str, config: &DiffConfig) -> Vec<TextChunk> {
    diff_text_with(&Codepoints, text1, text2, config)
}

/// Diff two strings using a custom preparation strategy.
pub fn diff_text_with<P: Preparer + ?Sized>(
    preparer: &P,
    text1: &str,
    text2: &str,
    config: &DiffConfig,
) -> Vec<TextChunk> {
    let units1 = preparer.prepare(text1);
    let units2 = preparer.prepare(text2);
    let chars1: Vec<char> = text1.chars().collect();
    let chars2: Vec<char> = text2.chars().collect();

    diff_main(&units1, &units2, config)
        .iter()
        .map(|edit| {
            let chars = match edit.op {
                Op::Insert => &chars2[edit.new.clone()],
                Op::Equal | Op::Delete => &chars1[edit.old.clone()],
            };
            TextChunk::new(edit.op, chars.iter().copied().collect::<CompactString>())
        })
        .collect()
}

/// Reassemble the old text from a text diff.
pub fn old_text(chunks: &[TextChunk]) -> String {
    chunks
        .iter()
        .filter(|c| c.op != Op::Insert)
        .map(|c| c.text.as_str())
        .collect()
}

/// Reassemble the new text from a text diff.
pub fn new_text(chunks: &[TextChunk]) -> String {
    chunks
        .iter()
        .filter(|c| c.op != Op::Delete)
        .map(|c| c.text.as_str())
        .collect()
}

/// Fuzzy-find `pattern` in `text` near char index `loc`.
pub fn match_text(
    text: &str,
    pattern: &str,
    loc: usize,
    config: &MatchConfig,
) -> DmpResult<Option<usize>> {
    match_text_with(&Codepoints, text, pattern, loc, config)
}

/// Fuzzy-find using a custom preparation strategy.
pub fn match_text_with<P: Preparer + ?Sized>(
    preparer: &P,
    text: &str,
    pattern: &str,
    loc: usize,
    config: &MatchConfig,
) -> DmpResult<Option<usize>> {
    match_main(&preparer.prepare(text), &preparer.prepare(pattern), loc, config)
}
