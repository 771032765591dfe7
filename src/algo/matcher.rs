//! Match driver
//!
//! Handles the cheap cases before falling back to [`match_bitap`]:
//! identical texts, empty text, and an exact hit at the expected location.

use crate::algo::bitap::{MatchConfig, match_bitap};
use crate::error::DmpResult;
use crate::seq::Unit;

/// Locate the best instance of `pattern` in `text` near `loc`
///
/// `loc` is clamped to `0..=text.len()`. An empty pattern matches at the
/// clamped location. Errors are those of [`match_bitap`].
pub fn match_main(
    text: &[Unit],
    pattern: &[Unit],
    loc: usize,
    config: &MatchConfig,
) -> DmpResult<Option<usize>> {
    let loc = loc.min(text.len());

    if text == pattern {
        // Shortcut (potentially not guaranteed by the algorithm)
        return Ok(Some(0));
    }
    if text.is_empty() {
        return Ok(None);
    }
    if text.get(loc..loc + pattern.len()) == Some(pattern) {
        // Perfect match at the perfect spot
        return Ok(Some(loc));
    }
    match_bitap(text, pattern, loc, config)
}
