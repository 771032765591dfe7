//! Bitap fuzzy matching
//!
//! Locates the best approximate occurrence of a pattern near an expected
//! location, using the bit-parallel Bitap (shift-or) algorithm extended to
//! allow errors.
//!
//! # Scoring
//!
//! Every candidate is scored as `errors / pattern_len + |candidate - loc| / distance`.
//! Lower is better and a candidate is accepted only while its score stays at
//! or below the threshold. Each accepted candidate tightens the threshold, so
//! later candidates must beat it.
//!
//! # Passes
//!
//! 1. Pre-scan: exact occurrences on either side of `loc` tighten the threshold.
//! 2. Error levels `0, 1, 2, ...`: a binary search over the score bounds how far
//!    from `loc` this level may look; the text window is then scanned right to
//!    left, maintaining which pattern prefixes match with at most that many
//!    errors.
//! 3. Stop once even a perfect location cannot beat the threshold with one
//!    more error.

use tracing::trace;

use crate::algo::alphabet::{Alphabet, MAX_PATTERN_BITS};
use crate::error::{DmpError, DmpResult};
use crate::seq::{Unit, index_of, rindex_of};

/// Default score threshold (0.0 = perfection, 1.0 = very loose).
const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default distance at which a positional miss costs a full 1.0 of score.
const DEFAULT_DISTANCE: usize = 1000;

/// Default bit-vector width used for matching.
const DEFAULT_MAX_BITS: usize = 32;

// =============================================================================
// Configuration
// =============================================================================

/// Per-call matching parameters
///
/// Passed by reference into every call; there is no shared mutable
/// configuration, so concurrent callers never observe each other's settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Highest acceptable score.
    /// Default: 0.5
    pub threshold: f64,
    /// How far (in units) from the expected location a match may stray
    /// before the positional penalty alone reaches 1.0. `0` demands an exact
    /// location.
    /// Default: 1000
    pub distance: usize,
    /// Largest pattern the matcher accepts. At most 64.
    /// Default: 32
    pub max_bits: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            distance: DEFAULT_DISTANCE,
            max_bits: DEFAULT_MAX_BITS,
        }
    }
}

impl MatchConfig {
    /// Create config with explicit values.
    pub fn new(threshold: f64, distance: usize, max_bits: usize) -> Self {
        Self { threshold, distance, max_bits }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_distance(mut self, distance: usize) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_max_bits(mut self, max_bits: usize) -> Self {
        self.max_bits = max_bits;
        self
    }

    /// Check that the values can drive a match.
    pub fn validate(&self) -> DmpResult<()> {
        if !self.threshold.is_finite() {
            return Err(DmpError::invalid_config(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        if self.max_bits == 0 || self.max_bits > MAX_PATTERN_BITS {
            return Err(DmpError::invalid_config(format!(
                "max_bits must be in 1..={MAX_PATTERN_BITS}, got {}",
                self.max_bits
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Scoring
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Scorer {
    pattern_len: f64,
    loc: usize,
    distance: usize,
}

impl Scorer {
    /// Score of a match with `errors` errors starting at `x`
    #[inline]
    fn score(&self, errors: usize, x: usize) -> f64 {
        let accuracy = errors as f64 / self.pattern_len;
        let proximity = x.abs_diff(self.loc);
        if self.distance == 0 {
            return if proximity == 0 { accuracy } else { 1.0 };
        }
        accuracy + proximity as f64 / self.distance as f64
    }
}

// =============================================================================
// Main API
// =============================================================================

/// Find the best fuzzy occurrence of `pattern` in `text` near `loc`
///
/// Returns `Ok(None)` when no location scores within the threshold.
///
/// # Errors
///
/// - [`DmpError::PatternTooLarge`] when `pattern.len() > config.max_bits`, checked first
/// - [`DmpError::InvalidConfig`] for a non-finite threshold or `max_bits` outside `1..=64`
/// - [`DmpError::EmptyPattern`] for an empty pattern
pub fn match_bitap(
    text: &[Unit],
    pattern: &[Unit],
    loc: usize,
    config: &MatchConfig,
) -> DmpResult<Option<usize>> {
    match_bitap_observed(text, pattern, loc, config, |_, _| {})
}

/// `match_bitap`, reporting `(errors, threshold)` after every error level
fn match_bitap_observed(
    text: &[Unit],
    pattern: &[Unit],
    loc: usize,
    config: &MatchConfig,
    mut observe: impl FnMut(usize, f64),
) -> DmpResult<Option<usize>> {
    if pattern.len() > config.max_bits {
        return Err(DmpError::PatternTooLarge {
            len: pattern.len(),
            max_bits: config.max_bits,
        });
    }
    config.validate()?;
    let alphabet = Alphabet::build(pattern)?;

    let pattern_len = pattern.len();
    let text_len = text.len();
    let scorer = Scorer {
        pattern_len: pattern_len as f64,
        loc,
        distance: config.distance,
    };

    let mut threshold = config.threshold;
    if let Some(exact) = index_of(text, pattern, loc) {
        threshold = threshold.min(scorer.score(0, exact));
        if let Some(exact) = rindex_of(text, pattern, loc.saturating_add(pattern_len)) {
            threshold = threshold.min(scorer.score(0, exact));
        }
    }
    trace!(loc, pattern_len, text_len, threshold, "bitap pre-scan done");

    let match_mask = 1u64 << (pattern_len - 1);
    let mut best_loc = None;
    let mut bin_max = pattern_len + text_len;
    let mut rd = vec![0u64; pattern_len + text_len + 2];
    let mut last_rd = vec![0u64; pattern_len + text_len + 2];

    for errors in 0..pattern_len {
        // Largest distance from loc still within threshold at this error level
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            if scorer.score(errors, loc.saturating_add(bin_mid)) <= threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }
        // Use the result from this iteration as the maximum for the next
        bin_max = bin_mid;
        let mut start = loc.saturating_add(1).saturating_sub(bin_mid).max(1);
        let finish = loc.saturating_add(bin_mid).min(text_len) + pattern_len;

        rd.fill(0);
        rd[finish + 1] = (1u64 << errors) - 1;
        let mut j = finish;
        while j >= start {
            let char_mask = text.get(j - 1).map_or(0, |&unit| alphabet.mask(unit));
            let exact = ((rd[j + 1] << 1) | 1) & char_mask;
            rd[j] = if errors == 0 {
                exact
            } else {
                exact | (((last_rd[j + 1] | last_rd[j]) << 1) | 1) | last_rd[j + 1]
            };

            if rd[j] & match_mask != 0 {
                let score = scorer.score(errors, j - 1);
                if score <= threshold {
                    threshold = score;
                    best_loc = Some(j - 1);
                    if j - 1 > loc {
                        // When passing loc, don't exceed our current distance from loc
                        start = loc.saturating_mul(2).saturating_sub(j - 1).max(1);
                    } else {
                        // Already past loc, downhill from here on in
                        break;
                    }
                }
            }
            j -= 1;
        }

        observe(errors, threshold);
        if scorer.score(errors + 1, loc) > threshold {
            // No hope for a (better) match at greater error levels
            break;
        }
        std::mem::swap(&mut rd, &mut last_rd);
    }

    trace!(?best_loc, threshold, "bitap done");
    Ok(best_loc)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::Sequence;

    fn bitap(text: &str, pattern: &str, loc: usize, config: &MatchConfig) -> Option<usize> {
        match_bitap(&Sequence::from(text), &Sequence::from(pattern), loc, config).unwrap()
    }

    fn config(threshold: f64, distance: usize) -> MatchConfig {
        MatchConfig::default().with_threshold(threshold).with_distance(distance)
    }

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.distance, 1000);
        assert_eq!(config.max_bits, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let config = MatchConfig::default().with_max_bits(65);
        assert!(matches!(config.validate(), Err(DmpError::InvalidConfig(_))));
        let config = MatchConfig::default().with_max_bits(0);
        assert!(config.validate().is_err());
        let config = MatchConfig::default().with_threshold(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_score() {
        let scorer = Scorer { pattern_len: 4.0, loc: 10, distance: 100 };
        assert_eq!(scorer.score(0, 10), 0.0);
        assert_eq!(scorer.score(1, 10), 0.25);
        assert_eq!(scorer.score(0, 60), 0.5);
        assert_eq!(scorer.score(2, 0), 0.6);
    }

    #[test]
    fn test_score_zero_distance() {
        let scorer = Scorer { pattern_len: 4.0, loc: 10, distance: 0 };
        assert_eq!(scorer.score(1, 10), 0.25);
        assert_eq!(scorer.score(0, 11), 1.0);
    }

    #[test]
    fn test_exact_matches() {
        let config = config(0.5, 100);
        assert_eq!(bitap("abcdefghijk", "fgh", 5, &config), Some(5));
        assert_eq!(bitap("abcdefghijk", "fgh", 0, &config), Some(5));
    }

    #[test]
    fn test_fuzzy_matches() {
        let config = config(0.5, 100);
        assert_eq!(bitap("abcdefghijk", "efxhi", 0, &config), Some(4));
        assert_eq!(bitap("abcdefghijk", "cdefxyhijk", 5, &config), Some(2));
        assert_eq!(bitap("abcdefghijk", "bxy", 1, &config), None);
    }

    #[test]
    fn test_overflow_and_edges() {
        let config = config(0.5, 100);
        assert_eq!(bitap("123456789xx0", "3456789x0", 2, &config), Some(2));
        assert_eq!(bitap("abcdef", "xxabc", 4, &config), Some(0));
        assert_eq!(bitap("abcdef", "defyy", 4, &config), Some(3));
        assert_eq!(bitap("abcdef", "xabcdefy", 0, &config), Some(0));
    }

    #[test]
    fn test_threshold() {
        assert_eq!(bitap("abcdefghijk", "efxyhi", 1, &config(0.4, 100)), Some(4));
        assert_eq!(bitap("abcdefghijk", "efxyhi", 1, &config(0.3, 100)), None);
        assert_eq!(bitap("abcdefghijk", "bcdef", 1, &config(0.0, 100)), Some(1));
    }

    #[test]
    fn test_multiple_select() {
        let config = config(0.5, 100);
        assert_eq!(bitap("abcdexyzabcde", "abccde", 3, &config), Some(0));
        assert_eq!(bitap("abcdexyzabcde", "abccde", 5, &config), Some(8));
    }

    #[test]
    fn test_distance() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        // Strict location
        assert_eq!(bitap(text, "abcdefg", 24, &config(0.5, 10)), None);
        assert_eq!(bitap(text, "abcdxxefg", 1, &config(0.5, 10)), Some(0));
        // Loose location
        assert_eq!(bitap(text, "abcdefg", 24, &config(0.5, 1000)), Some(0));
    }

    #[test]
    fn test_reference_examples() {
        assert_eq!(bitap("this is a test", "test", 0, &config(0.5, 1000)), Some(10));
        assert_eq!(bitap("abcdef", "xyz", 0, &config(0.1, 100)), None);
    }

    #[test]
    fn test_match_at_index_zero_is_not_absent() {
        assert_eq!(bitap("abcdef", "abc", 0, &config(0.0, 100)), Some(0));
    }

    #[test]
    fn test_pattern_too_large() {
        let text = Sequence::from("short text");
        let pattern: Sequence = (0..33).collect();
        let err = match_bitap(&text, &pattern, 0, &MatchConfig::default()).unwrap_err();
        assert_eq!(err, DmpError::PatternTooLarge { len: 33, max_bits: 32 });

        let config = MatchConfig::default().with_max_bits(4);
        let err = match_bitap(&text, &Sequence::from("short"), 0, &config).unwrap_err();
        assert!(err.is_pattern_too_large());
    }

    #[test]
    fn test_pattern_too_large_beats_out_of_range_width() {
        let text = Sequence::from("abc");
        let pattern: Vec<Unit> = (0..70).collect();
        let config = MatchConfig::new(0.5, 1000, 65);
        assert_eq!(
            match_bitap(&text, &pattern, 0, &config),
            Err(DmpError::PatternTooLarge { len: 70, max_bits: 65 })
        );

        // A pattern that fits is still held to the 64-bit cap
        let pattern: Vec<Unit> = (0..10).collect();
        assert!(matches!(
            match_bitap(&text, &pattern, 0, &config),
            Err(DmpError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_full_width_pattern() {
        let pattern: Vec<Unit> = (0..64).collect();
        let mut text: Vec<Unit> = vec![1000; 10];
        text.extend_from_slice(&pattern);
        let config = MatchConfig::default().with_max_bits(64);
        assert_eq!(match_bitap(&text, &pattern, 10, &config), Ok(Some(10)));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let text = Sequence::from("abc");
        let result = match_bitap(&text, &[], 0, &MatchConfig::default());
        assert_eq!(result, Err(DmpError::EmptyPattern));
    }

    #[test]
    fn test_location_past_end_is_not_clamped() {
        // Clamping is the driver's job; raw bitap only sees a distant location
        assert_eq!(bitap("abcdef", "def", 50, &config(0.5, 100)), None);
    }

    #[test]
    fn test_hashed_units() {
        use crate::prepare::{Hashed, Preparer};
        let prep = Hashed::default();
        let text = prep.prepare("the quick brown fox");
        let pattern = prep.prepare("quack");
        assert_eq!(match_bitap(&text, &pattern, 4, &config(0.5, 100)), Ok(Some(4)));
    }

    #[test]
    fn test_threshold_never_increases() {
        let text = Sequence::from("abcdexyzabcde abcxde");
        let pattern = Sequence::from("abccde");
        let mut seen = Vec::new();
        let result = match_bitap_observed(&text, &pattern, 5, &config(0.8, 100), |_, t| {
            seen.push(t)
        });
        assert!(result.unwrap().is_some());
        assert!(!seen.is_empty());
        assert!(seen[0] <= 0.8);
        assert!(seen.windows(2).all(|w| w[1] <= w[0]));
    }
}
