//! fast-dmp - Myers bisection and Bitap fuzzy matching
//!
//! ## Core Concepts
//!
//! **Unit sequences**: text is prepared once into a flat sequence of integer
//! units, so every comparison inside the algorithms is a single integer test.
//!
//! **Tagged outcomes**: bisection returns [`Bisection::Split`] or
//! [`Bisection::NoSplit`] and lets the caller recurse; matching returns
//! `Ok(None)` when nothing scores within the threshold. Only precondition
//! violations are errors.
//!
//! **Per-call configuration**: [`MatchConfig`] and [`DiffConfig`] are plain
//! values passed into each call, so concurrent callers never share settings.
//!
//! ## Modules
//! - `seq`: Comparable unit sequences
//! - `prepare`: Text to unit conversion (codepoints or stable hashes)
//! - `algo`: Bisection, diff driver, alphabet table, Bitap, match driver
//! - `clock`: Clock provider for bisection deadlines
//! - `text`: `&str` convenience wrappers
//! - `batch`: Many independent calls at once (parallel with `parallel`)
//! - `error`: Error types
//!
//! ## Usage
//!
//! ```
//! use fast_dmp::{Bisection, MatchConfig, Sequence, SplitPoint, bisect, match_main};
//!
//! let old = Sequence::from("cat");
//! let new = Sequence::from("map");
//! assert_eq!(bisect(&old, &new, None), Bisection::Split(SplitPoint::new(2, 2)));
//!
//! let text = Sequence::from("this is a test");
//! let pattern = Sequence::from("test");
//! let found = match_main(&text, &pattern, 0, &MatchConfig::default()).unwrap();
//! assert_eq!(found, Some(10));
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Comparable unit sequences
pub mod seq;

/// Text preparation strategies
pub mod prepare;

/// Algorithms: bisect, diff, bitap, match
pub mod algo;

/// Clock provider
pub mod clock;

/// String-level API
pub mod text;

/// Batch operations
pub mod batch;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Sequences
pub use seq::{Sequence, Unit};

// Algorithms
pub use algo::{
    Alphabet, Assembler, Bisection, DiffConfig, DiffStats, Edit, EditScript, MatchConfig, Op,
    SplitPoint, StableHasher, bisect, bisect_with_clock, diff_into, diff_main, diff_with_clock,
    match_bitap, match_main,
};

// Clock
pub use clock::{Clock, SystemClock};

// Text
pub use text::{TextChunk, diff_text, match_text};

// Error types
pub use error::{DmpError, DmpResult};

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Sequence: Send, Sync);
    assert_impl_all!(Alphabet: Send, Sync);
    assert_impl_all!(MatchConfig: Send, Sync, Copy);
    assert_impl_all!(DiffConfig: Send, Sync, Copy);
    assert_impl_all!(EditScript: Send, Sync);
    assert_impl_all!(DmpError: Send, Sync);

    #[test]
    fn test_reference_examples() {
        let split = bisect(&Sequence::from("abc"), &Sequence::from("abc"), None);
        assert_eq!(split, Bisection::Split(SplitPoint::new(3, 3)));

        let config = MatchConfig::new(0.5, 1000, 32);
        let found = match_bitap(&Sequence::from("this is a test"), &Sequence::from("test"), 0, &config);
        assert_eq!(found, Ok(Some(10)));

        let config = MatchConfig::new(0.1, 100, 32);
        let found = match_bitap(&Sequence::from("abcdef"), &Sequence::from("xyz"), 0, &config);
        assert_eq!(found, Ok(None));
    }

    #[test]
    fn test_concurrent_calls_with_own_config() {
        let text = Sequence::from("abcdefghijk");
        let pattern = Sequence::from("efxyhi");
        let handles: Vec<_> = [0.4, 0.3]
            .into_iter()
            .map(|threshold| {
                let (text, pattern) = (text.clone(), pattern.clone());
                std::thread::spawn(move || {
                    let config = MatchConfig::default().with_threshold(threshold).with_distance(100);
                    match_bitap(&text, &pattern, 1, &config)
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![Ok(Some(4)), Ok(None)]);
    }
}
