//! Text preparation
//!
//! Turns host text into a [`Sequence`] of comparable units. Two strategies:
//!
//! | Strategy | Unit | Exact? |
//! |----------|------|--------|
//! | [`Codepoints`] | Unicode scalar value | yes |
//! | [`Hashed`] | blake3 hash of the character's UTF-8 bytes | collisions possible, negligible |
//!
//! Units are always per `char`, so indices returned by the algorithms are
//! char indices into the original text.

use crate::algo::StableHasher;
use crate::seq::{Sequence, Unit};

/// Converts host text into comparable units.
pub trait Preparer {
    /// Prepare `text` for comparison.
    fn prepare(&self, text: &str) -> Sequence;
}

/// One unit per Unicode scalar value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Codepoints;

impl Preparer for Codepoints {
    fn prepare(&self, text: &str) -> Sequence {
        Sequence::from(text)
    }
}

/// One unit per character, derived from a stable hash of its bytes.
///
/// Produces the same units in every process. A shared `seed` namespaces the
/// hashes; texts are only comparable when prepared with the same seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hashed {
    seed: u64,
}

impl Hashed {
    /// Create a hashed preparer with a namespace seed
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    fn unit(&self, c: char) -> Unit {
        StableHasher::new()
            .update(&self.seed.to_le_bytes())
            .update_char(c)
            .finish_unit()
    }
}

impl Preparer for Hashed {
    fn prepare(&self, text: &str) -> Sequence {
        text.chars().map(|c| self.unit(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codepoints_matches_sequence_from_str() {
        assert_eq!(Codepoints.prepare("héllo"), Sequence::from("héllo"));
    }

    #[test]
    fn test_hashed_equal_chars_equal_units() {
        let seq = Hashed::default().prepare("abca");
        assert_eq!(seq.len(), 4);
        assert_eq!(seq[0], seq[3]);
        assert_ne!(seq[0], seq[1]);
    }

    #[test]
    fn test_hashed_is_per_char() {
        let seq = Hashed::default().prepare("ὂ᭚");
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_hashed_seed_namespaces() {
        let a = Hashed::with_seed(1).prepare("a");
        let b = Hashed::with_seed(2).prepare("a");
        assert_ne!(a, b);
    }
}
