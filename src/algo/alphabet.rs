//! Bitap alphabet table
//!
//! Maps every distinct unit of a pattern to a bitmask with a 1 in each
//! position where that unit occurs. Position `i` of a pattern of length `n`
//! owns bit `n - i - 1`, so the first unit sits in the highest bit.
//!
//! ```text
//! pattern "abca"  ->  a: 0b1001   b: 0b0100   c: 0b0010
//! ```

use rustc_hash::FxHashMap;

use crate::error::{DmpError, DmpResult};
use crate::seq::Unit;

/// Widest pattern a `u64` bit-vector can represent.
pub const MAX_PATTERN_BITS: usize = u64::BITS as usize;

/// Per-pattern unit → bitmask table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    masks: FxHashMap<Unit, u64>,
}

impl Alphabet {
    /// Build the table for `pattern`
    ///
    /// Rejects empty patterns and patterns wider than [`MAX_PATTERN_BITS`].
    pub fn build(pattern: &[Unit]) -> DmpResult<Self> {
        let len = pattern.len();
        if len == 0 {
            return Err(DmpError::EmptyPattern);
        }
        if len > MAX_PATTERN_BITS {
            return Err(DmpError::PatternTooLarge { len, max_bits: MAX_PATTERN_BITS });
        }

        let mut masks = FxHashMap::with_capacity_and_hasher(len, Default::default());
        for (i, &unit) in pattern.iter().enumerate() {
            *masks.entry(unit).or_insert(0) |= 1u64 << (len - i - 1);
        }
        Ok(Self { masks })
    }

    /// Mask for `unit`, if it occurs in the pattern
    #[inline]
    pub fn lookup(&self, unit: Unit) -> Option<u64> {
        self.masks.get(&unit).copied()
    }

    /// Mask for `unit`, `0` when absent
    #[inline]
    pub fn mask(&self, unit: Unit) -> u64 {
        self.lookup(unit).unwrap_or(0)
    }

    /// Number of distinct units in the pattern
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}
