//! Comparable unit sequences
//!
//! Both algorithms operate on a flat sequence of small integers ("units").
//! How text becomes units is decided by the caller (see [`crate::prepare`]);
//! once built, equality of two units is a single integer comparison.
//!
//! Algorithms borrow `&[Unit]` for the duration of one call, so sub-ranges
//! handed to recursive calls are free.

use std::fmt;
use std::ops::Deref;

use smallvec::SmallVec;

/// A single comparable unit (a codepoint or a signed hash value).
pub type Unit = i64;

/// Inline capacity before a sequence spills to the heap.
const INLINE_UNITS: usize = 32;

/// Immutable ordered sequence of comparable units
///
/// # Memory Layout
///
/// - Up to 32 units are stored inline (no heap allocation)
/// - Longer sequences spill to a single heap buffer
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequence {
    units: SmallVec<[Unit; INLINE_UNITS]>,
}

impl Sequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence from already-prepared units
    pub fn from_units(units: impl IntoIterator<Item = Unit>) -> Self {
        Self {
            units: units.into_iter().collect(),
        }
    }

    /// Number of units
    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check whether the sequence has no units
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Borrow the units
    #[inline]
    pub fn as_units(&self) -> &[Unit] {
        &self.units
    }
}

impl Deref for Sequence {
    type Target = [Unit];

    #[inline]
    fn deref(&self) -> &[Unit] {
        &self.units
    }
}

impl AsRef<[Unit]> for Sequence {
    fn as_ref(&self) -> &[Unit] {
        &self.units
    }
}

impl From<&[Unit]> for Sequence {
    fn from(units: &[Unit]) -> Self {
        Self {
            units: SmallVec::from_slice(units),
        }
    }
}

impl From<Vec<Unit>> for Sequence {
    fn from(units: Vec<Unit>) -> Self {
        Self {
            units: SmallVec::from_vec(units),
        }
    }
}

/// Codepoint preparation; equal units mean equal characters.
impl From<&str> for Sequence {
    fn from(text: &str) -> Self {
        Self::from_units(text.chars().map(|c| Unit::from(u32::from(c))))
    }
}

impl FromIterator<Unit> for Sequence {
    fn from_iter<I: IntoIterator<Item = Unit>>(iter: I) -> Self {
        Self::from_units(iter)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.units.iter()).finish()
    }
}

// =============================================================================
// Slice helpers shared by the algorithms
// =============================================================================

/// Length of the common prefix of two unit slices
pub fn common_prefix(a: &[Unit], b: &[Unit]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Length of the common suffix of two unit slices
pub fn common_suffix(a: &[Unit], b: &[Unit]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// First index `>= from` where `needle` occurs in `haystack`
///
/// An empty needle matches at `from` when `from <= haystack.len()`.
pub fn index_of(haystack: &[Unit], needle: &[Unit], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(from);
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}

/// Last index `<= at_most` where `needle` occurs in `haystack`
pub fn rindex_of(haystack: &[Unit], needle: &[Unit], at_most: usize) -> Option<usize> {
    let last_start = haystack.len().checked_sub(needle.len())?;
    let upper = at_most.min(last_start);
    (0..=upper)
        .rev()
        .find(|&i| &haystack[i..i + needle.len()] == needle)
}
