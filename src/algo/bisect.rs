//! Myers middle-snake bisection
//!
//! Finds the split point of an optimal edit path between two unit sequences
//! by running the O(ND) search forward from the start and backward from the
//! end at the same time, until the two frontiers overlap.
//!
//! The caller decides what to do with the answer: recurse on both halves of
//! a [`SplitPoint`], or treat the whole range as delete + insert on
//! [`Bisection::NoSplit`]. See [`crate::algo::diff_main`] for the default
//! driver.
//!
//! # Tie-breaks
//!
//! Myers' algorithm has many shortest paths. On each diagonal `k` at depth
//! `d` the search extends from `k + 1` (insertion) when `k == -d`, from
//! `k - 1` (deletion) when `k == d`, and otherwise from whichever neighbour
//! reached further, preferring deletion on ties. These rules are fixed so
//! that output is reproducible across implementations.
//!
//! # Deadline
//!
//! The clock is polled once per depth `d`, before either half runs. Once the
//! deadline has passed the search returns `NoSplit`, which is always a valid
//! (if suboptimal) answer.
//!
//! # References
//!
//! - Myers, E.W. "An O(ND) Difference Algorithm and Its Variations" (1986)

use std::time::Instant;

use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::seq::Unit;

/// Diagonal not yet reached.
const UNREACHED: isize = -1;

// =============================================================================
// Public Types
// =============================================================================

/// Point where both texts can be cut into independently diffable halves
///
/// `text1[..x]` pairs with `text2[..y]`, `text1[x..]` pairs with `text2[y..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitPoint {
    pub x: usize,
    pub y: usize,
}

impl SplitPoint {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The leading pair of sub-ranges
    pub fn heads<'a>(&self, text1: &'a [Unit], text2: &'a [Unit]) -> (&'a [Unit], &'a [Unit]) {
        (&text1[..self.x], &text2[..self.y])
    }

    /// The trailing pair of sub-ranges
    pub fn tails<'a>(&self, text1: &'a [Unit], text2: &'a [Unit]) -> (&'a [Unit], &'a [Unit]) {
        (&text1[self.x..], &text2[self.y..])
    }
}

/// Outcome of one bisection call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Bisection {
    /// A middle snake was found
    Split(SplitPoint),
    /// Deadline passed or no snake exists; diff the range as delete + insert
    NoSplit,
}

impl Bisection {
    pub fn is_split(&self) -> bool {
        matches!(self, Bisection::Split(_))
    }

    pub fn split_point(&self) -> Option<SplitPoint> {
        match self {
            Bisection::Split(point) => Some(*point),
            Bisection::NoSplit => None,
        }
    }
}

// =============================================================================
// Diagonal Vector
// =============================================================================

/// Furthest x reached per diagonal, indexed by signed diagonal number
///
/// Slots outside the allocated range read as [`UNREACHED`] and ignore writes.
struct DiagonalVec {
    slots: Vec<isize>,
    offset: isize,
}

impl DiagonalVec {
    fn new(max_d: isize) -> Self {
        let len = usize::try_from(2 * max_d + 1).unwrap_or(0);
        Self {
            slots: vec![UNREACHED; len],
            offset: max_d,
        }
    }

    #[inline]
    fn index(&self, k: isize) -> Option<usize> {
        usize::try_from(self.offset + k)
            .ok()
            .filter(|&idx| idx < self.slots.len())
    }

    #[inline]
    fn at(&self, k: isize) -> isize {
        self.index(k).map_or(UNREACHED, |idx| self.slots[idx])
    }

    /// Value on diagonal `k` if it has been reached
    #[inline]
    fn reached(&self, k: isize) -> Option<isize> {
        Some(self.at(k)).filter(|&x| x != UNREACHED)
    }

    #[inline]
    fn set(&mut self, k: isize, x: isize) {
        if let Some(idx) = self.index(k) {
            self.slots[idx] = x;
        }
    }

    /// Starting x on diagonal `k` at depth `d`
    #[inline]
    fn advance(&self, k: isize, d: isize) -> isize {
        if k == -d || (k != d && self.at(k - 1) < self.at(k + 1)) {
            self.at(k + 1)
        } else {
            self.at(k - 1) + 1
        }
    }
}

#[inline]
fn units_eq(text1: &[Unit], i: isize, text2: &[Unit], j: isize) -> bool {
    let (Ok(i), Ok(j)) = (usize::try_from(i), usize::try_from(j)) else {
        return false;
    };
    match (text1.get(i), text2.get(j)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn split(x: isize, y: isize, d: isize) -> Bisection {
    match (usize::try_from(x), usize::try_from(y)) {
        (Ok(x), Ok(y)) => {
            trace!(x, y, d, "middle snake found");
            Bisection::Split(SplitPoint { x, y })
        }
        _ => Bisection::NoSplit,
    }
}

// =============================================================================
// Main API
// =============================================================================

/// Bisect two sequences using the system clock for the deadline
pub fn bisect(text1: &[Unit], text2: &[Unit], deadline: Option<Instant>) -> Bisection {
    bisect_with_clock(text1, text2, deadline, &SystemClock)
}

/// Bisect two sequences, polling `clock` once per search depth
pub fn bisect_with_clock<C: Clock + ?Sized>(
    text1: &[Unit],
    text2: &[Unit],
    deadline: Option<Instant>,
    clock: &C,
) -> Bisection {
    // Slice lengths never exceed isize::MAX
    let len1 = text1.len() as isize;
    let len2 = text2.len() as isize;
    let delta = len1 - len2;
    let max_d = (len1 + len2 + 1) / 2;
    // With an odd delta the forward pass detects the overlap, otherwise the backward pass
    let front = delta % 2 != 0;

    let mut v1 = DiagonalVec::new(max_d);
    let mut v2 = DiagonalVec::new(max_d);
    v1.set(1, 0);
    v2.set(1, 0);

    // Diagonals that ran off the edge of the grid are skipped on later passes
    let mut k1start = 0;
    let mut k1end = 0;
    let mut k2start = 0;
    let mut k2end = 0;

    for d in 0..max_d {
        if let Some(deadline) = deadline {
            if clock.now() >= deadline {
                debug!(d, max_d, "bisection deadline reached");
                return Bisection::NoSplit;
            }
        }

        // Forward path
        let mut k1 = -d + k1start;
        while k1 <= d - k1end {
            let mut x1 = v1.advance(k1, d);
            let mut y1 = x1 - k1;
            while x1 < len1 && y1 < len2 && units_eq(text1, x1, text2, y1) {
                x1 += 1;
                y1 += 1;
            }
            v1.set(k1, x1);

            if x1 > len1 {
                k1end += 2;
            } else if y1 > len2 {
                k1start += 2;
            } else if front {
                if let Some(x2) = v2.reached(delta - k1) {
                    if x1 >= len1 - x2 {
                        return split(x1, y1, d);
                    }
                }
            }
            k1 += 2;
        }

        // Reverse path
        let mut k2 = -d + k2start;
        while k2 <= d - k2end {
            let mut x2 = v2.advance(k2, d);
            let mut y2 = x2 - k2;
            while x2 < len1
                && y2 < len2
                && units_eq(text1, len1 - x2 - 1, text2, len2 - y2 - 1)
            {
                x2 += 1;
                y2 += 1;
            }
            v2.set(k2, x2);

            if x2 > len1 {
                k2end += 2;
            } else if y2 > len2 {
                k2start += 2;
            } else if !front {
                let k1 = delta - k2;
                if let Some(x1) = v1.reached(k1) {
                    if x1 >= len1 - x2 {
                        return split(x1, x1 - k1, d);
                    }
                }
            }
            k2 += 2;
        }
    }

    trace!(max_d, "no middle snake");
    Bisection::NoSplit
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use super::*;
    use crate::seq::Sequence;

    fn seq(s: &str) -> Sequence {
        Sequence::from(s)
    }

    /// Clock frozen at one instant that counts how often it is read
    struct CountingClock {
        now: Instant,
        polls: Cell<usize>,
    }

    impl CountingClock {
        fn new() -> Self {
            Self { now: Instant::now(), polls: Cell::new(0) }
        }
    }

    impl Clock for CountingClock {
        fn now(&self) -> Instant {
            self.polls.set(self.polls.get() + 1);
            self.now
        }
    }

    #[test]
    fn test_cat_map_splits_after_common_a() {
        let result = bisect(&seq("cat"), &seq("map"), None);
        assert_eq!(result, Bisection::Split(SplitPoint::new(2, 2)));
    }

    #[test]
    fn test_cat_cats_front_mode() {
        // Odd delta: the forward pass finds the overlap on diagonal -1
        let result = bisect(&seq("cat"), &seq("cats"), None);
        assert_eq!(result, Bisection::Split(SplitPoint::new(3, 4)));
    }

    #[test]
    fn test_identical_texts_split_at_end() {
        let text = seq("abcdef");
        let result = bisect(&text, &text, None);
        assert_eq!(result, Bisection::Split(SplitPoint::new(6, 6)));
    }

    #[test]
    fn test_identical_texts_found_at_depth_zero() {
        let clock = CountingClock::new();
        let deadline = clock.now + Duration::from_secs(60);
        let text = seq("hello world");

        let result = bisect_with_clock(&text, &text, Some(deadline), &clock);
        assert_eq!(result.split_point(), Some(SplitPoint::new(11, 11)));
        assert_eq!(clock.polls.get(), 1);
    }

    #[test]
    fn test_no_common_unit_is_no_split() {
        assert_eq!(bisect(&seq("a"), &seq("b"), None), Bisection::NoSplit);
        assert_eq!(bisect(&seq("abc"), &seq("xyz"), None), Bisection::NoSplit);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(bisect(&seq(""), &seq(""), None), Bisection::NoSplit);
        assert_eq!(bisect(&seq(""), &seq("abc"), None), Bisection::NoSplit);
        assert_eq!(bisect(&seq("abc"), &seq(""), None), Bisection::NoSplit);
    }

    #[test]
    fn test_past_deadline_polls_once() {
        let clock = CountingClock::new();
        let result = bisect_with_clock(&seq("cat"), &seq("map"), Some(clock.now), &clock);
        assert_eq!(result, Bisection::NoSplit);
        assert_eq!(clock.polls.get(), 1);
    }

    #[test]
    fn test_clock_polled_once_per_depth() {
        let clock = CountingClock::new();
        let deadline = clock.now + Duration::from_secs(60);
        // Split found at d = 2, so depths 0, 1, 2 are entered
        let result = bisect_with_clock(&seq("cat"), &seq("map"), Some(deadline), &clock);
        assert!(result.is_split());
        assert_eq!(clock.polls.get(), 3);
    }

    #[test]
    fn test_no_deadline_never_polls() {
        let clock = CountingClock::new();
        let _ = bisect_with_clock(&seq("abcxyz"), &seq("xyzabc"), None, &clock);
        assert_eq!(clock.polls.get(), 0);
    }

    #[test]
    fn test_split_point_halves() {
        let a = seq("cat");
        let b = seq("map");
        let point = SplitPoint::new(2, 2);
        let (h1, h2) = point.heads(&a, &b);
        let (t1, t2) = point.tails(&a, &b);
        assert_eq!(h1, &*seq("ca"));
        assert_eq!(h2, &*seq("ma"));
        assert_eq!(t1, &*seq("t"));
        assert_eq!(t2, &*seq("p"));
    }

    #[test]
    fn test_diagonal_vec_bounds() {
        let mut v = DiagonalVec::new(0);
        // Single slot for diagonal 0; the initial +1 write falls outside
        v.set(1, 0);
        assert_eq!(v.at(1), UNREACHED);
        assert_eq!(v.reached(0), None);
        v.set(0, 3);
        assert_eq!(v.reached(0), Some(3));
        assert_eq!(v.at(-5), UNREACHED);
    }
}
