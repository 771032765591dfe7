//! Diff driver and edit-script assembly
//!
//! Drives [`bisect_with_clock`] over shrinking sub-ranges and assembles the
//! result into an [`EditScript`]. This is a pure algorithm module: it works
//! on unit slices and reports ranges into them, never copies of the text.
//!
//! # Algorithm
//!
//! ```text
//! diff(a, b):
//!   a == b                -> Equal
//!   strip common prefix/suffix (Equal)
//!   one side empty        -> Insert / Delete
//!   shorter inside longer -> Insert|Delete, Equal, Insert|Delete
//!   shorter is one unit   -> Delete, Insert
//!   bisect(a, b)
//!     Split(x, y)         -> diff(a[..x], b[..y]); diff(a[x..], b[y..])
//!     NoSplit             -> Delete, Insert
//! ```
//!
//! All recursive calls share one deadline, computed once from
//! [`DiffConfig::timeout`].
//!
//! # Output Shape
//!
//! Between two equalities the script holds at most one `Delete` followed by
//! at most one `Insert`; adjacent equalities are merged.

use std::ops::Range;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::algo::bisect::{Bisection, SplitPoint, bisect_with_clock};
use crate::clock::{Clock, SystemClock};
use crate::seq::{Unit, common_prefix, common_suffix, index_of};

/// Default time budget for one diff.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

// =============================================================================
// Public Types
// =============================================================================

/// Configuration for the diff driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffConfig {
    /// Time budget for the whole diff. `None` runs to completion.
    /// Default: 1 second
    pub timeout: Option<Duration>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl DiffConfig {
    /// Create config with a custom time budget.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Create config that never gives up (always an optimal diff).
    pub fn unbounded() -> Self {
        Self { timeout: None }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Deadline for a diff starting at `now`
    pub fn deadline_from(&self, now: Instant) -> Option<Instant> {
        self.timeout.and_then(|timeout| now.checked_add(timeout))
    }
}

/// Kind of an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Units present in both texts
    Equal,
    /// Units only in the old text
    Delete,
    /// Units only in the new text
    Insert,
}

/// One run of the edit script, as ranges into the two input texts
///
/// A `Delete` has an empty `new` range marking where it sits in the new
/// text; an `Insert` has an empty `old` range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edit {
    pub op: Op,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

impl Edit {
    pub fn equal(old: Range<usize>, new: Range<usize>) -> Self {
        debug_assert_eq!(old.len(), new.len());
        Self { op: Op::Equal, old, new }
    }

    pub fn delete(old: Range<usize>, at_new: usize) -> Self {
        Self { op: Op::Delete, old, new: at_new..at_new }
    }

    pub fn insert(new: Range<usize>, at_old: usize) -> Self {
        Self { op: Op::Insert, old: at_old..at_old, new }
    }

    /// Number of units covered by this edit
    pub fn len(&self) -> usize {
        match self.op {
            Op::Equal | Op::Delete => self.old.len(),
            Op::Insert => self.new.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unit counts of an edit script
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    /// Units kept unchanged
    pub equal: usize,
    /// Units inserted
    pub inserted: usize,
    /// Units deleted
    pub deleted: usize,
}

impl DiffStats {
    /// Total number of changed units
    pub fn edit_count(&self) -> usize {
        self.inserted + self.deleted
    }

    /// Check if there are no changes
    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0
    }
}

// =============================================================================
// Assembler
// =============================================================================

/// Receives the edits produced by the diff driver, in text order.
pub trait Assembler {
    /// Record one edit.
    fn push(&mut self, edit: Edit);

    /// Bisection gave up on `old`/`new`: the whole range becomes delete + insert.
    fn on_no_split(&mut self, old: Range<usize>, new: Range<usize>) {
        let (old_end, new_start) = (old.end, new.start);
        self.push(Edit::delete(old, new_start));
        self.push(Edit::insert(new, old_end));
    }

    /// Bisection split `old`/`new` at `point` (absolute coordinates). Called
    /// before the driver recurses into both halves.
    fn on_split(&mut self, point: SplitPoint, old: Range<usize>, new: Range<usize>) {
        let _ = (point, old, new);
    }
}

/// Ordered list of edits turning the old text into the new one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct EditScript {
    edits: Vec<Edit>,
}

impl Assembler for EditScript {
    fn push(&mut self, edit: Edit) {
        if edit.is_empty() {
            return;
        }

        if edit.op == Op::Equal {
            match self.edits.last_mut() {
                Some(last) if last.op == Op::Equal => {
                    last.old.end = edit.old.end;
                    last.new.end = edit.new.end;
                }
                _ => self.edits.push(edit),
            }
            return;
        }

        // Collapse the trailing change run into one Delete and one Insert
        let run_start = self
            .edits
            .iter()
            .rposition(|e| e.op == Op::Equal)
            .map_or(0, |idx| idx + 1);
        let (old_start, new_start) = self
            .edits
            .get(run_start)
            .map_or((edit.old.start, edit.new.start), |e| (e.old.start, e.new.start));
        self.edits.truncate(run_start);

        let old = old_start..edit.old.end;
        let new = new_start..edit.new.end;
        if !old.is_empty() {
            self.edits.push(Edit::delete(old.clone(), new.start));
        }
        if !new.is_empty() {
            self.edits.push(Edit::insert(new, old.end));
        }
    }
}

impl EditScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn into_edits(self) -> Vec<Edit> {
        self.edits
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edit> {
        self.edits.iter()
    }

    /// Edits of one kind, in text order
    pub fn of_op(&self, op: Op) -> impl Iterator<Item = &Edit> + '_ {
        self.edits.iter().filter(move |e| e.op == op)
    }

    pub fn insertions(&self) -> impl Iterator<Item = &Edit> + '_ {
        self.of_op(Op::Insert)
    }

    pub fn deletions(&self) -> impl Iterator<Item = &Edit> + '_ {
        self.of_op(Op::Delete)
    }

    pub fn equalities(&self) -> impl Iterator<Item = &Edit> + '_ {
        self.of_op(Op::Equal)
    }

    /// Unit counts per operation
    pub fn stats(&self) -> DiffStats {
        self.edits.iter().fold(DiffStats::default(), |mut stats, edit| {
            match edit.op {
                Op::Equal => stats.equal += edit.len(),
                Op::Delete => stats.deleted += edit.len(),
                Op::Insert => stats.inserted += edit.len(),
            }
            stats
        })
    }

    /// Inserted plus deleted units
    pub fn edit_distance(&self) -> usize {
        self.stats().edit_count()
    }

    /// Levenshtein distance, counting a paired delete + insert as substitutions
    pub fn levenshtein(&self) -> usize {
        let mut distance = 0;
        let mut inserted = 0;
        let mut deleted = 0;
        for edit in &self.edits {
            match edit.op {
                Op::Insert => inserted += edit.len(),
                Op::Delete => deleted += edit.len(),
                Op::Equal => {
                    distance += inserted.max(deleted);
                    inserted = 0;
                    deleted = 0;
                }
            }
        }
        distance + inserted.max(deleted)
    }

    /// Check whether the two texts were equal
    pub fn is_identity(&self) -> bool {
        self.edits.iter().all(|e| e.op == Op::Equal)
    }

    /// Rebuild the old text from its equal and deleted runs
    pub fn old_units(&self, text1: &[Unit]) -> Vec<Unit> {
        self.edits
            .iter()
            .filter(|e| e.op != Op::Insert)
            .flat_map(|e| text1[e.old.clone()].iter().copied())
            .collect()
    }

    /// Rebuild the new text from its equal and inserted runs
    pub fn new_units(&self, text2: &[Unit]) -> Vec<Unit> {
        self.edits
            .iter()
            .filter(|e| e.op != Op::Delete)
            .flat_map(|e| text2[e.new.clone()].iter().copied())
            .collect()
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a Edit;
    type IntoIter = std::slice::Iter<'a, Edit>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}

// =============================================================================
// Main API
// =============================================================================

/// Diff two sequences, timed by the system clock
pub fn diff_main(text1: &[Unit], text2: &[Unit], config: &DiffConfig) -> EditScript {
    diff_with_clock(text1, text2, config, &SystemClock)
}

/// Diff two sequences, timed by `clock`
pub fn diff_with_clock<C: Clock + ?Sized>(
    text1: &[Unit],
    text2: &[Unit],
    config: &DiffConfig,
    clock: &C,
) -> EditScript {
    let deadline = config.deadline_from(clock.now());
    let mut script = EditScript::new();
    diff_into(text1, text2, deadline, clock, &mut script);
    script
}

/// Diff two sequences into a caller-provided assembler
pub fn diff_into<C, A>(
    text1: &[Unit],
    text2: &[Unit],
    deadline: Option<Instant>,
    clock: &C,
    out: &mut A,
) where
    C: Clock + ?Sized,
    A: Assembler + ?Sized,
{
    let mut driver = Driver { text1, text2, deadline, clock, out };
    driver.diff(0..text1.len(), 0..text2.len());
}

// =============================================================================
// Driver
// =============================================================================

struct Driver<'a, C: ?Sized, A: ?Sized> {
    text1: &'a [Unit],
    text2: &'a [Unit],
    deadline: Option<Instant>,
    clock: &'a C,
    out: &'a mut A,
}

impl<C, A> Driver<'_, C, A>
where
    C: Clock + ?Sized,
    A: Assembler + ?Sized,
{
    fn diff(&mut self, old: Range<usize>, new: Range<usize>) {
        let (text1, text2) = (self.text1, self.text2);
        let a = &text1[old.clone()];
        let b = &text2[new.clone()];

        if a == b {
            self.out.push(Edit::equal(old, new));
            return;
        }

        let prefix = common_prefix(a, b);
        let suffix = common_suffix(&a[prefix..], &b[prefix..]);
        if prefix > 0 {
            self.out.push(Edit::equal(
                old.start..old.start + prefix,
                new.start..new.start + prefix,
            ));
        }

        self.compute(
            old.start + prefix..old.end - suffix,
            new.start + prefix..new.end - suffix,
        );

        if suffix > 0 {
            self.out.push(Edit::equal(old.end - suffix..old.end, new.end - suffix..new.end));
        }
    }

    /// Diff two ranges that share no common prefix or suffix
    fn compute(&mut self, old: Range<usize>, new: Range<usize>) {
        if old.is_empty() {
            self.out.push(Edit::insert(new, old.start));
            return;
        }
        if new.is_empty() {
            self.out.push(Edit::delete(old, new.start));
            return;
        }

        let (text1, text2) = (self.text1, self.text2);
        let a = &text1[old.clone()];
        let b = &text2[new.clone()];

        // Shorter text inside the longer one
        if a.len() > b.len() {
            if let Some(at) = index_of(a, b, 0) {
                let mid = old.start + at;
                self.out.push(Edit::delete(old.start..mid, new.start));
                self.out.push(Edit::equal(mid..mid + b.len(), new.clone()));
                self.out.push(Edit::delete(mid + b.len()..old.end, new.end));
                return;
            }
        } else if let Some(at) = index_of(b, a, 0) {
            let mid = new.start + at;
            self.out.push(Edit::insert(new.start..mid, old.start));
            self.out.push(Edit::equal(old.clone(), mid..mid + a.len()));
            self.out.push(Edit::insert(mid + a.len()..new.end, old.end));
            return;
        }

        // Single unit that is not in the other text
        if a.len() == 1 || b.len() == 1 {
            self.out.on_no_split(old, new);
            return;
        }

        match bisect_with_clock(a, b, self.deadline, self.clock) {
            Bisection::Split(point) => {
                if (point.x == 0 && point.y == 0) || (point.x == a.len() && point.y == b.len()) {
                    // A split that does not shrink the problem would recurse forever
                    debug!(x = point.x, y = point.y, "degenerate split, falling back");
                    self.out.on_no_split(old, new);
                    return;
                }
                let (x, y) = (old.start + point.x, new.start + point.y);
                self.out.on_split(SplitPoint::new(x, y), old.clone(), new.clone());
                self.diff(old.start..x, new.start..y);
                self.diff(x..old.end, y..new.end);
            }
            Bisection::NoSplit => self.out.on_no_split(old, new),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
