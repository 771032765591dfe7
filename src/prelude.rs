//! Prelude module for common imports.
//!
//! ```
//! use fast_dmp::prelude::*;
//! ```

// Sequences and preparation
pub use crate::prepare::{Codepoints, Hashed, Preparer};
pub use crate::seq::{Sequence, Unit};

// Algorithms
pub use crate::algo::{
    Alphabet, Assembler, Bisection, DiffConfig, DiffStats, Edit, EditScript, MatchConfig, Op,
    SplitPoint, bisect, bisect_with_clock, diff_into, diff_main, diff_with_clock, match_bitap,
    match_main,
};

// Clock
pub use crate::clock::{Clock, SystemClock};

// Text and batch
pub use crate::batch::{MatchRequest, diff_all, match_all};
pub use crate::text::{TextChunk, diff_text, match_text};

// Error
pub use crate::error::{DmpError, DmpResult};
