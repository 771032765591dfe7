//! Algorithm implementations.
//!
//! - `bisect`: Myers middle-snake bisection with deadline
//! - `diff`: recursive diff driver and edit-script assembly
//! - `alphabet`: Bitap pattern bitmask table
//! - `bitap`: Bitap fuzzy matching
//! - `matcher`: match driver with exact-hit shortcuts
//! - `hash`: Stable hashing utilities

mod alphabet;
mod bisect;
mod bitap;
mod diff;
mod hash;
mod matcher;

pub use alphabet::{Alphabet, MAX_PATTERN_BITS};
pub use bisect::{Bisection, SplitPoint, bisect, bisect_with_clock};
pub use bitap::{MatchConfig, match_bitap};
pub use diff::{
    Assembler, DiffConfig, DiffStats, Edit, EditScript, Op, diff_into, diff_main, diff_with_clock,
};
pub use hash::StableHasher;
pub use matcher::match_main;
