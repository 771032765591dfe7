//! Batch operations over independent inputs.
//!
//! Every call gets the same read-only configuration snapshot. With the
//! `parallel` feature the calls run on the rayon thread pool, otherwise in
//! sequence. Results are always in input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::algo::{DiffConfig, EditScript, MatchConfig, diff_main, match_main};
use crate::error::DmpResult;
use crate::seq::Sequence;

/// One fuzzy-search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRequest {
    pub text: Sequence,
    pub pattern: Sequence,
    pub loc: usize,
}

impl MatchRequest {
    pub fn new(text: impl Into<Sequence>, pattern: impl Into<Sequence>, loc: usize) -> Self {
        Self {
            text: text.into(),
            pattern: pattern.into(),
            loc,
        }
    }
}

/// Run [`match_main`] for every request.
pub fn match_all(requests: &[MatchRequest], config: &MatchConfig) -> Vec<DmpResult<Option<usize>>> {
    let run = |req: &MatchRequest| match_main(&req.text, &req.pattern, req.loc, config);

    #[cfg(feature = "parallel")]
    {
        requests.par_iter().map(run).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        requests.iter().map(run).collect()
    }
}

/// Run [`diff_main`] for every `(old, new)` pair.
pub fn diff_all(pairs: &[(Sequence, Sequence)], config: &DiffConfig) -> Vec<EditScript> {
    let run = |(old, new): &(Sequence, Sequence)| diff_main(old, new, config);

    #[cfg(feature = "parallel")]
    {
        pairs.par_iter().map(run).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        pairs.iter().map(run).collect()
    }
}
