//! Dense frequency ranking.

use std::cmp::Reverse;

use yomi_types::{Rank, Term};

/// Rank terms by descending count, starting at zero.
///
/// Equal counts are ordered by [`Term`] order so the output does not depend
/// on map iteration order. Ranks are dense: every position gets its own rank
/// even when counts tie.
pub fn from_counts<C>(counts: C) -> impl Iterator<Item = Rank>
where
    C: IntoIterator<Item = (Term, u64)>,
{
    let mut pairs: Vec<(Term, u64)> = counts.into_iter().collect();
    pairs.sort_by(|(ta, ca), (tb, cb)| Reverse(ca).cmp(&Reverse(cb)).then_with(|| ta.cmp(tb)));
    pairs
        .into_iter()
        .enumerate()
        .map(|(rank, (term, _count))| Rank::new(term, rank))
}

/// Keep ranks strictly below `max_rank`.
pub fn below_max_rank<I>(it: I, max_rank: usize) -> impl Iterator<Item = Rank>
where
    I: IntoIterator<Item = Rank>,
{
    it.into_iter().filter(move |r| r.rank < max_rank)
}
