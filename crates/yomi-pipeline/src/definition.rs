//! Stages over [`Definition`] streams.
//!
//! Counts and terms order a dictionary in two unrelated ways: popularity
//! follows the count order while sequence numbers follow the term order. A
//! typical upgrade therefore pairs counts, sorts by count, stamps popularity,
//! drops the counts, sorts by term and only then stamps sequence numbers.

use std::cmp::Reverse;

use yomi_types::{Counts, Definition};

/// Pair each definition with its term's count (zero if absent).
pub fn definitions_and_counts<'a, I>(
    it: I,
    counts: &'a Counts,
) -> impl Iterator<Item = (Definition, u64)> + 'a
where
    I: IntoIterator<Item = Definition>,
    I::IntoIter: 'a,
{
    it.into_iter().map(move |def| {
        let count = counts.get(&def.term).copied().unwrap_or(0);
        (def, count)
    })
}

/// Collect and sort by descending count. Ties keep their input order.
pub fn sort_by_count<I>(it: I) -> std::vec::IntoIter<(Definition, u64)>
where
    I: IntoIterator<Item = (Definition, u64)>,
{
    let mut items: Vec<_> = it.into_iter().collect();
    items.sort_by_key(|(_, count)| Reverse(*count));
    items.into_iter()
}

/// Set each definition's popularity to its paired count.
pub fn count_as_popularity<I>(it: I) -> impl Iterator<Item = (Definition, u64)>
where
    I: IntoIterator<Item = (Definition, u64)>,
{
    it.into_iter().map(|(def, count)| {
        let popularity = i64::try_from(count).unwrap_or(i64::MAX);
        (def.with_popularity(popularity), count)
    })
}

/// Drop the paired counts.
pub fn only_definitions<I>(it: I) -> impl Iterator<Item = Definition>
where
    I: IntoIterator<Item = (Definition, u64)>,
{
    it.into_iter().map(|(def, _)| def)
}

/// Collect and sort ascending by term (reading, then text).
pub fn sort_by_term<I>(it: I) -> std::vec::IntoIter<Definition>
where
    I: IntoIterator<Item = Definition>,
{
    let mut items: Vec<_> = it.into_iter().collect();
    items.sort_by(|a, b| a.term.cmp(&b.term));
    items.into_iter()
}

/// Set each definition's sequence number to its 0-based stream position.
pub fn position_as_sequence<I>(it: I) -> impl Iterator<Item = Definition>
where
    I: IntoIterator<Item = Definition>,
{
    it.into_iter()
        .enumerate()
        .map(|(position, def)| def.with_sequence(position as i64))
}

/// Append `f(definition)` to the definition tags when it returns a tag.
pub fn add_def_tag<I, F, T>(it: I, mut f: F) -> impl Iterator<Item = Definition>
where
    I: IntoIterator<Item = Definition>,
    F: FnMut(&Definition) -> Option<T>,
    T: AsRef<str>,
{
    it.into_iter().map(move |def| match f(&def) {
        Some(tag) => def.add_def_tag(tag.as_ref()),
        None => def,
    })
}
