use std::collections::HashMap;

use yomi_types::{Counts, Occurrence, Term};

/// Occurrence counts keyed by term, then by provenance.
///
/// The length of a bag is its number of distinct terms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccurrenceBag {
    data: HashMap<Term, HashMap<String, u64>>,
}

impl OccurrenceBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` to the occurrence's running total.
    pub fn insert(&mut self, occurrence: Occurrence, count: u64) {
        let slot = self
            .data
            .entry(occurrence.term)
            .or_default()
            .entry(occurrence.provenance)
            .or_default();
        *slot = slot.saturating_add(count);
    }

    /// Count for an occurrence, zero if never inserted.
    pub fn get(&self, occurrence: &Occurrence) -> u64 {
        self.data
            .get(&occurrence.term)
            .and_then(|sources| sources.get(&occurrence.provenance))
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over `(term, provenance, count)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Term, &str, u64)> + '_ {
        self.data.iter().flat_map(|(term, sources)| {
            sources
                .iter()
                .map(move |(provenance, count)| (term, provenance.as_str(), *count))
        })
    }

    /// Conservatively add counts from another bag.
    ///
    /// Assumes the textual sources of both bags overlap: for each term and
    /// provenance the larger of the two counts is kept. Under-counts when the
    /// sources are actually disjoint.
    pub fn extend_overlap(&mut self, other: &OccurrenceBag) {
        self.merge_with(other, u64::max);
    }

    /// Add counts from another bag whose sources are known to be disjoint.
    ///
    /// For each term and provenance the counts are summed. Over-counts when
    /// the sources actually overlap.
    pub fn extend_distinct(&mut self, other: &OccurrenceBag) {
        self.merge_with(other, u64::saturating_add);
    }

    fn merge_with(&mut self, other: &OccurrenceBag, combine: fn(u64, u64) -> u64) {
        for (term, sources) in &other.data {
            let ours = self.data.entry(term.clone()).or_default();
            for (provenance, count) in sources {
                let slot = ours.entry(provenance.clone()).or_default();
                *slot = combine(*slot, *count);
            }
        }
    }

    /// Sum every provenance per term. Recomputed on each call.
    pub fn to_counts(&self) -> Counts {
        self.data
            .iter()
            .map(|(term, sources)| {
                let total = sources.values().fold(0u64, |acc, n| acc.saturating_add(*n));
                (term.clone(), total)
            })
            .collect()
    }
}

impl Extend<(Occurrence, u64)> for OccurrenceBag {
    fn extend<I: IntoIterator<Item = (Occurrence, u64)>>(&mut self, iter: I) {
        for (occurrence, count) in iter {
            self.insert(occurrence, count);
        }
    }
}

impl FromIterator<(Occurrence, u64)> for OccurrenceBag {
    fn from_iter<I: IntoIterator<Item = (Occurrence, u64)>>(iter: I) -> Self {
        let mut bag = Self::new();
        bag.extend(iter);
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(text: &str, reading: &str, provenance: &str) -> Occurrence {
        Occurrence::new(Term::new(text, reading), provenance)
    }

    fn pair() -> (OccurrenceBag, OccurrenceBag) {
        let a: OccurrenceBag = [
            (occ("ア", "あ", "ある出所"), 10),
            (occ("イ", "い", "ある出所"), 5),
        ]
        .into_iter()
        .collect();
        let b: OccurrenceBag = [
            (occ("ア", "あ", "ある出所"), 5),
            (occ("ア", "あ", "違う出所"), 5),
        ]
        .into_iter()
        .collect();
        (a, b)
    }

    #[test]
    fn insert_accumulates() {
        let mut bag = OccurrenceBag::new();
        bag.insert(occ("ア", "あ", "p"), 3);
        bag.insert(occ("ア", "あ", "p"), 4);
        bag.insert(occ("ア", "あ", "q"), 1);
        assert_eq!(bag.get(&occ("ア", "あ", "p")), 7);
        assert_eq!(bag.get(&occ("ア", "あ", "missing")), 0);
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.iter().count(), 2);
    }

    #[test]
    fn extend_overlap_keeps_maximum() {
        let (mut a, b) = pair();
        a.extend_overlap(&b);
        assert_eq!(a.get(&occ("ア", "あ", "ある出所")), 10);
        assert_eq!(a.get(&occ("ア", "あ", "違う出所")), 5);
        assert_eq!(a.get(&occ("イ", "い", "ある出所")), 5);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn extend_overlap_is_idempotent() {
        let (mut a, b) = pair();
        a.extend_overlap(&b);
        let once = a.clone();
        a.extend_overlap(&b);
        assert_eq!(a, once);
    }

    #[test]
    fn extend_distinct_sums() {
        let (mut a, b) = pair();
        a.extend_distinct(&b);
        assert_eq!(a.get(&occ("ア", "あ", "ある出所")), 15);
        assert_eq!(a.get(&occ("ア", "あ", "違う出所")), 5);
        assert_eq!(a.get(&occ("イ", "い", "ある出所")), 5);
    }

    #[test]
    fn to_counts_sums_provenances() {
        let bag: OccurrenceBag = [
            (occ("ア", "あ", "ある出所"), 10),
            (occ("ア", "あ", "違う出所"), 5),
            (occ("イ", "い", "ある出所"), 5),
        ]
        .into_iter()
        .collect();

        let counts = bag.to_counts();
        assert_eq!(counts.get(&Term::new("ア", "あ")), Some(&15));
        assert_eq!(counts.get(&Term::new("イ", "い")), Some(&5));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn to_counts_reflects_later_merges() {
        let (mut a, b) = pair();
        let before = a.to_counts();
        a.extend_distinct(&b);
        let after = a.to_counts();
        assert_eq!(before[&Term::new("ア", "あ")], 10);
        assert_eq!(after[&Term::new("ア", "あ")], 20);
    }
}
