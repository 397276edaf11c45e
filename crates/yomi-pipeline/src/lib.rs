//! Lazy stages for building dictionary entry streams.
//!
//! Every stage takes an iterator and returns an iterator, so pipelines read
//! top to bottom:
//!
//! ```rust
//! use yomi_pipeline::{copy_term, rank};
//! use yomi_types::{Counts, Term};
//!
//! let counts = Counts::from([
//!     (Term::new("時時", "ときどき"), 30),
//!     (Term::new("人", "ひと"), 50),
//! ]);
//! let it = rank::from_counts(counts);
//! let it = rank::below_max_rank(it, 80_000);
//! let it = copy_term(it, Term::with_kanji_repetition_marks);
//! let ranks: Vec<_> = it.map(|r| r.to_string()).collect();
//! assert_eq!(ranks, ["人[ひと]#0", "時時[ときどき]#1", "時々[ときどき]#1"]);
//! ```
//!
//! Stages that need the whole input (the sorts and [`rank::from_counts`])
//! collect it first and hand back a `Vec` iterator; all others are one-pass
//! adapters that do no work until pulled.

pub mod definition;
pub mod rank;

use yomi_types::{Term, TermEntry};

/// Replace each entry's term with `f(term)`.
pub fn map_term<I, E, F>(it: I, mut f: F) -> impl Iterator<Item = E>
where
    I: IntoIterator<Item = E>,
    E: TermEntry,
    F: FnMut(&Term) -> Term,
{
    it.into_iter().map(move |entry| {
        let term = f(entry.term());
        entry.with_term(term)
    })
}

/// Yield each entry, followed by a copy carrying `f(term)` when `f` returns
/// a term.
pub fn copy_term<I, E, F>(it: I, mut f: F) -> impl Iterator<Item = E>
where
    I: IntoIterator<Item = E>,
    E: TermEntry + Clone,
    F: FnMut(&Term) -> Option<Term>,
{
    it.into_iter().flat_map(move |entry| {
        let copy = f(entry.term()).map(|term| entry.clone().with_term(term));
        std::iter::once(entry).chain(copy)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use yomi_types::Rank;

    #[test]
    fn copy_term_adds_variant_after_entry() {
        let ranks = vec![Rank::new(Term::new("時時", "ときどき"), 4)];
        let out: Vec<_> = copy_term(ranks, Term::with_kanji_repetition_marks).collect();
        assert_eq!(
            out,
            vec![
                Rank::new(Term::new("時時", "ときどき"), 4),
                Rank::new(Term::new("時々", "ときどき"), 4),
            ]
        );
    }

    #[test]
    fn copy_term_without_match_passes_through() {
        let ranks = vec![Rank::new(Term::new("時間", "じかん"), 0)];
        let out: Vec<_> = copy_term(ranks.clone(), Term::with_kanji_repetition_marks).collect();
        assert_eq!(out, ranks);
    }

    #[test]
    fn map_term_is_one_to_one() {
        let ranks = vec![
            Rank::new(Term::new("ア", ""), 0),
            Rank::new(Term::new("イ", "い"), 1),
        ];
        let out: Vec<_> = map_term(ranks, |t| t.clone().with_default_reading()).collect();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].term, Term::new("ア", "ア"));
        assert_eq!(out[1].rank, 1);
    }
}
