//! Rank dictionaries built from corpus bags.

use time::Date;
use yomi_archive::Dictionary;
use yomi_pipeline::{copy_term, rank};
use yomi_types::{Rank, Term};

use crate::corpora::{Corpus, CorpusBag};
use crate::{AUTHOR, URL};

/// Default `--max`: ranks at or above this are dropped.
pub const DEFAULT_MAX_RANK: usize = 80_000;

/// `data v<release> yomi v<date> <units>`
pub fn revision(corpus: Corpus, read: &CorpusBag, today: Date) -> String {
    format!(
        "data v{} yomi v{today} {}",
        corpus.source().release,
        read.units
    )
}

/// Rank every term of `read`, keep those below `max_rank` and attach the
/// corpus metadata.
pub fn rank_dictionary(
    corpus: Corpus,
    read: &CorpusBag,
    max_rank: usize,
    today: Date,
) -> Dictionary<Rank> {
    let it = rank::from_counts(read.bag.to_counts());
    let it = rank::below_max_rank(it, max_rank);
    let data: Vec<Rank> = if corpus.adds_repetition_marks() {
        copy_term(it, Term::with_kanji_repetition_marks).collect()
    } else {
        it.collect()
    };

    let source = corpus.source();
    Dictionary::new(data)
        .with_title(source.title)
        .with_revision(revision(corpus, read, today))
        .with_author(AUTHOR)
        .with_url(URL)
        .with_description(source.description)
        .with_attribution(source.attribution)
}
