//! Upgrade of the 新明解国語辞典 term dictionary.
//!
//! The source dictionary marks important headwords with `⁑` (most important)
//! and `⁎` (important) inside the term and the definition text. The upgrade
//! turns those marks into definition tags, stamps corpus popularity and
//! sequence numbers, and adds 々 spellings.

use time::Date;
use yomi_archive::Dictionary;
use yomi_pipeline::definition::{
    add_def_tag, count_as_popularity, definitions_and_counts, only_definitions,
    position_as_sequence, sort_by_count, sort_by_term,
};
use yomi_pipeline::{copy_term, map_term};
use yomi_types::{Counts, Definition, Term};

pub const TITLE: &str = "新明解国語辞典";
pub const AUTHOR: &str = "Yoga, uncomputable";

const MOST_IMPORTANT: char = '⁑';
const IMPORTANT: char = '⁎';

pub fn tag_importance(def: &Definition) -> Option<&'static str> {
    let text = def.definition();
    if text.contains(MOST_IMPORTANT) {
        Some("最重要語")
    } else if text.contains(IMPORTANT) {
        Some("重要語")
    } else {
        None
    }
}

pub fn remove_stars(term: &Term) -> Term {
    let strip = |s: &str| s.replace([MOST_IMPORTANT, IMPORTANT], "");
    Term::new(strip(&term.text), strip(&term.reading))
}

pub fn revision(today: Date) -> String {
    format!("次元突破版{today}")
}

/// Run the upgrade pipeline over `dict` with popularity taken from `counts`.
pub fn upgrade(dict: Dictionary<Definition>, counts: &Counts, today: Date) -> Dictionary<Definition> {
    let it = definitions_and_counts(dict, counts);
    let it = sort_by_count(it);
    let it = count_as_popularity(it);
    let it = only_definitions(it);
    let it = sort_by_term(it);
    let it = position_as_sequence(it);
    let it = copy_term(it, Term::with_kanji_repetition_marks);
    let it = add_def_tag(it, tag_importance);
    let it = map_term(it, remove_stars);

    Dictionary::new(it.collect())
        .with_title(TITLE)
        .with_revision(revision(today))
        .with_author(AUTHOR)
}
