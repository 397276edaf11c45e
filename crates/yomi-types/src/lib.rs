//! Shared types for Japanese frequency and term dictionaries.
//!
//! A [`Term`] identifies a lexical item by surface text and reading. Corpus
//! readers tag terms with the source they were seen in ([`Occurrence`]),
//! ranking turns counts into [`Rank`] entries, and term dictionaries carry
//! full [`Definition`] records. Both entry kinds implement [`TermEntry`] so
//! that term rewrites can be written once and applied to either stream.
//!
//! ```rust
//! use yomi_types::Term;
//!
//! let term = Term::new("時時", "ときどき");
//! let marked = term.with_kanji_repetition_marks().unwrap();
//! assert_eq!(marked.text, "時々");
//! assert_eq!(marked.without_kanji_repetition_marks(), Some(term));
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Kanji iteration mark (`々`).
pub const KANJI_REPETITION_MARK: char = '々';

/// Per-term totals, the reduced form of an occurrence bag.
pub type Counts = HashMap<Term, u64>;

/// Japanese term with reading.
///
/// Ordering is by reading first, then text.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Term {
    pub text: String,
    /// Reading in hiragana. Empty means "same as the text" until
    /// [`Term::with_default_reading`] fills it in.
    pub reading: String,
}

impl Term {
    pub fn new(text: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reading: reading.into(),
        }
    }

    /// Use the text as reading if no reading is set. Idempotent.
    pub fn with_default_reading(self) -> Self {
        if self.reading.is_empty() {
            Self {
                reading: self.text.clone(),
                text: self.text,
            }
        } else {
            self
        }
    }

    /// Collapse immediately repeated kanji into `々`.
    ///
    /// Returns `None` if the text has no repeated kanji.
    pub fn with_kanji_repetition_marks(&self) -> Option<Self> {
        let text = add_repetition_marks(&self.text, is_kanji, KANJI_REPETITION_MARK);
        (text != self.text).then(|| Self::new(text, self.reading.clone()))
    }

    /// Expand every `々` back into the kanji it repeats.
    ///
    /// A leading `々` has nothing to repeat and stays. Returns `None` if the
    /// text is unchanged.
    pub fn without_kanji_repetition_marks(&self) -> Option<Self> {
        let text = remove_repetition_marks(&self.text, KANJI_REPETITION_MARK);
        (text != self.text).then(|| Self::new(text, self.reading.clone()))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.reading, &self.text).cmp(&(&other.reading, &other.text))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.text, self.reading)
    }
}

/// CJK unified ideographs, extension A and extension B.
pub fn is_kanji(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{20000}'..='\u{2A6DF}')
}

fn add_repetition_marks(text: &str, pattern: fn(char) -> bool, mark: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if pattern(c) && prev == Some(c) {
            out.push(mark);
        } else {
            out.push(c);
            prev = Some(c);
        }
    }
    out
}

fn remove_repetition_marks(text: &str, mark: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if c == mark {
            // A leading mark has nothing to repeat.
            out.push(prev.unwrap_or(mark));
        } else {
            out.push(c);
            prev = Some(c);
        }
    }
    out
}

/// Occurrence of a term in a textual source.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Occurrence {
    pub term: Term,
    /// Source in which the term occurred; empty when the corpus has none.
    pub provenance: String,
}

impl Occurrence {
    pub fn new(term: Term, provenance: impl Into<String>) -> Self {
        Self {
            term,
            provenance: provenance.into(),
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.term, self.provenance)
    }
}

/// Dense 0-based position of a term by descending count.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Rank {
    pub term: Term,
    pub rank: usize,
}

impl Rank {
    pub fn new(term: Term, rank: usize) -> Self {
        Self { term, rank }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.term, self.rank)
    }
}

/// Definition of a term from a dictionary.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Definition {
    pub term: Term,
    /// Space-separated tags for the definition. Empty means no tags.
    pub def_tags: String,
    /// Space-separated deinflection rule identifiers (`v1`, `v5`, `vs`, `vk`,
    /// `adj-i`). Empty for words that do not inflect.
    pub conjugation: String,
    /// Higher is more frequent. Also used to sort search results.
    pub popularity: i64,
    /// Glosses, never empty.
    pub definitions: Vec<String>,
    /// Entries sharing a sequence number are shown together in merge mode.
    pub sequence_number: i64,
    /// Space-separated tags for the term. Empty means no tags.
    pub top_tags: String,
}

impl Definition {
    /// First gloss.
    pub fn definition(&self) -> &str {
        self.definitions.first().map(String::as_str).unwrap_or("")
    }

    pub fn with_popularity(self, popularity: i64) -> Self {
        Self { popularity, ..self }
    }

    pub fn with_sequence(self, sequence_number: i64) -> Self {
        Self {
            sequence_number,
            ..self
        }
    }

    /// Append a tag to `def_tags`.
    pub fn add_def_tag(self, tag: &str) -> Self {
        let def_tags = if self.def_tags.is_empty() {
            tag.to_string()
        } else {
            format!("{} {}", self.def_tags, tag)
        };
        Self { def_tags, ..self }
    }

    /// No top-level tags and a single gloss.
    pub fn is_normal(&self) -> bool {
        self.top_tags.is_empty() && self.definitions.len() == 1
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.term.fmt(f)
    }
}

/// Dictionary entry keyed by a [`Term`].
pub trait TermEntry: Sized {
    fn term(&self) -> &Term;

    /// Same entry with the term replaced.
    fn with_term(self, term: Term) -> Self;
}

impl TermEntry for Rank {
    fn term(&self) -> &Term {
        &self.term
    }

    fn with_term(self, term: Term) -> Self {
        Self { term, ..self }
    }
}

impl TermEntry for Definition {
    fn term(&self) -> &Term {
        &self.term
    }

    fn with_term(self, term: Term) -> Self {
        Self { term, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn repetition_marks_round_trip() {
        let words = [
            ("時時", "時々", "ときどき"),
            ("刻刻", "刻々", "こくこく"),
            ("明明白白", "明々白々", "めいめいはくはく"),
            ("赤裸裸", "赤裸々", "せきらら"),
            ("代代木", "代々木", "よよぎ"),
            ("複複複線", "複々々線", "ふくふくふくせん"),
            ("小小小支川", "小々々支川", "しょうしょうしょうしせん"),
        ];

        for (without_marks, with_marks, reading) in words {
            let plain = Term::new(without_marks, reading);
            let marked = Term::new(with_marks, reading);
            assert_eq!(plain.with_kanji_repetition_marks(), Some(marked.clone()));
            assert_eq!(marked.without_kanji_repetition_marks(), Some(plain));
        }
    }

    #[test]
    fn repetition_marks_skip_kana_and_noops() {
        assert_eq!(Term::new("ここ", "ここ").with_kanji_repetition_marks(), None);
        assert_eq!(Term::new("ココ", "ここ").with_kanji_repetition_marks(), None);
        assert_eq!(Term::new("時間", "じかん").with_kanji_repetition_marks(), None);
        assert_eq!(Term::new("時間", "じかん").without_kanji_repetition_marks(), None);
    }

    #[test]
    fn leading_repetition_mark_is_a_noop() {
        assert_eq!(Term::new("々", "ひび").without_kanji_repetition_marks(), None);
        assert_eq!(Term::new("々時", "x").without_kanji_repetition_marks(), None);
        assert_eq!(
            Term::new("々時々", "x").without_kanji_repetition_marks(),
            Some(Term::new("々時時", "x"))
        );
    }

    #[test]
    fn default_reading_is_idempotent() {
        let term = Term::new("ア", "").with_default_reading();
        assert_eq!(term, Term::new("ア", "ア"));
        assert_eq!(term.clone().with_default_reading(), term);
        let read = Term::new("亜", "あ");
        assert_eq!(read.clone().with_default_reading(), read);
    }

    #[test]
    fn ordering_is_reading_first() {
        let mut terms = vec![
            Term::new("ア", "あ"),
            Term::new("イ", "い"),
            Term::new("亜", "あ"),
        ];
        terms.sort();
        assert_eq!(
            terms,
            vec![Term::new("ア", "あ"), Term::new("亜", "あ"), Term::new("イ", "い")]
        );
    }

    #[test]
    fn structural_identity() {
        let a = Occurrence::new(Term::new("ア", "あ"), "ある出所");
        let b = Occurrence::new(Term::new("ア", "あ"), "違う出所");
        assert_ne!(a, b);
        let set: HashSet<_> = [a.clone(), a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(a.to_string(), "ア[あ]@ある出所");
        assert_eq!(Rank::new(Term::new("ア", "あ"), 3).to_string(), "ア[あ]#3");
    }

    #[test]
    fn definition_updates() {
        let def = Definition {
            term: Term::new("ア", "あ"),
            def_tags: String::new(),
            conjugation: String::new(),
            popularity: 0,
            definitions: vec!["ある定義".into()],
            sequence_number: 0,
            top_tags: String::new(),
        };
        assert!(def.is_normal());
        let tagged = def.clone().add_def_tag("重要語").add_def_tag("N5");
        assert_eq!(tagged.def_tags, "重要語 N5");
        assert_eq!(tagged.definition(), "ある定義");
        let moved = def.with_popularity(7).with_sequence(3);
        assert_eq!((moved.popularity, moved.sequence_number), (7, 3));
    }
}
