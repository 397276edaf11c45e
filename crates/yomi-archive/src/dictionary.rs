use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::writer::DictionaryWriter;

/// Schema version written to `index.json`.
pub const FORMAT_VERSION: u32 = 3;

/// Optional fields of `index.json`. Unset fields are not written.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequenced: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_mode: Option<String>,
}

/// `index.json` as written: the format version followed by the metadata.
#[derive(Serialize)]
pub(crate) struct IndexRecord<'a> {
    pub format: u32,
    #[serde(flatten)]
    pub metadata: &'a Metadata,
}

/// Ordered dictionary entries plus archive metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Dictionary<E> {
    pub data: Vec<E>,
    /// Prefix of the bank files, e.g. `term_bank`.
    pub term_bank_name: String,
    pub metadata: Metadata,
}

impl<E: Entry> Dictionary<E> {
    /// Wrap entries using the entry kind's default bank name and index flags.
    pub fn new(data: Vec<E>) -> Self {
        Self {
            data,
            term_bank_name: E::BANK_NAME.to_string(),
            metadata: Metadata {
                sequenced: E::SEQUENCED,
                frequency_mode: E::FREQUENCY_MODE.map(str::to_string),
                ..Metadata::default()
            },
        }
    }

    pub fn writer(&self) -> DictionaryWriter<'_, E> {
        DictionaryWriter::new(self)
    }
}

impl<E> Dictionary<E> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.data.iter()
    }

    pub fn with_term_bank_name(mut self, term_bank_name: impl Into<String>) -> Self {
        self.term_bank_name = term_bank_name.into();
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.metadata.revision = Some(revision.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.metadata.author = Some(author.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.metadata.url = Some(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.metadata.attribution = Some(attribution.into());
        self
    }

    pub fn with_sequenced(mut self, sequenced: bool) -> Self {
        self.metadata.sequenced = Some(sequenced);
        self
    }

    pub fn with_frequency_mode(mut self, frequency_mode: impl Into<String>) -> Self {
        self.metadata.frequency_mode = Some(frequency_mode.into());
        self
    }
}

impl<E> IntoIterator for Dictionary<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a Dictionary<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use yomi_types::{Rank, Term};

    #[test]
    fn index_record_omits_unset_fields() {
        let dict = Dictionary::new(vec![Rank::new(Term::new("ア", "あ"), 0)]).with_title("BCCWJ");
        let record = IndexRecord {
            format: FORMAT_VERSION,
            metadata: &dict.metadata,
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "format": 3,
                "title": "BCCWJ",
                "sequenced": false,
                "frequencyMode": "rank-based",
            })
        );
    }

    #[test]
    fn metadata_reads_camel_case_and_ignores_unknown_keys() {
        let meta: Metadata = serde_json::from_value(json!({
            "format": 3,
            "title": "t",
            "revision": "r",
            "frequencyMode": "occurrence-based",
            "tagMeta": {},
        }))
        .unwrap();
        assert_eq!(meta.frequency_mode.as_deref(), Some("occurrence-based"));
        assert_eq!(meta.author, None);
    }
}
