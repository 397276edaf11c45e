use std::fs::File;
use std::io::Read;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::dictionary::{Dictionary, Metadata};
use crate::entry::Entry;
use crate::{ArchiveError, Result};

const INDEX_FILE: &str = "index.json";

/// Loads a [`Dictionary`] of entries of kind `E` from an archive.
#[derive(Clone, Debug)]
pub struct DictionaryReader<E> {
    path: Option<PathBuf>,
    term_bank_name: String,
    entry: PhantomData<fn() -> E>,
}

impl<E: Entry> Default for DictionaryReader<E> {
    fn default() -> Self {
        Self {
            path: None,
            term_bank_name: E::BANK_NAME.to_string(),
            entry: PhantomData,
        }
    }
}

impl<E: Entry> DictionaryReader<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Read banks whose file name contains this string instead of the
    /// entry kind's default.
    pub fn with_term_bank_name(mut self, term_bank_name: impl Into<String>) -> Self {
        self.term_bank_name = term_bank_name.into();
        self
    }

    /// Load metadata and every bank in chunk order.
    ///
    /// `title` and `revision` must be present in `index.json`. Every entry's
    /// term gets its default reading filled in.
    pub fn read(&self) -> Result<Dictionary<E>> {
        let path = self.path.as_deref().ok_or(ArchiveError::MissingPath)?;
        let file = File::open(path).map_err(|source| ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut archive = ZipArchive::new(file).map_err(|source| zip_error(path, source))?;

        let metadata: Metadata = serde_json::from_slice(&read_entry(&mut archive, path, INDEX_FILE)?)
            .map_err(|source| ArchiveError::Json {
                file: INDEX_FILE.to_string(),
                source,
            })?;
        if metadata.title.is_none() {
            return Err(ArchiveError::MissingMetadata("title"));
        }
        if metadata.revision.is_none() {
            return Err(ArchiveError::MissingMetadata("revision"));
        }

        let banks = bank_files(archive.file_names(), &self.term_bank_name);
        let mut data = Vec::new();
        for name in &banks {
            let values: Vec<Value> = serde_json::from_slice(&read_entry(&mut archive, path, name)?)
                .map_err(|source| ArchiveError::Json {
                    file: name.clone(),
                    source,
                })?;
            let before = data.len();
            data.reserve(values.len());
            for (index, value) in values.iter().enumerate() {
                let entry = E::from_json(value).map_err(|source| ArchiveError::Entry {
                    file: name.clone(),
                    index,
                    source,
                })?;
                let term = entry.term().clone().with_default_reading();
                data.push(entry.with_term(term));
            }
            debug!("{name}: {} entries", data.len() - before);
        }

        info!(
            "loaded {} entries from {} bank(s) in {}",
            data.len(),
            banks.len(),
            path.display()
        );
        Ok(Dictionary {
            data,
            term_bank_name: self.term_bank_name.clone(),
            metadata,
        })
    }
}

fn zip_error(path: &Path, source: zip::result::ZipError) -> ArchiveError {
    ArchiveError::Zip {
        path: path.to_path_buf(),
        source,
    }
}

fn read_entry(archive: &mut ZipArchive<File>, path: &Path, name: &str) -> Result<Vec<u8>> {
    let mut entry = archive
        .by_name(name)
        .map_err(|source| zip_error(path, source))?;
    let mut bytes = Vec::with_capacity(capacity_hint(entry.size()));
    entry
        .read_to_end(&mut bytes)
        .map_err(|source| ArchiveError::Io {
            path: path.join(name),
            source,
        })?;
    Ok(bytes)
}

/// Upper bound on buffer preallocation from a zip header's declared size.
const MAX_PREALLOC: u64 = 64 << 20;

fn capacity_hint(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_PREALLOC)).unwrap_or(0)
}

/// Names containing `bank_name`, ordered by their `_<n>.json` chunk index.
///
/// The zip directory order is not trusted. Names without a parsable index
/// go last, sorted by name.
fn bank_files<'a>(names: impl Iterator<Item = &'a str>, bank_name: &str) -> Vec<String> {
    let mut banks: Vec<(Option<usize>, String)> = names
        .filter(|name| name.contains(bank_name))
        .map(|name| {
            let index = chunk_index(name);
            if index.is_none() {
                warn!("{name}: bank file without chunk index");
            }
            (index, name.to_string())
        })
        .collect();
    banks.sort_by(|(ia, na), (ib, nb)| {
        (ia.is_none(), ia, na).cmp(&(ib.is_none(), ib, nb))
    });
    banks.into_iter().map(|(_, name)| name).collect()
}

fn chunk_index(name: &str) -> Option<usize> {
    let stem = name.strip_suffix(".json")?;
    let (_, index) = stem.rsplit_once('_')?;
    index.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banks_sort_numerically() {
        let names = [
            "index.json",
            "term_bank_10.json",
            "term_bank_2.json",
            "tag_bank_0.json",
            "term_bank_0.json",
            "term_bank_extra.json",
            "term_bank_1.json",
        ];
        assert_eq!(
            bank_files(names.into_iter(), "term_bank"),
            [
                "term_bank_0.json",
                "term_bank_1.json",
                "term_bank_2.json",
                "term_bank_10.json",
                "term_bank_extra.json",
            ]
        );
    }

    #[test]
    fn meta_banks_are_separate_from_term_banks() {
        let names = ["term_bank_0.json", "term_meta_bank_0.json"];
        assert_eq!(
            bank_files(names.into_iter(), "term_meta_bank"),
            ["term_meta_bank_0.json"]
        );
        assert_eq!(bank_files(names.into_iter(), "term_bank"), ["term_bank_0.json"]);
    }

    #[test]
    fn capacity_hint_ignores_oversized_headers() {
        assert_eq!(capacity_hint(0), 0);
        assert_eq!(capacity_hint(4096), 4096);
        assert_eq!(capacity_hint(u64::MAX), MAX_PREALLOC as usize);
    }

    #[test]
    fn chunk_index_parsing() {
        assert_eq!(chunk_index("term_bank_0.json"), Some(0));
        assert_eq!(chunk_index("dir/term_meta_bank_12.json"), Some(12));
        assert_eq!(chunk_index("term_bank.json"), None);
        assert_eq!(chunk_index("term_bank_1.txt"), None);
    }
}
