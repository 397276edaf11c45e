use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::dictionary::{Dictionary, FORMAT_VERSION, IndexRecord};
use crate::entry::Entry;
use crate::{ArchiveError, Result};

/// Writes a [`Dictionary`] as `index.json` plus numbered bank files.
///
/// Entries are written in their current order and left untouched; sequence
/// numbers are whatever the pipeline stamped on them.
#[derive(Debug)]
pub struct DictionaryWriter<'a, E> {
    dictionary: &'a Dictionary<E>,
    path: Option<PathBuf>,
    chunk_size: Option<usize>,
}

impl<'a, E: Entry> DictionaryWriter<'a, E> {
    pub fn new(dictionary: &'a Dictionary<E>) -> Self {
        Self {
            dictionary,
            path: None,
            chunk_size: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Split entries into banks of at most `chunk_size`. Without this every
    /// entry lands in a single bank.
    pub fn in_chunks(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Create (or truncate) the archive at the configured path.
    ///
    /// Fails before touching the filesystem when no path is set or the chunk
    /// size is zero.
    pub fn write(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or(ArchiveError::MissingPath)?;
        let data = &self.dictionary.data;
        let chunk_size = match self.chunk_size {
            Some(0) => return Err(ArchiveError::InvalidChunkSize),
            Some(n) => n,
            None => data.len().max(1),
        };

        let file = File::create(path).map_err(|source| io_error(path, source))?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let index = IndexRecord {
            format: FORMAT_VERSION,
            metadata: &self.dictionary.metadata,
        };
        write_json(&mut zip, path, "index.json", options, &index)?;

        let mut banks = 0;
        for (i, chunk) in data.chunks(chunk_size).enumerate() {
            let name = format!("{}_{i}.json", self.dictionary.term_bank_name);
            let values: Vec<Value> = chunk.iter().map(Entry::to_json).collect();
            write_json(&mut zip, path, &name, options, &values)?;
            debug!("{name}: {} entries", chunk.len());
            banks += 1;
        }

        let mut file = zip.finish().map_err(|source| ArchiveError::Zip {
            path: path.to_path_buf(),
            source,
        })?;
        file.flush().map_err(|source| io_error(path, source))?;

        info!(
            "wrote {} entries in {banks} bank(s) to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ArchiveError {
    ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn write_json<T: Serialize>(
    zip: &mut ZipWriter<File>,
    path: &Path,
    name: &str,
    options: SimpleFileOptions,
    value: &T,
) -> Result<()> {
    zip.start_file(name, options)
        .map_err(|source| ArchiveError::Zip {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::to_writer(&mut *zip, value).map_err(|source| ArchiveError::Json {
        file: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use yomi_types::{Rank, Term};

    fn ranks(n: usize) -> Dictionary<Rank> {
        let data = (0..n)
            .map(|i| Rank::new(Term::new(format!("語{i}"), format!("ご{i}")), i))
            .collect();
        Dictionary::new(data).with_title("t").with_revision("r")
    }

    fn bank_sizes(path: &Path) -> Vec<(String, usize)> {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        names
            .into_iter()
            .filter(|name| name != "index.json")
            .map(|name| {
                let entry = archive.by_name(&name).unwrap();
                let values: Vec<Value> = serde_json::from_reader(entry).unwrap();
                (name, values.len())
            })
            .collect()
    }

    #[test]
    fn missing_path_is_an_error() {
        let dict = ranks(1);
        assert!(matches!(
            dict.writer().write(),
            Err(ArchiveError::MissingPath)
        ));
    }

    #[test]
    fn zero_chunk_size_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.zip");
        let dict = ranks(3);
        assert!(matches!(
            dict.writer().with_path(&path).in_chunks(0).write(),
            Err(ArchiveError::InvalidChunkSize)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn chunks_split_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.zip");
        ranks(5).writer().with_path(&path).in_chunks(2).write().unwrap();
        assert_eq!(
            bank_sizes(&path),
            [
                ("term_meta_bank_0.json".to_string(), 2),
                ("term_meta_bank_1.json".to_string(), 2),
                ("term_meta_bank_2.json".to_string(), 1),
            ]
        );
    }

    #[test]
    fn unchunked_writes_single_bank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.zip");
        ranks(5).writer().with_path(&path).write().unwrap();
        assert_eq!(bank_sizes(&path), [("term_meta_bank_0.json".to_string(), 5)]);
    }

    #[test]
    fn empty_dictionary_writes_only_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.zip");
        ranks(0).writer().with_path(&path).in_chunks(10).write().unwrap();
        assert!(bank_sizes(&path).is_empty());
    }
}
