//! Read tabular frequency corpora into occurrence bags.
//!
//! Corpus frequency lists are delimited text files with one row per
//! (term, source) pair and a count column. [`OccurrenceReader`] is configured
//! with the column layout of a particular list, reads one or more files
//! (optionally from inside a zip archive, optionally UTF-16) and accumulates
//! the rows into an [`OccurrenceBag`]. Bags from different corpora are then
//! combined with [`OccurrenceBag::extend_overlap`] or
//! [`OccurrenceBag::extend_distinct`] and reduced with
//! [`OccurrenceBag::to_counts`].
//!
//! # Example
//! ```no_run
//! use yomi_corpus::{OccurrenceReader, encoding_rs::UTF_16LE};
//!
//! # fn main() -> yomi_corpus::Result<()> {
//! let bag = OccurrenceReader::new()
//!     .with_zip_path("SHC-LEX_SUW_202305.zip")
//!     .add_path("SHC-LEX_SUW_202305_book.csv")
//!     .with_encoding(UTF_16LE)
//!     .with_separator("\t")
//!     .with_skip_lines(1)
//!     .with_text_index(1)
//!     .with_reading_index(0)
//!     .with_count_index(15)
//!     .read()?;
//! println!("{} terms", bag.len());
//! # Ok(()) }
//! ```

mod bag;
mod reader;

use std::path::PathBuf;

use thiserror::Error;

pub use bag::OccurrenceBag;
pub use encoding_rs;
pub use reader::{LoadMode, OccurrenceReader, PROVENANCE_SEPARATOR};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("missing required reader field: {0}")]
    MissingField(&'static str),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read archive {}: {source}", .path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("{origin}: content is not valid {encoding}")]
    Decode {
        origin: String,
        encoding: &'static str,
    },
    #[error("{origin}:{line} missing column {column}")]
    MissingColumn {
        origin: String,
        line: usize,
        column: usize,
    },
    #[error("{origin}:{line} invalid count {value:?}")]
    InvalidCount {
        origin: String,
        line: usize,
        value: String,
    },
    #[error("unknown load mode {0:?} (expected `mmap` or `owned`)")]
    UnknownLoadMode(String),
}

pub type Result<T> = std::result::Result<T, CorpusError>;
