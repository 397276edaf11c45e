//! Read and write chunked popup-dictionary archives.
//!
//! An archive is a zip file holding an `index.json` metadata record and one
//! or more `<bank>_<n>.json` banks, each a JSON array of entries. Entry kinds
//! plug in through the [`Entry`] trait, which fixes their array encoding and
//! their default bank name; [`Dictionary`] is generic over it.
//!
//! # Example
//! ```no_run
//! use yomi_archive::{Dictionary, DictionaryReader};
//! use yomi_types::Definition;
//!
//! # fn main() -> yomi_archive::Result<()> {
//! let dict: Dictionary<Definition> = DictionaryReader::new()
//!     .with_path("shinmeikai.zip")
//!     .read()?;
//! println!("{} entries", dict.len());
//!
//! dict.clone()
//!     .with_revision("2")
//!     .writer()
//!     .with_path("shinmeikai-2.zip")
//!     .in_chunks(10_000)
//!     .write()?;
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p yomi-archive --example stats -- <archive>`.

mod dictionary;
mod entry;
mod reader;
mod writer;

use std::path::PathBuf;

use thiserror::Error;

pub use dictionary::{Dictionary, FORMAT_VERSION, Metadata};
pub use entry::{Entry, EntryError};
pub use reader::DictionaryReader;
pub use writer::DictionaryWriter;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("missing required field: path")]
    MissingPath,
    #[error("chunk size must be at least 1")]
    InvalidChunkSize,
    #[error("index.json is missing required field `{0}`")]
    MissingMetadata(&'static str),
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid archive {}: {source}", .path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("{file}: invalid JSON: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{file}[{index}]: {source}")]
    Entry {
        file: String,
        index: usize,
        #[source]
        source: EntryError,
    },
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
