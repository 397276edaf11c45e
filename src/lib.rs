//! Corpus drivers and dictionary upgrades built on the `yomi-*` crates.

pub mod corpora;
pub mod frequency;
pub mod shinmeikai;

use thiserror::Error;
use yomi_archive::ArchiveError;
use yomi_corpus::CorpusError;

pub use corpora::{Corpus, CorpusBag, Source, Units};

pub const AUTHOR: &str = "NINJAL, uncomputable";
pub const URL: &str = "https://github.com/uncomputable/japanese-tools";

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

pub type Result<T> = std::result::Result<T, Error>;
