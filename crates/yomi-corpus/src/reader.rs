use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use encoding_rs::{Encoding, UTF_8};
use memmap2::Mmap;
use tracing::{debug, info};
use yomi_kana::kata_to_hira;
use yomi_types::{Occurrence, Term};
use zip::ZipArchive;

use crate::{CorpusError, OccurrenceBag, Result};

/// Joins the configured provenance columns of a row.
pub const PROVENANCE_SEPARATOR: &str = ",";

/// Strategy for loading plain corpus files.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each file.
    #[default]
    Mmap,
    /// Read each file into an owned buffer.
    Owned,
}

impl FromStr for LoadMode {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mmap" => Ok(LoadMode::Mmap),
            "owned" => Ok(LoadMode::Owned),
            other => Err(CorpusError::UnknownLoadMode(other.to_string())),
        }
    }
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Column layout of a validated reader.
struct Layout<'a> {
    separator: &'a str,
    text: usize,
    reading: usize,
    count: usize,
    provenance: &'a [usize],
    skip_lines: usize,
}

/// Builder for reading delimited frequency lists into an [`OccurrenceBag`].
///
/// Paths, separator and the text/reading/count columns are required;
/// [`OccurrenceReader::read`] reports the first missing one before touching
/// the filesystem. All configured paths accumulate into the same bag.
#[derive(Clone, Debug)]
pub struct OccurrenceReader {
    zip_path: Option<PathBuf>,
    paths: Vec<PathBuf>,
    separator: Option<String>,
    text_index: Option<usize>,
    reading_index: Option<usize>,
    count_index: Option<usize>,
    provenance_indices: Vec<usize>,
    skip_lines: usize,
    encoding: &'static Encoding,
    load_mode: LoadMode,
}

impl Default for OccurrenceReader {
    fn default() -> Self {
        Self {
            zip_path: None,
            paths: Vec::new(),
            separator: None,
            text_index: None,
            reading_index: None,
            count_index: None,
            provenance_indices: Vec::new(),
            skip_lines: 0,
            encoding: UTF_8,
            load_mode: LoadMode::default(),
        }
    }
}

impl OccurrenceReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configured paths as entries of this zip archive.
    pub fn with_zip_path(mut self, zip_path: impl Into<PathBuf>) -> Self {
        self.zip_path = Some(zip_path.into());
        self
    }

    pub fn add_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn with_text_index(mut self, text_index: usize) -> Self {
        self.text_index = Some(text_index);
        self
    }

    pub fn with_reading_index(mut self, reading_index: usize) -> Self {
        self.reading_index = Some(reading_index);
        self
    }

    pub fn with_count_index(mut self, count_index: usize) -> Self {
        self.count_index = Some(count_index);
        self
    }

    /// Append a column to the provenance key. Order is preserved.
    pub fn add_provenance_index(mut self, provenance_index: usize) -> Self {
        self.provenance_indices.push(provenance_index);
        self
    }

    /// Number of leading header lines to ignore in every file.
    pub fn with_skip_lines(mut self, skip_lines: usize) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    /// Text encoding of every file. UTF-16 variants honour a byte-order mark.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_load_mode(mut self, load_mode: LoadMode) -> Self {
        self.load_mode = load_mode;
        self
    }

    fn layout(&self) -> Result<Layout<'_>> {
        if self.paths.is_empty() {
            return Err(CorpusError::MissingField("path"));
        }
        let separator = self
            .separator
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(CorpusError::MissingField("separator"))?;
        Ok(Layout {
            separator,
            text: self.text_index.ok_or(CorpusError::MissingField("text index"))?,
            reading: self
                .reading_index
                .ok_or(CorpusError::MissingField("reading index"))?,
            count: self
                .count_index
                .ok_or(CorpusError::MissingField("count index"))?,
            provenance: &self.provenance_indices,
            skip_lines: self.skip_lines,
        })
    }

    /// Read every configured file into a fresh bag.
    ///
    /// Fails on the first malformed row; no partial bag is returned.
    pub fn read(&self) -> Result<OccurrenceBag> {
        let layout = self.layout()?;
        let mut bag = OccurrenceBag::new();

        match &self.zip_path {
            Some(zip_path) => {
                let file = File::open(zip_path).map_err(|source| CorpusError::Io {
                    path: zip_path.clone(),
                    source,
                })?;
                let zip_err = |source| CorpusError::Zip {
                    path: zip_path.clone(),
                    source,
                };
                let mut archive = ZipArchive::new(file).map_err(zip_err)?;
                for path in &self.paths {
                    let name = path.to_string_lossy();
                    let mut entry = archive.by_name(&name).map_err(zip_err)?;
                    let mut bytes = Vec::with_capacity(capacity_hint(entry.size()));
                    entry
                        .read_to_end(&mut bytes)
                        .map_err(|source| CorpusError::Io {
                            path: zip_path.join(path),
                            source,
                        })?;
                    let origin = format!("{}:{}", zip_path.display(), name);
                    self.read_bytes(&bytes, &origin, &layout, &mut bag)?;
                }
            }
            None => {
                for path in &self.paths {
                    let buffer = load_file(path, self.load_mode)?;
                    let origin = path.display().to_string();
                    self.read_bytes(buffer.as_slice(), &origin, &layout, &mut bag)?;
                }
            }
        }

        info!(
            "read {} terms from {} file(s) ({})",
            bag.len(),
            self.paths.len(),
            self.encoding.name()
        );
        Ok(bag)
    }

    fn read_bytes(
        &self,
        bytes: &[u8],
        origin: &str,
        layout: &Layout<'_>,
        bag: &mut OccurrenceBag,
    ) -> Result<()> {
        let content = self.decode(bytes, origin)?;
        let rows = update_bag(&content, origin, layout, bag)?;
        debug!("{origin}: {rows} rows");
        Ok(())
    }

    fn decode<'a>(&self, bytes: &'a [u8], origin: &str) -> Result<Cow<'a, str>> {
        let (content, _, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            return Err(CorpusError::Decode {
                origin: origin.to_string(),
                encoding: self.encoding.name(),
            });
        }
        Ok(content)
    }
}

/// Upper bound on buffer preallocation from a zip header's declared size.
const MAX_PREALLOC: u64 = 64 << 20;

/// Buffer capacity for an entry; the header size is not trusted beyond
/// [`MAX_PREALLOC`] and `read_to_end` grows the buffer past it.
fn capacity_hint(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_PREALLOC)).unwrap_or(0)
}

/// Lines ending in `\n`, `\r\n` or a bare `\r`, without their terminators.
/// A final terminator does not produce a trailing empty line.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..end];
        let width = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + width..];
        Some(line)
    })
}

/// Insert every data row of `content` into `bag`, returning the row count.
fn update_bag(
    content: &str,
    origin: &str,
    layout: &Layout<'_>,
    bag: &mut OccurrenceBag,
) -> Result<usize> {
    let mut rows = 0;
    for (lineno, line) in split_lines(content).enumerate() {
        if lineno < layout.skip_lines {
            continue;
        }
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(layout.separator).collect();
        let field = |column: usize| {
            fields
                .get(column)
                .copied()
                .ok_or_else(|| CorpusError::MissingColumn {
                    origin: origin.to_string(),
                    line: lineno + 1,
                    column,
                })
        };

        let reading = kata_to_hira(field(layout.reading)?);
        let term = Term::new(field(layout.text)?, reading).with_default_reading();
        let provenance = layout
            .provenance
            .iter()
            .map(|&column| field(column))
            .collect::<Result<Vec<_>>>()?
            .join(PROVENANCE_SEPARATOR);
        let raw_count = field(layout.count)?;
        let count: u64 = raw_count
            .trim()
            .parse()
            .map_err(|_| CorpusError::InvalidCount {
                origin: origin.to_string(),
                line: lineno + 1,
                value: raw_count.to_string(),
            })?;

        bag.insert(Occurrence::new(term, provenance), count);
        rows += 1;
    }
    Ok(rows)
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    let io_err = |source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    match mode {
        LoadMode::Mmap => unsafe { Mmap::map(&file) }
            .map(Buffer::Mmap)
            .map_err(io_err),
        LoadMode::Owned => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).map_err(io_err)?;
            Ok(Buffer::Owned(buf))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(provenance: &[usize]) -> Layout<'_> {
        Layout {
            separator: "\t",
            text: 2,
            reading: 1,
            count: 3,
            provenance,
            skip_lines: 1,
        }
    }

    #[test]
    fn parses_rows_and_skips_header() {
        let content = "id\treading\ttext\tcount\r\n1\tアル\t有る\t12\r\n\r\n2\t\tアル\t3\r\n";
        let mut bag = OccurrenceBag::new();
        let rows = update_bag(content, "mem", &layout(&[]), &mut bag).unwrap();
        assert_eq!(rows, 2);
        assert_eq!(bag.get(&Occurrence::new(Term::new("有る", "ある"), "")), 12);
        // Empty readings fall back to the text.
        assert_eq!(bag.get(&Occurrence::new(Term::new("アル", "アル"), "")), 3);
    }

    #[test]
    fn joins_provenance_columns() {
        let content = "header\nA\tカ\t蚊\t2\tX\n";
        let mut bag = OccurrenceBag::new();
        update_bag(content, "mem", &layout(&[4, 0]), &mut bag).unwrap();
        assert_eq!(bag.get(&Occurrence::new(Term::new("蚊", "か"), "X,A")), 2);
    }

    #[test]
    fn rejects_bad_counts() {
        let mut bag = OccurrenceBag::new();
        let err = update_bag("h\nA\tカ\t蚊\tmany\n", "mem", &layout(&[]), &mut bag).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidCount { line: 2, .. }), "{err}");
        let err = update_bag("h\nA\tカ\t蚊\t-1\n", "mem", &layout(&[]), &mut bag).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidCount { .. }));
    }

    #[test]
    fn rejects_short_rows() {
        let mut bag = OccurrenceBag::new();
        let err = update_bag("h\nA\tカ\n", "mem", &layout(&[]), &mut bag).unwrap_err();
        assert!(matches!(err, CorpusError::MissingColumn { column: 2, .. }), "{err}");
    }

    #[test]
    fn missing_fields_fail_before_io() {
        let err = OccurrenceReader::new().read().unwrap_err();
        assert!(matches!(err, CorpusError::MissingField("path")));

        let base = OccurrenceReader::new().add_path("/definitely/not/here.tsv");
        let err = base.clone().read().unwrap_err();
        assert!(matches!(err, CorpusError::MissingField("separator")));

        let err = base.clone().with_separator("\t").read().unwrap_err();
        assert!(matches!(err, CorpusError::MissingField("text index")));

        let err = base
            .clone()
            .with_separator("\t")
            .with_text_index(0)
            .with_reading_index(1)
            .read()
            .unwrap_err();
        assert!(matches!(err, CorpusError::MissingField("count index")));
    }

    #[test]
    fn accepts_every_line_ending() {
        for content in [
            "h\nA\tカ\t蚊\t1\nB\tア\t亜\t2\n",
            "h\r\nA\tカ\t蚊\t1\r\nB\tア\t亜\t2\r\n",
            "h\rA\tカ\t蚊\t1\rB\tア\t亜\t2\r",
            "h\rA\tカ\t蚊\t1\r\nB\tア\t亜\t2",
        ] {
            let mut bag = OccurrenceBag::new();
            let rows = update_bag(content, "mem", &layout(&[]), &mut bag).unwrap();
            assert_eq!(rows, 2, "{content:?}");
            assert_eq!(bag.get(&Occurrence::new(Term::new("蚊", "か"), "")), 1);
            assert_eq!(bag.get(&Occurrence::new(Term::new("亜", "あ"), "")), 2);
        }
    }

    #[test]
    fn bare_carriage_returns_keep_line_numbers() {
        let mut bag = OccurrenceBag::new();
        let err = update_bag("h\rA\tカ\t蚊\t1\rB\tア\t亜\tx\r", "mem", &layout(&[]), &mut bag)
            .unwrap_err();
        assert!(matches!(err, CorpusError::InvalidCount { line: 3, .. }), "{err}");
    }

    #[test]
    fn split_lines_matches_terminators() {
        let lines: Vec<_> = split_lines("a\r\nb\rc\n\nd").collect();
        assert_eq!(lines, ["a", "b", "c", "", "d"]);
        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("a\n").collect::<Vec<_>>(), ["a"]);
    }

    #[test]
    fn capacity_hint_is_capped() {
        assert_eq!(capacity_hint(1024), 1024);
        assert_eq!(capacity_hint(u64::MAX), MAX_PREALLOC as usize);
    }

    #[test]
    fn load_mode_from_str() {
        assert_eq!("mmap".parse::<LoadMode>().unwrap(), LoadMode::Mmap);
        assert_eq!(" Owned ".parse::<LoadMode>().unwrap(), LoadMode::Owned);
        assert!("mapped".parse::<LoadMode>().is_err());
    }
}
