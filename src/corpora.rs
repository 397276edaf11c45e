//! Column layouts and file names of the supported NINJAL frequency lists.

use std::fmt;
use std::path::Path;

use tracing::{debug, info};
use yomi_corpus::encoding_rs::UTF_16LE;
use yomi_corpus::{LoadMode, OccurrenceBag, OccurrenceReader};

use crate::Result;

/// Word units a bag was built from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Units {
    /// Short word units only.
    Suw,
    /// Short word units merged into long word units.
    SuwLuw,
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Suw => f.write_str("SUW"),
            Units::SuwLuw => f.write_str("SUW+LUW"),
        }
    }
}

/// A corpus bag together with the units it covers.
#[derive(Debug)]
pub struct CorpusBag {
    pub bag: OccurrenceBag,
    pub units: Units,
}

/// Descriptive metadata of a corpus dictionary.
#[derive(Clone, Copy, Debug)]
pub struct Source {
    pub title: &'static str,
    /// Data release, as it appears in the revision string.
    pub release: &'static str,
    pub description: &'static str,
    pub attribution: &'static str,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Corpus {
    Bccwj,
    Csj,
    Nwjc,
    ChjModern,
    ChjPremodern,
    Shc,
}

impl Corpus {
    pub fn source(self) -> Source {
        match self {
            Corpus::Bccwj => Source {
                title: "書き言葉",
                release: "1.1",
                description: "『現代日本語書き言葉均衡コーパス（BCCWJ）』は、現代日本語の書き言葉の全体像を把握するために構築したコーパスであり、現在、日本語について入手可能な唯一の均衡コーパスです。\n\nhttps://clrd.ninjal.ac.jp/bccwj/",
                attribution: "CC BY-NC-ND 3.0 https://creativecommons.org/licenses/by-nc-nd/3.0/deed.ja",
            },
            Corpus::Csj => Source {
                title: "話し言葉",
                release: "2018-03",
                description: "『日本語話し言葉コーパス（CSJ）』は、日本語の自発音声を大量にあつめて多くの研究用情報を付加した話し言葉研究用のデータベースです。\n\nhttps://clrd.ninjal.ac.jp/csj/index.html",
                attribution: "CC BY-NC-ND 3.0 https://creativecommons.org/licenses/by-nc-nd/3.0/deed.ja",
            },
            Corpus::Nwjc => Source {
                title: "ウェブ",
                release: "2022-02",
                description: "『国語研日本語ウェブコーパス（NWJC）』はウェブを母集団として100億語規模を目標として構築した日本語コーパスです。\n\nhttps://masayu-a.github.io/NWJC/",
                attribution: "CC BY 4.0 https://creativecommons.org/licenses/by/4.0/deed.ja",
            },
            Corpus::ChjModern => Source {
                title: "明治〜大正",
                release: "2023-03",
                description: "『日本語歴史コーパス（CHJ）』は、デジタル時代における日本語史研究の基礎資料として開発を進めているコーパスです。\n\n明治・大正編：雑誌／教科書／明治初期口語資料／近代小説／新聞／落語SP盤\n\nhttps://clrd.ninjal.ac.jp/chj/index.html",
                attribution: "CC BY-NC-SA 4.0 https://creativecommons.org/licenses/by-nc-sa/4.0/deed.ja",
            },
            Corpus::ChjPremodern => Source {
                title: "奈良〜江戸",
                release: "2023-03",
                description: "『日本語歴史コーパス（CHJ）』は、デジタル時代における日本語史研究の基礎資料として開発を進めているコーパスです。\n\n奈良時代編：万葉集／宣命／祝詞\n平安時代編：仮名文学／訓点資料\n鎌倉時代編：説話・随筆／日記・紀行／軍記\n室町時代編：狂言／キリシタン資料\n江戸時代編：洒落本／人情本／近松浄瑠璃／随筆・紀行\n\nhttps://clrd.ninjal.ac.jp/chj/index.html",
                attribution: "CC BY-NC-SA 4.0 https://creativecommons.org/licenses/by-nc-sa/4.0/deed.ja",
            },
            Corpus::Shc => Source {
                title: "昭和〜平成",
                release: "2023-05",
                description: "『昭和・平成書き言葉コーパス』は、昭和・平成期の日本語を通時的に研究できるように設計したコーパスです。\n\n雑誌、ベストセラー書籍、新聞\n\nhttps://clrd.ninjal.ac.jp/shc/index.html",
                attribution: "CC BY-NC-SA 4.0 https://creativecommons.org/licenses/by-nc-sa/4.0/deed.ja",
            },
        }
    }

    /// Whether ranked terms also get a copy spelled with 々.
    pub fn adds_repetition_marks(self) -> bool {
        self == Corpus::Bccwj
    }

    /// Read this corpus from the directory holding its distribution files.
    pub fn read(self, dir: &Path, load_mode: LoadMode) -> Result<CorpusBag> {
        let bag = match self {
            Corpus::Bccwj => return read_bccwj(dir, load_mode),
            Corpus::Csj => read_csj(dir)?,
            Corpus::Nwjc => read_nwjc(dir)?,
            Corpus::ChjModern => read_chj_modern(dir)?,
            Corpus::ChjPremodern => {
                return Ok(CorpusBag {
                    bag: read_chj_premodern(dir)?,
                    units: Units::SuwLuw,
                });
            }
            Corpus::Shc => read_shc(dir)?,
        };
        Ok(CorpusBag {
            bag,
            units: Units::Suw,
        })
    }
}

const BCCWJ_SUW: &str = "BCCWJ_frequencylist_suw_ver1_1";
const BCCWJ_LUW: &str = "BCCWJ_frequencylist_luw_ver1_1";
const CSJ_SUW: &str = "CSJ_frequencylist_suw_ver201803";
const NWJC_SUW: &str = "NWJC_frequencylist_suw_ver2022_02";
const CHJ_ZIP: &str = "CHJ_integratedFequencyList_202303.zip";
const SHC_SUW: &str = "SHC-LEX_SUW_202305";

/// Layout shared by the tab-separated NINJAL lists (BCCWJ, CSJ, NWJC).
fn ninjal_tsv() -> OccurrenceReader {
    OccurrenceReader::new()
        .with_separator("\t")
        .with_skip_lines(1)
        .with_text_index(2)
        .with_reading_index(1)
        .with_count_index(6)
}

/// Layout shared by the UTF-16 lexicon exports (CHJ, SHC).
fn lexicon_csv() -> OccurrenceReader {
    OccurrenceReader::new()
        .with_encoding(UTF_16LE)
        .with_separator("\t")
        .with_skip_lines(1)
        .with_text_index(1)
        .with_reading_index(0)
}

/// Locate `<stem>.tsv` as an extracted file or inside `<stem>.zip`.
fn locate_tsv(dir: &Path, stem: &str, load_mode: LoadMode) -> Option<OccurrenceReader> {
    let tsv = format!("{stem}.tsv");
    let plain = dir.join(&tsv);
    if plain.is_file() {
        debug!("using extracted {}", plain.display());
        return Some(ninjal_tsv().add_path(plain).with_load_mode(load_mode));
    }
    let zip = dir.join(format!("{stem}.zip"));
    if zip.is_file() {
        return Some(ninjal_tsv().with_zip_path(zip).add_path(tsv));
    }
    None
}

/// Short word units, merged with long word units when their list is present.
pub fn read_bccwj(dir: &Path, load_mode: LoadMode) -> Result<CorpusBag> {
    // A missing SUW list fails on read with the zip path in the error.
    let suw = locate_tsv(dir, BCCWJ_SUW, load_mode).unwrap_or_else(|| {
        ninjal_tsv()
            .with_zip_path(dir.join(format!("{BCCWJ_SUW}.zip")))
            .add_path(format!("{BCCWJ_SUW}.tsv"))
    });
    let luw = locate_tsv(dir, BCCWJ_LUW, load_mode);

    let (suw, luw) = rayon::join(|| suw.read(), || luw.map(|r| r.read()).transpose());
    let mut bag = suw?;
    let units = match luw? {
        Some(luw) => {
            bag.extend_overlap(&luw);
            Units::SuwLuw
        }
        None => {
            info!("no BCCWJ long word unit list in {}", dir.display());
            Units::Suw
        }
    };
    Ok(CorpusBag { bag, units })
}

pub fn read_csj(dir: &Path) -> Result<OccurrenceBag> {
    Ok(ninjal_tsv()
        .with_zip_path(dir.join(format!("{CSJ_SUW}.zip")))
        .add_path(format!("{CSJ_SUW}.tsv"))
        .read()?)
}

pub fn read_nwjc(dir: &Path) -> Result<OccurrenceBag> {
    Ok(ninjal_tsv()
        .with_zip_path(dir.join(format!("{NWJC_SUW}.zip")))
        .add_path(format!("{NWJC_SUW}/{NWJC_SUW}.tsv"))
        .read()?)
}

/// Meiji and Taisho short word units. Provenance: work, part, text type.
pub fn read_chj_modern(dir: &Path) -> Result<OccurrenceBag> {
    Ok(lexicon_csv()
        .with_zip_path(dir.join(CHJ_ZIP))
        .add_path("CHJ-LEX_SUW_2023.3_modern_nonmag.csv")
        .add_path("CHJ-LEX_SUW_2023.3_modern_mag.csv")
        .with_count_index(16)
        .add_provenance_index(9)
        .add_provenance_index(10)
        .add_provenance_index(13)
        .read()?)
}

/// Nara to Edo long word units with short word units merged in.
/// Provenance: work, part, text type.
pub fn read_chj_premodern(dir: &Path) -> Result<OccurrenceBag> {
    let zip = dir.join(CHJ_ZIP);
    let suw = lexicon_csv()
        .with_zip_path(&zip)
        .add_path("CHJ-LEX_SUW_2023.3_premodern.csv")
        .with_count_index(16)
        .add_provenance_index(9)
        .add_provenance_index(10)
        .add_provenance_index(13);
    let luw = lexicon_csv()
        .with_zip_path(&zip)
        .add_path("CHJ-LEX_LUW_2023.3.csv")
        .with_count_index(13)
        .add_provenance_index(8)
        .add_provenance_index(9)
        .add_provenance_index(12);

    let (suw, luw) = rayon::join(|| suw.read(), || luw.read());
    let mut bag = luw?;
    bag.extend_overlap(&suw?);
    Ok(bag)
}

pub fn read_shc(dir: &Path) -> Result<OccurrenceBag> {
    Ok(lexicon_csv()
        .with_zip_path(dir.join(format!("{SHC_SUW}.zip")))
        .add_path(format!("{SHC_SUW}_book.csv"))
        .add_path(format!("{SHC_SUW}_magazine.csv"))
        .add_path(format!("{SHC_SUW}_newspaper.csv"))
        .with_count_index(15)
        .read()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_render_like_revision_suffixes() {
        assert_eq!(Units::Suw.to_string(), "SUW");
        assert_eq!(Units::SuwLuw.to_string(), "SUW+LUW");
    }

    #[test]
    fn only_bccwj_adds_repetition_marks() {
        let all = [
            Corpus::Bccwj,
            Corpus::Csj,
            Corpus::Nwjc,
            Corpus::ChjModern,
            Corpus::ChjPremodern,
            Corpus::Shc,
        ];
        let marked: Vec<_> = all.into_iter().filter(|c| c.adds_repetition_marks()).collect();
        assert_eq!(marked, [Corpus::Bccwj]);
    }

    #[test]
    fn missing_bccwj_suw_names_the_zip() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_bccwj(dir.path(), LoadMode::Mmap).unwrap_err();
        assert!(err.to_string().contains("BCCWJ_frequencylist_suw_ver1_1.zip"), "{err}");
    }
}
