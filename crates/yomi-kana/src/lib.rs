//! Script conversion for Japanese readings and kanji forms.
//!
//! Kana conversion is a character table translation (katakana block
//! `ァ`..`ヶ` plus the iteration marks `ヽヾ` onto their hiragana
//! counterparts) wrapped by a few exact-substring substitutions for symbols
//! that have no single-codepoint partner in the other script:
//!
//! | katakana | hiragana |
//! |----------|----------|
//! | `ヿ`     | `こと`   |
//! | `ヷヸヹヺ` | `わゐゑを` + combining dakuten |
//! | `ヨリ`   | `ゟ` (hiragana → katakana only) |
//!
//! The substitutions run in a fixed order around the table pass so that no
//! character is translated twice.
//!
//! ```rust
//! use yomi_kana::{hira_to_kata, kata_to_hira, kyu_to_shin, shin_to_kyu};
//!
//! assert_eq!(kata_to_hira("カタカナ"), "かたかな");
//! assert_eq!(hira_to_kata("ひらがな"), "ヒラガナ");
//! assert_eq!(shin_to_kyu("旧字体"), "舊字體");
//! assert_eq!(kyu_to_shin("舊字體"), "旧字体");
//! ```

mod tables;

use std::collections::HashMap;
use std::sync::LazyLock;

pub use tables::{KYUJITAI, SHINJITAI};

/// Distance between the katakana and hiragana blocks.
const KANA_OFFSET: u32 = 0x60;

/// Applied before the table pass of [`kata_to_hira`].
const KATA_TO_HIRA_SPECIAL: &[(&str, &str)] = &[
    ("ヿ", "こと"),
    ("\u{30F7}", "わ\u{3099}"),
    ("\u{30F8}", "ゐ\u{3099}"),
    ("\u{30F9}", "ゑ\u{3099}"),
    ("\u{30FA}", "を\u{3099}"),
];

/// Applied before the table pass of [`hira_to_kata`].
const HIRA_TO_KATA_BEFORE: &[(&str, &str)] = &[("ゟ", "ヨリ")];

/// Applied after the table pass of [`hira_to_kata`].
const HIRA_TO_KATA_AFTER: &[(&str, &str)] = &[
    ("ワ\u{3099}", "\u{30F7}"),
    ("ヰ\u{3099}", "\u{30F8}"),
    ("ヱ\u{3099}", "\u{30F9}"),
    ("ヲ\u{3099}", "\u{30FA}"),
];

static SHIN_TO_KYU: LazyLock<HashMap<char, char>> =
    LazyLock::new(|| SHINJITAI.chars().zip(KYUJITAI.chars()).collect());

static KYU_TO_SHIN: LazyLock<HashMap<char, char>> =
    LazyLock::new(|| KYUJITAI.chars().zip(SHINJITAI.chars()).collect());

/// Convert katakana to hiragana. Other characters pass through.
pub fn kata_to_hira(text: &str) -> String {
    replace_all(text, KATA_TO_HIRA_SPECIAL)
        .chars()
        .map(kata_to_hira_char)
        .collect()
}

/// Convert hiragana to katakana. Other characters pass through.
pub fn hira_to_kata(text: &str) -> String {
    let translated: String = replace_all(text, HIRA_TO_KATA_BEFORE)
        .chars()
        .map(hira_to_kata_char)
        .collect();
    replace_all(&translated, HIRA_TO_KATA_AFTER)
}

/// Convert simplified (shinjitai) kanji to their traditional forms.
pub fn shin_to_kyu(text: &str) -> String {
    translate(text, &SHIN_TO_KYU)
}

/// Convert traditional (kyujitai) kanji to their simplified forms.
pub fn kyu_to_shin(text: &str) -> String {
    translate(text, &KYU_TO_SHIN)
}

/// Whether a character lies in the hiragana block proper (`ぁ`..`ゖ`).
pub fn is_hiragana(c: char) -> bool {
    matches!(c, 'ぁ'..='ゖ')
}

/// Whether a character lies in the katakana block proper (`ァ`..`ヺ`).
pub fn is_katakana(c: char) -> bool {
    matches!(c, 'ァ'..='ヺ')
}

fn kata_to_hira_char(c: char) -> char {
    match c {
        'ァ'..='ヶ' | 'ヽ' | 'ヾ' => char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c),
        _ => c,
    }
}

fn hira_to_kata_char(c: char) -> char {
    match c {
        'ぁ'..='ゖ' | 'ゝ' | 'ゞ' => char::from_u32(c as u32 + KANA_OFFSET).unwrap_or(c),
        _ => c,
    }
}

fn translate(text: &str, table: &HashMap<char, char>) -> String {
    text.chars()
        .map(|c| table.get(&c).copied().unwrap_or(c))
        .collect()
}

fn replace_all(text: &str, pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .fold(text.to_string(), |acc, (from, to)| {
            if acc.contains(from) {
                acc.replace(from, to)
            } else {
                acc
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_pairs(pairs: &[(&str, &str)]) {
        for (hira, kata) in pairs {
            assert_eq!(kata_to_hira(kata), *hira, "kata_to_hira({kata})");
            assert_eq!(hira_to_kata(hira), *kata, "hira_to_kata({hira})");
        }
    }

    #[test]
    fn plain_kana() {
        assert_pairs(&[
            ("わ", "ワ"), ("ら", "ラ"), ("や", "ヤ"), ("ま", "マ"), ("は", "ハ"),
            ("な", "ナ"), ("た", "タ"), ("さ", "サ"), ("か", "カ"), ("あ", "ア"),
            ("ゐ", "ヰ"), ("り", "リ"), ("み", "ミ"), ("ひ", "ヒ"), ("に", "ニ"),
            ("ち", "チ"), ("し", "シ"), ("き", "キ"), ("い", "イ"), ("ん", "ン"),
            ("る", "ル"), ("ゆ", "ユ"), ("む", "ム"), ("ふ", "フ"), ("ぬ", "ヌ"),
            ("つ", "ツ"), ("す", "ス"), ("く", "ク"), ("う", "ウ"), ("ゑ", "ヱ"),
            ("れ", "レ"), ("め", "メ"), ("へ", "ヘ"), ("ね", "ネ"), ("て", "テ"),
            ("せ", "セ"), ("け", "ケ"), ("え", "エ"), ("を", "ヲ"), ("ろ", "ロ"),
            ("よ", "ヨ"), ("も", "モ"), ("ほ", "ホ"), ("の", "ノ"), ("と", "ト"),
            ("そ", "ソ"), ("こ", "コ"), ("お", "オ"), ("ゝ", "ヽ"), ("ゞ", "ヾ"),
        ]);
    }

    #[test]
    fn dakuten_and_handakuten() {
        assert_pairs(&[
            ("ば", "バ"), ("だ", "ダ"), ("ざ", "ザ"), ("が", "ガ"), ("ゔ", "ヴ"),
            ("ぱ", "パ"), ("ぴ", "ピ"), ("ぷ", "プ"), ("ぺ", "ペ"), ("ぽ", "ポ"),
            ("わ\u{3099}", "\u{30F7}"),
            ("ゐ\u{3099}", "\u{30F8}"),
            ("ゑ\u{3099}", "\u{30F9}"),
            ("を\u{3099}", "\u{30FA}"),
            ("あ\u{3099}", "ア\u{3099}"),
            ("か\u{309A}", "カ\u{309A}"),
            ("ら\u{309A}", "ラ\u{309A}"),
        ]);
    }

    #[test]
    fn composite_symbols_are_one_way() {
        assert_eq!(kata_to_hira("ヿ"), "こと");
        assert_eq!(hira_to_kata("ゟ"), "ヨリ");
        assert_eq!(hira_to_kata("こと"), "コト");
    }

    #[test]
    fn mixed_text_passes_through() {
        assert_eq!(kata_to_hira("漢字とカタカナ、ABC"), "漢字とかたかな、ABC");
        assert_eq!(kata_to_hira("ラーメン"), "らーめん");
        assert_eq!(kata_to_hira(""), "");
    }

    #[test]
    fn hiragana_block_round_trips() {
        let block: String = ('ぁ'..='ゖ').chain(['ゝ', 'ゞ']).collect();
        assert_eq!(kata_to_hira(&hira_to_kata(&block)), block);
        assert!(block.chars().all(|c| is_hiragana(c) || matches!(c, 'ゝ' | 'ゞ')));
        assert!(hira_to_kata(&block).chars().all(|c| is_katakana(c) || matches!(c, 'ヽ' | 'ヾ')));
    }

    #[test]
    fn shinjitai_kyujitai() {
        assert_eq!(shin_to_kyu("旧字体"), "舊字體");
        assert_eq!(kyu_to_shin("舊字體"), "旧字体");
        assert_eq!(SHINJITAI.chars().count(), KYUJITAI.chars().count());
        // 弁 has three traditional forms; the last one wins.
        assert_eq!(shin_to_kyu("弁"), "辯");
        for kyu in ["辨", "瓣", "辯"] {
            assert_eq!(kyu_to_shin(kyu), "弁");
        }
    }
}
