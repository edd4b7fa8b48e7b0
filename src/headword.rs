use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::language::ja::japanese::convert_katakana_to_hiragana;

pub const PRIORITY_SYMBOL: &str = "★";
pub const RARE_SYMBOL: &str = "▽";
pub const IRREGULAR_SYMBOL: &str = "⚠";
pub const OUTDATED_SYMBOL: &str = "⛬";
/// Cell text for a reading/kanji pairing that exists but carries no notes.
pub const DEFAULT_SYMBOL: &str = "㊒";
/// Column key for headwords that have no kanji.
pub const NO_KANJI_SYMBOL: &str = "∅";

const ATEJI_OPEN: &str = "〈";
const ATEJI_CLOSE: &str = "〉";

const SENSE_WEIGHT: i64 = 10;
const ENTRY_POSITION_WEIGHT: i64 = 100;
const PRIORITY_WEIGHT: i64 = 1000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadwordFlags {
    pub is_priority: bool,
    pub is_rare_kanji: bool,
    pub is_rare_kana: bool,
    pub is_irregular: bool,
    pub is_outdated: bool,
    pub is_ateji: bool,
    pub is_gikun: bool,
    /// Only indexed for lookups; never displayed in a glossary or table.
    pub is_search_only: bool,
}

/// One expression/reading combination of a dictionary entry.
#[derive(Clone, Debug, PartialEq, Eq, Getters, CopyGetters, Serialize, Deserialize)]
#[serde(from = "HeadwordFields")]
pub struct Headword {
    #[getset(get = "pub")]
    expression: String,
    #[getset(get = "pub")]
    reading: String,
    /// Position among the entry's headwords.
    #[getset(get_copy = "pub")]
    index: usize,
    #[getset(get_copy = "pub")]
    flags: HeadwordFlags,
    #[getset(get = "pub")]
    term_tags: Vec<String>,
}

impl Headword {
    /// An empty `reading` falls back to `expression`.
    pub fn new(expression: impl Into<String>, reading: impl Into<String>, index: usize) -> Self {
        Self::with_flags(expression, reading, index, HeadwordFlags::default(), Vec::new())
    }

    pub fn with_flags(
        expression: impl Into<String>,
        reading: impl Into<String>,
        index: usize,
        flags: HeadwordFlags,
        term_tags: Vec<String>,
    ) -> Self {
        let expression = expression.into();
        let mut reading = reading.into();
        if reading.is_empty() {
            reading = expression.clone();
        }
        Self {
            expression,
            reading,
            index,
            flags,
            term_tags,
        }
    }

    /// A headword written in kana only; the reading doubles as the expression.
    pub fn kana(reading: impl Into<String>, index: usize) -> Self {
        let reading = reading.into();
        Self::new(reading.clone(), reading, index)
    }

    pub fn is_search_only(&self) -> bool {
        self.flags.is_search_only
    }

    pub fn is_gikun(&self) -> bool {
        self.flags.is_gikun
    }

    pub fn is_kana_only(&self) -> bool {
        convert_katakana_to_hiragana(&self.expression) == convert_katakana_to_hiragana(&self.reading)
    }

    pub fn kanji_form(&self) -> &str {
        if self.is_kana_only() {
            NO_KANJI_SYMBOL
        } else {
            &self.expression
        }
    }

    pub fn info_symbols(&self) -> String {
        let flags = &self.flags;
        let mut symbols = Vec::with_capacity(4);
        if flags.is_priority {
            symbols.push(PRIORITY_SYMBOL);
        }
        if flags.is_rare_kanji || flags.is_rare_kana {
            symbols.push(RARE_SYMBOL);
        }
        if flags.is_irregular {
            symbols.push(IRREGULAR_SYMBOL);
        }
        if flags.is_outdated {
            symbols.push(OUTDATED_SYMBOL);
        }
        symbols.join(" | ")
    }

    pub fn gloss_text(&self) -> String {
        let mut gloss = if self.flags.is_ateji {
            bracket(&self.expression)
        } else {
            self.expression.clone()
        };
        let symbols = self.info_symbols();
        if !symbols.is_empty() {
            gloss.push('（');
            gloss.push_str(&symbols);
            gloss.push('）');
        }
        gloss
    }

    pub fn table_col_header_text(&self) -> String {
        let kanji_form = self.kanji_form();
        if self.flags.is_ateji {
            bracket(kanji_form)
        } else {
            kanji_form.to_string()
        }
    }

    pub fn table_row_header_text(&self) -> String {
        if self.flags.is_gikun {
            bracket(&self.reading)
        } else {
            self.reading.clone()
        }
    }

    pub fn table_cell_text(&self) -> String {
        let symbols = self.info_symbols();
        if symbols.is_empty() {
            DEFAULT_SYMBOL.to_string()
        } else {
            symbols
        }
    }
}

/// Deserialized headwords go through [`Headword::with_flags`].
#[derive(Deserialize)]
struct HeadwordFields {
    expression: String,
    #[serde(default)]
    reading: String,
    #[serde(default)]
    index: usize,
    #[serde(default)]
    flags: HeadwordFlags,
    #[serde(default)]
    term_tags: Vec<String>,
}

impl From<HeadwordFields> for Headword {
    fn from(f: HeadwordFields) -> Self {
        Headword::with_flags(f.expression, f.reading, f.index, f.flags, f.term_tags)
    }
}

fn bracket(text: &str) -> String {
    format!("{ATEJI_OPEN}{text}{ATEJI_CLOSE}")
}

/// Ranking hint for a term built from `headword`'s `sense_number`-th sense (1-based).
pub fn calculate_term_score(sense_number: usize, headword: &Headword) -> i64 {
    let flags = headword.flags();
    let mut score = 0;
    if flags.is_priority {
        score += PRIORITY_WEIGHT;
    }
    for demoted in [
        flags.is_irregular,
        flags.is_outdated,
        flags.is_rare_kanji,
        flags.is_rare_kana,
    ] {
        if demoted {
            score -= PRIORITY_WEIGHT;
        }
    }
    score -= sense_number.saturating_sub(1) as i64 * SENSE_WEIGHT;
    score -= headword.index() as i64 * ENTRY_POSITION_WEIGHT;
    score
}
