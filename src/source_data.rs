//! Input records as handed over by the JMdict family parsers.
//!
//! Only the fields the exporters read are modelled. Every field defaults, so
//! a parser may leave out whatever a given entry does not carry.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_DATE: &str = "unknown";

static DATE_EXP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JmdictEntry {
    pub sequence: i64,
    pub kanji: Vec<JmdictKanji>,
    pub readings: Vec<JmdictReading>,
    pub senses: Vec<JmdictSense>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JmdictKanji {
    pub expression: String,
    /// `ke_inf` codes such as `ateji`, `iK`, `oK`, `rK`, `sK`.
    pub information: Vec<String>,
    pub priorities: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JmdictReading {
    pub reading: String,
    /// The reading is not a true reading of any kanji form.
    pub no_kanji: bool,
    /// Kanji forms this reading is restricted to; empty means all of them.
    pub restrictions: Vec<String>,
    /// `re_inf` codes such as `gikun`, `ik`, `ok`, `rk`, `sk`.
    pub information: Vec<String>,
    pub priorities: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JmdictSense {
    pub parts_of_speech: Vec<String>,
    pub glossary: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JmnedictEntry {
    pub sequence: i64,
    pub kanji: Vec<JmnedictKanji>,
    pub readings: Vec<JmnedictReading>,
    pub translations: Vec<JmnedictTranslation>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JmnedictKanji {
    pub expression: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JmnedictReading {
    pub reading: String,
}

/// One sense of a name entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JmnedictTranslation {
    pub name_types: Vec<String>,
    pub translations: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KanjidicCharacter {
    pub literal: String,
    pub reading_meaning: Option<KanjidicReadingMeaning>,
    pub dictionary_numbers: Vec<KanjidicTypedValue>,
    pub misc: KanjidicMisc,
    pub codepoints: Vec<KanjidicTypedValue>,
    pub query_codes: Vec<KanjidicTypedValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KanjidicReadingMeaning {
    pub readings: Vec<KanjidicTypedValue>,
    pub meanings: Vec<KanjidicMeaning>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KanjidicMeaning {
    pub meaning: String,
    /// Two letter language code; `None` for English.
    pub language: Option<String>,
}

/// A `type`/value pair, e.g. a reading (`ja_on`) or a code point (`ucs`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanjidicTypedValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KanjidicMisc {
    pub grade: Option<String>,
    pub stroke_counts: Vec<String>,
    pub frequency: Option<String>,
    pub jlpt_level: Option<String>,
}

/// First `YYYY-MM-DD` date in `gloss`, or [`UNKNOWN_DATE`].
///
/// The EDRDG files carry their creation date as the gloss of a final
/// pseudo entry.
pub fn publication_date(gloss: Option<&str>) -> String {
    gloss
        .and_then(|gloss| DATE_EXP.find(gloss))
        .map(|m| m.as_str())
        .filter(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok())
        .map_or_else(|| UNKNOWN_DATE.to_string(), str::to_string)
}
