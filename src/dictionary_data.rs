use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_untagged::UntaggedEnumVisitor;

use crate::conjugation::ConjugationRule;
use crate::ordered_set::OrderedSet;
use crate::structured_content::StructuredContent;

pub const FORMAT_VERSION: u8 = 3;

/// Attribution line shared by the EDRDG sourced dictionaries.
pub const EDRDG_ATTRIBUTION: &str = "This publication has included material from the JMdict and KANJIDIC dictionary files in accordance with the licence provisions of the Electronic Dictionaries Research Group. See http://www.edrdg.org/";

/// One definition of a term: plain text or a structured-content object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GlossaryItem {
    Text(String),
    StructuredContent(StructuredContent),
}

impl<'de> Deserialize<'de> for GlossaryItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        UntaggedEnumVisitor::new()
            .string(|text| Ok(GlossaryItem::Text(text.to_string())))
            .map(|map| map.deserialize().map(GlossaryItem::StructuredContent))
            .deserialize(deserializer)
    }
}

impl From<&str> for GlossaryItem {
    fn from(text: &str) -> Self {
        GlossaryItem::Text(text.to_string())
    }
}

impl From<String> for GlossaryItem {
    fn from(text: String) -> Self {
        GlossaryItem::Text(text)
    }
}

/// The canonical output unit; one row of a term bank.
///
/// Serializes to
/// `[expression, reading, definitionTags, rules, score, glossary, sequence, termTags]`
/// with every tag list space-joined.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TermRecord {
    pub expression: String,
    pub reading: String,
    pub definition_tags: OrderedSet<String>,
    pub rules: OrderedSet<ConjugationRule>,
    pub score: i64,
    pub glossary: Vec<GlossaryItem>,
    /// Identifier of the source entry this record was built from.
    pub sequence: i64,
    pub term_tags: OrderedSet<String>,
}

impl TermRecord {
    pub fn new(expression: impl Into<String>, reading: impl Into<String>, sequence: i64) -> Self {
        Self {
            expression: expression.into(),
            reading: reading.into(),
            sequence,
            ..Default::default()
        }
    }

    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = ConjugationRule>) {
        self.rules.extend(rules);
    }

    pub fn add_term_tags<S: Into<String>>(&mut self, tags: impl IntoIterator<Item = S>) {
        self.term_tags.extend(tags.into_iter().map(Into::into));
    }

    pub fn add_definition_tags<S: Into<String>>(&mut self, tags: impl IntoIterator<Item = S>) {
        self.definition_tags.extend(tags.into_iter().map(Into::into));
    }
}

impl Serialize for TermRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            &self.expression,
            &self.reading,
            self.definition_tags.join(" "),
            self.rules.join(" "),
            self.score,
            &self.glossary,
            self.sequence,
            self.term_tags.join(" "),
        )
            .serialize(serializer)
    }
}

/// One row of a kanji bank.
///
/// Serializes to `[character, onyomi, kunyomi, tags, meanings, stats]`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct KanjiRecord {
    pub character: String,
    pub onyomi: Vec<String>,
    pub kunyomi: Vec<String>,
    pub tags: OrderedSet<String>,
    pub meanings: Vec<String>,
    pub stats: IndexMap<String, String>,
}

impl KanjiRecord {
    pub fn add_tags<S: Into<String>>(&mut self, tags: impl IntoIterator<Item = S>) {
        self.tags.extend(tags.into_iter().map(Into::into));
    }
}

impl Serialize for KanjiRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            &self.character,
            self.onyomi.join(" "),
            self.kunyomi.join(" "),
            self.tags.join(" "),
            &self.meanings,
            &self.stats,
        )
            .serialize(serializer)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Index represents the metadata of a dictionary.
pub struct Index {
    pub title: String,
    pub format: u8,
    pub revision: String,
    pub sequenced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

impl Index {
    pub fn new(title: impl Into<String>, revision: impl Into<String>, sequenced: bool) -> Self {
        Self {
            title: title.into(),
            format: FORMAT_VERSION,
            revision: revision.into(),
            sequenced,
            attribution: None,
        }
    }

    pub fn with_attribution(mut self, attribution: &str) -> Self {
        self.attribution = Some(attribution.to_string());
        self
    }
}

/// Everything an export run hands over to the dictionary writer.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportOutput {
    pub index: Index,
    pub terms: Vec<TermRecord>,
    pub kanji: Vec<KanjiRecord>,
}

#[cfg(test)]
mod dictionary_data_tests {
    use super::*;
    use crate::structured_content::{ContentAttr, Element};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn term_record_serializes_as_bank_row() {
        let mut term = TermRecord::new("為る", "する", 42);
        term.add_rules([ConjugationRule::Vs, ConjugationRule::Vs]);
        term.add_definition_tags(["vs-i", "uk"]);
        term.add_term_tags(["news1"]);
        term.score = -10;
        term.glossary.push("to do".into());
        assert_eq!(
            serde_json::to_value(&term).unwrap(),
            json!(["為る", "する", "vs-i uk", "vs", -10, ["to do"], 42, "news1"])
        );
    }

    #[test]
    fn glossary_item_untagged_round_trip() {
        let table = Element::table(ContentAttr::default(), vec![]);
        let items = vec![
            GlossaryItem::from("apple"),
            GlossaryItem::StructuredContent(StructuredContent::new(table)),
        ];
        let json = serde_json::to_string(&items).unwrap();
        let back: Vec<GlossaryItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn kanji_record_serializes_as_bank_row() {
        let mut kanji = KanjiRecord {
            character: "林".to_string(),
            onyomi: vec!["リン".to_string()],
            kunyomi: vec!["はやし".to_string()],
            meanings: vec!["grove".to_string()],
            ..Default::default()
        };
        kanji.add_tags(["jouyou"]);
        kanji.stats.insert("grade".to_string(), "1".to_string());
        assert_eq!(
            serde_json::to_value(&kanji).unwrap(),
            json!(["林", "リン", "はやし", "jouyou", ["grove"], { "grade": "1" }])
        );
    }

    #[test]
    fn index_is_camel_case() {
        let index = Index::new("JMnedict", "JMnedict.2024-01-01", true);
        assert_eq!(
            serde_json::to_value(&index).unwrap(),
            json!({ "title": "JMnedict", "format": 3, "revision": "JMnedict.2024-01-01", "sequenced": true })
        );
    }
}
