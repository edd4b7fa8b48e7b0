//! KANJIDIC2 character entries.

use rayon::prelude::*;

use crate::dictionary_data::{ExportOutput, Index, KanjiRecord, EDRDG_ATTRIBUTION};
use crate::settings::ExportOptions;
use crate::source_data::KanjidicCharacter;

pub const DEFAULT_TITLE: &str = "KANJIDIC2";

const JOUYOU_TAG: &str = "jouyou";
const JINMEIYOU_TAG: &str = "jinmeiyou";

/// Meaning language code for a configured language name.
///
/// `None` selects the untagged English meanings, also for names KANJIDIC2
/// has no meanings in.
pub fn language_tag(language: Option<&str>) -> Option<&'static str> {
    match language? {
        "french" => Some("fr"),
        "spanish" => Some("es"),
        "portuguese" => Some("pt"),
        "english" | "" => None,
        other => {
            log::warn!("no kanji meanings in `{other}`, using english");
            None
        }
    }
}

/// `None` when the character has no meaning in `language_tag`.
pub fn kanjidic_extract_kanji(character: &KanjidicCharacter, language_tag: Option<&str>) -> Option<KanjiRecord> {
    let reading_meaning = character.reading_meaning.as_ref()?;

    let meanings: Vec<String> = reading_meaning
        .meanings
        .iter()
        .filter(|m| m.language.as_deref() == language_tag)
        .map(|m| m.meaning.clone())
        .collect();
    if meanings.is_empty() {
        return None;
    }

    let mut kanji = KanjiRecord {
        character: character.literal.clone(),
        meanings,
        ..Default::default()
    };

    let stats = &mut kanji.stats;
    for number in &character.dictionary_numbers {
        stats.insert(number.kind.clone(), number.value.clone());
    }
    let misc = &character.misc;
    if let Some(frequency) = &misc.frequency {
        stats.insert("freq".to_string(), frequency.clone());
    }
    if let Some(level) = &misc.jlpt_level {
        stats.insert("jlpt".to_string(), level.clone());
    }
    if let Some(strokes) = misc.stroke_counts.first() {
        stats.insert("strokes".to_string(), strokes.clone());
    }
    for code in character.codepoints.iter().chain(&character.query_codes) {
        stats.insert(code.kind.clone(), code.value.clone());
    }
    if let Some(grade) = &misc.grade {
        stats.insert("grade".to_string(), grade.clone());
        match grade.parse::<u8>() {
            Ok(1..=8) => kanji.add_tags([JOUYOU_TAG]),
            Ok(9..=10) => kanji.add_tags([JINMEIYOU_TAG]),
            _ => {}
        }
    }

    for reading in &reading_meaning.readings {
        match reading.kind.as_str() {
            "ja_on" => kanji.onyomi.push(reading.value.clone()),
            "ja_kun" => kanji.kunyomi.push(reading.value.clone()),
            _ => {}
        }
    }

    Some(kanji)
}

/// `database_version` is the `<database_version>` of the file header.
pub fn kanjidic_export(
    characters: &[KanjidicCharacter],
    database_version: &str,
    options: &ExportOptions,
) -> ExportOutput {
    let tag = language_tag(options.language.as_deref());
    let kanji: Vec<KanjiRecord> = characters
        .par_iter()
        .filter_map(|character| kanjidic_extract_kanji(character, tag))
        .collect();

    log::info!(
        "{DEFAULT_TITLE}: {} of {} characters have meanings",
        kanji.len(),
        characters.len()
    );

    let title = format!("{} [{database_version}]", options.title_or(DEFAULT_TITLE));
    let index = Index::new(title, format!("kanjidic2.{database_version}"), false)
        .with_attribution(EDRDG_ATTRIBUTION);
    ExportOutput {
        index,
        terms: Vec::new(),
        kanji,
    }
}

#[cfg(test)]
mod kanjidic_tests {
    use super::*;
    use crate::source_data::{KanjidicMeaning, KanjidicMisc, KanjidicReadingMeaning, KanjidicTypedValue};
    use pretty_assertions::assert_eq;

    fn typed(kind: &str, value: &str) -> KanjidicTypedValue {
        KanjidicTypedValue {
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }

    fn meaning(meaning: &str, language: Option<&str>) -> KanjidicMeaning {
        KanjidicMeaning {
            meaning: meaning.to_string(),
            language: language.map(str::to_string),
        }
    }

    fn hayashi(grade: Option<&str>) -> KanjidicCharacter {
        KanjidicCharacter {
            literal: "林".to_string(),
            reading_meaning: Some(KanjidicReadingMeaning {
                readings: vec![typed("pinyin", "lin2"), typed("ja_on", "リン"), typed("ja_kun", "はやし")],
                meanings: vec![meaning("grove", None), meaning("forest", None), meaning("bois", Some("fr"))],
            }),
            dictionary_numbers: vec![typed("heisig", "195")],
            misc: KanjidicMisc {
                grade: grade.map(str::to_string),
                stroke_counts: vec!["8".to_string(), "9".to_string()],
                frequency: Some("1223".to_string()),
                jlpt_level: None,
            },
            codepoints: vec![typed("ucs", "6797")],
            query_codes: vec![typed("skip", "1-4-4")],
        }
    }

    #[test]
    fn english_record() {
        let kanji = kanjidic_extract_kanji(&hayashi(Some("1")), None).unwrap();
        assert_eq!(kanji.meanings, vec!["grove", "forest"]);
        assert_eq!(kanji.onyomi, vec!["リン"]);
        assert_eq!(kanji.kunyomi, vec!["はやし"]);
        assert_eq!(kanji.tags.join(" "), JOUYOU_TAG);
        let stats: Vec<(&str, &str)> = kanji
            .stats
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            stats,
            vec![
                ("heisig", "195"),
                ("freq", "1223"),
                ("strokes", "8"),
                ("ucs", "6797"),
                ("skip", "1-4-4"),
                ("grade", "1"),
            ]
        );
    }

    #[test]
    fn meanings_filtered_by_language() {
        let kanji = kanjidic_extract_kanji(&hayashi(None), Some("fr")).unwrap();
        assert_eq!(kanji.meanings, vec!["bois"]);
        assert!(kanjidic_extract_kanji(&hayashi(None), Some("es")).is_none());
        assert!(kanjidic_extract_kanji(&KanjidicCharacter::default(), None).is_none());
    }

    #[test]
    fn grade_tags() {
        let tags = |grade| {
            kanjidic_extract_kanji(&hayashi(Some(grade)), None)
                .unwrap()
                .tags
                .join(" ")
        };
        assert_eq!(tags("8"), JOUYOU_TAG);
        assert_eq!(tags("9"), JINMEIYOU_TAG);
        assert_eq!(tags("10"), JINMEIYOU_TAG);
        assert_eq!(tags("11"), "");
        assert_eq!(tags("x"), "");
    }

    #[test]
    fn language_names() {
        assert_eq!(language_tag(Some("portuguese")), Some("pt"));
        assert_eq!(language_tag(Some("german")), None);
        assert_eq!(language_tag(None), None);
    }

    #[test]
    fn export_index_is_unsequenced() {
        let options = ExportOptions {
            language: Some("french".to_string()),
            ..Default::default()
        };
        let characters = vec![hayashi(None), KanjidicCharacter::default()];
        let output = kanjidic_export(&characters, "2024-100", &options);
        assert_eq!(output.kanji.len(), 1);
        assert_eq!(output.index.title, "KANJIDIC2 [2024-100]");
        assert_eq!(output.index.revision, "kanjidic2.2024-100");
        assert!(!output.index.sequenced);
    }
}
