//! The JMnedict name dictionary.
//!
//! Senses the [`GenericNamePolicy`] accepts are not emitted per entry; they
//! are folded into a [`GenericTermInfo`] and written once per name at the
//! end of the run.

use rayon::prelude::*;

use crate::dictionary_data::{ExportOutput, GlossaryItem, Index, TermRecord, EDRDG_ATTRIBUTION};
use crate::errors::ExportError;
use crate::generic_names::{GenericNamePolicy, GenericTermInfo, GlossPatternPolicy};
use crate::headword::{calculate_term_score, Headword};
use crate::settings::ExportOptions;
use crate::source_data::{publication_date, JmnedictEntry, JmnedictTranslation};

pub const DEFAULT_TITLE: &str = "JMnedict";

/// What one sense of one headword turns into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SenseOutcome {
    Standalone(TermRecord),
    Generic {
        expression: String,
        reading: String,
        name_types: Vec<String>,
    },
}

/// Every kanji × reading pair, or every reading on its own for an entry
/// without kanji. Names carry no priority markers or restrictions.
pub fn jmnedict_headwords(entry: &JmnedictEntry) -> Vec<Headword> {
    let mut headwords = Vec::new();
    for reading in &entry.readings {
        for kanji in &entry.kanji {
            headwords.push(Headword::new(&kanji.expression, &reading.reading, headwords.len()));
        }
    }
    if entry.kanji.is_empty() {
        for reading in &entry.readings {
            headwords.push(Headword::kana(&reading.reading, headwords.len()));
        }
    }
    headwords
}

pub fn jmnedict_sense_term(
    headword: &Headword,
    sequence: i64,
    sense: &JmnedictTranslation,
    sense_number: usize,
) -> TermRecord {
    let mut term = TermRecord::new(headword.expression(), headword.reading(), sequence);
    term.glossary = sense
        .translations
        .iter()
        .map(|gloss| GlossaryItem::from(gloss.as_str()))
        .collect();
    term.add_definition_tags(sense.name_types.iter().cloned());
    term.score = calculate_term_score(sense_number, headword);
    term
}

/// Classifies every sense of `entry` for one headword. Touches no shared state.
pub fn classify_senses<P>(headword: &Headword, entry: &JmnedictEntry, policy: &P) -> Vec<SenseOutcome>
where
    P: GenericNamePolicy + ?Sized,
{
    entry
        .translations
        .iter()
        .enumerate()
        .map(|(i, sense)| {
            if policy.is_generic_name(headword, &sense.translations) {
                SenseOutcome::Generic {
                    expression: headword.expression().clone(),
                    reading: headword.reading().clone(),
                    name_types: sense.name_types.clone(),
                }
            } else {
                SenseOutcome::Standalone(jmnedict_sense_term(headword, entry.sequence, sense, i + 1))
            }
        })
        .collect()
}

/// Applies classified senses of entry `sequence` to the run's aggregator and
/// returns the standalone records.
pub fn merge_outcomes(
    outcomes: Vec<SenseOutcome>,
    sequence: i64,
    generic_info: &mut GenericTermInfo,
) -> Vec<TermRecord> {
    let mut terms = Vec::new();
    for outcome in outcomes {
        match outcome {
            SenseOutcome::Standalone(term) => {
                generic_info.add_used_sequence(sequence);
                terms.push(term);
            }
            SenseOutcome::Generic {
                expression,
                reading,
                name_types,
            } => generic_info.add_glosses(&expression, &name_types, &reading, sequence),
        }
    }
    terms
}

/// Standalone records for one headword of `entry`; generic senses go to
/// `generic_info` instead.
pub fn jmnedict_terms<P>(
    headword: &Headword,
    entry: &JmnedictEntry,
    policy: &P,
    generic_info: &mut GenericTermInfo,
) -> Vec<TermRecord>
where
    P: GenericNamePolicy + ?Sized,
{
    merge_outcomes(classify_senses(headword, entry, policy), entry.sequence, generic_info)
}

/// Creation date of a JMnedict file, read from its final pseudo entry.
pub fn jmnedict_publication_date(entries: &[JmnedictEntry]) -> String {
    let gloss = entries
        .last()
        .and_then(|entry| entry.translations.first())
        .and_then(|sense| sense.translations.first());
    publication_date(gloss.map(String::as_str))
}

/// Exports `entries` in source order.
///
/// Headword extraction and classification run in parallel; the outcomes are
/// then merged into the aggregator one entry at a time, so the result does
/// not depend on scheduling.
pub fn jmnedict_export<P>(entries: &[JmnedictEntry], policy: &P, options: &ExportOptions) -> ExportOutput
where
    P: GenericNamePolicy + ?Sized,
{
    let classified: Vec<Vec<SenseOutcome>> = entries
        .par_iter()
        .map(|entry| {
            jmnedict_headwords(entry)
                .iter()
                .flat_map(|headword| classify_senses(headword, entry, policy))
                .collect()
        })
        .collect();

    let mut generic_info = GenericTermInfo::new();
    let mut terms = Vec::new();
    for (entry, outcomes) in entries.iter().zip(classified) {
        terms.extend(merge_outcomes(outcomes, entry.sequence, &mut generic_info));
    }
    let standalone = terms.len();
    terms.extend(generic_info.terms(&options.generic_names.labels));

    log::info!(
        "{DEFAULT_TITLE}: {standalone} standalone and {} aggregated terms from {} entries",
        terms.len() - standalone,
        entries.len(),
    );

    let date = jmnedict_publication_date(entries);
    let title = format!("{}[{date}]", options.title_or(DEFAULT_TITLE));
    let index = Index::new(title, format!("JMnedict.{date}"), true).with_attribution(EDRDG_ATTRIBUTION);
    ExportOutput {
        index,
        terms,
        kanji: Vec::new(),
    }
}

/// [`jmnedict_export`] with the gloss patterns configured in `options`.
pub fn jmnedict_export_with_options(
    entries: &[JmnedictEntry],
    options: &ExportOptions,
) -> Result<ExportOutput, ExportError> {
    let policy = GlossPatternPolicy::from_options(&options.generic_names)?;
    Ok(jmnedict_export(entries, &policy, options))
}

#[cfg(test)]
mod jmnedict_tests {
    use super::*;
    use crate::source_data::{JmnedictKanji, JmnedictReading};
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn entry(sequence: i64, kanji: &[&str], readings: &[&str], senses: &[(&[&str], &[&str])]) -> JmnedictEntry {
        JmnedictEntry {
            sequence,
            kanji: kanji
                .iter()
                .map(|k| JmnedictKanji {
                    expression: k.to_string(),
                })
                .collect(),
            readings: readings
                .iter()
                .map(|r| JmnedictReading {
                    reading: r.to_string(),
                })
                .collect(),
            translations: senses
                .iter()
                .map(|(name_types, glosses)| JmnedictTranslation {
                    name_types: strings(name_types),
                    translations: strings(glosses),
                })
                .collect(),
        }
    }

    fn surname_policy(_: &Headword, glosses: &[String]) -> bool {
        glosses.iter().all(|g| g == "(surname)")
    }

    #[test]
    fn headwords_pair_readings_with_kanji() {
        let e = entry(1, &["山田", "山多"], &["やまだ", "やまた"], &[]);
        let pairs: Vec<(String, String)> = jmnedict_headwords(&e)
            .iter()
            .map(|h| (h.expression().clone(), h.reading().clone()))
            .collect();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[1], ("山多".to_string(), "やまだ".to_string()));

        let kana = entry(2, &[], &["マリア"], &[]);
        let headwords = jmnedict_headwords(&kana);
        assert_eq!(headwords.len(), 1);
        assert_eq!(headwords[0].expression(), "マリア");
    }

    #[test]
    fn sense_term_scores_by_position() {
        let e = entry(5, &["山田"], &["やまだ"], &[(&["surname"], &["Yamada"]), (&["place"], &["Yamada (place)"])]);
        let headwords = jmnedict_headwords(&e);
        let mut info = GenericTermInfo::new();
        let terms = jmnedict_terms(&headwords[0], &e, &|_: &Headword, _: &[String]| false, &mut info);
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].score, 0);
        assert_eq!(terms[1].score, -10);
        assert_eq!(terms[1].definition_tags.join(" "), "place");
        assert_eq!(terms[1].glossary, vec![GlossaryItem::from("Yamada (place)")]);
        assert!(info.is_used(5));
    }

    #[test]
    fn generic_senses_are_aggregated() {
        let entries = vec![
            entry(10, &["山田"], &["やまだ"], &[(&["surname"], &["(surname)"])]),
            entry(11, &["山田"], &["やまだ"], &[(&["surname", "place"], &["(surname)"])]),
            entry(12, &["山田"], &["やまだ"], &[(&["person"], &["Yamada Taro"])]),
            entry(99, &[], &["ジェイエムネディクト"], &[(&[], &["JMnedict created: 2024-02-29"])]),
        ];
        let output = jmnedict_export(&entries, &surname_policy, &ExportOptions::default());

        let expressions: Vec<(&str, i64)> = output
            .terms
            .iter()
            .map(|t| (t.expression.as_str(), t.sequence))
            .collect();
        assert_eq!(
            expressions,
            vec![("山田", 12), ("ジェイエムネディクト", 99), ("山田", 10)]
        );
        let summary = &output.terms[2];
        assert_eq!(summary.definition_tags.join(" "), "surname place");
        assert_eq!(
            summary.glossary,
            vec![GlossaryItem::from("family or surname"), GlossaryItem::from("place name")]
        );
        assert_eq!(output.index.title, "JMnedict[2024-02-29]");
        assert_eq!(output.index.revision, "JMnedict.2024-02-29");
    }

    #[test]
    fn export_matches_sequential_flow() {
        let entries: Vec<JmnedictEntry> = (0..200)
            .map(|i| {
                let senses: &[(&[&str], &[&str])] = if i % 3 == 0 {
                    &[(&["surname"], &["(surname)"])]
                } else if i % 3 == 1 {
                    &[(&["surname"], &["(surname)"]), (&["given"], &["Taro"])]
                } else {
                    &[(&["given"], &["Hanako"])]
                };
                let kanji = if i % 2 == 0 { "田中" } else { "中田" };
                entry(i, &[kanji], &["たなか"], senses)
            })
            .collect();

        let mut info = GenericTermInfo::new();
        let mut sequential = Vec::new();
        for e in &entries {
            for h in jmnedict_headwords(e) {
                sequential.extend(jmnedict_terms(&h, e, &surname_policy, &mut info));
            }
        }
        let used = info.used_sequence_count();
        let keys = info.aggregate_count();
        sequential.extend(info.terms(&ExportOptions::default().generic_names.labels));

        let output = jmnedict_export(&entries, &surname_policy, &ExportOptions::default());
        assert_eq!(output.terms, sequential);
        assert_eq!(used, 133);
        assert_eq!(keys, 2);
    }

    fn run_counts(entries: &[JmnedictEntry]) -> (usize, usize, usize) {
        let mut info = GenericTermInfo::new();
        let mut standalone = 0;
        for e in entries {
            for h in jmnedict_headwords(e) {
                standalone += jmnedict_terms(&h, e, &surname_policy, &mut info).len();
            }
        }
        let partition = info.used_sequence_count() + info.aggregate_count();
        let keys = info.aggregate_count();
        let total = standalone + info.terms(&ExportOptions::default().generic_names.labels).len();
        assert_eq!(total, standalone + keys);
        (partition, standalone, total)
    }

    #[test]
    fn partition_does_not_depend_on_entry_order() {
        let forward = vec![
            entry(1, &["山田"], &["やまだ"], &[(&["surname"], &["(surname)"])]),
            entry(2, &["山田"], &["やまだ"], &[(&["surname"], &["(surname)"]), (&["given"], &["Taro"])]),
            entry(3, &["田中"], &["たなか"], &[(&["surname"], &["(surname)"])]),
            entry(4, &["花子"], &["はなこ"], &[(&["fem"], &["Hanako"])]),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let (partition, standalone, total) = run_counts(&forward);
        assert_eq!(run_counts(&reversed), (partition, standalone, total));
        // used {2, 4}, keys {山田/やまだ, 田中/たなか}
        assert_eq!(partition, 4);
        assert_eq!(standalone, 2);
        assert_eq!(total, 4);

        let output = jmnedict_export(&reversed, &surname_policy, &ExportOptions::default());
        assert_eq!(output.terms.len(), total);
    }

    #[test]
    fn configured_policy() {
        let options = ExportOptions::from_json_str(
            r#"{ "title": "Names", "genericNames": { "glossPatterns": ["^\\(surname\\)$"] } }"#,
        )
        .unwrap();
        let entries = vec![entry(1, &["佐藤"], &["さとう"], &[(&["surname"], &["(surname)"])])];
        let output = jmnedict_export_with_options(&entries, &options).unwrap();
        assert_eq!(output.terms.len(), 1);
        assert_eq!(output.terms[0].sequence, 1);
        assert_eq!(output.index.title, "Names[unknown]");

        let bad = ExportOptions::from_json_str(r#"{ "genericNames": { "glossPatterns": ["("] } }"#).unwrap();
        assert!(matches!(
            jmnedict_export_with_options(&entries, &bad),
            Err(ExportError::Settings(_))
        ));
    }
}
