//! The JMdict Forms dictionary: one record per spelling of an entry, whose
//! glossary lists every other spelling (or lays them out as a table).

use rayon::prelude::*;

use crate::conjugation::{grammar_rules, ConjugationRule};
use crate::dictionary_data::{ExportOutput, GlossaryItem, Index, TermRecord, EDRDG_ATTRIBUTION};
use crate::form_table::forms_glossary_for;
use crate::headword::{calculate_term_score, Headword, HeadwordFlags};
use crate::language::ja::japanese::convert_katakana_to_hiragana;
use crate::ordered_set::OrderedSet;
use crate::settings::ExportOptions;
use crate::source_data::{publication_date, JmdictEntry, JmdictKanji, JmdictReading};

pub const DEFAULT_TITLE: &str = "JMdict Forms";
/// Term tag of records that exist only so a hidden spelling can be looked up.
pub const SEARCH_TAG: &str = "search";
const REDIRECT_SYMBOL: &str = "⟶";

/// Frequency markers that make a spelling a priority form.
const PRIORITY_TAGS: [&str; 5] = ["ichi1", "news1", "gai1", "spec1", "spec2"];

fn set_info_flags(flags: &mut HeadwordFlags, information: &[String]) {
    for info in information {
        match info.as_str() {
            "ateji" => flags.is_ateji = true,
            "gikun" => flags.is_gikun = true,
            "iK" | "ik" | "io" => flags.is_irregular = true,
            "oK" | "ok" => flags.is_outdated = true,
            "rK" => flags.is_rare_kanji = true,
            "rk" => flags.is_rare_kana = true,
            "sK" | "sk" => flags.is_search_only = true,
            _ => {}
        }
    }
}

fn kanji_headword(kanji: &JmdictKanji, reading: &JmdictReading, index: usize) -> Headword {
    let mut flags = HeadwordFlags::default();
    set_info_flags(&mut flags, &kanji.information);
    set_info_flags(&mut flags, &reading.information);
    // a spelling's frequency markers only hold for readings that share them
    let priorities: Vec<String> = kanji
        .priorities
        .iter()
        .filter(|p| reading.priorities.contains(p))
        .cloned()
        .collect();
    flags.is_priority = is_priority(&priorities);
    Headword::with_flags(&kanji.expression, &reading.reading, index, flags, priorities)
}

fn kana_headword(reading: &JmdictReading, index: usize) -> Headword {
    let mut flags = HeadwordFlags::default();
    set_info_flags(&mut flags, &reading.information);
    flags.is_priority = is_priority(&reading.priorities);
    Headword::with_flags(
        &reading.reading,
        &reading.reading,
        index,
        flags,
        reading.priorities.clone(),
    )
}

fn is_priority(priorities: &[String]) -> bool {
    priorities.iter().any(|p| PRIORITY_TAGS.contains(&p.as_str()))
}

/// Every spelling of `entry`, reading by reading.
///
/// A reading pairs with each kanji form it is not restricted away from. Kana
/// headwords are produced for readings that belong to no kanji form, and for
/// every reading of an entry without kanji.
pub fn extract_headwords(entry: &JmdictEntry) -> Vec<Headword> {
    let mut headwords = Vec::new();
    for reading in &entry.readings {
        if entry.kanji.is_empty() || reading.no_kanji {
            headwords.push(kana_headword(reading, headwords.len()));
            continue;
        }
        for kanji in &entry.kanji {
            if !reading.restrictions.is_empty() && !reading.restrictions.contains(&kanji.expression) {
                continue;
            }
            headwords.push(kanji_headword(kanji, reading, headwords.len()));
        }
    }
    headwords
}

/// Conjugation rules for all senses of `entry`.
pub fn entry_grammar_rules(entry: &JmdictEntry) -> OrderedSet<ConjugationRule> {
    grammar_rules(
        entry
            .senses
            .iter()
            .flat_map(|sense| sense.parts_of_speech.iter().map(String::as_str)),
    )
}

/// The record every displayed spelling of `entry` starts from.
pub fn base_forms_term(entry: &JmdictEntry, headwords: &[Headword]) -> TermRecord {
    let mut term = TermRecord::new("", "", entry.sequence);
    term.glossary = forms_glossary_for(headwords);
    term.add_rules(entry_grammar_rules(entry));
    term
}

/// A lookup-only record pointing a hidden spelling at the displayed spelling
/// with the same reading, or at the first displayed spelling.
///
/// `None` if the entry displays nothing to point at.
pub fn search_term(headword: &Headword, headwords: &[Headword], base: &TermRecord) -> Option<TermRecord> {
    let folded = convert_katakana_to_hiragana(headword.reading());
    let mut displayed = headwords.iter().filter(|h| !h.is_search_only());
    let first = displayed.clone().next()?;
    let target = displayed
        .find(|h| convert_katakana_to_hiragana(h.reading()) == folded)
        .unwrap_or(first);

    let mut term = TermRecord::new(headword.expression(), headword.reading(), base.sequence);
    term.glossary = vec![GlossaryItem::Text(format!(
        "{REDIRECT_SYMBOL}{}",
        target.gloss_text()
    ))];
    term.add_rules(base.rules.iter().copied());
    term.add_term_tags(headword.term_tags().iter().cloned());
    term.add_term_tags([SEARCH_TAG]);
    term.score = calculate_term_score(1, headword);
    Some(term)
}

/// All records for one entry, in headword order.
pub fn forms_terms(entry: &JmdictEntry) -> Vec<TermRecord> {
    let headwords = extract_headwords(entry);
    if headwords.is_empty() {
        log::debug!("entry {} has no headwords", entry.sequence);
        return Vec::new();
    }
    let base = base_forms_term(entry, &headwords);
    headwords
        .iter()
        .filter_map(|h| {
            if h.is_search_only() {
                return search_term(h, &headwords, &base);
            }
            let mut term = base.clone();
            term.expression = h.expression().clone();
            term.reading = h.reading().clone();
            term.add_term_tags(h.term_tags().iter().cloned());
            term.score = calculate_term_score(1, h);
            Some(term)
        })
        .collect()
}

/// Creation date of a JMdict file, read from its final pseudo entry.
pub fn jmdict_publication_date(entries: &[JmdictEntry]) -> String {
    let gloss = entries
        .last()
        .and_then(|entry| entry.senses.first())
        .and_then(|sense| sense.glossary.first());
    publication_date(gloss.map(String::as_str))
}

pub fn forms_export(entries: &[JmdictEntry], options: &ExportOptions) -> ExportOutput {
    let terms: Vec<TermRecord> = entries
        .par_iter()
        .map(forms_terms)
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect();

    let date = jmdict_publication_date(entries);
    log::info!("{DEFAULT_TITLE}: {} terms from {} entries", terms.len(), entries.len());

    let index = Index::new(options.title_or(DEFAULT_TITLE), format!("JMdict.{date}"), true)
        .with_attribution(EDRDG_ATTRIBUTION);
    ExportOutput {
        index,
        terms,
        kanji: Vec::new(),
    }
}
