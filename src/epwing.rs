//! Term extraction from EPWING book entries.
//!
//! The book reader itself lives elsewhere; by the time an entry reaches an
//! [`EpwingExtractor`] it is just a heading line and a body of text. Each
//! supported book is one fixed configuration of an extractor, chosen through
//! [`EpwingEdition`].

pub mod koujien;

use std::collections::HashMap;

use rayon::prelude::*;

use crate::dictionary_data::{ExportOutput, Index, KanjiRecord, TermRecord};
use crate::errors::ExportError;
use crate::settings::ExportOptions;

use koujien::{KoujienExtractor, FUZOKU_PATTERNS, KOUJIEN_PATTERNS};

/// One heading/body pair as read from a book.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookEntry {
    pub heading: String,
    pub text: String,
}

impl BookEntry {
    pub fn new(heading: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            text: text.into(),
        }
    }
}

pub trait EpwingExtractor: Sync {
    /// Records for one entry; empty if the heading is not an entry heading.
    fn extract_terms(&self, entry: &BookEntry, sequence: i64) -> Vec<TermRecord>;
    fn extract_kanji(&self, entry: &BookEntry) -> Vec<KanjiRecord>;
    fn revision(&self) -> &str;
    /// Replacement text for the book's narrow gaiji, keyed by gaiji code.
    fn font_narrow(&self) -> HashMap<u32, &'static str>;
    /// Replacement text for the book's wide gaiji, keyed by gaiji code.
    fn font_wide(&self) -> HashMap<u32, &'static str>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EpwingEdition {
    /// 広辞苑 第六版
    Koujien,
    /// 広辞苑 付属資料
    Fuzoku,
}

impl EpwingEdition {
    /// Picks the edition from the book's subbook title.
    pub fn from_title(title: &str) -> Result<Self, ExportError> {
        match title.trim() {
            "広辞苑第六版" => Ok(EpwingEdition::Koujien),
            "付属資料" => Ok(EpwingEdition::Fuzoku),
            _ => Err(ExportError::UnknownBook(title.to_string())),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EpwingEdition::Koujien => "広辞苑第六版",
            EpwingEdition::Fuzoku => "付属資料",
        }
    }

    pub fn extractor(&self) -> Result<Box<dyn EpwingExtractor>, ExportError> {
        let extractor = match self {
            EpwingEdition::Koujien => KoujienExtractor::new(&KOUJIEN_PATTERNS)?,
            EpwingEdition::Fuzoku => KoujienExtractor::new(&FUZOKU_PATTERNS)?,
        };
        Ok(Box::new(extractor))
    }
}

/// Extracts every entry of a book.
///
/// Entries are processed in parallel; an entry's position in `entries` is
/// its sequence and the output keeps that order.
pub fn epwing_export(
    entries: &[BookEntry],
    edition: EpwingEdition,
    options: &ExportOptions,
) -> Result<ExportOutput, ExportError> {
    let extractor = edition.extractor()?;

    let per_entry: Vec<(Vec<TermRecord>, Vec<KanjiRecord>)> = entries
        .par_iter()
        .enumerate()
        .map(|(i, entry)| {
            (
                extractor.extract_terms(entry, i as i64),
                extractor.extract_kanji(entry),
            )
        })
        .collect();

    let skipped = per_entry.iter().filter(|(t, _)| t.is_empty()).count();
    let (terms, kanji): (Vec<Vec<TermRecord>>, Vec<Vec<KanjiRecord>>) =
        per_entry.into_iter().unzip();
    let terms: Vec<TermRecord> = terms.into_iter().flatten().collect();
    let kanji: Vec<KanjiRecord> = kanji.into_iter().flatten().collect();

    log::info!(
        "{}: {} terms, {} kanji from {} entries ({skipped} without terms)",
        edition.title(),
        terms.len(),
        kanji.len(),
        entries.len(),
    );

    let index = Index::new(options.title_or(edition.title()), extractor.revision(), true);
    Ok(ExportOutput { index, terms, kanji })
}
