//! Deciding between a flat list of forms and a reading × kanji table,
//! and building either one.

use indexmap::IndexMap;

use crate::dictionary_data::GlossaryItem;
use crate::headword::Headword;
use crate::language::ja::japanese::convert_katakana_to_hiragana;
use crate::ordered_set::OrderedSet;
use crate::structured_content::{ContentAttr, Element, StructuredContent, TextAlign};

/// Whether the headwords of one entry need a reading × kanji table.
///
/// Any displayable gikun headword forces a table. Otherwise a table is needed when the
/// headwords that carry kanji span more than one distinct reading
/// (`バカがい` and `ばかがい` are not distinct).
pub fn needs_form_table(headwords: &[Headword]) -> bool {
    let mut unique_reading: Option<String> = None;
    for h in headwords {
        if h.is_search_only() {
            continue;
        } else if h.is_gikun() {
            return true;
        } else if h.is_kana_only() {
            continue;
        }
        let reading = convert_katakana_to_hiragana(h.reading());
        match &unique_reading {
            None => unique_reading = Some(reading),
            Some(unique) if *unique != reading => return true,
            Some(_) => {}
        }
    }
    false
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormTableData {
    pub kanji_forms: OrderedSet<String>,
    pub readings: OrderedSet<String>,
    pub col_header_text: IndexMap<String, String>,
    pub row_header_text: IndexMap<String, String>,
    /// reading -> kanji form -> cell text
    pub cell_text: IndexMap<String, IndexMap<String, String>>,
}

impl FormTableData {
    /// Columns and rows are laid out in first-seen order; the headword that
    /// introduces a column or row decides its header text.
    pub fn new(headwords: &[Headword]) -> Self {
        let mut d = Self::default();
        for h in headwords.iter().filter(|h| !h.is_search_only()) {
            let kanji_form = h.kanji_form().to_string();
            if d.kanji_forms.insert(kanji_form.clone()) {
                d.col_header_text
                    .insert(kanji_form.clone(), h.table_col_header_text());
            }
            let reading = h.reading().clone();
            if d.readings.insert(reading.clone()) {
                d.row_header_text
                    .insert(reading.clone(), h.table_row_header_text());
            }
            d.cell_text
                .entry(reading)
                .or_default()
                .insert(kanji_form, h.table_cell_text());
        }
        d
    }

    pub fn cell(&self, reading: &str, kanji_form: &str) -> Option<&str> {
        self.cell_text
            .get(reading)
            .and_then(|row| row.get(kanji_form))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Lays the data out as a single `table` element.
    pub fn to_element(&self) -> Element {
        let centered = ContentAttr::aligned(TextAlign::Center);
        let left = ContentAttr::aligned(TextAlign::Left);

        // empty cell in the upper left corner
        let mut head_cells = vec![Element::table_head_cell(ContentAttr::default(), "")];
        for kanji_form in &self.kanji_forms {
            let text = self.col_header_text.get(kanji_form).cloned().unwrap_or_default();
            head_cells.push(Element::table_head_cell(centered.clone(), text));
        }
        let mut rows = vec![Element::table_row(ContentAttr::default(), head_cells)];

        for reading in &self.readings {
            let text = self.row_header_text.get(reading).cloned().unwrap_or_default();
            let mut cells = vec![Element::table_head_cell(left.clone(), text)];
            for kanji_form in &self.kanji_forms {
                // pairs that never co-occur stay empty, unlike `DEFAULT_SYMBOL`
                let text = self.cell(reading, kanji_form).unwrap_or_default();
                cells.push(Element::table_cell(centered.clone(), text));
            }
            rows.push(Element::table_row(ContentAttr::default(), cells));
        }

        Element::table(ContentAttr::with_data("content", "formsTable"), rows)
    }
}

/// A glossary holding exactly one forms table, or nothing if every headword
/// is search-only.
pub fn forms_table_glossary(headwords: &[Headword]) -> Vec<GlossaryItem> {
    let d = FormTableData::new(headwords);
    if d.is_empty() {
        return Vec::new();
    }
    vec![GlossaryItem::StructuredContent(StructuredContent::new(
        d.to_element(),
    ))]
}

/// One text item per displayable headword.
pub fn forms_glossary(headwords: &[Headword]) -> Vec<GlossaryItem> {
    headwords
        .iter()
        .filter(|h| !h.is_search_only())
        .map(|h| GlossaryItem::Text(h.gloss_text()))
        .collect()
}

pub fn forms_glossary_for(headwords: &[Headword]) -> Vec<GlossaryItem> {
    if needs_form_table(headwords) {
        forms_table_glossary(headwords)
    } else {
        forms_glossary(headwords)
    }
}
