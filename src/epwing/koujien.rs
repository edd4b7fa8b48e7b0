use std::collections::HashMap;

use regex::{NoExpand, Regex};

use crate::conjugation::ConjugationRule;
use crate::dictionary_data::{KanjiRecord, TermRecord};
use crate::epwing::{BookEntry, EpwingExtractor};
use crate::errors::ExportError;
use crate::ordered_set::OrderedSet;

const ADJECTIVE_TAG: &str = "形";
const SURU_TAG: &str = "動サ変";
const SURU_SUFFIXES: [&str; 2] = ["する", "為る"];
const KURU: &str = "来る";

/// The patterns that tell one edition's layout from another's.
#[derive(Clone, Copy, Debug)]
pub struct PatternSet {
    pub revision: &'static str,
    /// reading, 【expression】, 〖secondary〗, （metadata）
    pub parts: &'static str,
    /// Grouping marks inside a reading.
    pub read_group: &'static str,
    /// Optional spelling inside an expression, e.g. `思(い)出`.
    pub expression_variant: &'static str,
    pub meta: &'static str,
    pub godan: &'static str,
    pub ichidan: &'static str,
}

pub const KOUJIEN_PATTERNS: PatternSet = PatternSet {
    revision: "koujien",
    parts: r"([^（【〖]+)(?:【(.*)】)?(?:〖(.*)〗)?(?:（(.*)）)?",
    read_group: r"[‐・]+",
    expression_variant: r"\(([^\)]*)\)",
    meta: r"（([^）]*)）",
    godan: r"(動.[四五](［[^］]+］)?)|(動..二)",
    ichidan: r"(動..一)",
};

pub const FUZOKU_PATTERNS: PatternSet = PatternSet {
    read_group: r"[-・]+",
    ..KOUJIEN_PATTERNS
};

#[derive(Debug)]
pub struct KoujienExtractor {
    revision: &'static str,
    parts_exp: Regex,
    read_group_exp: Regex,
    exp_var_exp: Regex,
    meta_exp: Regex,
    v5_exp: Regex,
    v1_exp: Regex,
}

fn compile(pattern: &str) -> Result<Regex, ExportError> {
    Regex::new(pattern).map_err(|e| ExportError::pattern(pattern, e))
}

impl KoujienExtractor {
    pub fn new(patterns: &PatternSet) -> Result<Self, ExportError> {
        Ok(Self {
            revision: patterns.revision,
            parts_exp: compile(patterns.parts)?,
            read_group_exp: compile(patterns.read_group)?,
            exp_var_exp: compile(patterns.expression_variant)?,
            meta_exp: compile(patterns.meta)?,
            v5_exp: compile(patterns.godan)?,
            v1_exp: compile(patterns.ichidan)?,
        })
    }

    /// `思(い)出・想(い)出` -> `思い出`, `思出`, `想い出`, `想出`
    fn expressions(&self, segment: &str) -> Vec<String> {
        let mut expressions = Vec::new();
        let segment = self.meta_exp.replace_all(segment, NoExpand(""));
        for split in segment.split('・') {
            let inclusive = self.exp_var_exp.replace_all(split, "${1}");
            expressions.push(inclusive.to_string());
            if inclusive != split {
                let exclusive = self.exp_var_exp.replace_all(split, NoExpand(""));
                expressions.push(exclusive.into_owned());
            }
        }
        expressions
    }

    /// Middle-dot separated contents of the first `（…）` on each body line.
    fn body_tags(&self, text: &str) -> OrderedSet<String> {
        let mut tags = OrderedSet::new();
        for line in text.split('\n') {
            if let Some(caps) = self.meta_exp.captures(line) {
                tags.extend(caps[1].split('・').map(str::to_string));
            }
        }
        tags
    }

    fn export_rules(&self, term: &mut TermRecord, tags: &OrderedSet<String>) {
        if tags.is_empty() {
            return;
        }
        if tags.iter().any(|tag| tag == ADJECTIVE_TAG) {
            term.add_rules([ConjugationRule::AdjI]);
        }
        if tags.iter().any(|tag| tag == SURU_TAG)
            && SURU_SUFFIXES
                .iter()
                .any(|suffix| term.expression.ends_with(suffix))
        {
            term.add_rules([ConjugationRule::Vs]);
        }
        if term.expression == KURU {
            term.add_rules([ConjugationRule::Vk]);
        }
        if tags.iter().any(|tag| self.v5_exp.is_match(tag)) {
            term.add_rules([ConjugationRule::V5]);
        }
        if tags.iter().any(|tag| self.v1_exp.is_match(tag)) {
            term.add_rules([ConjugationRule::V1]);
        }
    }
}

impl EpwingExtractor for KoujienExtractor {
    fn extract_terms(&self, entry: &BookEntry, sequence: i64) -> Vec<TermRecord> {
        let Some(matches) = self.parts_exp.captures(&entry.heading) else {
            log::debug!("skipping non-entry heading: {:?}", entry.heading);
            return Vec::new();
        };

        let expressions = match matches.get(2) {
            Some(m) if !m.as_str().is_empty() => self.expressions(m.as_str()),
            _ => Vec::new(),
        };

        let mut readings = Vec::new();
        if let Some(m) = matches.get(1) {
            let reading = self.read_group_exp.replace_all(m.as_str(), NoExpand(""));
            if reading.is_empty() {
                log::debug!("skipping heading without a reading: {:?}", entry.heading);
                return Vec::new();
            }
            readings.push(reading.into_owned());
        }

        let tags = self.body_tags(&entry.text);

        let pairs: Vec<(&str, &str)> = if expressions.is_empty() {
            readings.iter().map(|r| (r.as_str(), r.as_str())).collect()
        } else {
            expressions
                .iter()
                .flat_map(|e| readings.iter().map(move |r| (e.as_str(), r.as_str())))
                .collect()
        };

        pairs
            .into_iter()
            .map(|(expression, reading)| {
                let mut term = TermRecord::new(expression, reading, sequence);
                term.glossary.push(entry.text.as_str().into());
                self.export_rules(&mut term, &tags);
                term
            })
            .collect()
    }

    /// This book has no kanji entries.
    fn extract_kanji(&self, _entry: &BookEntry) -> Vec<KanjiRecord> {
        Vec::new()
    }

    fn revision(&self) -> &str {
        self.revision
    }

    fn font_narrow(&self) -> HashMap<u32, &'static str> {
        HashMap::new()
    }

    fn font_wide(&self) -> HashMap<u32, &'static str> {
        HashMap::from(KOUJIEN_FONT_WIDE)
    }
}

#[rustfmt::skip]
const KOUJIEN_FONT_WIDE: [(u32, &str); 65] = [
    (41531, "⟨"), (41532, "⟩"), (42017, "⇿"), (42018, "🈑"), (42023, "🈩"), (42024, "🈔"),
    (42025, "㊇"), (42026, "3"), (42027, "❷"), (42028, "❶"), (42031, "❸"), (42037, "❹"),
    (42043, "❺"), (42045, "❻"), (42057, "❼"), (42083, "❽"), (42284, "❾"), (42544, "❿"),
    (42561, "鉏"), (43611, "⓫"), (43612, "⓬"), (44142, "𑖀"), (44856, "㉑"), (44857, "㉒"),
    (46374, "〔"), (46375, "〕"), (46390, "①"), (46391, "②"), (46392, "③"), (46393, "④"),
    (46394, "⑤"), (46395, "⑥"), (46396, "⑦"), (46397, "⑧"), (46398, "⑨"), (46399, "⑩"),
    (46400, "⑪"), (46401, "⑫"), (46402, "⑬"), (46403, "⑭"), (46404, "⑮"), (46405, "⑯"),
    (46406, "⑰"), (46407, "⑱"), (46408, "⑲"), (46409, "⑳"), (46677, "⇀"), (46420, "⇨"),
    (47175, "(季)"), (56383, "㋐"), (56384, "㋑"), (56385, "㋒"), (56386, "㋓"), (56387, "㋔"),
    (56388, "㋕"), (56389, "㋖"), (56390, "㋗"), (56391, "㋘"), (56392, "㋙"), (56393, "㋚"),
    (56394, "㋛"), (56395, "㋜"), (56396, "㋝"), (56397, "㋞"), (56398, "▷"),
];
