//! Collapsing generic name senses into one summary record per name.
//!
//! Name dictionaries repeat the same broad sense ("family or surname",
//! "place name", ...) across a huge number of entries. Senses a
//! [`GenericNamePolicy`] classifies as generic are folded into a
//! [`GenericTermInfo`] and emitted once per expression/reading at the end of
//! the run instead of once per source entry.

use std::collections::HashSet;

use indexmap::IndexMap;
use regex::Regex;

use crate::dictionary_data::{GlossaryItem, TermRecord};
use crate::errors::SettingsError;
use crate::headword::Headword;
use crate::ordered_set::OrderedSet;
use crate::settings::GenericNameOptions;

/// Decides whether a sense of `headword` is too generic to emit on its own.
pub trait GenericNamePolicy: Sync {
    fn is_generic_name(&self, headword: &Headword, glosses: &[String]) -> bool;
}

impl<F> GenericNamePolicy for F
where
    F: Fn(&Headword, &[String]) -> bool + Sync,
{
    fn is_generic_name(&self, headword: &Headword, glosses: &[String]) -> bool {
        self(headword, glosses)
    }
}

/// Classifies a sense as generic when it has glosses and every one of them
/// matches a configured pattern.
#[derive(Clone, Debug, Default)]
pub struct GlossPatternPolicy {
    patterns: Vec<Regex>,
}

impl GlossPatternPolicy {
    pub fn from_options(options: &GenericNameOptions) -> Result<Self, SettingsError> {
        let patterns = options
            .gloss_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| SettingsError::GenericNamePattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<Regex>, SettingsError>>()?;
        Ok(Self { patterns })
    }
}

impl GenericNamePolicy for GlossPatternPolicy {
    fn is_generic_name(&self, _headword: &Headword, glosses: &[String]) -> bool {
        !self.patterns.is_empty()
            && !glosses.is_empty()
            && glosses
                .iter()
                .all(|gloss| self.patterns.iter().any(|re| re.is_match(gloss)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenericNameKey {
    pub expression: String,
    pub reading: String,
}

#[derive(Clone, Debug, Default)]
struct GenericAggregate {
    name_types: OrderedSet<String>,
    /// Source entries that contributed, in visiting order.
    sequences: OrderedSet<i64>,
}

/// Accumulator for one export run.
///
/// Construct it before the entry loop, pass it by `&mut` to every entry, and
/// call [`GenericTermInfo::terms`] once after the last entry.
#[derive(Debug, Default)]
pub struct GenericTermInfo {
    aggregates: IndexMap<GenericNameKey, GenericAggregate>,
    used_sequences: HashSet<i64>,
    max_sequence: Option<i64>,
}

impl GenericTermInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a generic sense; no record is produced for it now.
    pub fn add_glosses(
        &mut self,
        expression: &str,
        name_types: &[String],
        reading: &str,
        sequence: i64,
    ) {
        let key = GenericNameKey {
            expression: expression.to_string(),
            reading: reading.to_string(),
        };
        let aggregate = self.aggregates.entry(key).or_default();
        aggregate.name_types.extend(name_types.iter().cloned());
        aggregate.sequences.insert(sequence);
        self.observe(sequence);
        log::trace!("generic name sense: {expression} [{reading}] in {sequence}");
    }

    /// Marks `sequence` as represented by a standalone record.
    /// Returns `false` if it already was.
    pub fn add_used_sequence(&mut self, sequence: i64) -> bool {
        self.observe(sequence);
        self.used_sequences.insert(sequence)
    }

    pub fn is_used(&self, sequence: i64) -> bool {
        self.used_sequences.contains(&sequence)
    }

    pub fn used_sequence_count(&self) -> usize {
        self.used_sequences.len()
    }

    pub fn aggregate_count(&self) -> usize {
        self.aggregates.len()
    }

    fn observe(&mut self, sequence: i64) {
        self.max_sequence = Some(self.max_sequence.map_or(sequence, |max| max.max(sequence)));
    }

    /// Flattens the run into one summary record per expression/reading.
    ///
    /// A record reuses the first contributing sequence that no standalone
    /// record claimed; otherwise it gets a fresh sequence above every
    /// sequence seen during the run.
    pub fn terms(self, labels: &IndexMap<String, String>) -> Vec<TermRecord> {
        let mut next_sequence = self.max_sequence.map_or(1, |max| max + 1);
        let used = &self.used_sequences;

        self.aggregates
            .into_iter()
            .map(|(key, aggregate)| {
                let unclaimed = aggregate.sequences.iter().copied().find(|s| !used.contains(s));
                let sequence = match unclaimed {
                    Some(sequence) => sequence,
                    None => {
                        next_sequence += 1;
                        next_sequence - 1
                    }
                };
                let mut term = TermRecord::new(key.expression, key.reading, sequence);
                term.glossary = aggregate
                    .name_types
                    .iter()
                    .map(|name_type| {
                        let label = labels.get(name_type).unwrap_or(name_type);
                        GlossaryItem::from(label.as_str())
                    })
                    .collect();
                term.add_definition_tags(aggregate.name_types);
                term
            })
            .collect()
    }
}
