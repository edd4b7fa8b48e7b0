use serde::{Deserialize, Serialize};

use crate::ordered_set::OrderedSet;

/// Inflection class markers understood by the deinflector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConjugationRule {
    /// い-adjective
    #[serde(rename = "adj-i")]
    AdjI,
    /// ichidan verb
    #[serde(rename = "v1")]
    V1,
    /// godan verb
    #[serde(rename = "v5")]
    V5,
    /// くる verb
    #[serde(rename = "vk")]
    Vk,
    /// する verb
    #[serde(rename = "vs")]
    Vs,
    /// ずる verb
    #[serde(rename = "vz")]
    Vz,
}

impl ConjugationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConjugationRule::AdjI => "adj-i",
            ConjugationRule::V1 => "v1",
            ConjugationRule::V5 => "v5",
            ConjugationRule::Vk => "vk",
            ConjugationRule::Vs => "vs",
            ConjugationRule::Vz => "vz",
        }
    }

    /// Maps one JMdict part-of-speech code onto its rule, if it has one.
    pub fn from_part_of_speech(pos: &str) -> Option<Self> {
        match pos {
            "adj-i" | "adj-ix" => Some(ConjugationRule::AdjI),
            "vk" => Some(ConjugationRule::Vk),
            "vz" => Some(ConjugationRule::Vz),
            _ if pos.starts_with("v1") => Some(ConjugationRule::V1),
            _ if pos.starts_with("v5") => Some(ConjugationRule::V5),
            _ if pos.starts_with("vs") => Some(ConjugationRule::Vs),
            _ => None,
        }
    }
}

impl AsRef<str> for ConjugationRule {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ConjugationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rules for every part of speech of an entry, in first-seen order.
pub fn grammar_rules<'a>(parts_of_speech: impl IntoIterator<Item = &'a str>) -> OrderedSet<ConjugationRule> {
    parts_of_speech
        .into_iter()
        .filter_map(ConjugationRule::from_part_of_speech)
        .collect()
}

#[cfg(test)]
mod conjugation_tests {
    use super::*;

    #[test]
    fn part_of_speech_mapping() {
        assert_eq!(ConjugationRule::from_part_of_speech("v5k-s"), Some(ConjugationRule::V5));
        assert_eq!(ConjugationRule::from_part_of_speech("v1-s"), Some(ConjugationRule::V1));
        assert_eq!(ConjugationRule::from_part_of_speech("vs-i"), Some(ConjugationRule::Vs));
        assert_eq!(ConjugationRule::from_part_of_speech("adj-ix"), Some(ConjugationRule::AdjI));
        assert_eq!(ConjugationRule::from_part_of_speech("adj-na"), None);
        assert_eq!(ConjugationRule::from_part_of_speech("n"), None);
    }

    #[test]
    fn grammar_rules_are_unique() {
        let rules = grammar_rules(["n", "vs", "vs-i", "v5r"]);
        assert_eq!(rules.join(" "), "vs v5");
    }
}
