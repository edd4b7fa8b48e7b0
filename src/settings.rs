use std::fs;
use std::path::Path;

use better_default::Default;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

/// Options shared by every export run.
///
/// Loaded from a JSON document; every field is optional and falls back to
/// the format's own defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    /// Overrides the dictionary title written to the index.
    pub title: Option<String>,
    /// Meaning language used by the kanji export (`"french"`, `"spanish"`, `"portuguese"`).
    /// `None` keeps the untagged (English) meanings.
    pub language: Option<String>,
    pub generic_names: GenericNameOptions,
}

/// Configuration for [`GlossPatternPolicy`](crate::generic_names::GlossPatternPolicy).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct GenericNameOptions {
    /// A sense is generic when every one of its glosses matches one of these patterns.
    pub gloss_patterns: Vec<String>,
    /// Display text for each name type in aggregated records.
    /// Name types missing from the map are shown verbatim.
    #[default(default_name_type_labels())]
    pub labels: IndexMap<String, String>,
}

impl ExportOptions {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The configured title, or `fallback` if none was set.
    pub fn title_or(&self, fallback: &str) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => fallback.to_string(),
        }
    }
}

fn default_name_type_labels() -> IndexMap<String, String> {
    [
        ("surname", "family or surname"),
        ("place", "place name"),
        ("unclass", "unclassified name"),
        ("company", "company name"),
        ("product", "product name"),
        ("work", "work of art, literature, music, etc. name"),
        ("masc", "male given name or forename"),
        ("fem", "female given name or forename"),
        ("person", "full name of a particular person"),
        ("given", "given name or forename, gender not specified"),
        ("station", "railway station"),
        ("organization", "organization name"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod settings_tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let options = ExportOptions::from_json_str("{}").unwrap();
        assert_eq!(options.title, None);
        assert!(options.generic_names.gloss_patterns.is_empty());
        assert_eq!(
            options.generic_names.labels.get("surname").map(String::as_str),
            Some("family or surname")
        );
    }

    #[test]
    fn camel_case_fields() {
        let json = r#"{
            "title": "Names",
            "genericNames": { "glossPatterns": ["^\\(unclassified\\)$"], "labels": {} }
        }"#;
        let options = ExportOptions::from_json_str(json).unwrap();
        assert_eq!(options.title_or("JMnedict"), "Names");
        assert_eq!(options.generic_names.gloss_patterns.len(), 1);
        assert!(options.generic_names.labels.is_empty());
    }

    #[test]
    fn title_fallback() {
        let options = ExportOptions {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(options.title_or("KANJIDIC2"), "KANJIDIC2");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            ExportOptions::from_json_str("{ title: "),
            Err(SettingsError::Json(_))
        ));
    }
}
