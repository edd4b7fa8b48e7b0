use std::path::PathBuf;
use thiserror::Error;

/// All possible `yomitan_import` [Error](std::error::Error) paths
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("(-)[<export_error::settings>] ->
{0}")]
    Settings(#[from] SettingsError),
    #[error("failed to compile extractor pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("no extractor is known for the epwing book: `{0}`")]
    UnknownBook(String),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: `{path}`\nreason: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to deserialize settings: {0}")]
    Json(#[from] serde_json::error::Error),
    #[error("invalid generic name pattern `{pattern}`: {source}")]
    GenericNamePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl ExportError {
    pub(crate) fn pattern(pattern: &str, source: regex::Error) -> Self {
        ExportError::Pattern {
            pattern: pattern.to_owned(),
            source,
        }
    }
}
