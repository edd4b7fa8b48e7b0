//! Converts JMdict, JMnedict, KANJIDIC2 and EPWING book entries into
//! Yomitan dictionary records.
//!
//! Parsing the source files and writing the finished dictionary archive are
//! left to the caller; every exporter here takes already parsed entries and
//! returns an [`ExportOutput`].
//!
//! ```
//! use yomitan_import::{jmdict_forms::forms_export, ExportOptions, JmdictEntry};
//!
//! let entries: Vec<JmdictEntry> = serde_json::from_str(
//!     r#"[{ "sequence": 1, "kanji": [{ "expression": "林檎" }], "readings": [{ "reading": "りんご" }] }]"#,
//! )
//! .unwrap();
//! let output = forms_export(&entries, &ExportOptions::default());
//! assert_eq!(output.terms[0].expression, "林檎");
//! ```
pub mod conjugation;
pub mod dictionary_data;
pub mod epwing;
pub mod errors;
pub mod form_table;
pub mod generic_names;
pub mod headword;
pub mod jmdict_forms;
pub mod jmnedict;
pub mod kanjidic;
pub mod language;
pub mod ordered_set;
pub mod settings;
pub mod source_data;
pub mod structured_content;


pub use dictionary_data::{ExportOutput, GlossaryItem, Index, KanjiRecord, TermRecord};
pub use epwing::{epwing_export, BookEntry, EpwingEdition, EpwingExtractor};
pub use errors::{ExportError, SettingsError};
pub use generic_names::{GenericNamePolicy, GenericTermInfo, GlossPatternPolicy};
pub use headword::{Headword, HeadwordFlags};
pub use settings::ExportOptions;
pub use source_data::{JmdictEntry, JmnedictEntry, KanjidicCharacter};
