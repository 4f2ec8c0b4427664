//! Label to URI translation for controlled-vocabulary columns.
//!
//! Workbook cells hold human-readable labels such as `formal learning`;
//! the document carries the vocabulary URI instead. Which tables are used
//! is decided by configuration: the tables compiled into this crate, or a
//! JSON file with one object per vocabulary.
//!
//! Labels are matched exactly. No trimming or case folding is applied.

use crate::error::{CredentialError, CredentialResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub const LEARNING_SETTING: &str = "learning setting";
pub const LEARNING_OPPORTUNITY_TYPE: &str = "learning opportunity type";
pub const LEARNING_ACTIVITY_TYPE: &str = "learning activity type";
pub const MODE_OF_LEARNING: &str = "mode of learning";

/// Label to URI lookup for one vocabulary.
pub trait VocabularyMapping: fmt::Debug {
    /// Vocabulary name used in error messages.
    fn name(&self) -> &str;

    fn lookup(&self, label: &str) -> Option<&str>;

    /// Translate `label`, failing with `MappingNotFound` when it is unknown.
    fn resolve(&self, label: &str) -> CredentialResult<String> {
        self.lookup(label)
            .map(str::to_string)
            .ok_or_else(|| CredentialError::mapping_not_found(self.name(), label))
    }
}

/// A mapping over a table fixed at compile time.
#[derive(Debug, Clone, Copy)]
pub struct StaticMapping {
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl StaticMapping {
    #[must_use]
    pub const fn new(name: &'static str, entries: &'static [(&'static str, &'static str)]) -> Self {
        StaticMapping { name, entries }
    }
}

impl VocabularyMapping for StaticMapping {
    fn name(&self) -> &str {
        self.name
    }

    fn lookup(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == label)
            .map(|(_, uri)| *uri)
    }
}

/// A mapping over an owned table, typically read from a file.
#[derive(Debug, Clone)]
pub struct TableMapping {
    name: String,
    entries: HashMap<String, String>,
}

impl TableMapping {
    pub fn new(name: impl Into<String>, entries: HashMap<String, String>) -> Self {
        TableMapping {
            name: name.into(),
            entries,
        }
    }
}

impl VocabularyMapping for TableMapping {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }
}

const BUILTIN_LEARNING_SETTING: &[(&str, &str)] = &[
    ("formal learning", "http://data.europa.eu/snb/learning-setting/formal"),
    ("non-formal learning", "http://data.europa.eu/snb/learning-setting/non-formal"),
    ("informal learning", "http://data.europa.eu/snb/learning-setting/informal"),
];

const BUILTIN_LEARNING_OPPORTUNITY_TYPE: &[(&str, &str)] = &[
    ("course", "http://data.europa.eu/snb/learning-opportunity/course"),
    ("module", "http://data.europa.eu/snb/learning-opportunity/module"),
    ("programme", "http://data.europa.eu/snb/learning-opportunity/programme"),
    ("MOOC", "http://data.europa.eu/snb/learning-opportunity/mooc"),
    ("micro-credential", "http://data.europa.eu/snb/learning-opportunity/micro-credential"),
];

const BUILTIN_LEARNING_ACTIVITY_TYPE: &[(&str, &str)] = &[
    ("lecture", "http://data.europa.eu/snb/learning-activity/lecture"),
    ("seminar", "http://data.europa.eu/snb/learning-activity/seminar"),
    ("exercise", "http://data.europa.eu/snb/learning-activity/exercise"),
    ("laboratory work", "http://data.europa.eu/snb/learning-activity/laboratory-work"),
    ("project", "http://data.europa.eu/snb/learning-activity/project"),
    ("independent study", "http://data.europa.eu/snb/learning-activity/independent-study"),
];

const BUILTIN_MODE_OF_LEARNING: &[(&str, &str)] = &[
    ("face-to-face", "http://data.europa.eu/snb/learning-assessment/face-to-face"),
    ("online", "http://data.europa.eu/snb/learning-assessment/online"),
    ("blended", "http://data.europa.eu/snb/learning-assessment/blended"),
];

/// Where the vocabulary tables come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum VocabularySource {
    #[default]
    Builtin,
    File { path: PathBuf },
}

/// The label to URI tables as stored in a vocabulary file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyTables {
    #[serde(default)]
    pub learning_setting: HashMap<String, String>,
    #[serde(default)]
    pub learning_opportunity_type: HashMap<String, String>,
    #[serde(default)]
    pub learning_activity_type: HashMap<String, String>,
    #[serde(default)]
    pub mode_of_learning: HashMap<String, String>,
}

/// One mapping per controlled-vocabulary column.
#[derive(Debug)]
pub struct Vocabularies {
    learning_setting: Box<dyn VocabularyMapping>,
    learning_opportunity_type: Box<dyn VocabularyMapping>,
    learning_activity_type: Box<dyn VocabularyMapping>,
    mode_of_learning: Box<dyn VocabularyMapping>,
}

impl Vocabularies {
    /// The tables compiled into this crate.
    #[must_use]
    pub fn builtin() -> Self {
        Vocabularies {
            learning_setting: Box::new(StaticMapping::new(
                LEARNING_SETTING,
                BUILTIN_LEARNING_SETTING,
            )),
            learning_opportunity_type: Box::new(StaticMapping::new(
                LEARNING_OPPORTUNITY_TYPE,
                BUILTIN_LEARNING_OPPORTUNITY_TYPE,
            )),
            learning_activity_type: Box::new(StaticMapping::new(
                LEARNING_ACTIVITY_TYPE,
                BUILTIN_LEARNING_ACTIVITY_TYPE,
            )),
            mode_of_learning: Box::new(StaticMapping::new(
                MODE_OF_LEARNING,
                BUILTIN_MODE_OF_LEARNING,
            )),
        }
    }

    #[must_use]
    pub fn from_tables(tables: VocabularyTables) -> Self {
        Vocabularies {
            learning_setting: Box::new(TableMapping::new(
                LEARNING_SETTING,
                tables.learning_setting,
            )),
            learning_opportunity_type: Box::new(TableMapping::new(
                LEARNING_OPPORTUNITY_TYPE,
                tables.learning_opportunity_type,
            )),
            learning_activity_type: Box::new(TableMapping::new(
                LEARNING_ACTIVITY_TYPE,
                tables.learning_activity_type,
            )),
            mode_of_learning: Box::new(TableMapping::new(
                MODE_OF_LEARNING,
                tables.mode_of_learning,
            )),
        }
    }

    /// Read the tables from a JSON file.
    pub fn from_file(path: &Path) -> CredentialResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let tables: VocabularyTables = serde_json::from_str(&text)?;
        tracing::debug!("Loaded vocabulary tables from {}", path.display());
        Ok(Self::from_tables(tables))
    }

    pub fn from_source(source: &VocabularySource) -> CredentialResult<Self> {
        match source {
            VocabularySource::Builtin => Ok(Self::builtin()),
            VocabularySource::File { path } => Self::from_file(path),
        }
    }

    pub fn learning_setting(&self) -> &dyn VocabularyMapping {
        self.learning_setting.as_ref()
    }

    pub fn learning_opportunity_type(&self) -> &dyn VocabularyMapping {
        self.learning_opportunity_type.as_ref()
    }

    pub fn learning_activity_type(&self) -> &dyn VocabularyMapping {
        self.learning_activity_type.as_ref()
    }

    pub fn mode_of_learning(&self) -> &dyn VocabularyMapping {
        self.mode_of_learning.as_ref()
    }
}

impl Default for Vocabularies {
    fn default() -> Self {
        Self::builtin()
    }
}
