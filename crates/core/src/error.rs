//! Error types for credential assembly.

use edcl_sheet::{ErrorKind, SheetError};
use thiserror::Error;

/// Result type for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Errors that can occur while reading credential data or assembling a document.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Workbook layout problem or missing row.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// A controlled-vocabulary label has no URI.
    #[error("No {vocabulary} URI for label '{label}'")]
    MappingNotFound { vocabulary: String, label: String },

    /// An assessment lists itself among its own (transitive) sub-assessments.
    #[error("Assessment hierarchy contains a cycle: {chain}")]
    CyclicAssessment { chain: String },

    /// The requested document cannot be produced from this request.
    #[error("Unsupported document: {0}")]
    UnsupportedDocument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CredentialError {
    /// Create a vocabulary miss.
    pub fn mapping_not_found(vocabulary: impl Into<String>, label: impl Into<String>) -> Self {
        Self::MappingNotFound {
            vocabulary: vocabulary.into(),
            label: label.into(),
        }
    }

    /// Create a cycle error from the names visited so far.
    pub fn cyclic(chain: &[String]) -> Self {
        Self::CyclicAssessment {
            chain: chain.join(" -> "),
        }
    }

    /// Whether a well-formed query simply matched nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Sheet(e) if e.kind() == ErrorKind::NotFound)
    }

    /// Whether the workbook content does not have the expected shape.
    pub fn is_structure(&self) -> bool {
        match self {
            Self::Sheet(e) => e.kind() == ErrorKind::Structure,
            Self::MappingNotFound { .. } | Self::CyclicAssessment { .. } => true,
            _ => false,
        }
    }
}
