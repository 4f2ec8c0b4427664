//! # edcl-core
//!
//! Credential assembly from EDCL spreadsheet workbooks.
//!
//! This crate provides:
//! - [`CredentialData`]: the workbook sheets and the queries over them
//! - [`CredentialAssembler`]: builds the nested document for one student
//! - Vocabulary mappings for controlled-vocabulary columns
//! - The issuance contract ([`DataProvider`], [`Issuer`])
//! - Configuration and error types

/// Credential document assembly.
pub mod assembler;
/// Process configuration.
pub mod config;
/// Workbook queries.
pub mod data;
/// Output document model.
pub mod document;
/// Error types and result aliases.
pub mod error;
/// Issuance collaborator contract.
pub mod issuer;
/// Sheet names and column headings.
pub mod schema;
/// Label to URI mappings.
pub mod vocabulary;

pub use assembler::CredentialAssembler;
pub use config::AppConfig;
pub use data::{CredentialData, CredentialRows};
pub use document::CredentialDocument;
pub use edcl_sheet::{ErrorKind, SheetError};
pub use error::{CredentialError, CredentialResult};
pub use issuer::{
    CredentialTemplate, DataProvider, DocumentKind, Issuer, ProofParameters, UnsignedIssuer,
};
pub use vocabulary::{Vocabularies, VocabularyMapping, VocabularySource};
