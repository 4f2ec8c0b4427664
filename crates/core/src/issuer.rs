//! The contract between credential assembly and an issuing service.
//!
//! An [`Issuer`] owns templates, proofs and signing. It asks a
//! [`DataProvider`] to fill a template for one holder, and returns the
//! serialized credential.

use crate::document::CredentialDocument;
use crate::error::CredentialResult;
use serde::{Deserialize, Serialize};
use std::fmt;

const W3C_CREDENTIALS_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Default proof type requested from the issuer
pub const DEFAULT_PROOF_TYPE: &str = "LD_PROOF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// A learning accomplishment of one student
    Europass,
    /// The identity of one student
    VerifiableId,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Europass => f.write_str("Europass"),
            DocumentKind::VerifiableId => f.write_str("VerifiableId"),
        }
    }
}

/// Who issues, to whom, and how the result is to be proven.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofParameters {
    pub issuer_did: String,
    pub subject_did: String,
    pub proof_type: String,
}

impl ProofParameters {
    pub fn new(issuer_did: impl Into<String>, subject_did: impl Into<String>) -> Self {
        ProofParameters {
            issuer_did: issuer_did.into(),
            subject_did: subject_did.into(),
            proof_type: DEFAULT_PROOF_TYPE.to_string(),
        }
    }
}

/// The fixed part of a credential: context, types and schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialTemplate {
    pub kind: DocumentKind,
    pub context: Vec<String>,
    pub types: Vec<String>,
    pub schema_id: Option<String>,
}

impl CredentialTemplate {
    /// The template used when no issuer supplies its own.
    pub fn for_kind(kind: DocumentKind) -> Self {
        CredentialTemplate {
            kind,
            context: vec![W3C_CREDENTIALS_CONTEXT.to_string()],
            types: vec![
                "VerifiableCredential".to_string(),
                "VerifiableAttestation".to_string(),
                kind.to_string(),
            ],
            schema_id: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema_id: impl Into<String>) -> Self {
        self.schema_id = Some(schema_id.into());
        self
    }
}

/// Fills a credential template with data for one request.
pub trait DataProvider {
    fn populate(
        &self,
        template: &CredentialTemplate,
        proof: &ProofParameters,
    ) -> CredentialResult<CredentialDocument>;
}

/// Produces a credential from a provider.
pub trait Issuer {
    fn issue(
        &self,
        kind: DocumentKind,
        proof: &ProofParameters,
        provider: &dyn DataProvider,
    ) -> CredentialResult<String>;
}

/// Issues unsigned credential requests as pretty-printed JSON.
///
/// Signing is left to an external service.
#[derive(Debug, Clone, Default)]
pub struct UnsignedIssuer {
    schema_ids: Vec<(DocumentKind, String)>,
}

impl UnsignedIssuer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `schema_id` to every credential of `kind`.
    #[must_use]
    pub fn with_schema(mut self, kind: DocumentKind, schema_id: impl Into<String>) -> Self {
        self.schema_ids.push((kind, schema_id.into()));
        self
    }

    fn template(&self, kind: DocumentKind) -> CredentialTemplate {
        let template = CredentialTemplate::for_kind(kind);
        match self.schema_ids.iter().find(|(k, _)| *k == kind) {
            Some((_, schema_id)) => template.with_schema(schema_id.clone()),
            None => template,
        }
    }
}

impl Issuer for UnsignedIssuer {
    fn issue(
        &self,
        kind: DocumentKind,
        proof: &ProofParameters,
        provider: &dyn DataProvider,
    ) -> CredentialResult<String> {
        let template = self.template(kind);
        let document = provider.populate(&template, proof)?;
        tracing::info!("Issued unsigned {} credential {}", kind, document.id);
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CredentialSchema, CredentialSubject, IdentitySubject};

    struct FixedProvider;

    impl DataProvider for FixedProvider {
        fn populate(
            &self,
            template: &CredentialTemplate,
            proof: &ProofParameters,
        ) -> CredentialResult<CredentialDocument> {
            Ok(CredentialDocument {
                context: template.context.clone(),
                id: "urn:epass:credential:1".to_string(),
                types: template.types.clone(),
                issuer: proof.issuer_did.clone(),
                valid_from: None,
                credential_schema: template.schema_id.clone().map(|id| CredentialSchema {
                    id,
                    schema_type: "JsonSchemaValidator2018".to_string(),
                }),
                credential_subject: CredentialSubject::Identity(IdentitySubject {
                    id: proof.subject_did.clone(),
                    first_name: "Jane".to_string(),
                    family_name: "Doe".to_string(),
                    date_of_birth: None,
                    identifier: Vec::new(),
                }),
            })
        }
    }

    #[test]
    fn test_unsigned_issuer_serializes_populated_document() {
        let issuer = UnsignedIssuer::new().with_schema(DocumentKind::VerifiableId, "urn:schema:id");
        let proof = ProofParameters::new("did:ebsi:issuer", "did:key:holder");

        let json = issuer
            .issue(DocumentKind::VerifiableId, &proof, &FixedProvider)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["issuer"], "did:ebsi:issuer");
        assert_eq!(value["type"][2], "VerifiableId");
        assert_eq!(value["credentialSchema"]["id"], "urn:schema:id");
        assert_eq!(value["credentialSubject"]["firstName"], "Jane");
        assert!(value.get("validFrom").is_none());
    }
}
