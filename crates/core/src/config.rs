//! Process configuration: a TOML file layered with `EDCL_` environment variables.

use crate::error::CredentialResult;
use crate::issuer::ProofParameters;
use crate::vocabulary::VocabularySource;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override file settings
pub const ENV_PREFIX: &str = "EDCL";

fn default_workbook() -> PathBuf {
    PathBuf::from("credentials.xlsm")
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Workbook with the credential data.
    #[serde(default = "default_workbook")]
    pub workbook: PathBuf,
    /// DID of the issuing organisation
    #[serde(default)]
    pub issuer_did: Option<String>,
    /// DID of the credential holder
    #[serde(default)]
    pub holder_did: Option<String>,
    #[serde(default)]
    pub vocabulary: VocabularySource,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            workbook: default_workbook(),
            issuer_did: None,
            holder_did: None,
            vocabulary: VocabularySource::default(),
        }
    }
}

impl AppConfig {
    /// Read `path` if it exists, then apply `EDCL_*` variables on top.
    pub fn load(path: &Path) -> CredentialResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Proof parameters for issuing to the configured holder.
    pub fn proof_parameters(&self) -> CredentialResult<ProofParameters> {
        let issuer_did = self
            .issuer_did
            .clone()
            .ok_or_else(|| config::ConfigError::NotFound("issuer_did".to_string()))?;
        let holder_did = self
            .holder_did
            .clone()
            .ok_or_else(|| config::ConfigError::NotFound("holder_did".to_string()))?;

        Ok(ProofParameters::new(issuer_did, holder_did))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
workbook = "data/credentials.xlsm"
issuer_did = "did:ebsi:issuer"
holder_did = "did:key:holder"

[vocabulary]
source = "file"
path = "vocabulary.json"
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.workbook, PathBuf::from("data/credentials.xlsm"));
        assert_eq!(
            config.vocabulary,
            VocabularySource::File {
                path: PathBuf::from("vocabulary.json")
            }
        );

        let proof = config.proof_parameters().unwrap();
        assert_eq!(proof.issuer_did, "did:ebsi:issuer");
        assert_eq!(proof.subject_did, "did:key:holder");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.workbook, PathBuf::from("credentials.xlsm"));
        assert_eq!(config.vocabulary, VocabularySource::Builtin);
        assert!(config.proof_parameters().is_err());
    }
}
