//! The credential request handed to an issuer.
//!
//! Field names serialize in camelCase. Empty optional parts are left out.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate an id of the form `urn:epass:<kind>:<uuid>`.
pub fn generate_id(kind: &str) -> String {
    format!("urn:epass:{kind}:{}", Uuid::new_v4())
}

/// Render a date-time as ISO-8601 UTC, e.g. `2021-09-01T00:00:00Z`.
pub fn utc_string(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

pub fn date_string(value: &NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Render a grade the way spreadsheet users expect: whole numbers keep one
/// decimal (`4.0`), fractions print in full (`3.5`).
pub fn format_grade(grade: f64) -> String {
    if grade.fract() == 0.0 && grade.abs() < 1e15 {
        format!("{grade:.1}")
    } else {
        format!("{grade}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialSchema {
    pub id: String,
    #[serde(rename = "type")]
    pub schema_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDocument {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    pub id: String,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub issuer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_schema: Option<CredentialSchema>,
    pub credential_subject: CredentialSubject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredentialSubject {
    Learner(LearnerSubject),
    Identity(IdentitySubject),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    pub scheme_name: String,
    pub value: String,
}

/// The student of an accomplishment document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerSubject {
    pub id: String,
    pub given_names: String,
    pub family_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,
    pub achieved: Vec<Achievement>,
}

/// The student of an identity document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySubject {
    pub id: String,
    pub first_name: String,
    pub family_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub was_derived_from: Vec<Assessment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub was_influenced_by: Vec<Activity>,
    pub was_awarded_by: AwardingProcess,
    pub specified_by: Vec<LearningSpecification>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardingProcess {
    pub id: String,
    /// DIDs of the awarding bodies
    pub awarding_body: Vec<String>,
    pub awarding_organisation: Organisation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    pub id: String,
    pub legal_name: String,
    pub preferred_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A node of the assessment tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absent when the student has no grade for this assessment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub has_part: Vec<Assessment>,
    pub specified_by: AssessmentSpecification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSpecification {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grading_scheme: Option<GradingScheme>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingScheme {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub specified_by: ActivitySpecification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySpecification {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub learning_activity_type: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mode: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningSpecification {
    pub id: String,
    pub title: String,
    #[serde(rename = "ectsCreditPoints")]
    pub ects_credit_points: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_setting: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub learning_opportunity_type: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub learning_outcome: Vec<LearningOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningOutcome {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(rename = "relatedESCOSkill", default, skip_serializing_if = "Vec::is_empty")]
    pub related_esco_skill: Vec<String>,
}

impl CredentialDocument {
    /// The learner subject, if this is an accomplishment document.
    pub fn learner(&self) -> Option<&LearnerSubject> {
        match &self.credential_subject {
            CredentialSubject::Learner(subject) => Some(subject),
            CredentialSubject::Identity(_) => None,
        }
    }

    pub fn identity(&self) -> Option<&IdentitySubject> {
        match &self.credential_subject {
            CredentialSubject::Identity(subject) => Some(subject),
            CredentialSubject::Learner(_) => None,
        }
    }
}

impl Assessment {
    /// Depth-first iterator over this node and all its parts.
    pub fn iter(&self) -> impl Iterator<Item = &Assessment> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.has_part.iter().rev());
            Some(node)
        })
    }
}
