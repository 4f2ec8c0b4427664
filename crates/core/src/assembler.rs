//! Builds credential documents for one student from the credential tables.
//!
//! The assembler reads rows only through [`RowView`]s, so no table cursor is
//! involved. Every build re-reads the workbook rows; nothing is cached
//! between requests apart from each table's column index.

use crate::data::CredentialData;
use crate::document::{
    date_string, format_grade, generate_id, utc_string, Achievement, Activity,
    ActivitySpecification, Assessment, AssessmentSpecification, AwardingProcess,
    CredentialDocument, CredentialSchema, CredentialSubject, GradingScheme, Identifier,
    IdentitySubject, LearnerSubject, LearningOutcome, LearningSpecification, Organisation,
};
use crate::error::{CredentialError, CredentialResult};
use crate::issuer::{CredentialTemplate, DataProvider, DocumentKind, ProofParameters};
use crate::schema::{
    achievements, activities, assessments, credentials, learning_outcomes, organisations, persons,
};
use crate::vocabulary::{Vocabularies, VocabularyMapping};
use edcl_sheet::RowView;
use indexmap::IndexMap;

const SCHEMA_TYPE: &str = "JsonSchemaValidator2018";

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn translate_all(
    labels: &[String],
    mapping: &dyn VocabularyMapping,
) -> CredentialResult<Vec<String>> {
    labels.iter().map(|label| mapping.resolve(label)).collect()
}

/// Grade for `name`, preferring an exact label match.
fn grade_for(grades: &IndexMap<String, f64>, name: &str) -> Option<f64> {
    grades
        .get(name)
        .or_else(|| {
            let wanted = name.to_lowercase();
            grades
                .iter()
                .find(|(label, _)| label.to_lowercase() == wanted)
                .map(|(_, grade)| grade)
        })
        .copied()
}

/// Assembles documents for one student, and for Europass documents one
/// credential title.
#[derive(Debug, Clone)]
pub struct CredentialAssembler<'a> {
    data: &'a CredentialData,
    vocabularies: &'a Vocabularies,
    email: String,
    title: Option<String>,
}

impl<'a> CredentialAssembler<'a> {
    pub fn new(
        data: &'a CredentialData,
        vocabularies: &'a Vocabularies,
        email: impl Into<String>,
    ) -> Self {
        CredentialAssembler {
            data,
            vocabularies,
            email: email.into(),
            title: None,
        }
    }

    /// Select the credential that Europass documents describe.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Build the accomplishment subject for the credential titled `title`.
    ///
    /// Returns the subject and the credential's valid-from date. Any missing
    /// row or malformed cell aborts the whole build.
    pub fn build_learner(
        &self,
        title: &str,
        proof: &ProofParameters,
    ) -> CredentialResult<(LearnerSubject, Option<String>)> {
        tracing::info!("Assembling credential {:?} for {}", title, self.email);
        let rows = self.data.find_credential(&self.email, title)?;
        let person = self.data.persons().row(rows.person);
        let credential = self.data.credentials().row(rows.credential);

        let achievement = self.build_achievement(person, rows.organisation, proof)?;
        let subject = LearnerSubject {
            id: proof.subject_did.clone(),
            given_names: person.get_string(persons::GIVEN_NAME)?,
            family_name: person.get_string(persons::FAMILY_NAME)?,
            date_of_birth: Self::date_of_birth(person)?,
            identifier: Self::identifier(person)?,
            achieved: vec![achievement],
        };

        let valid_from = if credential.is_blank(credentials::VALID_FROM)? {
            None
        } else {
            Some(utc_string(&credential.get_date(credentials::VALID_FROM)?))
        };

        tracing::info!("Assembled credential {:?} for {}", title, self.email);
        Ok((subject, valid_from))
    }

    /// Build the identity subject of the student.
    pub fn build_identity(&self, proof: &ProofParameters) -> CredentialResult<IdentitySubject> {
        let person = self.data.persons().row(self.data.find_person(&self.email)?);

        Ok(IdentitySubject {
            id: proof.subject_did.clone(),
            first_name: person.get_string(persons::GIVEN_NAME)?,
            family_name: person.get_string(persons::FAMILY_NAME)?,
            date_of_birth: Self::date_of_birth(person)?,
            identifier: Self::identifier(person)?.into_iter().collect(),
        })
    }

    /// Build the assessment tree rooted at `name` with the grades of the
    /// given Persons row.
    pub fn build_assessment_tree(
        &self,
        person_row: usize,
        name: &str,
    ) -> CredentialResult<Assessment> {
        let grades = self
            .data
            .persons()
            .row(person_row)
            .labelled_numbers(persons::GRADE, persons::GRADE_LABEL_PREFIX)?;
        self.build_assessment(name, &grades, &mut Vec::new())
    }

    fn build_achievement(
        &self,
        person: RowView<'_>,
        organisation_row: usize,
        proof: &ProofParameters,
    ) -> CredentialResult<Achievement> {
        let name = person.get_string(persons::ACHIEVEMENT)?;
        let table = self.data.achievements();
        let achievement = table.row(table.find_first_row(&[(achievements::TITLE, name.as_str())])?);

        let root = achievement.get_string(achievements::PROVEN_BY)?;
        let was_derived_from = if root.trim().is_empty() {
            tracing::warn!("Achievement {:?} names no assessment", name);
            Vec::new()
        } else {
            let grades = person.labelled_numbers(persons::GRADE, persons::GRADE_LABEL_PREFIX)?;
            vec![self.build_assessment(&root, &grades, &mut Vec::new())?]
        };

        let was_influenced_by = achievement
            .get_multi_value(achievements::INFLUENCED_BY)?
            .iter()
            .map(|activity| self.build_activity(activity))
            .collect::<CredentialResult<Vec<_>>>()?;

        Ok(Achievement {
            id: generate_id("learningAchievement"),
            title: achievement.get_string(achievements::TITLE)?,
            was_derived_from,
            was_influenced_by,
            was_awarded_by: AwardingProcess {
                id: generate_id("awardingProcess"),
                awarding_body: vec![proof.issuer_did.clone()],
                awarding_organisation: self.build_organisation(organisation_row)?,
            },
            specified_by: vec![self.build_specification(achievement)?],
        })
    }

    /// `chain` holds the names from the root down to the parent of `name`.
    fn build_assessment(
        &self,
        name: &str,
        grades: &IndexMap<String, f64>,
        chain: &mut Vec<String>,
    ) -> CredentialResult<Assessment> {
        let key = name.to_lowercase();
        if chain.iter().any(|visited| visited.to_lowercase() == key) {
            let mut cycle = chain.clone();
            cycle.push(name.to_string());
            return Err(CredentialError::cyclic(&cycle));
        }

        let table = self.data.assessments();
        let row = table.row(table.find_first_row(&[(assessments::TITLE, name)])?);

        let grade = grade_for(grades, name);
        if grade.is_none() {
            tracing::warn!("{} has no grade for assessment {:?}", self.email, name);
        }

        let grading_scheme = non_blank(row.get_string(assessments::GRADING_SCHEME)?).map(|title| {
            GradingScheme {
                id: generate_id("gradingScheme"),
                title,
            }
        });

        chain.push(name.to_string());
        let has_part = row
            .get_multi_value(assessments::SUB_ASSESSMENTS)?
            .iter()
            .map(|part| self.build_assessment(part, grades, chain))
            .collect::<CredentialResult<Vec<_>>>()?;
        chain.pop();

        Ok(Assessment {
            id: generate_id("assessment"),
            title: name.to_string(),
            description: non_blank(row.get_string(assessments::DESCRIPTION)?),
            grade: grade.map(format_grade),
            has_part,
            specified_by: AssessmentSpecification {
                id: generate_id("assessmentSpecification"),
                title: row.get_string(assessments::SPECIFICATION_TITLE)?,
                grading_scheme,
            },
        })
    }

    fn build_activity(&self, name: &str) -> CredentialResult<Activity> {
        let table = self.data.activities();
        let row = table.row(table.find_first_row(&[(activities::TITLE, name)])?);

        let activity_types = row.get_multi_value(activities::ACTIVITY_TYPE)?;
        let modes = row.get_multi_value(activities::MODE)?;

        Ok(Activity {
            id: generate_id("learningActivity"),
            title: name.to_string(),
            description: non_blank(row.get_string(activities::DESCRIPTION)?),
            specified_by: ActivitySpecification {
                id: generate_id("learningActivitySpecification"),
                title: row.get_string(activities::SPECIFICATION_TITLE)?,
                description: non_blank(row.get_string(activities::SPECIFICATION_DESCRIPTION)?),
                learning_activity_type: translate_all(
                    &activity_types,
                    self.vocabularies.learning_activity_type(),
                )?,
                mode: translate_all(&modes, self.vocabularies.mode_of_learning())?,
            },
        })
    }

    fn build_specification(
        &self,
        achievement: RowView<'_>,
    ) -> CredentialResult<LearningSpecification> {
        let learning_setting = non_blank(achievement.get_string(achievements::LEARNING_SETTING)?)
            .map(|label| self.vocabularies.learning_setting().resolve(&label))
            .transpose()?;
        let opportunity_types = achievement.get_multi_value(achievements::OPPORTUNITY_TYPE)?;

        let learning_outcome = achievement
            .get_multi_value(achievements::LEARNING_OUTCOMES)?
            .iter()
            .map(|outcome| self.build_outcome(outcome))
            .collect::<CredentialResult<Vec<_>>>()?;

        Ok(LearningSpecification {
            id: generate_id("learningSpecification"),
            title: achievement.get_string(achievements::SPECIFICATION_TITLE)?,
            ects_credit_points: achievement
                .get_number(achievements::ECTS_CREDIT_POINTS)?
                .trunc() as i64,
            learning_setting,
            learning_opportunity_type: translate_all(
                &opportunity_types,
                self.vocabularies.learning_opportunity_type(),
            )?,
            learning_outcome,
        })
    }

    fn build_outcome(&self, name: &str) -> CredentialResult<LearningOutcome> {
        let table = self.data.learning_outcomes();
        let row = table.row(table.find_first_row(&[(learning_outcomes::TITLE, name)])?);

        let mut related_esco_skill = Vec::new();
        for column in learning_outcomes::ESCO_SKILLS {
            if let Some(skill) = non_blank(row.get_string(column)?) {
                related_esco_skill.push(skill.trim().to_string());
            }
        }

        Ok(LearningOutcome {
            id: generate_id("learningOutcome"),
            title: name.to_string(),
            definition: non_blank(row.get_string(learning_outcomes::DESCRIPTION)?),
            related_esco_skill,
        })
    }

    fn build_organisation(&self, row: usize) -> CredentialResult<Organisation> {
        let row = self.data.organisations().row(row);
        let legal_name = row.get_string(organisations::LEGAL_NAME)?;
        let preferred_name = non_blank(row.get_string(organisations::COMMON_NAME)?)
            .unwrap_or_else(|| legal_name.clone());

        Ok(Organisation {
            id: generate_id("organisation"),
            legal_name,
            preferred_name,
            registration: non_blank(row.get_string(organisations::LEGAL_IDENTIFIER)?),
            homepage: non_blank(row.get_string(organisations::HOMEPAGE)?),
            location: non_blank(row.get_string(organisations::LOCATION)?),
        })
    }

    fn date_of_birth(person: RowView<'_>) -> CredentialResult<Option<String>> {
        if person.is_blank(persons::DATE_OF_BIRTH)? {
            return Ok(None);
        }
        Ok(Some(date_string(&person.get_date(persons::DATE_OF_BIRTH)?.date())))
    }

    /// The identifier is given only when both scheme and value are filled.
    fn identifier(person: RowView<'_>) -> CredentialResult<Option<Identifier>> {
        let scheme = person.get_string(persons::IDENTIFIER_SCHEME)?;
        let value = person.get_string(persons::IDENTIFIER)?;
        if scheme.trim().is_empty() || value.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(Identifier {
            scheme_name: scheme,
            value,
        }))
    }

    fn document(
        template: &CredentialTemplate,
        proof: &ProofParameters,
        valid_from: Option<String>,
        credential_subject: CredentialSubject,
    ) -> CredentialDocument {
        CredentialDocument {
            context: template.context.clone(),
            id: generate_id("credential"),
            types: template.types.clone(),
            issuer: proof.issuer_did.clone(),
            valid_from,
            credential_schema: template.schema_id.clone().map(|id| CredentialSchema {
                id,
                schema_type: SCHEMA_TYPE.to_string(),
            }),
            credential_subject,
        }
    }
}

impl DataProvider for CredentialAssembler<'_> {
    fn populate(
        &self,
        template: &CredentialTemplate,
        proof: &ProofParameters,
    ) -> CredentialResult<CredentialDocument> {
        match template.kind {
            DocumentKind::Europass => {
                let title = self.title.as_deref().ok_or_else(|| {
                    CredentialError::UnsupportedDocument(
                        "a Europass credential needs a credential title".to_string(),
                    )
                })?;
                let (subject, valid_from) = self.build_learner(title, proof)?;
                Ok(Self::document(
                    template,
                    proof,
                    valid_from,
                    CredentialSubject::Learner(subject),
                ))
            }
            DocumentKind::VerifiableId => {
                let subject = self.build_identity(proof)?;
                let issued = utc_string(&chrono::Utc::now().naive_utc());
                Ok(Self::document(
                    template,
                    proof,
                    Some(issued),
                    CredentialSubject::Identity(subject),
                ))
            }
        }
    }
}
