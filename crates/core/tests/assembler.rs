mod common;

use edcl_core::document::CredentialSubject;
use edcl_core::{
    CredentialAssembler, CredentialError, CredentialTemplate, DataProvider, DocumentKind, Issuer,
    ProofParameters, UnsignedIssuer,
};
use std::collections::HashSet;

fn proof() -> ProofParameters {
    ProofParameters::new("did:ebsi:tampere-university", "did:key:jane2")
}

#[test]
fn test_assessment_tree_carries_grades() {
    let data = common::data();
    let vocabularies = common::vocabularies();
    let assembler = CredentialAssembler::new(&data, &vocabularies, "jane2.doe2@test.edu");

    let root = assembler.build_assessment_tree(10, "Overall grade").unwrap();
    assert_eq!(root.title, "Overall grade");
    assert_eq!(root.grade.as_deref(), Some("4.0"));
    assert_eq!(root.specified_by.title, "Overall grade specification");
    assert_eq!(root.specified_by.grading_scheme.as_ref().unwrap().title, "0-5");

    let parts: Vec<(&str, Option<&str>)> = root
        .has_part
        .iter()
        .map(|part| (part.title.as_str(), part.grade.as_deref()))
        .collect();
    assert_eq!(
        parts,
        vec![
            ("Individual assignment1", Some("3.0")),
            ("Individual assignment2", Some("5.0")),
            ("Project assignment", Some("4.0")),
        ]
    );
    assert!(root.has_part.iter().all(|part| part.has_part.is_empty()));
    assert!(root.has_part[2].specified_by.grading_scheme.is_none());

    // fractional grades print in full
    let root = assembler.build_assessment_tree(9, "Overall grade").unwrap();
    assert_eq!(root.has_part[2].grade.as_deref(), Some("3.5"));
}

#[test]
fn test_europass_document() {
    let data = common::data();
    let vocabularies = common::vocabularies();
    let assembler = CredentialAssembler::new(&data, &vocabularies, "jane2.doe2@test.edu")
        .with_title("Data and Software Business module");

    let template = CredentialTemplate::for_kind(DocumentKind::Europass);
    let document = assembler.populate(&template, &proof()).unwrap();

    assert_eq!(document.issuer, "did:ebsi:tampere-university");
    assert!(document.id.starts_with("urn:epass:credential:"));
    assert_eq!(document.valid_from.as_deref(), Some("2021-01-01T00:00:00Z"));

    let subject = document.learner().unwrap();
    assert_eq!(subject.id, "did:key:jane2");
    assert_eq!(subject.given_names, "Jane2");
    assert_eq!(subject.family_name, "Doe2");
    assert_eq!(subject.date_of_birth.as_deref(), Some("2000-01-01"));
    assert_eq!(subject.identifier.as_ref().unwrap().value, "1002");

    let achievement = &subject.achieved[0];
    assert_eq!(achievement.title, "Data and Software Business");
    assert_eq!(achievement.was_derived_from.len(), 1);
    assert_eq!(
        achievement.was_awarded_by.awarding_organisation.preferred_name,
        "Tampere University"
    );
    assert_eq!(
        achievement.was_awarded_by.awarding_body,
        vec!["did:ebsi:tampere-university"]
    );

    let activities: Vec<&str> = achievement
        .was_influenced_by
        .iter()
        .map(|activity| activity.title.as_str())
        .collect();
    assert_eq!(activities, vec!["Lectures", "Project work"]);
    let project = &achievement.was_influenced_by[1].specified_by;
    assert_eq!(
        project.learning_activity_type,
        vec![
            "http://data.europa.eu/snb/learning-activity/project",
            "http://data.europa.eu/snb/learning-activity/exercise",
        ]
    );
    assert_eq!(project.mode, vec!["http://data.europa.eu/snb/learning-assessment/blended"]);
    assert_eq!(project.description.as_deref(), Some("A company case"));

    let specification = &achievement.specified_by[0];
    assert_eq!(specification.ects_credit_points, 5);
    assert_eq!(
        specification.learning_setting.as_deref(),
        Some("http://data.europa.eu/snb/learning-setting/formal")
    );
    assert_eq!(specification.learning_outcome.len(), 2);
    assert_eq!(
        specification.learning_outcome[0].related_esco_skill,
        vec!["urn:esco:skill:business-models", "urn:esco:skill:pricing"]
    );
    assert!(specification.learning_outcome[1].definition.is_none());
}

#[test]
fn test_generated_ids_are_unique() {
    let data = common::data();
    let vocabularies = common::vocabularies();
    let assembler = CredentialAssembler::new(&data, &vocabularies, "jane2.doe2@test.edu");

    let (subject, _) = assembler
        .build_learner("Data and Software Business module", &proof())
        .unwrap();
    let ids: Vec<&str> = subject.achieved[0].was_derived_from[0]
        .iter()
        .map(|assessment| assessment.id.as_str())
        .collect();

    assert_eq!(ids.len(), 4);
    assert!(ids.iter().all(|id| id.starts_with("urn:epass:assessment:")));
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 4);
}

#[test]
fn test_ungraded_assessment_has_no_grade() {
    let data = common::data();
    let vocabularies = common::vocabularies();
    let assembler = CredentialAssembler::new(&data, &vocabularies, "jane2.doe2@test.edu");

    let (subject, valid_from) = assembler
        .build_learner("Ethics of AI certificate", &proof())
        .unwrap();
    let exam = &subject.achieved[0].was_derived_from[0];
    assert_eq!(exam.title, "Ethics exam");
    assert!(exam.grade.is_none());
    assert!(valid_from.is_none());
}

#[test]
fn test_cyclic_sub_assessments_are_rejected() {
    let data = common::data();
    let vocabularies = common::vocabularies();
    let assembler = CredentialAssembler::new(&data, &vocabularies, "cycle.student@test.edu");

    let err = assembler
        .build_learner("Looping credential", &proof())
        .unwrap_err();
    match err {
        CredentialError::CyclicAssessment { chain } => {
            assert_eq!(chain, "Loop A -> Loop B -> loop a")
        }
        other => panic!("expected a cycle error, got {other}"),
    }
}

#[test]
fn test_missing_activity_aborts_assembly() {
    let data = common::data();
    let vocabularies = common::vocabularies();
    let assembler = CredentialAssembler::new(&data, &vocabularies, "missing.activity@test.edu")
        .with_title("Broken credential");

    let template = CredentialTemplate::for_kind(DocumentKind::Europass);
    let err = assembler.populate(&template, &proof()).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Activities"));
    assert!(err.to_string().contains("Field trip"));
}

#[test]
fn test_unknown_vocabulary_label() {
    let data = common::data();
    let vocabularies = common::vocabularies();
    let assembler = CredentialAssembler::new(&data, &vocabularies, "unmapped@test.edu");

    let err = assembler
        .build_learner("Unmapped credential", &proof())
        .unwrap_err();
    assert!(matches!(
        err,
        CredentialError::MappingNotFound { ref label, .. } if label == "Formal Learning"
    ));
}

#[test]
fn test_verifiable_id_document() {
    let data = common::data();
    let vocabularies = common::vocabularies();
    let assembler = CredentialAssembler::new(&data, &vocabularies, "jane2.doe2@test.edu");

    let template = CredentialTemplate::for_kind(DocumentKind::VerifiableId);
    let document = assembler.populate(&template, &proof()).unwrap();

    assert_eq!(document.types.last().map(String::as_str), Some("VerifiableId"));
    assert!(document.valid_from.is_some());
    match &document.credential_subject {
        CredentialSubject::Identity(subject) => {
            assert_eq!(subject.first_name, "Jane2");
            assert_eq!(subject.family_name, "Doe2");
            assert_eq!(subject.identifier.len(), 1);
            assert_eq!(subject.identifier[0].scheme_name, "Student number");
        }
        CredentialSubject::Learner(_) => panic!("expected an identity subject"),
    }
}

#[test]
fn test_europass_requires_title() {
    let data = common::data();
    let vocabularies = common::vocabularies();
    let assembler = CredentialAssembler::new(&data, &vocabularies, "jane2.doe2@test.edu");

    let template = CredentialTemplate::for_kind(DocumentKind::Europass);
    assert!(matches!(
        assembler.populate(&template, &proof()),
        Err(CredentialError::UnsupportedDocument(_))
    ));
}

#[test]
fn test_unsigned_issuer_output() {
    let data = common::data();
    let vocabularies = common::vocabularies();
    let assembler = CredentialAssembler::new(&data, &vocabularies, "jane2.doe2@test.edu")
        .with_title("Data and Software Business module");

    let json = UnsignedIssuer::new()
        .issue(DocumentKind::Europass, &proof(), &assembler)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let achievement = &value["credentialSubject"]["achieved"][0];
    assert_eq!(achievement["title"], "Data and Software Business");
    assert_eq!(achievement["wasDerivedFrom"][0]["grade"], "4.0");
    assert_eq!(achievement["wasDerivedFrom"][0]["hasPart"][1]["grade"], "5.0");
    assert_eq!(achievement["specifiedBy"][0]["ectsCreditPoints"], 5);
    assert_eq!(
        achievement["wasAwardedBy"]["awardingOrganisation"]["homepage"],
        "https://www.tuni.fi"
    );
}
