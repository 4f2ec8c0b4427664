//! In-memory EDCL workbook shared by the integration tests.
//!
//! Every sheet has a title in A1, its headings on row 8 (index 7) and a
//! row below the headings that only Persons uses, for assessment labels.
//! Data starts on index 9, so a student's Persons row and the matching
//! credential row share an index.

#![allow(dead_code)]

use edcl_core::schema::HEADER_ROW;
use edcl_core::{CredentialData, Vocabularies};
use edcl_sheet::{Book, CellValue, Sheet};

macro_rules! cells {
    ($($value:expr),* $(,)?) => {
        vec![$(CellValue::from($value)),*]
    };
}

const NONE: CellValue = CellValue::Null;

fn layout(
    title: &str,
    header: &[&str],
    below_header: Vec<CellValue>,
    rows: Vec<Vec<CellValue>>,
) -> Sheet {
    let mut sheet = Sheet::new();
    sheet.set(0, 0, title);
    for (col, name) in header.iter().enumerate() {
        sheet.set(HEADER_ROW, col, *name);
    }
    for (col, value) in below_header.into_iter().enumerate() {
        sheet.set(HEADER_ROW + 1, col, value);
    }
    for (i, row) in rows.into_iter().enumerate() {
        for (col, value) in row.into_iter().enumerate() {
            sheet.set(HEADER_ROW + 2 + i, col, value);
        }
    }
    sheet
}

#[rustfmt::skip]
fn persons() -> Sheet {
    let dob = CellValue::DateTime(36526.0);
    layout(
        "Persons",
        &[
            "E-Mail Address",
            "Given Name",
            "Family Name",
            "Date of Birth",
            "Other Identifier 1 Scheme Name",
            "Other Identifier 1",
            "Learning Achievements",
            "Learning Activities",
            "Grade",
            "Grade",
            "Grade",
            "Grade",
            "Grade",
            "Notes",
        ],
        cells![
            NONE,
            NONE,
            NONE,
            NONE,
            NONE,
            NONE,
            NONE,
            NONE,
            "Assessment - Individual assignment1",
            "Assessment - Individual assignment2",
            "Assessment - Project assignment",
            "Assessment - Overall grade",
            NONE,
            NONE,
        ],
        vec![
            // 9
            cells![
                "jane1.doe1@test.edu", "Jane1", "Doe1", dob.clone(), "Student number", "1001",
                "Data and Software Business", "Lectures", 2.0, 3.0, 3.5, 3.0, NONE, NONE,
            ],
            // 10
            cells![
                "jane2.doe2@test.edu", "Jane2", "Doe2", dob.clone(), "Student number", "1002",
                "Data and Software Business", "Lectures", 3.0, 5.0, 4.0, 4.0, NONE, "late",
            ],
            // 11
            cells![
                "jane2.doe2@test.edu", "Jane2", "Doe2", dob.clone(), "Student number", "1002",
                "Ethics of AI", NONE, NONE, NONE, NONE, NONE, NONE, NONE,
            ],
            // 12
            cells![
                "cycle.student@test.edu", "Cy", "Cle", NONE, NONE, NONE,
                "Looping Studies", NONE, NONE, NONE, NONE, NONE, NONE, NONE,
            ],
            // 13
            cells![
                "missing.activity@test.edu", "Miss", "Ing", NONE, NONE, NONE,
                "Broken Activities", NONE, NONE, NONE, NONE, NONE, NONE, NONE,
            ],
            // 14
            cells![
                "unmapped@test.edu", "Un", "Mapped", NONE, NONE, NONE,
                "Unmapped Setting", NONE, NONE, NONE, NONE, NONE, NONE, NONE,
            ],
            // 15, no credential row of its own
            cells![
                "jane1.doe1@test.edu", "Jane1", "Doe1", dob, "Student number", "1001",
                "Data and Software Business", NONE, NONE, NONE, NONE, NONE, NONE, NONE,
            ],
            // 16
            cells![
                "a.student@test.edu", "A", "Student", NONE, NONE, NONE,
                "Ethics of AI", NONE, NONE, NONE, NONE, NONE, NONE, NONE,
            ],
            // 17, achievement without a credential
            cells![
                "a.student@test.edu", "A", "Student", NONE, NONE, NONE,
                "Not yet issued", NONE, NONE, NONE, NONE, NONE, NONE, NONE,
            ],
            // 18, blank achievement
            cells![
                "blank.student@test.edu", "Blank", "Student", NONE, NONE, NONE,
                NONE, NONE, NONE, NONE, NONE, NONE, NONE, NONE,
            ],
        ],
    )
}

#[rustfmt::skip]
fn credentials() -> Sheet {
    let valid_from = CellValue::DateTime(44197.0);
    layout(
        "Europass Credentials",
        &["Title", "Issuer", "Valid From", "Learning Achievement"],
        Vec::new(),
        vec![
            cells![
                "Data and Software Business module",
                "Tampere University",
                valid_from.clone(),
                "Data and Software Business",
            ],
            cells![
                "Data and Software Business module",
                "Tampere University",
                valid_from,
                "Data and Software Business",
            ],
            cells!["Ethics of AI certificate", "Tampere University", NONE, "Ethics of AI"],
            cells!["Looping credential", "Tampere University", NONE, "Looping Studies"],
            cells!["Broken credential", "Tampere University", NONE, "Broken Activities"],
            cells!["Unmapped credential", "Open University", NONE, "Unmapped Setting"],
            // 15, not yet tied to an achievement
            cells!["Draft certificate", "Tampere University", NONE, NONE],
        ],
    )
}

#[rustfmt::skip]
fn organisations() -> Sheet {
    layout(
        "Organisations",
        &["Legal Name", "Common Name", "Legal Identifier", "homepage", "Location Name"],
        Vec::new(),
        vec![
            cells!["Tampere University", NONE, "2844561-8", "https://www.tuni.fi", "Tampere"],
            cells!["Open University", "Open Uni", NONE, NONE, NONE],
        ],
    )
}

#[rustfmt::skip]
fn achievements() -> Sheet {
    layout(
        "Achievements",
        &[
            "Title",
            "Proven by",
            "Influenced by",
            "Specification Title",
            "ECTS Credit Points",
            "Learning Setting",
            "Learning Opportunity Type",
            "Learning Outcomes",
        ],
        Vec::new(),
        vec![
            cells![
                "Data and Software Business", "Overall grade", "Lectures; Project work",
                "Data and Software Business specification", 5.5, "formal learning", "module",
                "Business models; Software ecosystems",
            ],
            cells![
                "Ethics of AI", "Ethics exam", NONE, "Ethics specification", 2.0,
                "non-formal learning", "course", NONE,
            ],
            cells!["Looping Studies", "Loop A", NONE, "Loop specification", 1.0, NONE, NONE, NONE],
            cells![
                "Broken Activities", "Ethics exam", "Field trip", "Broken specification", 1.0,
                NONE, NONE, NONE,
            ],
            cells![
                "Unmapped Setting", "Ethics exam", NONE, "Unmapped specification", 1.0,
                "Formal Learning", NONE, NONE,
            ],
        ],
    )
}

#[rustfmt::skip]
fn assessments() -> Sheet {
    layout(
        "Assessments",
        &["Title", "Description", "Specification Title", "Grading Scheme", "Sub-Assessments"],
        Vec::new(),
        vec![
            cells![
                "Overall grade", "Final grade of the module", "Overall grade specification", "0-5",
                "Individual assignment1; Individual assignment2 ;Project assignment",
            ],
            cells!["Individual assignment1", NONE, "Assignment 1 specification", "0-5", NONE],
            cells!["Individual assignment2", NONE, "Assignment 2 specification", "0-5", NONE],
            cells!["Project assignment", NONE, "Project specification", NONE, NONE],
            cells!["Ethics exam", NONE, "Exam specification", "pass/fail", NONE],
            cells!["Loop A", NONE, "A", NONE, "Loop B"],
            cells!["Loop B", NONE, "B", NONE, "loop a"],
        ],
    )
}

#[rustfmt::skip]
fn activities() -> Sheet {
    layout(
        "Activities",
        &[
            "Title",
            "Description",
            "Specification Title",
            "Specification Description",
            "Learning Activity Type",
            "Mode of Learning",
        ],
        Vec::new(),
        vec![
            cells![
                "Lectures", "Weekly lectures", "Lecture series", NONE, "lecture", "face-to-face",
            ],
            cells![
                "Project work", "Team project", "Project", "A company case", "project; exercise",
                "blended",
            ],
        ],
    )
}

#[rustfmt::skip]
fn learning_outcomes() -> Sheet {
    layout(
        "Learning Outcomes",
        &[
            "Title",
            "Description",
            "Related ESCO Skill 1 URL",
            "Related ESCO Skill 2 URL",
            "Related ESCO Skill 3 URL",
        ],
        Vec::new(),
        vec![
            cells![
                "Business models", "Can analyse software business models",
                "urn:esco:skill:business-models", NONE, "urn:esco:skill:pricing",
            ],
            cells!["Software ecosystems", NONE, NONE, NONE, NONE],
        ],
    )
}

pub fn book() -> Book {
    let mut book = Book::new();
    for (name, sheet) in [
        ("Persons", persons()),
        ("Europass Credentials", credentials()),
        ("Organisations", organisations()),
        ("Achievements", achievements()),
        ("Assessments", assessments()),
        ("Activities", activities()),
        ("Learning Outcomes", learning_outcomes()),
    ] {
        book.add_sheet(name, sheet).unwrap();
    }
    book
}

pub fn data() -> CredentialData {
    CredentialData::from_book(book()).unwrap()
}

pub fn vocabularies() -> Vocabularies {
    Vocabularies::builtin()
}
