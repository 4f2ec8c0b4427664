//! Sheet names and column headings of the EDCL workbook.
//!
//! Every sheet keeps its column headings on the same row.

/// Zero-based index of the header row on every sheet.
pub const HEADER_ROW: usize = 7;

pub mod persons {
    pub const SHEET: &str = "Persons";
    pub const EMAIL: &str = "E-Mail Address";
    pub const GIVEN_NAME: &str = "Given Name";
    pub const FAMILY_NAME: &str = "Family Name";
    pub const DATE_OF_BIRTH: &str = "Date of Birth";
    pub const IDENTIFIER_SCHEME: &str = "Other Identifier 1 Scheme Name";
    pub const IDENTIFIER: &str = "Other Identifier 1";
    pub const ACHIEVEMENT: &str = "Learning Achievements";
    /// Heading shared by every grade column
    pub const GRADE: &str = "Grade";
    /// Prefix of the assessment label below each grade heading
    pub const GRADE_LABEL_PREFIX: &str = "Assessment - ";
}

pub mod credentials {
    pub const SHEET: &str = "Europass Credentials";
    pub const TITLE: &str = "Title";
    pub const ISSUER: &str = "Issuer";
    pub const VALID_FROM: &str = "Valid From";
    pub const ACHIEVEMENT: &str = "Learning Achievement";
}

pub mod organisations {
    pub const SHEET: &str = "Organisations";
    pub const LEGAL_NAME: &str = "Legal Name";
    pub const COMMON_NAME: &str = "Common Name";
    pub const LEGAL_IDENTIFIER: &str = "Legal Identifier";
    pub const HOMEPAGE: &str = "homepage";
    pub const LOCATION: &str = "Location Name";
}

pub mod achievements {
    pub const SHEET: &str = "Achievements";
    pub const TITLE: &str = "Title";
    /// Name of the root assessment
    pub const PROVEN_BY: &str = "Proven by";
    /// Activity names
    pub const INFLUENCED_BY: &str = "Influenced by";
    pub const SPECIFICATION_TITLE: &str = "Specification Title";
    pub const ECTS_CREDIT_POINTS: &str = "ECTS Credit Points";
    pub const LEARNING_SETTING: &str = "Learning Setting";
    pub const OPPORTUNITY_TYPE: &str = "Learning Opportunity Type";
    pub const LEARNING_OUTCOMES: &str = "Learning Outcomes";
}

pub mod assessments {
    pub const SHEET: &str = "Assessments";
    pub const TITLE: &str = "Title";
    pub const DESCRIPTION: &str = "Description";
    pub const SPECIFICATION_TITLE: &str = "Specification Title";
    pub const GRADING_SCHEME: &str = "Grading Scheme";
    pub const SUB_ASSESSMENTS: &str = "Sub-Assessments";
}

pub mod activities {
    pub const SHEET: &str = "Activities";
    pub const TITLE: &str = "Title";
    pub const DESCRIPTION: &str = "Description";
    pub const SPECIFICATION_TITLE: &str = "Specification Title";
    pub const SPECIFICATION_DESCRIPTION: &str = "Specification Description";
    pub const ACTIVITY_TYPE: &str = "Learning Activity Type";
    pub const MODE: &str = "Mode of Learning";
}

pub mod learning_outcomes {
    pub const SHEET: &str = "Learning Outcomes";
    pub const TITLE: &str = "Title";
    pub const DESCRIPTION: &str = "Description";
    pub const ESCO_SKILLS: [&str; 3] = [
        "Related ESCO Skill 1 URL",
        "Related ESCO Skill 2 URL",
        "Related ESCO Skill 3 URL",
    ];
}
