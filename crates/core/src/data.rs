//! Queries over the sheets of an EDCL workbook.

use crate::error::{CredentialError, CredentialResult};
use crate::schema::{
    achievements, activities, assessments, credentials, learning_outcomes, organisations, persons,
    HEADER_ROW,
};
use edcl_sheet::{describe_predicate, Book, SheetError, Table, TableLink};
use std::path::Path;

/// Rows that together describe one credential of one student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialRows {
    pub person: usize,
    pub credential: usize,
    pub organisation: usize,
}

/// One table per workbook sheet.
#[derive(Debug)]
pub struct CredentialData {
    persons: Table,
    credentials: Table,
    organisations: Table,
    achievements: Table,
    assessments: Table,
    activities: Table,
    learning_outcomes: Table,
}

fn take_table(book: &mut Book, name: &str) -> CredentialResult<Table> {
    let sheet = book.take_sheet(name)?;
    Ok(Table::new(sheet, HEADER_ROW)?)
}

impl CredentialData {
    /// Open a workbook file.
    pub fn open<P: AsRef<Path>>(path: P) -> CredentialResult<Self> {
        let path = path.as_ref();
        tracing::info!("Reading credential data from {}", path.display());
        Self::from_book(Book::from_xlsx(path)?)
    }

    /// Build from an already loaded workbook. Sheets not used here are ignored.
    pub fn from_book(mut book: Book) -> CredentialResult<Self> {
        Ok(CredentialData {
            persons: take_table(&mut book, persons::SHEET)?,
            credentials: take_table(&mut book, credentials::SHEET)?,
            organisations: take_table(&mut book, organisations::SHEET)?,
            achievements: take_table(&mut book, achievements::SHEET)?,
            assessments: take_table(&mut book, assessments::SHEET)?,
            activities: take_table(&mut book, activities::SHEET)?,
            learning_outcomes: take_table(&mut book, learning_outcomes::SHEET)?,
        })
    }

    pub fn persons(&self) -> &Table {
        &self.persons
    }

    pub fn credentials(&self) -> &Table {
        &self.credentials
    }

    pub fn organisations(&self) -> &Table {
        &self.organisations
    }

    pub fn achievements(&self) -> &Table {
        &self.achievements
    }

    pub fn assessments(&self) -> &Table {
        &self.assessments
    }

    pub fn activities(&self) -> &Table {
        &self.activities
    }

    pub fn learning_outcomes(&self) -> &Table {
        &self.learning_outcomes
    }

    /// Credential issuer name to organisation legal name.
    pub fn organisation_link(&self) -> TableLink<'_> {
        TableLink::new(
            &self.credentials,
            credentials::ISSUER,
            &self.organisations,
            organisations::LEGAL_NAME,
        )
    }

    /// Person achievement name to the credential awarding it.
    pub fn achievement_link(&self) -> TableLink<'_> {
        TableLink::new(
            &self.persons,
            persons::ACHIEVEMENT,
            &self.credentials,
            credentials::ACHIEVEMENT,
        )
    }

    /// Find the rows for the credential titled `title` held by `email`.
    ///
    /// A person holds a credential when their row has the credential's
    /// learning achievement. A credential row whose Persons row at the same
    /// index qualifies is preferred; otherwise the first credential row with
    /// any qualifying person is used, paired with the lowest such person.
    pub fn find_credential(&self, email: &str, title: &str) -> CredentialResult<CredentialRows> {
        let candidates = self.credentials.find_rows(&[(credentials::TITLE, title)])?;
        if candidates.is_empty() {
            return Err(missing(&self.credentials, &[(credentials::TITLE, title)]));
        }

        let mut joined = None;
        for credential in candidates {
            let achievement = self
                .credentials
                .get_string(credential, credentials::ACHIEVEMENT)?;
            if achievement.trim().is_empty() {
                tracing::debug!("Credential row {} has no learning achievement", credential);
                continue;
            }
            let predicate = [
                (persons::EMAIL, email),
                (persons::ACHIEVEMENT, achievement.as_str()),
            ];

            if self.persons.data_rows().contains(&credential)
                && self.persons.row_matches(credential, &predicate)?
            {
                return self.credential_rows(credential, credential);
            }
            if joined.is_none() {
                joined = self
                    .persons
                    .find_rows(&predicate)?
                    .first()
                    .map(|&person| (person, credential));
            }
        }

        match joined {
            Some((person, credential)) => {
                tracing::debug!(
                    "Persons row {} is not aligned with credential row {}",
                    person,
                    credential
                );
                self.credential_rows(person, credential)
            }
            None => Err(missing(
                &self.persons,
                &[(persons::EMAIL, email), (credentials::TITLE, title)],
            )),
        }
    }

    fn credential_rows(
        &self,
        person: usize,
        credential: usize,
    ) -> CredentialResult<CredentialRows> {
        let organisation = self.organisation_link().resolve(credential)?;
        tracing::debug!(
            "Person row {}, credential row {}, organisation row {}",
            person,
            credential,
            organisation
        );
        Ok(CredentialRows {
            person,
            credential,
            organisation,
        })
    }

    /// First Persons row for `email`.
    pub fn find_person(&self, email: &str) -> CredentialResult<usize> {
        Ok(self.persons.find_first_row(&[(persons::EMAIL, email)])?)
    }

    /// Titles of the credentials of every Persons row for `email`, in row
    /// order. Repeated titles are kept. Rows whose achievement has no
    /// credential are skipped.
    pub fn list_credential_titles(&self, email: &str) -> CredentialResult<Vec<String>> {
        let link = self.achievement_link();
        let mut titles = Vec::new();

        for person in self.persons.find_rows(&[(persons::EMAIL, email)])? {
            let achievement = self.persons.get_string(person, persons::ACHIEVEMENT)?;
            let aligned = !achievement.trim().is_empty()
                && self.credentials.data_rows().contains(&person)
                && self.credentials.row_matches(
                    person,
                    &[(credentials::ACHIEVEMENT, achievement.as_str())],
                )?;

            let credential = if aligned {
                person
            } else {
                match link.resolve(person) {
                    Ok(row) => row,
                    Err(e) if e.is_not_found() => {
                        tracing::warn!("Persons row {} has no credential: {}", person, e);
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                }
            };
            titles.push(self.credentials.get_string(credential, credentials::TITLE)?);
        }

        Ok(titles)
    }

    /// Whether any Persons row has `email`. Errors count as absence, and a
    /// blank email never exists.
    pub fn student_exists(&self, email: &str) -> bool {
        if email.trim().is_empty() {
            return false;
        }
        match self.persons.find_rows(&[(persons::EMAIL, email)]) {
            Ok(rows) => !rows.is_empty(),
            Err(e) => {
                tracing::warn!("Cannot search for student {}: {}", email, e);
                false
            }
        }
    }
}

fn missing(table: &Table, predicate: &[(&str, &str)]) -> CredentialError {
    SheetError::RowNotFound {
        sheet: table.name().to_string(),
        predicate: describe_predicate(predicate),
    }
    .into()
}
