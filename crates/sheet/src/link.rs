//! Cross-table references: a column of one table holding key values that
//! identify rows of another table.

use crate::error::{Result, SheetError};
use crate::table::{describe_predicate, Table};

/// A link from `source_column` in `source` to `target_column` in `target`.
///
/// The link borrows both tables and owns no data, so it can be created on
/// demand wherever a join is needed.
#[derive(Debug, Clone, Copy)]
pub struct TableLink<'a> {
    source: &'a Table,
    source_column: &'a str,
    target: &'a Table,
    target_column: &'a str,
}

impl<'a> TableLink<'a> {
    #[must_use]
    pub fn new(
        source: &'a Table,
        source_column: &'a str,
        target: &'a Table,
        target_column: &'a str,
    ) -> Self {
        TableLink {
            source,
            source_column,
            target,
            target_column,
        }
    }

    /// The first target row whose key column equals (case-insensitively)
    /// the source row's key.
    ///
    /// # Errors
    ///
    /// `RowNotFound` when the source key is blank or no target row has it,
    /// or a structure error when either key column is missing or not a
    /// string.
    pub fn resolve(&self, source_row: usize) -> Result<usize> {
        let key = self.source.get_string(source_row, self.source_column)?;
        let predicate = [(self.target_column, key.as_str())];
        if key.trim().is_empty() {
            return Err(SheetError::RowNotFound {
                sheet: self.target.name().to_string(),
                predicate: describe_predicate(&predicate),
            });
        }
        self.target.find_first_row(&predicate)
    }
}
