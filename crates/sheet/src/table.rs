//! Header-addressed access to one sheet.
//!
//! A [`Table`] pairs a [`Sheet`] with the index of its header row. Column
//! names are resolved against that row once and memoized, cells are decoded
//! through [`CellDecoder`], and rows can be searched by a predicate of
//! `(column, expected value)` pairs.
//!
//! Readers address rows explicitly, either by index or through a [`RowView`].
//! The table also keeps a settable current row for callers that prefer a
//! cursor; that cursor is plain per-table state, so two logical traversals
//! must not share one table without resetting it.

use crate::a1_notation::CellAddress;
use crate::cell::{CellDecoder, CellKind, CellValue, TypedValue};
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::ops::RangeInclusive;

/// Separator between the parts of a multi-value cell.
pub const MULTI_VALUE_SEPARATOR: char = ';';

/// Ordered `(column, expected value)` pairs that a row must all satisfy.
pub type Predicate<'a> = [(&'a str, &'a str)];

/// Render a predicate for error messages: `{Title: "X", Issuer: "Y"}`.
pub fn describe_predicate(predicate: &Predicate<'_>) -> String {
    let mut out = String::from("{");
    for (i, (column, value)) in predicate.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{column}: {value:?}");
    }
    out.push('}');
    out
}

/// A sheet with a header row and a memoized column index.
#[derive(Debug)]
pub struct Table {
    sheet: Sheet,
    header_row: usize,
    columns: RefCell<HashMap<String, usize>>,
    header_scans: Cell<usize>,
    current_row: usize,
}

impl Table {
    /// Wrap `sheet`, whose column names are on row `header_row` (0-based).
    ///
    /// # Errors
    ///
    /// Returns `SheetError::HeaderRowMissing` if the sheet has no such row.
    pub fn new(sheet: Sheet, header_row: usize) -> Result<Self> {
        if sheet.row(header_row).is_none() {
            return Err(SheetError::HeaderRowMissing {
                sheet: sheet.name().to_string(),
                row: header_row,
                last_row: sheet.last_row().unwrap_or(0),
            });
        }

        Ok(Table {
            sheet,
            header_row,
            columns: RefCell::new(HashMap::new()),
            header_scans: Cell::new(0),
            current_row: header_row + 1,
        })
    }

    /// Name of the underlying sheet
    #[must_use]
    pub fn name(&self) -> &str {
        self.sheet.name()
    }

    /// The underlying sheet
    #[must_use]
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    #[must_use]
    pub fn header_row(&self) -> usize {
        self.header_row
    }

    /// Index of the last row that has data (the header row for an empty table)
    #[must_use]
    pub fn last_row(&self) -> usize {
        self.sheet.last_row().unwrap_or(self.header_row).max(self.header_row)
    }

    /// Indices of all rows below the header, in ascending order
    #[must_use]
    pub fn data_rows(&self) -> RangeInclusive<usize> {
        (self.header_row + 1)..=self.last_row()
    }

    /// How many times the header row has been scanned for a column name.
    #[must_use]
    pub fn header_scan_count(&self) -> usize {
        self.header_scans.get()
    }

    // ===== Column resolution =====

    /// Get the index of the column named `name` on the header row.
    ///
    /// The first lookup of a name scans the header row; later lookups are
    /// answered from the cache.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::ColumnNotFound` if no header cell equals `name`.
    pub fn resolve_column(&self, name: &str) -> Result<usize> {
        if let Some(&col) = self.columns.borrow().get(name) {
            return Ok(col);
        }

        self.header_scans.set(self.header_scans.get() + 1);
        let header = self.sheet.row(self.header_row).unwrap_or_default();
        let col = header
            .iter()
            .position(|cell| cell.as_str() == name)
            .ok_or_else(|| SheetError::ColumnNotFound {
                sheet: self.name().to_string(),
                column: name.to_string(),
                header_row: self.header_row,
            })?;

        self.columns.borrow_mut().insert(name.to_string(), col);
        Ok(col)
    }

    // ===== Typed getters =====

    /// Raw cell at a position; blank when absent
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.sheet.get(row, col)
    }

    fn decoder(&self, row: usize, col: usize) -> CellDecoder<'_> {
        CellDecoder::new(self.name(), CellAddress::new(row, col))
    }

    /// Decode the cell at `row` under `column` as `kind`.
    pub fn get_cell(&self, row: usize, column: &str, kind: CellKind) -> Result<TypedValue> {
        let col = self.resolve_column(column)?;
        self.decoder(row, col).decode(self.cell(row, col), kind)
    }

    pub fn get_string(&self, row: usize, column: &str) -> Result<String> {
        let col = self.resolve_column(column)?;
        self.decoder(row, col).string(self.cell(row, col))
    }

    pub fn get_number(&self, row: usize, column: &str) -> Result<f64> {
        let col = self.resolve_column(column)?;
        self.decoder(row, col).number(self.cell(row, col))
    }

    pub fn get_date(&self, row: usize, column: &str) -> Result<NaiveDateTime> {
        let col = self.resolve_column(column)?;
        self.decoder(row, col).date(self.cell(row, col))
    }

    /// Split a `;`-separated string cell into trimmed, non-empty parts.
    ///
    /// A blank cell gives an empty list.
    pub fn get_multi_value(&self, row: usize, column: &str) -> Result<Vec<String>> {
        let value = self.get_string(row, column)?;
        Ok(split_multi_value(&value))
    }

    // ===== Row search =====

    /// All data rows where every predicate column equals its expected value,
    /// compared case-insensitively, in ascending row order.
    ///
    /// # Errors
    ///
    /// Fails with a structure error if a predicate column is missing or a
    /// compared cell is not a string.
    pub fn find_rows(&self, predicate: &Predicate<'_>) -> Result<Vec<usize>> {
        for (column, _) in predicate {
            self.resolve_column(column)?;
        }

        let mut matches = Vec::new();
        for row in self.data_rows() {
            if self.row_matches(row, predicate)? {
                matches.push(row);
            }
        }

        tracing::debug!(
            "Sheet {} rows matching {}: {:?}",
            self.name(),
            describe_predicate(predicate),
            matches
        );
        Ok(matches)
    }

    /// Whether one row satisfies every entry of `predicate`.
    pub fn row_matches(&self, row: usize, predicate: &Predicate<'_>) -> Result<bool> {
        for (column, expected) in predicate {
            if self.get_string(row, column)?.to_lowercase() != expected.to_lowercase() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The lowest-indexed row matching `predicate`.
    ///
    /// Several matching rows are not an error; the first one wins.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::RowNotFound` when nothing matches.
    pub fn find_first_row(&self, predicate: &Predicate<'_>) -> Result<usize> {
        self.find_rows(predicate)?
            .first()
            .copied()
            .ok_or_else(|| SheetError::RowNotFound {
                sheet: self.name().to_string(),
                predicate: describe_predicate(predicate),
            })
    }

    // ===== Row views and cursor =====

    /// An immutable view of one row
    #[must_use]
    pub fn row(&self, row: usize) -> RowView<'_> {
        RowView { table: self, row }
    }

    pub fn set_current_row(&mut self, row: usize) {
        self.current_row = row;
    }

    #[must_use]
    pub fn current_row(&self) -> usize {
        self.current_row
    }

    pub fn get_cell_for_current_row(&self, column: &str, kind: CellKind) -> Result<TypedValue> {
        self.get_cell(self.current_row, column, kind)
    }

    pub fn get_string_for_current_row(&self, column: &str) -> Result<String> {
        self.get_string(self.current_row, column)
    }

    pub fn get_number_for_current_row(&self, column: &str) -> Result<f64> {
        self.get_number(self.current_row, column)
    }

    pub fn get_date_for_current_row(&self, column: &str) -> Result<NaiveDateTime> {
        self.get_date(self.current_row, column)
    }

    pub fn get_multi_value_for_current_row(&self, column: &str) -> Result<Vec<String>> {
        self.get_multi_value(self.current_row, column)
    }

    // ===== Repeated columns =====

    /// Read a run of adjacent columns that share the header `header` and are
    /// told apart by a label on the row below the header.
    ///
    /// The run starts at the first column named `header` and continues while
    /// the next header cell is exactly `header`. Each label must start with
    /// `label_prefix`; the trimmed remainder names the value. Blank labels
    /// and blank value cells are skipped.
    ///
    /// # Errors
    ///
    /// `MalformedGradeColumns` for a label without the prefix, a structure
    /// error for a missing header or non-numeric value.
    pub fn labelled_numbers(
        &self,
        row: usize,
        header: &str,
        label_prefix: &str,
    ) -> Result<IndexMap<String, f64>> {
        let label_row = self.header_row + 1;
        let mut col = self.resolve_column(header)?;
        let mut values = IndexMap::new();

        loop {
            let label = self.decoder(label_row, col).string(self.cell(label_row, col))?;
            let label = label.trim();

            if !label.is_empty() {
                let name = label
                    .strip_prefix(label_prefix.trim_end())
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| SheetError::MalformedGradeColumns {
                        sheet: self.name().to_string(),
                        address: CellAddress::new(label_row, col).to_string(),
                        message: format!("label {label:?} does not start with {label_prefix:?}"),
                    })?;

                let cell = self.cell(row, col);
                if cell.is_null() {
                    tracing::debug!(
                        "Sheet {} row {} has no value for {}",
                        self.name(),
                        row,
                        name
                    );
                } else {
                    let value = self.decoder(row, col).number(cell)?;
                    values.insert(name.to_string(), value);
                }
            }

            col += 1;
            if self.cell(self.header_row, col).as_str() != header {
                break;
            }
        }

        Ok(values)
    }
}

/// Split a `;`-separated value into trimmed, non-empty parts.
#[must_use]
pub fn split_multi_value(value: &str) -> Vec<String> {
    value
        .split(MULTI_VALUE_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// One row of a [`Table`], read through the table's typed getters.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a Table,
    row: usize,
}

impl<'a> RowView<'a> {
    #[must_use]
    pub fn index(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// Whether the cell under `column` is blank (an uncalculated formula counts).
    pub fn is_blank(&self, column: &str) -> Result<bool> {
        let col = self.table.resolve_column(column)?;
        Ok(self.table.cell(self.row, col).is_null())
    }

    pub fn get_string(&self, column: &str) -> Result<String> {
        self.table.get_string(self.row, column)
    }

    pub fn matches(&self, predicate: &Predicate<'_>) -> Result<bool> {
        self.table.row_matches(self.row, predicate)
    }

    pub fn get_number(&self, column: &str) -> Result<f64> {
        self.table.get_number(self.row, column)
    }

    pub fn get_date(&self, column: &str) -> Result<NaiveDateTime> {
        self.table.get_date(self.row, column)
    }

    pub fn get_multi_value(&self, column: &str) -> Result<Vec<String>> {
        self.table.get_multi_value(self.row, column)
    }

    pub fn labelled_numbers(
        &self,
        header: &str,
        label_prefix: &str,
    ) -> Result<IndexMap<String, f64>> {
        self.table.labelled_numbers(self.row, header, label_prefix)
    }
}
