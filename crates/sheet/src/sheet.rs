use crate::a1_notation::CellAddress;
use crate::cell::CellValue;
use crate::error::Result;

static BLANK: CellValue = CellValue::Null;

/// A sheet representing a 2D grid of cells (row-major storage).
///
/// Rows may be ragged: a cell past the end of its stored row, or on a row
/// past the end of the grid, reads as blank.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let data = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            name: "Sheet1".to_string(),
            data,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of stored rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the width of the widest stored row
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Index of the last stored row, if any
    #[must_use]
    pub fn last_row(&self) -> Option<usize> {
        self.data.len().checked_sub(1)
    }

    /// Get a cell value by row and column index (0-based); blank when absent
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&BLANK)
    }

    /// Get a cell value by A1 notation
    pub fn get_a1(&self, notation: &str) -> Result<&CellValue> {
        let address = CellAddress::parse(notation)?;
        Ok(self.get(address.row, address.col))
    }

    /// Set a cell value, growing the grid as needed
    pub fn set<T: Into<CellValue>>(&mut self, row: usize, col: usize, value: T) {
        if self.data.len() <= row {
            self.data.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.data[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Null);
        }
        cells[col] = value.into();
    }

    /// Get a stored row by index
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.data.get(index).map(Vec::as_slice)
    }
}
