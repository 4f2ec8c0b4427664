use crate::error::{Result, SheetError};
use std::fmt;

/// Zero-based position of a cell, displayed in A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub row: usize,
    pub col: usize,
}

impl CellAddress {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        CellAddress { row, col }
    }

    /// Parse A1-style cell notation (e.g., "A1", "Z99", "AA1")
    pub fn parse(notation: &str) -> Result<Self> {
        let (row, col) = parse_a1(notation)?;
        Ok(CellAddress { row, col })
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_index_to_letters(self.col), self.row + 1)
    }
}

/// Parse A1-style cell notation, returning (row, column) as 0-based indices
pub fn parse_a1(notation: &str) -> Result<(usize, usize)> {
    let upper = notation.trim().to_uppercase();
    let split_pos = upper
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| SheetError::InvalidCellNotation(notation.to_string()))?;

    let (col_part, row_part) = upper.split_at(split_pos);
    if col_part.is_empty() {
        return Err(SheetError::InvalidCellNotation(notation.to_string()));
    }

    let col = parse_column_letters(col_part)
        .ok_or_else(|| SheetError::InvalidCellNotation(notation.to_string()))?;
    let row = row_part
        .parse::<usize>()
        .ok()
        .filter(|row| *row > 0)
        .ok_or_else(|| SheetError::InvalidCellNotation(notation.to_string()))?;

    Ok((row - 1, col))
}

/// Column letters to 0-based index: A=0, ... Z=25, AA=26
fn parse_column_letters(letters: &str) -> Option<usize> {
    let mut col = 0usize;
    for b in letters.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        col = col.checked_mul(26)? + usize::from(b - b'A') + 1;
    }
    col.checked_sub(1)
}

/// Convert 0-based column index to column letters
/// 0=A, 1=B, ... 25=Z, 26=AA, 27=AB, ...
pub fn column_index_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut remaining = col + 1;

    while remaining > 0 {
        remaining -= 1;
        result.insert(0, char::from((remaining % 26) as u8 + b'A'));
        remaining /= 26;
    }

    result
}
