use crate::book::Book;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook, Data, Range, Reader, Xlsx, XlsxError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn workbook_error(e: XlsxError) -> SheetError {
    SheetError::Xlsx(e.to_string())
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::from(s.as_str()),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(format!("{e:?}")),
    }
}

/// Lay a calamine range out on a sheet at its absolute worksheet position.
/// Calamine ranges start at the first used cell, not at A1.
fn fill_sheet(sheet: &mut Sheet, values: &Range<Data>, formulas: Option<&Range<String>>) {
    let (row_offset, col_offset) = values
        .start()
        .map_or((0, 0), |(r, c)| (r as usize, c as usize));

    for (row, col, data) in values.used_cells() {
        sheet.set(row + row_offset, col + col_offset, data_to_cell_value(data));
    }

    let Some(formulas) = formulas else {
        return;
    };
    let (row_offset, col_offset) = formulas
        .start()
        .map_or((0, 0), |(r, c)| (r as usize, c as usize));

    for (row, col, source) in formulas.used_cells() {
        if source.is_empty() {
            continue;
        }
        let (row, col) = (row + row_offset, col + col_offset);
        let cached = sheet.get(row, col).clone();
        let cached = (!cached.is_null()).then_some(cached);
        sheet.set(row, col, CellValue::formula(source.clone(), cached));
    }
}

impl Book {
    /// Load every sheet of an Excel workbook (.xlsx, .xlsm).
    ///
    /// Formula cells keep their source together with the cached result.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or a sheet cannot be read.
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook: Xlsx<BufReader<File>> = open_workbook(path).map_err(workbook_error)?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
        let mut book = Book::new();

        for sheet_name in sheet_names {
            let values = workbook
                .worksheet_range(&sheet_name)
                .map_err(workbook_error)?;
            let formulas = match workbook.worksheet_formula(&sheet_name) {
                Ok(formulas) => Some(formulas),
                Err(e) => {
                    tracing::warn!(
                        "Formulas of sheet {} unreadable, using cached values: {}",
                        sheet_name,
                        e
                    );
                    None
                }
            };

            let mut sheet = Sheet::with_name(&sheet_name);
            fill_sheet(&mut sheet, &values, formulas.as_ref());
            tracing::debug!(
                "Loaded sheet {} with {} rows from {}",
                sheet_name,
                sheet.row_count(),
                path.display()
            );

            book.add_sheet(&sheet_name, sheet)?;
        }

        Ok(book)
    }
}
