use crate::a1_notation::CellAddress;
use crate::error::{Result, SheetError};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fmt;

static BLANK: CellValue = CellValue::Null;

/// A formula stored in a cell together with the result cached by the
/// application that last saved the workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaCell {
    pub source: String,
    pub cached: Option<Box<CellValue>>,
}

/// Represents a raw cell value in a sheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    /// A number carrying a date format: the serial in the 1900 date system.
    DateTime(f64),
    String(String),
    Error(String),
    Formula(FormulaCell),
}

/// The type a cell behaves as once formulas are replaced by their cached result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Blank,
    String,
    Numeric,
    Boolean,
    Error,
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellType::Blank => "blank",
            CellType::String => "a string",
            CellType::Numeric => "a number",
            CellType::Boolean => "a boolean",
            CellType::Error => "an error value",
        };
        f.write_str(name)
    }
}

/// The kind of value a caller asks a cell for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    String,
    Number,
    Date,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::String => "a string",
            CellKind::Number => "a number",
            CellKind::Date => "a date",
        };
        f.write_str(name)
    }
}

/// A decoded cell value of the requested kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl CellValue {
    /// Create a formula cell value with a cached result.
    #[must_use]
    pub fn formula<S: Into<String>>(source: S, cached: Option<CellValue>) -> Self {
        CellValue::Formula(FormulaCell {
            source: source.into(),
            cached: cached.map(Box::new),
        })
    }

    /// Return the cached value for formulas, or self for non-formulas.
    /// A formula that was never calculated resolves to `Null`.
    #[must_use]
    pub fn cached_or_self(&self) -> &CellValue {
        match self {
            CellValue::Formula(formula) => formula
                .cached
                .as_deref()
                .map_or(&BLANK, CellValue::cached_or_self),
            _ => self,
        }
    }

    /// The effective type of the cell.
    #[must_use]
    pub fn cell_type(&self) -> CellType {
        match self.cached_or_self() {
            CellValue::Null => CellType::Blank,
            CellValue::String(_) => CellType::String,
            CellValue::Number(_) | CellValue::DateTime(_) => CellType::Numeric,
            CellValue::Bool(_) => CellType::Boolean,
            CellValue::Error(_) | CellValue::Formula(_) => CellType::Error,
        }
    }

    /// Check if the value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.cell_type() == CellType::Blank
    }

    /// Get the value as display text, whatever its type
    #[must_use]
    pub fn as_str(&self) -> String {
        self.to_string()
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cached_or_self() {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Number(n) | CellValue::DateTime(n) => write!(f, "{n}"),
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Error(e) => write!(f, "#{e}"),
            CellValue::Formula(formula) => write!(f, "{}", formula.source),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Number(f64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Number(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            CellValue::Null
        } else {
            CellValue::String(s)
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::from(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// Decodes cells at one position of one sheet into typed values.
///
/// Every decoding failure names the sheet, the cell address and the
/// expected and actual kinds. There is no coercion between strings,
/// numbers and dates.
#[derive(Debug, Clone, Copy)]
pub struct CellDecoder<'a> {
    sheet: &'a str,
    address: CellAddress,
}

impl<'a> CellDecoder<'a> {
    #[must_use]
    pub fn new(sheet: &'a str, address: CellAddress) -> Self {
        CellDecoder { sheet, address }
    }

    /// Decode `cell` as `kind`.
    pub fn decode(&self, cell: &CellValue, kind: CellKind) -> Result<TypedValue> {
        match kind {
            CellKind::String => self.string(cell).map(TypedValue::String),
            CellKind::Number => self.number(cell).map(TypedValue::Number),
            CellKind::Date => self.date(cell).map(TypedValue::Date),
        }
    }

    /// Strings decode as themselves, blank cells as the empty string.
    pub fn string(&self, cell: &CellValue) -> Result<String> {
        match cell.cached_or_self() {
            CellValue::String(s) => Ok(s.clone()),
            CellValue::Null => Ok(String::new()),
            _ => Err(self.mismatch(cell, CellKind::String)),
        }
    }

    pub fn number(&self, cell: &CellValue) -> Result<f64> {
        match cell.cached_or_self() {
            CellValue::Number(n) | CellValue::DateTime(n) => Ok(*n),
            _ => Err(self.mismatch(cell, CellKind::Number)),
        }
    }

    /// Numeric cells are read as a serial day number in the 1900 date system.
    pub fn date(&self, cell: &CellValue) -> Result<NaiveDateTime> {
        match cell.cached_or_self() {
            CellValue::Number(n) | CellValue::DateTime(n) => {
                serial_to_datetime(*n).ok_or_else(|| SheetError::CellType {
                    sheet: self.sheet.to_string(),
                    address: self.address.to_string(),
                    expected: CellKind::Date.to_string(),
                    actual: format!("serial {n} outside the calendar range"),
                })
            }
            _ => Err(self.mismatch(cell, CellKind::Date)),
        }
    }

    fn mismatch(&self, cell: &CellValue, expected: CellKind) -> SheetError {
        let actual = match cell {
            CellValue::Formula(formula) => {
                format!("a formula {} resulting in {}", formula.source, cell.cell_type())
            }
            _ => cell.cell_type().to_string(),
        };
        SheetError::CellType {
            sheet: self.sheet.to_string(),
            address: self.address.to_string(),
            expected: expected.to_string(),
            actual,
        }
    }
}

/// Convert a spreadsheet serial (days since 1899-12-30, fraction = time of day)
/// to a date-time. Serials before 1900-03-01 inherit the 1900 leap-year quirk
/// and come out one day early.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round();
    if millis > i64::MAX as f64 {
        return None;
    }
    epoch.checked_add_signed(Duration::milliseconds(millis as i64))
}
