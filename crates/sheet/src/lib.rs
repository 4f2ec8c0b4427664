//! Typed, header-addressed access to human-edited spreadsheets.
//!
//! A workbook is loaded into a [`Book`] of [`Sheet`]s. Each sheet that has a
//! header row can be wrapped in a [`Table`], which resolves column names,
//! decodes cells into strings, numbers and dates, and finds rows by value.
//!
//! # Examples
//!
//! ```
//! use edcl_sheet::{Sheet, Table};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["Title", "Sub-Assessments"],
//!     vec!["Exam", "Part A; Part B"],
//! ]);
//! let table = Table::new(sheet, 0).unwrap();
//!
//! let row = table.find_first_row(&[("Title", "exam")]).unwrap();
//! assert_eq!(row, 1);
//! assert_eq!(
//!     table.get_multi_value(row, "Sub-Assessments").unwrap(),
//!     vec!["Part A", "Part B"]
//! );
//! ```
//!
//! ## Loading a workbook
//!
//! ```no_run
//! use edcl_sheet::{Book, Table};
//!
//! let mut book = Book::from_xlsx("credentials.xlsm").unwrap();
//! let persons = Table::new(book.take_sheet("Persons").unwrap(), 7).unwrap();
//! ```

pub mod a1_notation;
pub mod book;
pub mod cell;
pub mod error;
pub mod link;
pub mod sheet;
pub mod table;
pub mod xlsx;

pub use a1_notation::CellAddress;
pub use book::Book;
pub use cell::{
    serial_to_datetime, CellDecoder, CellKind, CellType, CellValue, FormulaCell, TypedValue,
};
pub use error::{ErrorKind, Result, SheetError};
pub use link::TableLink;
pub use sheet::Sheet;
pub use table::{describe_predicate, split_multi_value, Predicate, RowView, Table};
