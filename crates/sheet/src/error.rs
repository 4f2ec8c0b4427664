use thiserror::Error;

/// Broad classification of a [`SheetError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The workbook does not have the expected layout. Never worth retrying.
    Structure,
    /// A well-formed query matched no row.
    NotFound,
}

/// Errors that can occur while reading sheets
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    #[error("Sheet {sheet} has no header row {row} (last row is {last_row})")]
    HeaderRowMissing {
        sheet: String,
        row: usize,
        last_row: usize,
    },

    #[error("Sheet {sheet} does not have column '{column}' on row {header_row}")]
    ColumnNotFound {
        sheet: String,
        column: String,
        header_row: usize,
    },

    #[error("Cell {address} on sheet {sheet} is not {expected}, it is {actual}")]
    CellType {
        sheet: String,
        address: String,
        expected: String,
        actual: String,
    },

    #[error("Malformed grade columns on sheet {sheet} at {address}: {message}")]
    MalformedGradeColumns {
        sheet: String,
        address: String,
        message: String,
    },

    #[error("Sheet {sheet} has no row matching {predicate}")]
    RowNotFound { sheet: String, predicate: String },

    #[error("Invalid cell notation: {0}")]
    InvalidCellNotation(String),

    #[error("Workbook error: {0}")]
    Xlsx(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    /// Classify the error as a schema problem or a query miss.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SheetError::RowNotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::Structure,
        }
    }

    /// Whether this error is a query miss rather than a schema problem.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
