use thiserror::Error;

/// Main error type for the sheet table layer.
/// Aggregates errors from the worksheet stores and the table module.
#[derive(Error, Debug)]
pub enum SheetTableError {
    // Worksheet module errors
    #[error("{0}")]
    WorksheetError(#[from] crate::worksheet::WorksheetError),

    // Table module errors
    #[error("{0}")]
    TableError(#[from] crate::table::TableError),
}
