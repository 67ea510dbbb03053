//! # Worksheet Stores
//!
//! A worksheet is the mutable row store underneath a [`Table`](crate::table::Table).
//! Rows are ordered sequences of cell text and row 0 is the header row. Cell
//! reads and writes use 1-based coordinates, the way spreadsheet documents
//! address them.
//!
//! Stores are shared, not owned: a table and every column view taken from it
//! read through the same [`SharedWorksheet`] handle, so edits made by any
//! holder are visible to all of them on the next call.
pub mod delimited;
pub mod memory;

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

pub use self::delimited::{CsvOptions, CsvWorksheet};
pub use self::memory::MemoryWorksheet;

/// Shared handle to a worksheet store.
pub type SharedWorksheet = Rc<RefCell<dyn Worksheet>>;

/// Errors raised by worksheet stores.
#[derive(Error, Debug)]
pub enum WorksheetError {
    /// Cell or row coordinate outside the store
    #[error("Cell ({row}, {col}) is out of range")]
    IndexOutOfRange { row: usize, col: usize },

    /// Reading or writing the underlying file failed
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    /// Delimited text could not be read or written
    #[error("{0}")]
    CsvError(#[from] csv::Error),

    /// Failure reported by a store implemented outside this crate
    #[error("{0}")]
    BackendError(#[from] anyhow::Error),
}

/// Backing store contract consumed by tables and column views.
pub trait Worksheet {
    /// Snapshot of all rows, header row first.
    fn rows(&self) -> Vec<Vec<String>>;

    /// Number of rows, header row included.
    fn num_rows(&self) -> usize;

    /// Width of the widest row.
    fn num_cols(&self) -> usize;

    /// Reads the whole 1-based row `row` as stored.
    fn row(&self, row: usize) -> Result<Vec<String>, WorksheetError>;

    /// Reads the cell at 1-based (`row`, `col`).
    /// Cells past the end of a short row read as an empty string.
    fn cell(&self, row: usize, col: usize) -> Result<String, WorksheetError>;

    /// Writes the cell at 1-based (`row`, `col`), padding a short row with blanks.
    fn set_cell(&mut self, row: usize, col: usize, value: &str) -> Result<(), WorksheetError>;

    /// Inserts `rows` so that the first of them becomes 1-based row `row`.
    /// Passing `num_rows() + 1` appends.
    fn insert_rows(&mut self, row: usize, rows: Vec<Vec<String>>) -> Result<(), WorksheetError>;

    /// Keeps only the first `len` rows.
    fn truncate(&mut self, len: usize);

    /// Commits pending writes.
    fn save(&mut self) -> Result<(), WorksheetError>;

    /// Independent copy usable as a fresh store.
    fn duplicate(&self) -> Result<SharedWorksheet, WorksheetError>;
}

/// Wraps a store into a shared handle.
pub fn shared<W: Worksheet + 'static>(worksheet: W) -> SharedWorksheet {
    Rc::new(RefCell::new(worksheet))
}

/// Checks a 1-based cell coordinate against a grid of `num_rows` by `num_cols`.
pub(crate) fn check_cell(row: usize, col: usize, num_rows: usize, num_cols: usize) -> Result<(), WorksheetError> {
    if row == 0 || col == 0 || row > num_rows || col > num_cols {
        Err(WorksheetError::IndexOutOfRange { row, col })
    } else {
        Ok(())
    }
}

/// Checks a 1-based row number against a store holding `num_rows` rows.
pub(crate) fn check_row(row: usize, num_rows: usize) -> Result<(), WorksheetError> {
    if row == 0 || row > num_rows {
        Err(WorksheetError::IndexOutOfRange { row, col: 0 })
    } else {
        Ok(())
    }
}

/// Checks a 1-based insertion position for a store holding `num_rows` rows.
pub(crate) fn check_insert(row: usize, num_rows: usize) -> Result<(), WorksheetError> {
    if row == 0 || row > num_rows + 1 {
        Err(WorksheetError::IndexOutOfRange { row, col: 0 })
    } else {
        Ok(())
    }
}
