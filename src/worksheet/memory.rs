use crate::worksheet::{check_cell, check_insert, check_row, shared, SharedWorksheet, Worksheet, WorksheetError};
use log::debug;

/// In-process worksheet holding its rows in a vector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryWorksheet {
    rows: Vec<Vec<String>>,
    /// Number of completed saves
    saves: usize,
    /// Whether writes happened since the last save
    dirty: bool,
}

impl MemoryWorksheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            saves: 0,
            dirty: false,
        }
    }

    /// Builds a worksheet from anything that looks like rows of text.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Number of times `save` has been called.
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// Returns true if there are writes not yet saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Worksheet for MemoryWorksheet {
    fn rows(&self) -> Vec<Vec<String>> {
        self.rows.clone()
    }

    fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn num_cols(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn row(&self, row: usize) -> Result<Vec<String>, WorksheetError> {
        check_row(row, self.num_rows())?;
        Ok(self.rows[row - 1].clone())
    }

    fn cell(&self, row: usize, col: usize) -> Result<String, WorksheetError> {
        check_cell(row, col, self.num_rows(), self.num_cols())?;
        Ok(self.rows[row - 1].get(col - 1).cloned().unwrap_or_default())
    }

    fn set_cell(&mut self, row: usize, col: usize, value: &str) -> Result<(), WorksheetError> {
        check_cell(row, col, self.num_rows(), usize::MAX)?;
        let record = &mut self.rows[row - 1];
        if record.len() < col {
            record.resize(col, String::new());
        }
        record[col - 1] = value.to_owned();
        self.dirty = true;
        Ok(())
    }

    fn insert_rows(&mut self, row: usize, rows: Vec<Vec<String>>) -> Result<(), WorksheetError> {
        check_insert(row, self.num_rows())?;
        let at = row - 1;
        self.rows.splice(at..at, rows);
        self.dirty = true;
        Ok(())
    }

    fn truncate(&mut self, len: usize) {
        if len < self.rows.len() {
            self.rows.truncate(len);
            self.dirty = true;
        }
    }

    fn save(&mut self) -> Result<(), WorksheetError> {
        self.saves += 1;
        self.dirty = false;
        debug!("Saved in-memory worksheet with {} rows", self.rows.len());
        Ok(())
    }

    fn duplicate(&self) -> Result<SharedWorksheet, WorksheetError> {
        Ok(shared(MemoryWorksheet::new(self.rows.clone())))
    }
}
