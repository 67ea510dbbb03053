//! Row-wise combination of tables that share the same headers.
//!
//! Both operations leave their operands alone: the result is a new table over a
//! duplicate of the left operand's store, cut back to its header row and then
//! filled through [`Table::insert_rows`].
use crate::error::SheetTableError;
use crate::table::{is_total_row, Table, TableError};
use log::debug;
use std::ops::{Add, Sub};

impl Table {
    /// Concatenates the data rows of both tables, dropping summary rows.
    pub fn append(&self, other: &Table) -> Result<Table, SheetTableError> {
        self.check_headers(other)?;
        let rows = self
            .to_array()
            .into_iter()
            .chain(other.to_array())
            .collect();
        self.derive(rows)
    }

    /// Data rows of this table less those of `other`, summary rows included.
    /// Each row of `other` cancels at most one equal row of this table.
    pub fn subtract(&self, other: &Table) -> Result<Table, SheetTableError> {
        self.check_headers(other)?;
        let mut remaining = other.data_rows();
        let rows = self
            .data_rows()
            .into_iter()
            .filter(|row| match remaining.iter().position(|candidate| candidate == row) {
                Some(position) => {
                    remaining.swap_remove(position);
                    false
                }
                None => true,
            })
            .collect();
        self.derive(rows)
    }

    fn check_headers(&self, other: &Table) -> Result<(), SheetTableError> {
        if self.headers() == other.headers() {
            Ok(())
        } else {
            Err(TableError::HeaderMismatch)?
        }
    }

    /// New table on a header-only duplicate of this store, holding `rows`.
    fn derive(&self, rows: Vec<Vec<String>>) -> Result<Table, SheetTableError> {
        let worksheet = self.worksheet().borrow().duplicate()?;
        worksheet.borrow_mut().truncate(1);
        let table = Table::new(worksheet, Vec::new())?;
        let count = rows.len();
        table.insert_rows(table.num_rows() + 1, rows)?;
        debug!("Combined table holds {} data rows", count);
        Ok(table)
    }
}

impl<'b> Add<&'b Table> for &Table {
    type Output = Result<Table, SheetTableError>;

    fn add(self, other: &'b Table) -> Self::Output {
        self.append(other)
    }
}

impl<'b> Sub<&'b Table> for &Table {
    type Output = Result<Table, SheetTableError>;

    fn sub(self, other: &'b Table) -> Self::Output {
        self.subtract(other)
    }
}
