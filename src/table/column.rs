use crate::error::SheetTableError;
use crate::table::classify::{coerce_number, is_total_row};
use crate::table::{cell_at, MergeRegion, Table, TableError};
use log::debug;
use std::fmt;

/// Live projection of one table column.
///
/// Holds no data of its own: every call reads the table's store again, so writes
/// made through the table or another view are seen immediately.
#[derive(Clone, Debug)]
pub struct ColumnView<'a> {
    table: &'a Table,
    /// Header as requested
    header: String,
    /// Zero-based column index, None when the header is unknown
    index: Option<usize>,
}

impl<'a> ColumnView<'a> {
    pub(crate) fn new(table: &'a Table, header: &str, index: Option<usize>) -> Self {
        ColumnView {
            table,
            header: header.to_owned(),
            index,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Zero-based column index, or None when the header is unknown.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn merged_regions(&self) -> &'a [MergeRegion] {
        self.table.merged_regions()
    }

    /// Raw values over every data row, summary rows included.
    pub fn values(&self) -> Vec<String> {
        match self.index {
            Some(index) => self
                .table
                .data_rows()
                .iter()
                .map(|row| cell_at(row, index))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Sum of the column; cells that are not numbers count as 0.
    pub fn sum(&self) -> f64 {
        self.values().iter().map(|value| coerce_number(value)).sum()
    }

    /// Mean of the column with the same coercion as `sum`; 0 for a column without data rows.
    pub fn avg(&self) -> f64 {
        let values = self.values();
        if values.is_empty() {
            return 0.0;
        }
        values.iter().map(|value| coerce_number(value)).sum::<f64>() / values.len() as f64
    }

    /// Value at 0-based data row `index`.
    pub fn get(&self, index: usize) -> Result<String, SheetTableError> {
        let col = self.checked_col(index)?;
        Ok(self.table.worksheet().borrow().cell(index + 2, col)?)
    }

    /// Writes the value at 0-based data row `index` and saves the store.
    pub fn set<V: ToString>(&self, index: usize, value: V) -> Result<(), SheetTableError> {
        let col = self.checked_col(index)?;
        let value = value.to_string();
        let mut worksheet = self.table.worksheet().borrow_mut();
        worksheet.set_cell(index + 2, col, &value)?;
        worksheet.save()?;
        debug!("Set '{}' row {} to '{}'", self.header, index, value);
        Ok(())
    }

    /// 1-based sheet column for data row `index`, checking both bounds.
    fn checked_col(&self, index: usize) -> Result<usize, SheetTableError> {
        let len = match self.index {
            Some(_) => self.table.num_rows().saturating_sub(1),
            None => 0,
        };
        match self.index {
            Some(col) if index < len => Ok(col + 1),
            _ => Err(TableError::IndexOutOfRange { index, len })?,
        }
    }

    /// First row, header row included, whose cell in this column equals `value`
    /// ignoring case.
    pub fn find_row_by_cell_value(&self, value: &str) -> Option<Vec<String>> {
        let index = self.index?;
        let key = value.to_lowercase();
        self.table
            .rows()
            .into_iter()
            .find(|row| cell_at(row, index).to_lowercase() == key)
    }

    /// Like `find_row_by_cell_value`, failing with `UnknownAccessor` when nothing matches.
    pub fn row_by_value(&self, value: &str) -> Result<Vec<String>, SheetTableError> {
        match self.find_row_by_cell_value(value) {
            Some(row) => Ok(row),
            None => Err(TableError::UnknownAccessor(value.to_owned()))?,
        }
    }

    /// Data-row values without summary rows. Merge regions are not consulted.
    pub fn cells(&self) -> impl Iterator<Item = String> + 'a {
        let index = self.index;
        let rows = match index {
            Some(_) => self.table.data_rows(),
            None => Vec::new(),
        };
        rows.into_iter()
            .filter(|row| !is_total_row(row))
            .filter_map(move |row| index.map(|index| cell_at(&row, index)))
    }
}

impl fmt::Display for ColumnView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Header: {}, Values: {}", self.header, self.values().join(", "))
    }
}
