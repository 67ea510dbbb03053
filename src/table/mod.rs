//! # Table Module
//!
//! A [`Table`] wraps a shared worksheet store and exposes it as a header-indexed
//! table. The header map is computed once from the first row when the table is
//! built; every other read goes straight to the store, so edits made through any
//! holder of the same store show up on the next call.
//!
//! Two coordinate systems are in use:
//!
//! - array-style accessors ([`Table::row`], [`Table::to_array`], [`ColumnView::get`])
//!   are 0-based, with `row(0)` being the header row and `to_array()[0]` the first
//!   data row;
//! - merge regions and [`Table::is_merged`] are 1-based with the header row as row 1,
//!   while [`Table::cells`] checks the data row at position `i` against merge row `i + 1`.
//!
//! Summary rows (cells reading "total" or "subtotal") are left out of
//! [`Table::to_array`] and [`Table::cells`] but kept by [`Table::get_column`] and
//! by the column aggregations.
pub mod classify;
pub mod column;
pub mod combine;
pub mod header;
pub mod region;

use crate::error::SheetTableError;
use crate::worksheet::SharedWorksheet;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

pub use self::classify::is_total_row;
pub use self::column::ColumnView;
pub use self::header::HeaderMap;
pub use self::region::MergeRegion;

/// Errors raised by table and column operations.
#[derive(Error, Debug)]
pub enum TableError {
    /// The store has no header row
    #[error("Empty sheet or missing header row")]
    EmptySheet,

    /// Combined tables do not share the same headers
    #[error("Headers do not match")]
    HeaderMismatch,

    /// Row index past the end of the table
    #[error("Row index {index} is out of range for {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    /// Name matches neither a column accessor nor a cell value
    #[error("Unknown accessor '{0}'")]
    UnknownAccessor(String),
}

/// Header-indexed view over a worksheet store.
#[derive(Clone)]
pub struct Table {
    /// Shared row store
    worksheet: SharedWorksheet,
    /// Merged blocks excluded from cell iteration
    merged_regions: Vec<MergeRegion>,
    /// Normalized header name to column index, fixed at construction
    headers: HeaderMap,
    /// Accessor name to normalized header, fixed at construction
    accessors: HashMap<String, String>,
}

impl Table {
    /// Wraps a store, reading its header row once.
    pub fn new(worksheet: SharedWorksheet, merged_regions: Vec<MergeRegion>) -> Result<Self, SheetTableError> {
        let header_row = {
            let worksheet = worksheet.borrow();
            if worksheet.num_rows() == 0 {
                return Err(TableError::EmptySheet.into());
            }
            worksheet.row(1)?
        };
        let headers = header::header_map(&header_row);

        let mut ordered: Vec<(&String, &usize)> = headers.iter().collect();
        ordered.sort_by_key(|(_, index)| **index);
        let accessors = ordered
            .into_iter()
            .map(|(name, _)| (header::accessor_name(name), name.clone()))
            .collect();

        Ok(Table {
            worksheet,
            merged_regions,
            headers,
            accessors,
        })
    }

    /// Normalized header map.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn merged_regions(&self) -> &[MergeRegion] {
        &self.merged_regions
    }

    /// The shared store behind this table.
    pub fn worksheet(&self) -> &SharedWorksheet {
        &self.worksheet
    }

    /// All rows as stored, header row included.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.worksheet.borrow().rows()
    }

    /// Rows after the header row, summary rows included.
    pub(crate) fn data_rows(&self) -> Vec<Vec<String>> {
        self.rows().into_iter().skip(1).collect()
    }

    /// Row at 0-based `index`; `row(0)` is the header row.
    pub fn row(&self, index: usize) -> Result<Vec<String>, SheetTableError> {
        let worksheet = self.worksheet.borrow();
        let len = worksheet.num_rows();
        if index < len {
            Ok(worksheet.row(index + 1)?)
        } else {
            Err(TableError::IndexOutOfRange { index, len })?
        }
    }

    /// Data rows without summary rows.
    pub fn to_array(&self) -> Vec<Vec<String>> {
        self.data_rows()
            .into_iter()
            .filter(|row| !is_total_row(row))
            .collect()
    }

    /// Raw values of the named column over every data row, summary rows included.
    /// An unknown header yields an empty vector.
    pub fn get_column(&self, header: &str) -> Vec<String> {
        match self.headers.get(&header::normalize(header)) {
            Some(&index) => self
                .data_rows()
                .into_iter()
                .map(|row| cell_at(&row, index))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Cells of the data rows, row-major, skipping merged cells and summary rows.
    /// Data row `i` (0-based) is matched against merge row `i + 1`.
    /// The store is read when this is called; call again to re-read it.
    pub fn cells(&self) -> impl Iterator<Item = String> + '_ {
        self.data_rows()
            .into_iter()
            .enumerate()
            .filter(|(_, row)| !is_total_row(row))
            .flat_map(move |(index, row)| {
                // merge rows are matched against the data-row position plus one,
                // so the first data row is checked as row 1
                let merge_row = index + 1;
                row.into_iter()
                    .enumerate()
                    .filter(move |(col, _)| !self.is_merged(merge_row, col + 1))
                    .map(|(_, cell)| cell)
            })
    }

    /// Checks if the 1-based cell (`row`, `col`) lies inside any merge region.
    pub fn is_merged(&self, row: usize, col: usize) -> bool {
        self.merged_regions.iter().any(|region| region.contains(row, col))
    }

    /// Column view for `header`; an unknown header gives an always-empty column.
    pub fn column(&self, header: &str) -> ColumnView<'_> {
        let index = self.headers.get(&header::normalize(header)).copied();
        ColumnView::new(self, header, index)
    }

    /// Column view by accessor name, e.g. `FirstName` for the `first_name` header.
    /// Only headers present when the table was built have accessors.
    pub fn column_by_name(&self, name: &str) -> Result<ColumnView<'_>, SheetTableError> {
        match self.accessors.get(name) {
            Some(header) => Ok(self.column(header)),
            None => Err(TableError::UnknownAccessor(name.to_owned()))?,
        }
    }

    /// Accessor names generated at construction, sorted.
    pub fn accessor_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.accessors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of rows in the store, header row included.
    pub fn num_rows(&self) -> usize {
        self.worksheet.borrow().num_rows()
    }

    /// Inserts rows so the first lands at 1-based sheet row `row`, then saves.
    pub fn insert_rows(&self, row: usize, rows: Vec<Vec<String>>) -> Result<(), SheetTableError> {
        let count = rows.len();
        let mut worksheet = self.worksheet.borrow_mut();
        worksheet.insert_rows(row, rows)?;
        worksheet.save()?;
        debug!("Inserted {} rows at sheet row {}", count, row);
        Ok(())
    }

    /// All rows, header row included, that have at least one non-blank cell.
    pub fn rows_without_empty(&self) -> Vec<Vec<String>> {
        self.rows()
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .collect()
    }
}

/// Cell at `index`, empty when the row is shorter.
pub(crate) fn cell_at(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

impl fmt::Display for Table {
    /// Renders the data rows as `|a|b|` lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data_rows() {
            for cell in &row {
                write!(f, "|{}", cell)?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("headers", &self.headers)
            .field("merged_regions", &self.merged_regions)
            .field("num_rows", &self.num_rows())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::worksheet::{shared, MemoryWorksheet, SharedWorksheet, Worksheet, WorksheetError};

    /// In-memory store whose saves always fail.
    pub(crate) struct UnsavableWorksheet(pub(crate) MemoryWorksheet);

    impl Worksheet for UnsavableWorksheet {
        fn rows(&self) -> Vec<Vec<String>> {
            self.0.rows()
        }

        fn num_rows(&self) -> usize {
            self.0.num_rows()
        }

        fn num_cols(&self) -> usize {
            self.0.num_cols()
        }

        fn row(&self, row: usize) -> Result<Vec<String>, WorksheetError> {
            self.0.row(row)
        }

        fn cell(&self, row: usize, col: usize) -> Result<String, WorksheetError> {
            self.0.cell(row, col)
        }

        fn set_cell(&mut self, row: usize, col: usize, value: &str) -> Result<(), WorksheetError> {
            self.0.set_cell(row, col, value)
        }

        fn insert_rows(&mut self, row: usize, rows: Vec<Vec<String>>) -> Result<(), WorksheetError> {
            self.0.insert_rows(row, rows)
        }

        fn truncate(&mut self, len: usize) {
            self.0.truncate(len)
        }

        fn save(&mut self) -> Result<(), WorksheetError> {
            Err(anyhow::anyhow!("backend down").into())
        }

        fn duplicate(&self) -> Result<SharedWorksheet, WorksheetError> {
            self.0.duplicate()
        }
    }

    pub(crate) fn unsavable_table(rows: &[&[&str]]) -> Table {
        let worksheet = MemoryWorksheet::from_rows(rows.iter().map(|row| row.iter().copied()));
        Table::new(shared(UnsavableWorksheet(worksheet)), Vec::new()).unwrap()
    }

    pub(crate) fn table(rows: &[&[&str]]) -> Table {
        table_with_regions(rows, Vec::new())
    }

    pub(crate) fn table_with_regions(rows: &[&[&str]], regions: Vec<MergeRegion>) -> Table {
        let worksheet = MemoryWorksheet::from_rows(rows.iter().map(|row| row.iter().copied()));
        Table::new(shared(worksheet), regions).unwrap()
    }

    fn sales() -> Table {
        table(&[
            &["Index", "Ime", "Amount"],
            &["rn1422", "Ana", "10"],
            &["rn1423", "Bob", "20"],
            &["", "Subtotal", "30"],
            &["rn1424", "Cid", "x"],
        ])
    }

    #[test]
    fn table_empty_sheet() {
        let result = Table::new(shared(MemoryWorksheet::default()), Vec::new());
        assert!(matches!(result, Err(SheetTableError::TableError(TableError::EmptySheet))));
    }

    #[test]
    fn table_headers() {
        let table = table(&[&[" Index ", "", "First_Name"], &["1", "2", "3"]]);
        assert_eq!(table.headers().len(), 2);
        assert_eq!(table.headers()["index"], 0);
        assert_eq!(table.headers()["first_name"], 2);
        assert_eq!(table.accessor_names(), vec!["FirstName", "Index"]);
    }

    #[test]
    fn table_row_access() {
        let table = sales();
        assert_eq!(table.row(0).unwrap(), vec!["Index", "Ime", "Amount"]);
        assert_eq!(table.row(1).unwrap()[1], "Ana");
        assert!(matches!(
            table.row(5),
            Err(SheetTableError::TableError(TableError::IndexOutOfRange { index: 5, len: 5 }))
        ));
    }

    #[test]
    fn table_to_array_skips_header_and_totals() {
        let table = sales();
        let rows = table.to_array();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["rn1422", "Ana", "10"]);
        assert_eq!(rows[2], vec!["rn1424", "Cid", "x"]);
        assert!(rows.iter().all(|row| !is_total_row(row)));
        assert_eq!(table.to_array(), rows);
    }

    #[test]
    fn table_get_column_keeps_totals() {
        let table = sales();
        assert_eq!(table.get_column("AMOUNT"), vec!["10", "20", "30", "x"]);
        assert!(table.get_column("missing").is_empty());
    }

    #[test]
    fn table_cells_skip_merged_and_totals() {
        let table = table_with_regions(
            &[
                &["a", "b"],
                &["1", "2"],
                &["3", "4"],
                &["total", "7"],
                &["5", "6"],
            ],
            vec![MergeRegion::new(2, 1, 3, 1)],
        );
        let cells: Vec<String> = table.cells().collect();
        assert_eq!(cells, vec!["1", "2", "4", "5", "6"]);
        assert_eq!(table.cells().count(), 5);
    }

    #[test]
    fn table_cells_match_data_position_plus_one() {
        let table = table_with_regions(&[&["h"], &["d0"], &["d1"]], vec![MergeRegion::new(2, 1, 2, 1)]);
        assert_eq!(table.cells().collect::<Vec<_>>(), vec!["d0"]);
        let table = table_with_regions(&[&["h"], &["d0"], &["d1"]], vec![MergeRegion::new(1, 1, 1, 1)]);
        assert_eq!(table.cells().collect::<Vec<_>>(), vec!["d1"]);
    }

    #[test]
    fn table_is_merged() {
        let table = table_with_regions(&[&["a"], &["1"], &["2"]], vec![MergeRegion::new(2, 1, 2, 1)]);
        assert!(table.is_merged(2, 1));
        assert!(!table.is_merged(3, 1));
        assert_eq!(table.merged_regions().len(), 1);
    }

    #[test]
    fn table_column_by_name_matches_index_access() {
        let table = sales();
        let by_header = table.column("index");
        let by_name = table.column_by_name("Index").unwrap();
        assert_eq!(by_header.index(), by_name.index());
        assert_eq!(by_header.values(), by_name.values());
        assert!(matches!(
            table.column_by_name("Nope"),
            Err(SheetTableError::TableError(TableError::UnknownAccessor(name))) if name == "Nope"
        ));
    }

    #[test]
    fn table_insert_rows_saves_and_is_visible() {
        let worksheet = std::rc::Rc::new(std::cell::RefCell::new(MemoryWorksheet::from_rows([["h"], ["1"]])));
        let table = Table::new(worksheet.clone(), Vec::new()).unwrap();
        let column = table.column("h");
        table.insert_rows(table.num_rows() + 1, vec![vec!["2".to_owned()]]).unwrap();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(column.values(), vec!["1", "2"]);
        assert_eq!(worksheet.borrow().saves(), 1);
        assert!(!worksheet.borrow().is_dirty());
    }

    #[test]
    fn table_insert_rows_out_of_range() {
        let table = sales();
        assert!(matches!(
            table.insert_rows(9, Vec::new()),
            Err(SheetTableError::WorksheetError(_))
        ));
    }

    #[test]
    fn table_insert_rows_save_failure_reaches_caller() {
        let table = unsavable_table(&[&["h"], &["1"]]);
        let result = table.insert_rows(3, vec![vec!["2".to_owned()]]);
        assert!(matches!(
            &result,
            Err(SheetTableError::WorksheetError(WorksheetError::BackendError(_)))
        ));
        assert_eq!(result.unwrap_err().to_string(), "backend down");
        // no rollback: the rows stay in the store
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.get_column("h"), vec!["1", "2"]);
    }

    #[test]
    fn table_headers_fixed_after_insert() {
        let table = table(&[&["a"], &["1"]]);
        table.insert_rows(1, vec![vec!["new".to_owned()]]).unwrap();
        assert_eq!(table.row(0).unwrap(), vec!["new"]);
        assert!(table.headers().contains_key("a"));
        assert!(table.column_by_name("New").is_err());
    }

    #[test]
    fn table_rows_without_empty() {
        let table = table(&[&["a", "b"], &["", " "], &["1", ""], &[]]);
        assert_eq!(table.rows_without_empty(), vec![vec!["a", "b"], vec!["1", ""]]);
    }

    #[test]
    fn table_display() {
        let table = table(&[&["a", "b"], &["1", "2"], &["3", "4"]]);
        assert_eq!(table.to_string(), "|1|2|\n|3|4|\n");
    }

    #[test]
    fn table_shares_store_with_other_holders() {
        let table = sales();
        table.worksheet().borrow_mut().set_cell(2, 2, "Zed").unwrap();
        assert_eq!(table.row(1).unwrap()[1], "Zed");
        let worksheet = table.worksheet().borrow();
        assert_eq!(worksheet.num_rows(), table.num_rows());
    }
}
