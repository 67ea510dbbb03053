//! # Sheet Table
//!
//! A table layer over worksheet row stores. A worksheet (rows of cell text, first
//! row holding the headers) is exposed as a structured table with header-indexed
//! columns, row and cell access, iteration that skips merged cells and
//! total/subtotal rows, and row-wise combination of tables with equal headers.
//!
//! ## Features
//!
//! - **Header-indexed columns**: headers are trimmed and lower-cased once, when the
//!   table is built; columns can be reached by header or by a derived accessor name
//! - **Live column views**: sums, averages, indexed reads and writes and lookup by
//!   cell value, always reading the current store
//! - **Merged cells**: rectangular merge regions are skipped by cell iteration
//! - **Summary rows**: rows mentioning "total" or "subtotal" are kept out of the
//!   data returned by `to_array` and `cells`
//! - **Table arithmetic**: `&a + &b` concatenates and `&a - &b` removes matching
//!   rows, each into a new table
//! - **Pluggable stores**: anything implementing [`Worksheet`] can back a table;
//!   in-memory and delimited-file stores are provided
//!
//! ## Example
//!
//! ```
//! use sheet_table::{shared, MemoryWorksheet, Table};
//!
//! let worksheet = MemoryWorksheet::from_rows([
//!     vec!["Item", "Price"],
//!     vec!["tea", "3"],
//!     vec!["cake", "5"],
//!     vec!["Total", "8"],
//! ]);
//! let table = Table::new(shared(worksheet), Vec::new()).unwrap();
//! assert_eq!(table.to_array().len(), 2);
//! assert_eq!(table.column("price").sum(), 16.0);
//! ```
pub mod error;
pub mod table;
pub mod worksheet;

pub use crate::error::SheetTableError;
pub use crate::table::{is_total_row, ColumnView, HeaderMap, MergeRegion, Table, TableError};
pub use crate::worksheet::{
    shared, CsvOptions, CsvWorksheet, MemoryWorksheet, SharedWorksheet, Worksheet, WorksheetError,
};
