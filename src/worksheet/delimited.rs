use crate::worksheet::{check_cell, check_insert, check_row, shared, MemoryWorksheet, SharedWorksheet, Worksheet, WorksheetError};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for reading and writing delimited text files.
#[derive(Copy, Clone, Debug)]
pub struct CsvOptions {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Strip surrounding whitespace from every field on load
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            trim: false,
        }
    }
}

/// Worksheet backed by a delimited text file.
///
/// The whole file is loaded on open; `save` rewrites it from the current rows.
#[derive(Debug)]
pub struct CsvWorksheet {
    path: PathBuf,
    options: CsvOptions,
    rows: Vec<Vec<String>>,
}

impl CsvWorksheet {
    /// Loads a delimited text file.
    pub fn open<P: AsRef<Path>>(path: P, options: CsvOptions) -> Result<Self, WorksheetError> {
        let path = path.as_ref().to_path_buf();
        let content = read_to_utf8(&path)?;
        let rows = parse(&content, &options)?;
        debug!("Loaded {} rows from '{}'", rows.len(), path.display());
        Ok(Self { path, options, rows })
    }

    /// Path of the file written by `save`.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the current rows to another file, leaving this worksheet bound to its own path.
    pub fn save_as<P: AsRef<Path>>(&self, path: P) -> Result<(), WorksheetError> {
        write(path.as_ref(), &self.rows, &self.options)
    }
}

impl Worksheet for CsvWorksheet {
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
        Ok(())
    }

    fn insert_rows(&mut self, row: usize, rows: Vec<Vec<String>>) -> Result<(), WorksheetError> {
        check_insert(row, self.num_rows())?;
        let at = row - 1;
        self.rows.splice(at..at, rows);
        Ok(())
    }

    fn truncate(&mut self, len: usize) {
        self.rows.truncate(len);
    }

    fn save(&mut self) -> Result<(), WorksheetError> {
        write(&self.path, &self.rows, &self.options)
    }

    /// The copy lives in memory; it is not bound to this file.
    fn duplicate(&self) -> Result<SharedWorksheet, WorksheetError> {
        Ok(shared(MemoryWorksheet::new(self.rows.clone())))
    }
}

/// Reads a file as UTF-8, falling back to Windows-1252 for spreadsheet exports.
fn read_to_utf8(path: &Path) -> Result<String, WorksheetError> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(e) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
            Ok(decoded.into_owned())
        }
    }
}

fn parse(content: &str, options: &CsvOptions) -> Result<Vec<Vec<String>>, WorksheetError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(if options.trim { Trim::All } else { Trim::None })
        .from_reader(content.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(rows)
}

fn write(path: &Path, rows: &[Vec<String>], options: &CsvOptions) -> Result<(), WorksheetError> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_path(path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    debug!("Saved {} rows to '{}'", rows.len(), path.display());
    Ok(())
}
