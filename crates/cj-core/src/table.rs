//! Core table type shared by every pipeline stage

use crate::error::{Error, Result};

/// A row of text fields. Rows are ragged: a data row may be shorter or
/// longer than the header.
pub type Row = Vec<String>;

/// An in-memory table whose first row is the header
///
/// The header row always exists, even when the table holds no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create a table with the given header and no data rows
    pub fn new(header: Row) -> Self {
        Self { rows: vec![header] }
    }

    /// Build a table from raw rows, the first of which is the header
    pub fn from_rows(rows: Vec<Row>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::MissingHeader);
        }
        Ok(Self { rows })
    }

    /// The header row
    pub fn header(&self) -> &Row {
        &self.rows[0]
    }

    /// All data rows, header excluded
    pub fn data_rows(&self) -> &[Row] {
        &self.rows[1..]
    }

    /// Mutable access to the data rows. The header cannot be reached this way.
    pub fn data_rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows[1..]
    }

    /// All rows including the header
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Append a data row
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get the number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len() - 1
    }

    /// Get the number of header columns
    pub fn column_count(&self) -> usize {
        self.header().len()
    }

    /// Find a column index by header name (first match wins)
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.header().iter().position(|h| h == name)
    }

    /// Consume the table, returning all rows including the header
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// Read a field from a row, yielding `""` when the index is out of range
pub fn field(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Build a row from string slices
pub fn row<S: AsRef<str>>(fields: &[S]) -> Row {
    fields.iter().map(|f| f.as_ref().to_string()).collect()
}
