//! Table types.

use serde::{Deserialize, Serialize};

/// A table cell. `None` means the cell has no value.
pub type Cell = Option<String>;

/// A row-major grid of cells.
///
/// The first row is the header; the remaining rows are data rows. Rows are
/// expected to share the header's width, but nothing enforces it: a ragged
/// row is kept exactly as extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table, header first
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows of cells.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Create a table where every cell has a value.
    ///
    /// ```
    /// use pdfmd::Table;
    ///
    /// let table = Table::from_text_rows([["A", "B"], ["1", "2"]]);
    /// assert_eq!(table.column_count(), 2);
    /// ```
    pub fn from_text_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
                .collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Get the number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (the header's cell count).
    pub fn column_count(&self) -> usize {
        self.header().map(<[Cell]>::len).unwrap_or(0)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the header row.
    pub fn header(&self) -> Option<&[Cell]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Get data rows (everything after the header).
    pub fn body(&self) -> &[Vec<Cell>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Check whether any data row differs in width from the header.
    pub fn is_ragged(&self) -> bool {
        let width = self.column_count();
        self.body().iter().any(|row| row.len() != width)
    }
}
