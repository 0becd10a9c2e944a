use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One full snapshot of a collection: an ordered header plus string rows.
///
/// Cells are untyped text, matching what a spreadsheet transport hands
/// back. Rows are kept rectangular; short rows are padded with empty cells
/// on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of one column, top to bottom. Empty when the column is
    /// absent.
    #[must_use]
    pub fn column_values(&self, name: &str) -> Vec<&str> {
        match self.column_index(name) {
            Some(idx) => self
                .rows
                .iter()
                .map(|row| row.get(idx).map_or("", String::as_str))
                .collect(),
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// Raw row append. The row is padded or truncated to the header width.
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = row.into_iter().map(Into::into).collect();
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    /// Appends a record as the last row, taking the union of the table's
    /// columns and the record's keys. Existing column order is preserved;
    /// keys the table has not seen are added after it, and prior rows are
    /// backfilled with empty cells for them.
    pub fn push_record(&mut self, record: &BTreeMap<String, String>) {
        for key in record.keys() {
            if self.column_index(key).is_none() {
                self.columns.push(key.clone());
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }
        let row: Vec<String> = self
            .columns
            .iter()
            .map(|c| record.get(c).cloned().unwrap_or_default())
            .collect();
        self.rows.push(row);
    }

    /// Defensive cleanup against malformed prior writes: removes columns
    /// whose every cell is blank. Headers of an all-empty table are kept.
    /// Returns the dropped column names.
    pub fn drop_empty_columns(&mut self) -> Vec<String> {
        if self.rows.is_empty() {
            return Vec::new();
        }
        let keep: Vec<bool> = (0..self.columns.len())
            .map(|idx| {
                self.rows
                    .iter()
                    .any(|row| row.get(idx).is_some_and(|cell| !cell.trim().is_empty()))
            })
            .collect();
        if keep.iter().all(|k| *k) {
            return Vec::new();
        }
        let mut dropped = Vec::new();
        let mut kept_columns = Vec::with_capacity(self.columns.len());
        for (idx, column) in self.columns.drain(..).enumerate() {
            if keep[idx] {
                kept_columns.push(column);
            } else {
                dropped.push(column);
            }
        }
        self.columns = kept_columns;
        for row in &mut self.rows {
            let mut kept_cells = Vec::with_capacity(self.columns.len());
            for (idx, cell) in row.drain(..).enumerate() {
                if idx < keep.len() && keep[idx] {
                    kept_cells.push(cell);
                }
            }
            *row = kept_cells;
        }
        dropped
    }
}
