//! Tabular dataset model.
//!
//! An ordered collection of rows over a fixed column set, parsed from CSV.
//! Cells are kept as raw text; numeric interpretation happens at the point
//! of use.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use thiserror::Error;

/// Errors raised while building or serializing a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The underlying file could not be opened or read.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV payload is malformed (syntax, encoding, or uneven row width).
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column name appears more than once in the header.
    #[error("duplicate column {0:?} in header")]
    DuplicateColumn(String),

    /// A row's cell count differs from the header's column count.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// An in-memory table: named columns over uniform-width rows of text cells.
///
/// Invariants: column names are unique and every row has exactly one cell
/// per column. A dataset is read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Row indices grouped by a column's distinct values.
///
/// `labels[i]` owns the row indices in `members[i]`; labels appear in
/// first-encounter order and members keep the original row order, so every
/// dataset row lands in exactly one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub labels: Vec<String>,
    pub members: Vec<Vec<usize>>,
}

impl Dataset {
    /// Builds a dataset from a header and rows, enforcing uniform width and
    /// unique column names.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(DatasetError::DuplicateColumn(name.clone()));
            }
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(DatasetError::Ragged {
                    row,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Parses CSV with a header row. The reader enforces uniform record
    /// width, so ragged input surfaces as a CSV error.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Self::new(columns, rows)
    }

    /// Parses the CSV file at `path`.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        Self::from_csv_reader(File::open(path)?)
    }

    /// Column names in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in original order; every row has one cell per column.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the dataset has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the named column, if present.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Splits row indices by the distinct values of the column at `column`.
    ///
    /// `column` must be a valid column index; resolve names through
    /// [`Dataset::column_index`] first.
    #[must_use]
    pub fn partition_by(&self, column: usize) -> Partition {
        let mut labels: Vec<String> = Vec::new();
        let mut members: Vec<Vec<usize>> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for (row, cells) in self.rows.iter().enumerate() {
            let label = &cells[column];
            let slot = *slots.entry(label.clone()).or_insert_with(|| {
                labels.push(label.clone());
                members.push(Vec::new());
                labels.len() - 1
            });
            members[slot].push(row);
        }

        Partition { labels, members }
    }

    /// Writes the dataset as CSV with a header row.
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<(), DatasetError> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
