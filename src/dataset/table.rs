use super::TableError;
use crate::serialization::write_atomically;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// A header plus rows of string cells.
///
/// Every row has exactly one cell per header column. Operations never mutate
/// a table; they return new tables.
#[derive(Clone, Debug, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from headers and rows, checking that the header has no
    /// duplicates and that every row has the header's width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(headers.len());
        for name in &headers {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(TableError::Ragged {
                    row: i,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
        }

        Ok(Self { headers, rows })
    }

    /// Read a CSV file with a header row.
    ///
    /// Fails with [`TableError::Empty`] when the file has no data rows.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read CSV data with a header row from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        if headers.is_empty() || rows.is_empty() {
            return Err(TableError::Empty);
        }

        Self::new(headers, rows)
    }

    /// Write the table as CSV (header row, no index column).
    ///
    /// The file is replaced atomically: readers never observe a partial file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        write_atomically(path, |w| self.to_writer(w))
    }

    /// Write the table as CSV to any writer.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows in file order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of the column called `name`, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, TableError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// New table with the given rows, in the given order.
    ///
    /// # Panics
    /// Panics if an index is out of bounds.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            headers: self.headers.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Remove the column called `name`, returning the remaining table and the
    /// removed cells.
    pub fn take_column(&self, name: &str) -> Result<(Self, Vec<String>), TableError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;

        let mut headers = self.headers.clone();
        headers.remove(idx);

        let mut taken = Vec::with_capacity(self.rows.len());
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                taken.push(row.remove(idx));
                row
            })
            .collect();

        Ok((Self { headers, rows }, taken))
    }

    /// Split into `(train, test)` partitions with a seeded shuffle.
    ///
    /// The test partition holds `ceil(test_size * n_rows)` rows. Rows of each
    /// partition appear in shuffled order.
    pub fn train_test_split(&self, test_size: f64, seed: u64) -> Result<(Self, Self), TableError> {
        let (train_idx, test_idx) = super::split_indices(self.n_rows(), test_size, seed)?;
        Ok((self.select_rows(&train_idx), self.select_rows(&test_idx)))
    }
}
