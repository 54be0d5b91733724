//! Tabular data as read from CSV.
//!
//! A [`RawTable`] keeps every cell as the string that was read, so the raw
//! snapshot and the partitions can be written back without any lossy
//! conversion. Typed views (numeric matrices, categorical matrices) are built
//! later by the preprocessing transformers.
//!
//! # Missing values
//!
//! A cell counts as missing when, after trimming, it is empty or one of
//! [`MISSING_TOKENS`].
//!
//! # Example
//!
//! ```no_run
//! use tabprep::dataset::RawTable;
//!
//! let table = RawTable::read_csv("dataset/stud.csv")?;
//! let (train, test) = table.train_test_split(0.2, 42)?;
//! assert_eq!(train.n_rows() + test.n_rows(), table.n_rows());
//! # Ok::<(), tabprep::dataset::TableError>(())
//! ```

mod split;
mod table;

pub use self::split::split_indices;
pub use self::table::RawTable;

use thiserror::Error;

/// Tokens that mark a cell as missing. Matched exactly after trimming.
pub const MISSING_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "<NA>", "#NA", "#N/A", "#N/A N/A", "NaN", "-NaN", "nan", "-nan",
    "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN", "null", "NULL", "None",
];

/// Returns true when `cell` represents a missing value.
pub fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || MISSING_TOKENS.contains(&cell)
}

/// Error raised while reading, writing or splitting a table.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("table has no data rows")]
    Empty,

    #[error("row {row} has {found} fields, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("duplicate column `{0}` in header")]
    DuplicateColumn(String),

    #[error("column `{0}` not found")]
    MissingColumn(String),

    #[error("cannot split {rows} rows with test_size {test_size}: both partitions must be non-empty")]
    Unsplittable { rows: usize, test_size: f64 },
}
