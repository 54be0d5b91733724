//! ColumnTransformer for applying different pipelines to different columns.
//!
//! Columns are selected by header name from a [`RawTable`](crate::dataset::RawTable).
//! Each named step produces a block of features; blocks are concatenated in
//! the order the steps were added. Columns not claimed by any step are
//! dropped.

#[allow(clippy::module_inception)]
mod column_transformer;

pub use column_transformer::{
    ColumnEntry, ColumnStep, ColumnTransformer, FittedColumnStep, FittedColumnTransformer,
};
