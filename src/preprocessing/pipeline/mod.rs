//! Pipeline utilities for chaining transformers.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Chain`] | Two transformers applied in sequence |
//! | [`TransformerExt::then`] | Builder sugar producing a [`Chain`] |
//! | [`NumericPipeline`] | Median imputation followed by standard scaling |
//! | [`CategoricalPipeline`] | Mode imputation, one-hot encoding, then scaling |
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use tabprep::preprocessing::{
//!     FittedTransformer, ImputeStrategy, SimpleImputer, StandardScaler, Transformer,
//!     TransformerExt,
//! };
//!
//! let pipeline = SimpleImputer::new(ImputeStrategy::Median).then(StandardScaler::new());
//! let data = array![[1.0], [f64::NAN], [3.0]];
//! let (_, out) = pipeline.fit_transform(&data)?;
//! assert_eq!(out[[1, 0]], 0.0);
//! # Ok::<(), tabprep::preprocessing::PreprocessingError>(())
//! ```

#[allow(clippy::module_inception)]
pub mod pipeline;

pub use pipeline::{
    CategoricalPipeline, Chain, FittedCategoricalPipeline, FittedChain, FittedNumericPipeline,
    NumericPipeline, TransformerExt,
};
