//! Imputation transformers for handling missing values.
//!
//! | Transformer | Input | Description |
//! |-------------|-------|-------------|
//! | [`SimpleImputer`] | `Array2<f64>` (NaN = missing) | Median |
//! | [`CategoricalImputer`] | `Array2<Option<String>>` | Most frequent |
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use tabprep::preprocessing::{FittedTransformer, ImputeStrategy, SimpleImputer, Transformer};
//!
//! let data = array![[1.0], [f64::NAN], [5.0], [7.0]];
//! let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&data)?;
//! let imputed = fitted.transform(&data)?;
//! assert_eq!(imputed[[1, 0]], 5.0);
//! # Ok::<(), tabprep::preprocessing::PreprocessingError>(())
//! ```

pub mod categorical;
pub mod simple;

pub use categorical::{CategoricalImputer, CategoricalStrategy, FittedCategoricalImputer};
pub use simple::{FittedSimpleImputer, ImputeStrategy, SimpleImputer};
