//! Scaling transformers for feature normalization.
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`StandardScaler`] | Z-score normalization (mean=0, std=1), centering optional |
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use tabprep::preprocessing::{FittedTransformer, StandardScaler, Transformer};
//!
//! let data = array![[0.0, 10.0], [2.0, 10.0]];
//! let scaled = StandardScaler::new().fit(&data)?.transform(&data)?;
//! assert_eq!(scaled, array![[-1.0, 0.0], [1.0, 0.0]]);
//! # Ok::<(), tabprep::preprocessing::PreprocessingError>(())
//! ```

pub mod standard;

pub use standard::{FittedStandardScaler, StandardScaler, StandardScalerConfig};
