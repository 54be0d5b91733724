//! Feature preprocessing transformers.
//!
//! Every transformer comes in two states: an unfitted [`Transformer`] holding
//! hyperparameters, and the [`FittedTransformer`] it produces, holding only
//! learned statistics.
//!
//! # Design Philosophy
//!
//! - **Fit/Transform Asymmetry**: statistics are learned once, from training data only
//! - **Typed Stages**: [`Chain`] only compiles when stage output and input types agree
//! - **Serializable**: fitted transformers are serde data and can be saved and loaded
//! - **sklearn-compatible**: names and defaults familiar to users of scikit-learn
//!
//! # Available Transformers
//!
//! ## Imputation
//! - [`SimpleImputer`]: Fill NaN with the column median
//! - [`CategoricalImputer`]: Fill missing strings with the most frequent label
//!
//! ## Encoding
//! - [`OneHotEncoder`]: String categories to indicator columns
//!
//! ## Scaling
//! - [`StandardScaler`]: Z-score normalization
//!
//! ## Composition
//! - [`Chain`]: Two transformers in sequence
//! - [`ColumnTransformer`]: Named pipelines applied to named column groups
//!
//! # Example
//!
//! ```no_run
//! use tabprep::preprocessing::{
//!     FittedStandardScaler, FittedTransformer, StandardScaler, Transformer,
//! };
//! use ndarray::array;
//!
//! let fitted = StandardScaler::new().fit(&array![[1.0], [3.0]])?;
//! fitted.save_to_file("scaler.bin")?;
//!
//! let loaded = FittedStandardScaler::load_from_file("scaler.bin")?;
//! assert_eq!(loaded.transform(&array![[2.0]])?, array![[0.0]]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod column_transformer;
pub mod encoding;
pub mod error;
pub mod imputation;
pub mod pipeline;
pub mod scaling;
pub mod traits;

// Re-export main types
pub use column_transformer::{
    ColumnEntry, ColumnStep, ColumnTransformer, FittedColumnStep, FittedColumnTransformer,
};
pub use encoding::{FittedOneHotEncoder, HandleUnknown, OneHotEncoder};
pub use error::PreprocessingError;
pub use imputation::{
    CategoricalImputer, CategoricalStrategy, FittedCategoricalImputer, FittedSimpleImputer,
    ImputeStrategy, SimpleImputer,
};
pub use pipeline::{
    CategoricalPipeline, Chain, FittedCategoricalPipeline, FittedChain, FittedNumericPipeline,
    NumericPipeline, TransformerExt,
};
pub use scaling::{FittedStandardScaler, StandardScaler, StandardScalerConfig};
pub use traits::{FittedTransformer, Transformer};
