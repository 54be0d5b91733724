//! Core traits for preprocessing transformers.
//!
//! This module defines the two central traits:
//! - [`Transformer`]: Used during fitting; has hyperparameters and can learn from data.
//! - [`FittedTransformer`]: After fitting; ready for inference and serialization.

use crate::preprocessing::error::PreprocessingError;
use crate::serialization::{load_object, save_object, SerializationError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Trait for unfitted transformers with hyperparameters.
///
/// A transformer learns parameters from training data and produces a
/// [`FittedTransformer`] that applies them. The unfitted value itself is
/// never modified, so it can be fitted again on other data.
///
/// # Example
/// ```
/// use ndarray::array;
/// use tabprep::preprocessing::{FittedTransformer, StandardScaler, Transformer};
///
/// let train = array![[1.0], [2.0], [3.0]];
/// let fitted = StandardScaler::new().fit(&train)?;
/// let scaled = fitted.transform(&array![[2.0]])?;
/// assert_eq!(scaled[[0, 0]], 0.0);
/// # Ok::<(), tabprep::preprocessing::PreprocessingError>(())
/// ```
pub trait Transformer: Clone {
    /// Input data type.
    type Input;
    /// Output data type after transformation.
    type Output;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<Input = Self::Input, Output = Self::Output>;

    /// Learn parameters from the training data.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the data is empty or otherwise
    /// unusable for this transformer.
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit on `data` and transform the same data, returning both.
    fn fit_transform(
        &self,
        data: &Self::Input,
    ) -> Result<(Self::Fitted, Self::Output), PreprocessingError> {
        let fitted = self.fit(data)?;
        let output = fitted.transform(data)?;
        Ok((fitted, output))
    }
}

/// Trait for fitted transformers ready for inference.
///
/// A fitted transformer holds only learned parameters. It is plain serde
/// data, so it can be persisted and reloaded without changing its output.
pub trait FittedTransformer: Clone + Serialize + DeserializeOwned {
    /// Input data type.
    type Input;
    /// Output data type after transformation.
    type Output;

    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the input shape doesn't match the
    /// fitted shape or the data can't be transformed.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError>;

    /// Number of features seen during fit.
    fn n_features_in(&self) -> usize;

    /// Number of features produced by `transform`.
    fn n_features_out(&self) -> usize {
        self.n_features_in()
    }

    /// Output feature names, given the input feature names.
    fn feature_names_out(&self, input_features: &[String]) -> Vec<String> {
        input_features.to_vec()
    }

    /// Save the fitted transformer to a file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SerializationError> {
        save_object(self, path)
    }

    /// Load a fitted transformer from a file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SerializationError> {
        load_object(path)
    }
}
