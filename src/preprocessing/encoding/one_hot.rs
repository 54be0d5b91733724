//! One-hot encoding for categorical features.

use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot encoder for categorical features.
///
/// Each input column is treated as a categorical feature; the encoder learns
/// the sorted set of values present in each column during fitting and emits
/// one indicator column per learned value.
///
/// # Example
/// ```
/// use ndarray::array;
/// use tabprep::preprocessing::{FittedTransformer, HandleUnknown, OneHotEncoder, Transformer};
///
/// let data = array![["red".to_string()], ["green".to_string()]];
/// let fitted = OneHotEncoder::new()
///     .with_handle_unknown(HandleUnknown::Ignore)
///     .fit(&data)?;
///
/// // categories are sorted: green, red
/// let encoded = fitted.transform(&array![["red".to_string()], ["blue".to_string()]])?;
/// assert_eq!(encoded, array![[0.0, 1.0], [0.0, 0.0]]);
/// # Ok::<(), tabprep::preprocessing::PreprocessingError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Create a new OneHotEncoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }
}

impl Transformer for OneHotEncoder {
    type Input = Array2<String>;
    type Output = Array2<f64>;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        if data.nrows() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }

        let categories: Vec<Vec<String>> = data
            .axis_iter(Axis(1))
            .map(|column| {
                let unique: BTreeSet<&String> = column.iter().collect();
                unique.into_iter().cloned().collect()
            })
            .collect();

        Ok(FittedOneHotEncoder {
            n_features_out: categories.iter().map(Vec::len).sum(),
            categories,
            handle_unknown: self.handle_unknown,
        })
    }
}

/// Fitted OneHotEncoder ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedOneHotEncoder {
    /// Sorted categories for each input column.
    categories: Vec<Vec<String>>,
    /// Total number of output features (sum of category counts).
    n_features_out: usize,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    /// Get the categories learned for each feature.
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Input = Array2<String>;
    type Output = Array2<f64>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let (rows, cols) = data.dim();

        if cols != self.categories.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.categories.len(),
                got_features: cols,
            });
        }

        let mut result = Array2::<f64>::zeros((rows, self.n_features_out));

        for row in 0..rows {
            let mut offset = 0;
            for (col, cats) in self.categories.iter().enumerate() {
                let value = &data[[row, col]];
                match cats.binary_search(value) {
                    Ok(idx) => result[[row, offset + idx]] = 1.0,
                    Err(_) if self.handle_unknown == HandleUnknown::Error => {
                        return Err(PreprocessingError::UnknownCategory {
                            feature: col,
                            value: value.clone(),
                        });
                    }
                    // with Ignore the block stays all zero
                    Err(_) => {}
                }
                offset += cats.len();
            }
        }

        Ok(result)
    }

    fn n_features_in(&self) -> usize {
        self.categories.len()
    }

    fn n_features_out(&self) -> usize {
        self.n_features_out
    }

    fn feature_names_out(&self, input_features: &[String]) -> Vec<String> {
        self.categories
            .iter()
            .enumerate()
            .flat_map(|(col, cats)| {
                let name = input_features
                    .get(col)
                    .cloned()
                    .unwrap_or_else(|| format!("x{}", col));
                cats.iter().map(move |cat| format!("{}_{}", name, cat))
            })
            .collect()
    }
}
