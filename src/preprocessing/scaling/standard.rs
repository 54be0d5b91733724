//! Standard Scaler (Z-score normalization).
//!
//! Transforms features by removing the mean and scaling to unit variance.
//!
//! The standard score of a sample `x` is calculated as:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of the training samples (or zero when
//! `with_mean = false`), and `s` is the population standard deviation
//! (or one when `with_std = false`).
//!
//! NaN cells are ignored while fitting and propagate through `transform`.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Configuration for StandardScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerConfig {
    /// If true, center the data before scaling.
    pub with_mean: bool,
    /// If true, scale the data to unit variance.
    pub with_std: bool,
}

impl Default for StandardScalerConfig {
    fn default() -> Self {
        Self {
            with_mean: true,
            with_std: true,
        }
    }
}

/// StandardScaler transformer (unfitted).
///
/// Use `with_mean(false)` for one-hot blocks, where centering would turn
/// the zero entries into non-zero values.
#[derive(Clone, Debug, Default)]
pub struct StandardScaler {
    config: StandardScalerConfig,
}

impl StandardScaler {
    /// Create a new StandardScaler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to center data by mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.config.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.config.with_std = with_std;
        self
    }

    /// The scaler configuration.
    pub fn config(&self) -> &StandardScalerConfig {
        &self.config
    }
}

/// Mean and population standard deviation of the non-NaN entries.
fn mean_and_std(column: ArrayView1<'_, f64>) -> (f64, f64) {
    let (sum, count) = column
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), &v| (s + v, n + 1));
    if count == 0 {
        return (0.0, 0.0);
    }
    let mean = sum / count as f64;
    let var = column
        .iter()
        .filter(|v| !v.is_nan())
        .map(|&v| (v - mean).powi(2))
        .sum::<f64>()
        / count as f64;
    (mean, var.sqrt())
}

impl Transformer for StandardScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Fitted = FittedStandardScaler;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        if data.nrows() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit StandardScaler on empty data".to_string(),
            ));
        }

        let stats = data
            .axis_iter(Axis(1))
            .enumerate()
            .map(|(col, column)| {
                let (mean, std) = mean_and_std(column);
                if !mean.is_finite() || !std.is_finite() {
                    return Err(PreprocessingError::InvalidParameter(format!(
                        "feature {} has non-finite values",
                        col
                    )));
                }
                // constant features keep their spread instead of dividing by ~0
                let tolerance = 10.0 * f64::EPSILON * mean.abs().max(1.0);
                let scale = if !self.config.with_std || std <= tolerance {
                    1.0
                } else {
                    std
                };
                Ok((mean, scale))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let (mean, scale): (Vec<f64>, Vec<f64>) = stats.into_iter().unzip();

        Ok(FittedStandardScaler {
            config: self.config.clone(),
            mean: Array1::from(mean),
            scale: Array1::from(scale),
        })
    }
}

/// Fitted StandardScaler ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedStandardScaler {
    config: StandardScalerConfig,
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl FittedStandardScaler {
    /// Get the mean values for each feature.
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Get the divisor applied to each feature.
    ///
    /// Equal to the standard deviation, except for constant features and
    /// `with_std = false`, where it is one.
    pub fn scale(&self) -> &Array1<f64> {
        &self.scale
    }

    /// The configuration the scaler was fitted with.
    pub fn config(&self) -> &StandardScalerConfig {
        &self.config
    }
}

impl FittedTransformer for FittedStandardScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        if data.ncols() != self.mean.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.mean.len(),
                got_features: data.ncols(),
            });
        }

        let mut result = data.clone();
        if self.config.with_mean {
            result -= &self.mean;
        }
        if self.config.with_std {
            result /= &self.scale;
        }
        Ok(result)
    }

    fn n_features_in(&self) -> usize {
        self.mean.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn create_test_data() -> Array2<f64> {
        // 3 samples, 2 features
        array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]]
    }

    #[test]
    fn test_standard_scaler_fit() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();

        assert_abs_diff_eq!(fitted.mean()[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fitted.mean()[1], 20.0, epsilon = 1e-12);
        // population std of [1,2,3] = sqrt(2/3)
        assert_abs_diff_eq!(fitted.scale()[0], (2.0f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(fitted.scale()[1], 10.0 * (2.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_standard_scaler_transform_zero_mean_unit_variance() {
        let data = create_test_data();
        let (_, scaled) = StandardScaler::new().fit_transform(&data).unwrap();

        for column in scaled.axis_iter(Axis(1)) {
            let (mean, std) = mean_and_std(column);
            assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(std, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_constant_feature_keeps_scale_one() {
        let data = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let fitted = StandardScaler::new().fit(&data).unwrap();
        assert_eq!(fitted.scale()[0], 1.0);

        let scaled = fitted.transform(&data).unwrap();
        assert!(scaled.column(0).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_without_mean_preserves_zeros() {
        let data = array![[0.0], [1.0], [0.0], [1.0]];
        let fitted = StandardScaler::new().with_mean(false).fit(&data).unwrap();
        assert_abs_diff_eq!(fitted.scale()[0], 0.5, epsilon = 1e-12);

        let scaled = fitted.transform(&data).unwrap();
        assert_eq!(scaled, array![[0.0], [2.0], [0.0], [2.0]]);
    }

    #[test]
    fn test_without_std_only_centers() {
        let data = create_test_data();
        let fitted = StandardScaler::new().with_std(false).fit(&data).unwrap();
        let scaled = fitted.transform(&data).unwrap();
        assert_eq!(scaled, array![[-1.0, -10.0], [0.0, 0.0], [1.0, 10.0]]);
    }

    #[test]
    fn test_nan_ignored_during_fit() {
        let data = array![[1.0], [f64::NAN], [3.0]];
        let fitted = StandardScaler::new().fit(&data).unwrap();
        assert_abs_diff_eq!(fitted.mean()[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fitted.scale()[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_infinite_values_fail_fit() {
        let data = array![[1.0, 1.0], [f64::INFINITY, 2.0], [3.0, 3.0]];
        let result = StandardScaler::new().fit(&data);
        assert!(matches!(
            result,
            Err(PreprocessingError::InvalidParameter(ref msg)) if msg.contains("feature 0")
        ));

        let overflow = array![[f64::MAX], [-f64::MAX]];
        assert!(StandardScaler::new().fit(&overflow).is_err());
    }

    #[test]
    fn test_transform_uses_training_statistics() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();
        let before = fitted.clone();

        let _ = fitted.transform(&array![[100.0, -5.0]]).unwrap();
        assert_eq!(fitted, before);
    }

    #[test]
    fn test_empty_data_fails() {
        let result = StandardScaler::new().fit(&Array2::zeros((0, 3)));
        assert!(matches!(result, Err(PreprocessingError::EmptyData(_))));
    }

    #[test]
    fn test_feature_mismatch() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();
        let result = fitted.transform(&array![[1.0, 2.0, 3.0]]);
        assert!(matches!(
            result,
            Err(PreprocessingError::FeatureMismatch {
                expected_features: 2,
                got_features: 3
            })
        ));
    }
}
