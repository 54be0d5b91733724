//! Categorical Imputer.
//!
//! Fills missing (`None`) cells of string-valued features with the most
//! frequent label of each column, producing a dense
//! `Array2<String>` ready for encoding.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Strategy for imputing missing categorical values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CategoricalStrategy {
    /// Replace missing values with the most frequent value of each column.
    /// Ties resolve to the lexicographically smallest value.
    #[default]
    MostFrequent,
}

/// CategoricalImputer transformer (unfitted).
#[derive(Clone, Debug, Default)]
pub struct CategoricalImputer {
    strategy: CategoricalStrategy,
}

impl CategoricalImputer {
    /// Create a new CategoricalImputer with the specified strategy.
    pub fn new(strategy: CategoricalStrategy) -> Self {
        Self { strategy }
    }
}

fn most_frequent(column: ArrayView1<'_, Option<String>>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in column.iter().flatten() {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }

    // BTreeMap iterates in key order; strictly greater keeps the smallest key on ties
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

impl Transformer for CategoricalImputer {
    type Input = Array2<Option<String>>;
    type Output = Array2<String>;
    type Fitted = FittedCategoricalImputer;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        if data.nrows() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit CategoricalImputer on empty data".to_string(),
            ));
        }

        let fill_values = data
            .axis_iter(Axis(1))
            .enumerate()
            .map(|(col, column)| match self.strategy {
                CategoricalStrategy::MostFrequent => most_frequent(column).ok_or_else(|| {
                    PreprocessingError::EmptyData(format!(
                        "feature {} has no observed values to impute from",
                        col
                    ))
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FittedCategoricalImputer {
            strategy: self.strategy.clone(),
            fill_values,
        })
    }
}

/// Fitted CategoricalImputer ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedCategoricalImputer {
    strategy: CategoricalStrategy,
    fill_values: Vec<String>,
}

impl FittedCategoricalImputer {
    /// The fill value learned for each feature.
    pub fn fill_values(&self) -> &[String] {
        &self.fill_values
    }
}

impl FittedTransformer for FittedCategoricalImputer {
    type Input = Array2<Option<String>>;
    type Output = Array2<String>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        if data.ncols() != self.fill_values.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.fill_values.len(),
                got_features: data.ncols(),
            });
        }

        Ok(Array2::from_shape_fn(data.dim(), |(row, col)| {
            data[[row, col]]
                .clone()
                .unwrap_or_else(|| self.fill_values[col].clone())
        }))
    }

    fn n_features_in(&self) -> usize {
        self.fill_values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(rows: &[&[Option<&str>]]) -> Array2<Option<String>> {
        let n_cols = rows.first().map_or(0, |r| r.len());
        let flat = rows
            .iter()
            .flat_map(|r| r.iter().map(|c| c.map(str::to_string)))
            .collect();
        Array2::from_shape_vec((rows.len(), n_cols), flat).unwrap()
    }

    #[test]
    fn test_most_frequent_fills_missing() {
        let data = cells(&[
            &[Some("female"), Some("standard")],
            &[None, Some("free/reduced")],
            &[Some("female"), None],
            &[Some("male"), Some("standard")],
        ]);

        let fitted = CategoricalImputer::default().fit(&data).unwrap();
        assert_eq!(fitted.fill_values(), &["female", "standard"]);

        let imputed = fitted.transform(&data).unwrap();
        assert_eq!(imputed[[1, 0]], "female");
        assert_eq!(imputed[[2, 1]], "standard");
        assert_eq!(imputed[[3, 0]], "male");
    }

    #[test]
    fn test_tie_takes_smallest_label() {
        let data = cells(&[&[Some("b")], &[Some("a")], &[Some("b")], &[Some("a")]]);
        let fitted = CategoricalImputer::default().fit(&data).unwrap();
        assert_eq!(fitted.fill_values(), &["a"]);
    }

    #[test]
    fn test_all_missing_column_fails() {
        let data = cells(&[&[None, Some("x")], &[None, Some("y")]]);
        let result = CategoricalImputer::default().fit(&data);
        assert!(matches!(result, Err(PreprocessingError::EmptyData(_))));
    }

    #[test]
    fn test_transform_never_refits() {
        let train = cells(&[&[Some("a")], &[Some("a")], &[Some("b")]]);
        let fitted = CategoricalImputer::default().fit(&train).unwrap();

        let test = cells(&[&[None], &[Some("b")], &[Some("b")], &[Some("b")]]);
        let imputed = fitted.transform(&test).unwrap();
        assert_eq!(imputed[[0, 0]], "a");
    }

    #[test]
    fn test_feature_mismatch() {
        let fitted = CategoricalImputer::default()
            .fit(&cells(&[&[Some("a"), Some("b")]]))
            .unwrap();
        let result = fitted.transform(&cells(&[&[Some("a")]]));
        assert!(matches!(
            result,
            Err(PreprocessingError::FeatureMismatch { .. })
        ));
    }
}
