//! ColumnTransformer implementation.
//!
//! Applies different pipelines to different column subsets and concatenates results.

use crate::dataset::{is_missing, RawTable};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::pipeline::{
    CategoricalPipeline, FittedCategoricalPipeline, FittedNumericPipeline, NumericPipeline,
};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{concatenate, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Unfitted pipeline applied to a group of columns.
#[derive(Clone, Debug)]
pub enum ColumnStep {
    /// Cells parsed as `f64`; missing tokens become NaN.
    Numeric(NumericPipeline),
    /// Cells kept as strings; missing tokens become `None`.
    Categorical(CategoricalPipeline),
}

/// Fitted counterpart of [`ColumnStep`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FittedColumnStep {
    Numeric(FittedNumericPipeline),
    Categorical(FittedCategoricalPipeline),
}

impl FittedColumnStep {
    fn transform(
        &self,
        table: &RawTable,
        columns: &[String],
    ) -> Result<Array2<f64>, PreprocessingError> {
        match self {
            FittedColumnStep::Numeric(p) => p.transform(&extract_numeric(table, columns)?),
            FittedColumnStep::Categorical(p) => p.transform(&extract_categorical(table, columns)?),
        }
    }

    fn n_features_out(&self) -> usize {
        match self {
            FittedColumnStep::Numeric(p) => p.n_features_out(),
            FittedColumnStep::Categorical(p) => p.n_features_out(),
        }
    }

    fn feature_names_out(&self, columns: &[String]) -> Vec<String> {
        match self {
            FittedColumnStep::Numeric(p) => p.feature_names_out(columns),
            FittedColumnStep::Categorical(p) => p.feature_names_out(columns),
        }
    }
}

/// Fit a step on the selected columns, returning the fitted step and its output.
fn fit_step(
    step: &ColumnStep,
    table: &RawTable,
    columns: &[String],
) -> Result<(FittedColumnStep, Array2<f64>), PreprocessingError> {
    match step {
        ColumnStep::Numeric(p) => {
            let (fitted, out) = p.fit_transform(&extract_numeric(table, columns)?)?;
            Ok((FittedColumnStep::Numeric(fitted), out))
        }
        ColumnStep::Categorical(p) => {
            let (fitted, out) = p.fit_transform(&extract_categorical(table, columns)?)?;
            Ok((FittedColumnStep::Categorical(fitted), out))
        }
    }
}

fn column_indices(table: &RawTable, columns: &[String]) -> Result<Vec<usize>, PreprocessingError> {
    columns
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .ok_or_else(|| PreprocessingError::MissingColumn(name.clone()))
        })
        .collect()
}

/// Select `columns` as an `f64` matrix. Missing tokens map to NaN.
///
/// Infinite values, including literals that overflow `f64`, are rejected.
fn extract_numeric(table: &RawTable, columns: &[String]) -> Result<Array2<f64>, PreprocessingError> {
    let indices = column_indices(table, columns)?;
    let mut out = Array2::<f64>::zeros((table.n_rows(), indices.len()));

    for (row, cells) in table.rows().iter().enumerate() {
        for (col, &idx) in indices.iter().enumerate() {
            let cell = &cells[idx];
            out[[row, col]] = if is_missing(cell) {
                f64::NAN
            } else {
                cell.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| !v.is_infinite())
                    .ok_or_else(|| PreprocessingError::InvalidValue {
                        column: columns[col].clone(),
                        row,
                        value: cell.clone(),
                    })?
            };
        }
    }
    Ok(out)
}

/// Select `columns` as optional strings. Missing tokens map to `None`.
fn extract_categorical(
    table: &RawTable,
    columns: &[String],
) -> Result<Array2<Option<String>>, PreprocessingError> {
    let indices = column_indices(table, columns)?;
    Ok(Array2::from_shape_fn(
        (table.n_rows(), indices.len()),
        |(row, col)| {
            let cell = &table.rows()[row][indices[col]];
            (!is_missing(cell)).then(|| cell.clone())
        },
    ))
}

/// A named step and the columns it consumes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnEntry<S> {
    pub name: String,
    pub columns: Vec<String>,
    pub step: S,
}

/// ColumnTransformer (unfitted).
///
/// # Example
/// ```
/// use tabprep::dataset::RawTable;
/// use tabprep::preprocessing::{
///     ColumnTransformer, FittedTransformer, ImputeStrategy, SimpleImputer, StandardScaler,
///     Transformer, TransformerExt,
/// };
///
/// let table = RawTable::new(
///     vec!["score".into(), "name".into()],
///     vec![vec!["1".into(), "a".into()], vec!["3".into(), "b".into()]],
/// )?;
/// let ct = ColumnTransformer::new().add_numeric(
///     "num",
///     SimpleImputer::new(ImputeStrategy::Median).then(StandardScaler::new()),
///     &["score"],
/// );
/// let (fitted, out) = ct.fit_transform(&table)?;
/// assert_eq!(out.dim(), (2, 1));
/// assert_eq!(fitted.feature_names(), vec!["num__score"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ColumnTransformer {
    entries: Vec<ColumnEntry<ColumnStep>>,
}

impl ColumnTransformer {
    /// Create an empty ColumnTransformer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric pipeline applied to `columns`.
    pub fn add_numeric<S: AsRef<str>>(
        self,
        name: impl Into<String>,
        pipeline: NumericPipeline,
        columns: &[S],
    ) -> Self {
        self.add(name, ColumnStep::Numeric(pipeline), columns)
    }

    /// Add a categorical pipeline applied to `columns`.
    pub fn add_categorical<S: AsRef<str>>(
        self,
        name: impl Into<String>,
        pipeline: CategoricalPipeline,
        columns: &[S],
    ) -> Self {
        self.add(name, ColumnStep::Categorical(pipeline), columns)
    }

    fn add<S: AsRef<str>>(mut self, name: impl Into<String>, step: ColumnStep, columns: &[S]) -> Self {
        self.entries.push(ColumnEntry {
            name: name.into(),
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            step,
        });
        self
    }

    /// The configured steps in output order.
    pub fn entries(&self) -> &[ColumnEntry<ColumnStep>] {
        &self.entries
    }
}

impl Transformer for ColumnTransformer {
    type Input = RawTable;
    type Output = Array2<f64>;
    type Fitted = FittedColumnTransformer;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        self.fit_transform(data).map(|(fitted, _)| fitted)
    }

    fn fit_transform(
        &self,
        data: &Self::Input,
    ) -> Result<(Self::Fitted, Self::Output), PreprocessingError> {
        if self.entries.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "ColumnTransformer has no steps".to_string(),
            ));
        }
        if data.n_rows() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit ColumnTransformer on a table with no rows".to_string(),
            ));
        }

        let mut fitted_entries = Vec::with_capacity(self.entries.len());
        let mut blocks = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let (step, block) = fit_step(&entry.step, data, &entry.columns)?;
            debug!(
                step = %entry.name,
                columns = entry.columns.len(),
                features_out = block.ncols(),
                "fitted column step"
            );
            fitted_entries.push(ColumnEntry {
                name: entry.name.clone(),
                columns: entry.columns.clone(),
                step,
            });
            blocks.push(block);
        }

        let output = hstack(&blocks)?;
        Ok((
            FittedColumnTransformer {
                entries: fitted_entries,
            },
            output,
        ))
    }
}

fn hstack(blocks: &[Array2<f64>]) -> Result<Array2<f64>, PreprocessingError> {
    let views: Vec<ArrayView2<'_, f64>> = blocks.iter().map(|b| b.view()).collect();
    Ok(concatenate(Axis(1), &views)?)
}

/// Fitted ColumnTransformer ready for inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedColumnTransformer {
    entries: Vec<ColumnEntry<FittedColumnStep>>,
}

impl FittedColumnTransformer {
    /// The fitted steps in output order.
    pub fn entries(&self) -> &[ColumnEntry<FittedColumnStep>] {
        &self.entries
    }

    /// Output feature names, `"{step}__{feature}"`.
    pub fn feature_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|entry| {
                entry
                    .step
                    .feature_names_out(&entry.columns)
                    .into_iter()
                    .map(move |feature| format!("{}__{}", entry.name, feature))
            })
            .collect()
    }
}

impl FittedTransformer for FittedColumnTransformer {
    type Input = RawTable;
    type Output = Array2<f64>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let blocks = self
            .entries
            .iter()
            .map(|entry| entry.step.transform(data, &entry.columns))
            .collect::<Result<Vec<_>, _>>()?;
        hstack(&blocks)
    }

    /// Number of declared input columns across all steps.
    fn n_features_in(&self) -> usize {
        self.entries.iter().map(|e| e.columns.len()).sum()
    }

    fn n_features_out(&self) -> usize {
        self.entries.iter().map(|e| e.step.n_features_out()).sum()
    }

    /// Columns are selected by name, so `input_features` is not consulted.
    fn feature_names_out(&self, _input_features: &[String]) -> Vec<String> {
        self.feature_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::encoding::{HandleUnknown, OneHotEncoder};
    use crate::preprocessing::imputation::{CategoricalImputer, ImputeStrategy, SimpleImputer};
    use crate::preprocessing::pipeline::TransformerExt;
    use crate::preprocessing::scaling::StandardScaler;

    fn table(rows: &[[&str; 3]]) -> RawTable {
        RawTable::new(
            vec!["gender".into(), "score".into(), "lunch".into()],
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn transformer() -> ColumnTransformer {
        ColumnTransformer::new()
            .add_numeric(
                "num_pipeline",
                SimpleImputer::new(ImputeStrategy::Median).then(StandardScaler::new()),
                &["score"],
            )
            .add_categorical(
                "cat_pipeline",
                CategoricalImputer::default()
                    .then(OneHotEncoder::new().with_handle_unknown(HandleUnknown::Ignore))
                    .then(StandardScaler::new().with_mean(false)),
                &["gender", "lunch"],
            )
    }

    fn train() -> RawTable {
        table(&[
            ["female", "70", "standard"],
            ["male", "", "free/reduced"],
            ["female", "90", "NA"],
            ["male", "80", "standard"],
        ])
    }

    #[test]
    fn test_numeric_block_first_then_categorical() {
        let (fitted, out) = transformer().fit_transform(&train()).unwrap();

        assert_eq!(out.dim(), (4, 5));
        assert_eq!(fitted.n_features_in(), 3);
        assert_eq!(fitted.n_features_out(), 5);
        assert_eq!(
            fitted.feature_names(),
            vec![
                "num_pipeline__score",
                "cat_pipeline__gender_female",
                "cat_pipeline__gender_male",
                "cat_pipeline__lunch_free/reduced",
                "cat_pipeline__lunch_standard",
            ]
        );
    }

    #[test]
    fn test_missing_cells_imputed() {
        let (_, out) = transformer().fit_transform(&train()).unwrap();
        assert!(out.iter().all(|v| v.is_finite()));

        // median of [70, 90, 80] = 80, which is also the mean after imputing
        assert_eq!(out[[1, 0]], 0.0);
        // lunch mode is "standard"
        assert_eq!(out[[2, 3]], 0.0);
        assert!(out[[2, 4]] > 0.0);
    }

    #[test]
    fn test_unknown_category_zero_block() {
        let fitted = transformer().fit(&train()).unwrap();
        let out = fitted
            .transform(&table(&[["other", "75", "standard"]]))
            .unwrap();
        assert_eq!(out[[0, 1]], 0.0);
        assert_eq!(out[[0, 2]], 0.0);
    }

    #[test]
    fn test_extra_columns_dropped_and_order_by_name() {
        let reordered = RawTable::new(
            vec![
                "lunch".into(),
                "extra".into(),
                "score".into(),
                "gender".into(),
            ],
            train()
                .rows()
                .iter()
                .map(|r| vec![r[2].clone(), "x".into(), r[1].clone(), r[0].clone()])
                .collect(),
        )
        .unwrap();

        let fitted = transformer().fit(&train()).unwrap();
        assert_eq!(
            fitted.transform(&reordered).unwrap(),
            fitted.transform(&train()).unwrap()
        );
    }

    #[test]
    fn test_missing_column_error() {
        let t = RawTable::new(vec!["gender".into()], vec![vec!["female".into()]]).unwrap();
        let result = transformer().fit(&t);
        assert!(matches!(result, Err(PreprocessingError::MissingColumn(c)) if c == "score"));
    }

    #[test]
    fn test_non_numeric_value_error() {
        let t = table(&[["female", "seventy", "standard"], ["male", "80", "standard"]]);
        let result = transformer().fit(&t);
        assert!(matches!(
            result,
            Err(PreprocessingError::InvalidValue { row: 0, ref column, .. }) if column == "score"
        ));
    }

    #[test]
    fn test_infinite_value_error() {
        for token in ["inf", "-infinity", "1e400"] {
            let t = table(&[
                ["female", "70", "standard"],
                ["male", token, "standard"],
                ["female", "80", "standard"],
            ]);
            let result = transformer().fit(&t);
            assert!(
                matches!(
                    result,
                    Err(PreprocessingError::InvalidValue { row: 1, ref column, ref value })
                        if column == "score" && value == token
                ),
                "{}",
                token
            );
        }
    }

    #[test]
    fn test_infinite_value_rejected_at_transform() {
        let fitted = transformer()
            .fit(&table(&[["female", "70", "standard"], ["male", "80", "standard"]]))
            .unwrap();
        let result = fitted.transform(&table(&[["male", "inf", "standard"]]));
        assert!(matches!(
            result,
            Err(PreprocessingError::InvalidValue { row: 0, .. })
        ));
    }

    #[test]
    fn test_empty_table_fails() {
        let t = RawTable::new(
            vec!["gender".into(), "score".into(), "lunch".into()],
            vec![],
        )
        .unwrap();
        assert!(matches!(
            transformer().fit(&t),
            Err(PreprocessingError::EmptyData(_))
        ));
    }

    #[test]
    fn test_no_steps_fails() {
        assert!(matches!(
            ColumnTransformer::new().fit(&train()),
            Err(PreprocessingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_transform_does_not_refit() {
        let fitted = transformer().fit(&train()).unwrap();
        let before = fitted.clone();
        let _ = fitted
            .transform(&table(&[["male", "1000", "standard"]]))
            .unwrap();
        assert_eq!(fitted, before);
    }
}
