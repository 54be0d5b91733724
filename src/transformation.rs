//! Transformation stage: fit the feature transformer on the training
//! partition, apply it to both partitions and persist it.

use crate::config::{ColumnGroups, PipelineConfig};
use crate::dataset::{is_missing, RawTable, TableError};
use crate::error::{PipelineError, Result};
use crate::preprocessing::{
    CategoricalImputer, CategoricalStrategy, ColumnTransformer, FittedColumnTransformer,
    FittedTransformer, HandleUnknown, ImputeStrategy, OneHotEncoder, PreprocessingError,
    SimpleImputer, StandardScaler, Transformer, TransformerExt,
};
use crate::serialization::SerializationError;
use ndarray::{concatenate, Array1, Array2, Axis};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the numeric step in the column transformer.
pub const NUMERIC_STEP: &str = "num_pipeline";
/// Name of the categorical step in the column transformer.
pub const CATEGORICAL_STEP: &str = "cat_pipeline";

/// Build the unfitted feature transformer for `columns`.
///
/// Numeric columns: median imputation, then standard scaling.
/// Categorical columns: most-frequent imputation, one-hot encoding with
/// unknown categories ignored, then scaling without centering.
/// The numeric block comes first in the output.
pub fn build_preprocessor(columns: &ColumnGroups) -> ColumnTransformer {
    info!(numeric = ?columns.numeric, "Numerical features");
    info!(categorical = ?columns.categorical, "Categorical features");

    let numeric = SimpleImputer::new(ImputeStrategy::Median).then(StandardScaler::new());
    let categorical = CategoricalImputer::new(CategoricalStrategy::MostFrequent)
        .then(OneHotEncoder::new().with_handle_unknown(HandleUnknown::Ignore))
        .then(StandardScaler::new().with_mean(false));

    ColumnTransformer::new()
        .add_numeric(NUMERIC_STEP, numeric, columns.numeric.as_slice())
        .add_categorical(CATEGORICAL_STEP, categorical, columns.categorical.as_slice())
}

/// Transformed partitions, each with the target as its last column, and the
/// location of the persisted transformer.
#[derive(Clone, Debug)]
pub struct TransformationArtifact {
    pub train: Array2<f64>,
    pub test: Array2<f64>,
    pub preprocessor_path: PathBuf,
}

/// Fits the feature transformer and applies it to both partitions.
#[derive(Clone, Debug)]
pub struct DataTransformation {
    config: PipelineConfig,
}

impl DataTransformation {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the stage on the partitions at `train_path` and `test_path`.
    ///
    /// The transformer is fitted on the training features only; the test
    /// partition only ever goes through `transform`.
    ///
    /// # Errors
    /// - [`PipelineError::Ingestion`] if a partition cannot be read.
    /// - [`PipelineError::Schema`] if the target or a declared feature column
    ///   is absent.
    /// - [`PipelineError::Transform`] if fitting or transforming fails, e.g.
    ///   on a non-numeric value in a numeric column.
    /// - [`PipelineError::Persistence`] if the fitted transformer cannot be
    ///   written.
    pub fn initiate_data_transformation(
        &self,
        train_path: impl AsRef<Path>,
        test_path: impl AsRef<Path>,
    ) -> Result<TransformationArtifact> {
        self.config.columns.validate()?;
        let train_path = train_path.as_ref();
        let test_path = test_path.as_ref();
        let target = self.config.columns.target.as_str();

        let train_df = read_partition(train_path)?;
        let test_df = read_partition(test_path)?;
        info!(
            train_rows = train_df.n_rows(),
            test_rows = test_df.n_rows(),
            "Read train and test data completed"
        );

        info!("Obtaining the preprocessing object");
        let preprocessor = build_preprocessor(&self.config.columns);

        let (train_features, train_target) = split_target(&train_df, target, "training data")?;
        let (test_features, test_target) = split_target(&test_df, target, "test data")?;

        info!("Applying preprocessing object on training and testing data");
        let (fitted, train_arr) = preprocessor
            .fit_transform(&train_features)
            .map_err(|e| PipelineError::from_preprocessing("fit", "training data", e))?;
        let test_arr = fitted
            .transform(&test_features)
            .map_err(|e| PipelineError::from_preprocessing("transform", "test data", e))?;
        debug!(features = ?fitted.feature_names(), "fitted transformer");

        let train = append_target(train_arr, train_target)?;
        let test = append_target(test_arr, test_target)?;

        let preprocessor_path = self.config.artifacts.preprocessor_path.clone();
        info!(path = %preprocessor_path.display(), "Saving preprocessing object");
        save_preprocessor(&fitted, &preprocessor_path)?;

        Ok(TransformationArtifact {
            train,
            test,
            preprocessor_path,
        })
    }
}

fn read_partition(path: &Path) -> Result<RawTable> {
    RawTable::read_csv(path).map_err(|source| PipelineError::Ingestion {
        operation: "read partition",
        path: path.to_path_buf(),
        source,
    })
}

/// Separate the target column from the features and parse it as `f64`.
fn split_target(table: &RawTable, target: &str, context: &str) -> Result<(RawTable, Array1<f64>)> {
    let (features, cells) = table.take_column(target).map_err(|e| match e {
        TableError::MissingColumn(column) => PipelineError::Schema {
            column,
            context: context.to_string(),
        },
        source => PipelineError::Transform {
            operation: "separate target",
            source: PreprocessingError::InvalidParameter(source.to_string()),
        },
    })?;

    let values = cells
        .iter()
        .enumerate()
        .map(|(row, cell)| {
            if is_missing(cell) {
                Ok(f64::NAN)
            } else {
                cell.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| !v.is_infinite())
                    .ok_or_else(|| PipelineError::Transform {
                        operation: "parse target",
                        source: PreprocessingError::InvalidValue {
                            column: target.to_string(),
                            row,
                            value: cell.clone(),
                        },
                    })
            }
        })
        .collect::<Result<Array1<f64>>>()?;

    Ok((features, values))
}

fn append_target(features: Array2<f64>, target: Array1<f64>) -> Result<Array2<f64>> {
    concatenate(Axis(1), &[features.view(), target.view().insert_axis(Axis(1))]).map_err(|e| {
        PipelineError::Transform {
            operation: "append target",
            source: e.into(),
        }
    })
}

fn save_preprocessor(fitted: &FittedColumnTransformer, path: &Path) -> Result<()> {
    let persistence = |source: SerializationError| PipelineError::Persistence {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| persistence(e.into()))?;
    }
    fitted.save_to_file(path).map_err(persistence)
}

/// Load a transformer previously persisted by [`DataTransformation`].
pub fn load_preprocessor(path: impl AsRef<Path>) -> Result<FittedColumnTransformer> {
    let path = path.as_ref();
    FittedColumnTransformer::load_from_file(path).map_err(|source| PipelineError::Persistence {
        path: path.to_path_buf(),
        source,
    })
}
