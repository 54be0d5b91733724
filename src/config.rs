//! Pipeline configuration.
//!
//! Every stage receives its configuration explicitly, so tests can redirect
//! artifacts to a temporary directory. All structs deserialize with defaults,
//! so a JSON file only needs to name the values it overrides:
//!
//! ```json
//! {
//!   "source_path": "data/students.csv",
//!   "split": { "seed": 7 }
//! }
//! ```

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File names of the artifacts written by the pipeline.
pub const RAW_DATA_FILE: &str = "data.csv";
pub const TRAIN_DATA_FILE: &str = "train.csv";
pub const TEST_DATA_FILE: &str = "test.csv";
pub const PREPROCESSOR_FILE: &str = "preprocessor.bin";

/// Locations of all artifacts produced by the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Raw snapshot of the full source table.
    pub raw_data_path: PathBuf,
    /// Training partition.
    pub train_data_path: PathBuf,
    /// Test partition.
    pub test_data_path: PathBuf,
    /// Fitted, serialized feature transformer.
    pub preprocessor_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self::in_dir("artifacts")
    }
}

impl ArtifactConfig {
    /// Place every artifact under `dir` using the standard file names.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            raw_data_path: dir.join(RAW_DATA_FILE),
            train_data_path: dir.join(TRAIN_DATA_FILE),
            test_data_path: dir.join(TEST_DATA_FILE),
            preprocessor_path: dir.join(PREPROCESSOR_FILE),
        }
    }
}

/// Parameters of the randomized train/test split.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of rows assigned to the test partition, in (0, 1).
    pub test_size: f64,
    /// Seed of the shuffle; a fixed seed makes the split reproducible.
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
        }
    }
}

/// Declares which columns are numeric, which are categorical and which one
/// is the prediction target.
///
/// Columns that appear in neither list are dropped by the transformer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnGroups {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
    pub target: String,
}

impl Default for ColumnGroups {
    fn default() -> Self {
        Self::student_performance()
    }
}

impl ColumnGroups {
    /// Create column groups from explicit lists.
    pub fn new<S: Into<String>>(
        numeric: impl IntoIterator<Item = S>,
        categorical: impl IntoIterator<Item = S>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            numeric: numeric.into_iter().map(Into::into).collect(),
            categorical: categorical.into_iter().map(Into::into).collect(),
            target: target.into(),
        }
    }

    /// Schema of the student performance dataset, predicting `math_score`.
    pub fn student_performance() -> Self {
        Self::new(
            ["writing_score", "reading_score"],
            [
                "gender",
                "race_ethnicity",
                "parental_level_of_education",
                "lunch",
                "test_preparation_course",
            ],
            "math_score",
        )
    }

    /// Check that the target is not declared as a feature and that no column
    /// is declared twice.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.target.is_empty() {
            return Err(PipelineError::Config(
                "target column name must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in self.numeric.iter().chain(&self.categorical) {
            if *column == self.target {
                return Err(PipelineError::Config(format!(
                    "target column `{}` is also declared as a feature",
                    column
                )));
            }
            if !seen.insert(column.as_str()) {
                return Err(PipelineError::Config(format!(
                    "column `{}` is declared more than once",
                    column
                )));
            }
        }

        Ok(())
    }
}

/// Full configuration shared by the ingestion and transformation stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Raw CSV file read by the ingestion stage.
    pub source_path: PathBuf,
    pub artifacts: ArtifactConfig,
    pub split: SplitConfig,
    pub columns: ColumnGroups,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("dataset").join("stud.csv"),
            artifacts: ArtifactConfig::default(),
            split: SplitConfig::default(),
            columns: ColumnGroups::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file; missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            PipelineError::Config(format!("invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Set the raw data source.
    pub fn with_source<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.source_path = path.into();
        self
    }

    /// Place all artifacts under `dir`.
    pub fn with_artifacts_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.artifacts = ArtifactConfig::in_dir(dir);
        self
    }

    /// Set the fraction of rows assigned to the test partition.
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.split.test_size = test_size;
        self
    }

    /// Set the split seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.split.seed = seed;
        self
    }

    /// Replace the column groups.
    pub fn with_columns(mut self, columns: ColumnGroups) -> Self {
        self.columns = columns;
        self
    }

    /// Validate split parameters and column groups.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let test_size = self.split.test_size;
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(PipelineError::Config(format!(
                "test_size must be in (0, 1), got {}",
                test_size
            )));
        }
        self.columns.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_artifact_layout() {
        let config = ArtifactConfig::default();
        assert_eq!(config.raw_data_path, Path::new("artifacts").join("data.csv"));
        assert_eq!(config.train_data_path, Path::new("artifacts").join("train.csv"));
        assert_eq!(config.test_data_path, Path::new("artifacts").join("test.csv"));
        assert_eq!(
            config.preprocessor_path,
            Path::new("artifacts").join("preprocessor.bin")
        );
    }

    #[test]
    fn test_default_column_groups() {
        let groups = ColumnGroups::default();
        assert_eq!(groups.numeric, vec!["writing_score", "reading_score"]);
        assert_eq!(groups.categorical.len(), 5);
        assert_eq!(groups.target, "math_score");
        assert!(groups.validate().is_ok());
    }

    #[test]
    fn test_target_declared_as_feature_is_rejected() {
        let groups = ColumnGroups::new(["a", "y"], ["b"], "y");
        assert!(matches!(groups.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_duplicate_column_is_rejected() {
        let groups = ColumnGroups::new(["a"], ["a"], "y");
        assert!(matches!(groups.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_invalid_test_size() {
        let config = PipelineConfig::default().with_test_size(1.0);
        assert!(config.validate().is_err());

        let config = PipelineConfig::default().with_test_size(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "split": { "seed": 7 } }"#).unwrap();

        let config = PipelineConfig::from_json_file(&path).unwrap();
        assert_eq!(config.split.seed, 7);
        assert_eq!(config.split.test_size, 0.2);
        assert_eq!(config.columns, ColumnGroups::default());
        assert_eq!(config.artifacts, ArtifactConfig::default());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = PipelineConfig::from_json_file(&path);
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_with_artifacts_dir() {
        let config = PipelineConfig::default().with_artifacts_dir("/tmp/run");
        assert_eq!(
            config.artifacts.train_data_path,
            Path::new("/tmp/run").join("train.csv")
        );
    }
}
