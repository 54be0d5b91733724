//! Ingestion stage: raw snapshot plus a seeded train/test split.
//!
//! The stage reads the configured source table, writes it unchanged to the
//! raw snapshot artifact, shuffles its rows with a fixed seed and writes the
//! two partitions. Running it twice with the same configuration produces
//! byte-identical files.

use crate::config::PipelineConfig;
use crate::dataset::{RawTable, TableError};
use crate::error::{PipelineError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Paths of the partitions written by [`DataIngestion`].
#[derive(Clone, Debug, PartialEq)]
pub struct IngestionArtifact {
    pub train_path: PathBuf,
    pub test_path: PathBuf,
}

/// Loads the raw table and produces the train and test partitions.
#[derive(Clone, Debug)]
pub struct DataIngestion {
    config: PipelineConfig,
}

impl DataIngestion {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the stage.
    ///
    /// Writes the raw snapshot, the training partition and the test
    /// partition, and returns the paths of the two partitions. If any step
    /// fails, artifacts already written by this call are removed.
    ///
    /// # Errors
    /// [`PipelineError::Ingestion`] when the source is missing, malformed or
    /// empty, when the split would leave a partition empty, or when an
    /// artifact cannot be written. [`PipelineError::Config`] for an invalid
    /// configuration.
    pub fn initiate_data_ingestion(&self) -> Result<IngestionArtifact> {
        info!("Entered the data ingestion component");
        self.config.validate()?;

        let mut written = Vec::new();
        let result = self.run(&mut written);
        if result.is_err() {
            for path in &written {
                if let Err(e) = fs::remove_file(path) {
                    warn!(path = %path.display(), error = %e, "failed to remove partial artifact");
                }
            }
        }
        result
    }

    fn run(&self, written: &mut Vec<PathBuf>) -> Result<IngestionArtifact> {
        let source = &self.config.source_path;
        let artifacts = &self.config.artifacts;
        let split = &self.config.split;

        let table = RawTable::read_csv(source).map_err(ingestion_error("read source", source))?;
        info!(
            path = %source.display(),
            rows = table.n_rows(),
            columns = table.n_cols(),
            "Read the dataset"
        );

        for path in [
            &artifacts.raw_data_path,
            &artifacts.train_data_path,
            &artifacts.test_data_path,
        ] {
            create_parent_dir(path)?;
        }

        write_table(&table, &artifacts.raw_data_path, "write raw snapshot", written)?;

        info!(test_size = split.test_size, seed = split.seed, "Train test split initiated");
        let (train, test) = table
            .train_test_split(split.test_size, split.seed)
            .map_err(ingestion_error("split", source))?;
        debug!(train_rows = train.n_rows(), test_rows = test.n_rows(), "split done");

        write_table(&train, &artifacts.train_data_path, "write train partition", written)?;
        write_table(&test, &artifacts.test_data_path, "write test partition", written)?;

        info!(
            train = %artifacts.train_data_path.display(),
            test = %artifacts.test_data_path.display(),
            "Ingestion of the data is completed"
        );

        Ok(IngestionArtifact {
            train_path: artifacts.train_data_path.clone(),
            test_path: artifacts.test_data_path.clone(),
        })
    }
}

fn ingestion_error<'a>(
    operation: &'static str,
    path: &'a Path,
) -> impl FnOnce(TableError) -> PipelineError + 'a {
    move |source| PipelineError::Ingestion {
        operation,
        path: path.to_path_buf(),
        source,
    }
}

fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .map_err(|e| ingestion_error("create artifact directory", dir)(e.into())),
        _ => Ok(()),
    }
}

fn write_table(
    table: &RawTable,
    path: &Path,
    operation: &'static str,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    table
        .write_csv(path)
        .map_err(ingestion_error(operation, path))?;
    written.push(path.to_path_buf());
    debug!(path = %path.display(), rows = table.n_rows(), "wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_source(dir: &Path, rows: usize) -> PathBuf {
        let path = dir.join("source.csv");
        let mut text = String::from("id,value\n");
        for i in 0..rows {
            text.push_str(&format!("{},{}\n", i, i * 10));
        }
        fs::write(&path, text).unwrap();
        path
    }

    fn config(dir: &Path, source: PathBuf) -> PipelineConfig {
        PipelineConfig::default()
            .with_source(source)
            .with_artifacts_dir(dir.join("artifacts"))
    }

    #[test]
    fn test_ingestion_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), 10);
        let cfg = config(dir.path(), source);

        let artifact = DataIngestion::new(cfg.clone())
            .initiate_data_ingestion()
            .unwrap();

        let raw = RawTable::read_csv(&cfg.artifacts.raw_data_path).unwrap();
        let train = RawTable::read_csv(&artifact.train_path).unwrap();
        let test = RawTable::read_csv(&artifact.test_path).unwrap();

        assert_eq!(raw.n_rows(), 10);
        assert_eq!(train.n_rows(), 8);
        assert_eq!(test.n_rows(), 2);
        assert_eq!(train.headers(), raw.headers());
    }

    #[test]
    fn test_partitions_cover_source_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), 37);
        let artifact = DataIngestion::new(config(dir.path(), source))
            .initiate_data_ingestion()
            .unwrap();

        let train = RawTable::read_csv(&artifact.train_path).unwrap();
        let test = RawTable::read_csv(&artifact.test_path).unwrap();
        let mut ids: Vec<usize> = train
            .column("id")
            .unwrap()
            .into_iter()
            .chain(test.column("id").unwrap())
            .map(|s| s.parse().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..37).collect::<Vec<_>>());
    }

    #[test]
    fn test_missing_source_is_ingestion_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), dir.path().join("absent.csv"));

        let err = DataIngestion::new(cfg.clone())
            .initiate_data_ingestion()
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Ingestion { operation: "read source", .. }
        ));
        assert!(!cfg.artifacts.raw_data_path.exists());
    }

    #[test]
    fn test_unsplittable_table_cleans_up_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), 1);
        let cfg = config(dir.path(), source);

        let err = DataIngestion::new(cfg.clone())
            .initiate_data_ingestion()
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Ingestion {
                operation: "split",
                source: TableError::Unsplittable { .. },
                ..
            }
        ));
        assert!(!cfg.artifacts.raw_data_path.exists());
        assert!(!cfg.artifacts.train_data_path.exists());
    }

    #[test]
    fn test_invalid_test_size_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), 10);
        let cfg = config(dir.path(), source).with_test_size(1.5);

        let err = DataIngestion::new(cfg).initiate_data_ingestion().unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
