//! # tabprep
//!
//! Turns a raw CSV table into model-ready numeric arrays plus a persisted
//! feature transformer, with strict separation between fitting (train only)
//! and transforming (train and test).
//!
//! ## Core Design Principles
//!
//! - **Fit/Transform Asymmetry**: Unfitted [`Transformer`]s learn statistics and
//!   produce [`FittedTransformer`]s; fitted transformers never learn again.
//! - **Composable Stages**: [`Chain`] joins two stages whose output and input
//!   types line up, and [`ColumnTransformer`] routes named column groups through
//!   independent chains.
//! - **Explicit Configuration**: Artifact locations, split parameters and column
//!   groups are carried by [`PipelineConfig`], never by globals.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tabprep::{DataIngestion, DataTransformation, PipelineConfig};
//!
//! let config = PipelineConfig::default().with_artifacts_dir("artifacts");
//!
//! let ingestion = DataIngestion::new(config.clone()).initiate_data_ingestion()?;
//! let output = DataTransformation::new(config)
//!     .initiate_data_transformation(&ingestion.train_path, &ingestion.test_path)?;
//!
//! println!("train {:?}, test {:?}", output.train.dim(), output.test.dim());
//! # Ok::<(), tabprep::PipelineError>(())
//! ```
//!
//! ## Module Structure
//!
//! - `config`: Artifact locations, split parameters and column groups
//! - `dataset`: CSV-backed string table with missing-value detection
//! - `error`: Stage-level error taxonomy
//! - `ingestion`: Raw snapshot and seeded train/test split
//! - `preprocessing`: Imputers, encoder, scaler, chains and column routing
//! - `serialization`: Saving and loading fitted objects
//! - `transformation`: Fit on train, transform both partitions, persist

/// Artifact locations, split parameters and column groups.
pub mod config;

/// CSV-backed tabular data.
pub mod dataset;

/// Stage-level errors.
pub mod error;

/// Raw data ingestion and train/test splitting.
pub mod ingestion;

/// Feature preprocessing transformers.
pub mod preprocessing;

/// Persistence of fitted objects.
pub mod serialization;

/// Fitting and applying the feature transformer.
pub mod transformation;

pub use config::{ArtifactConfig, ColumnGroups, PipelineConfig, SplitConfig};
pub use dataset::RawTable;
pub use error::PipelineError;
pub use ingestion::{DataIngestion, IngestionArtifact};
pub use preprocessing::{
    Chain, ColumnTransformer, FittedColumnTransformer, FittedTransformer, Transformer,
};
pub use transformation::{build_preprocessor, DataTransformation, TransformationArtifact};
