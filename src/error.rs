//! Error types for the pipeline stages.

use crate::dataset::TableError;
use crate::preprocessing::PreprocessingError;
use crate::serialization::SerializationError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Error raised by a pipeline stage.
///
/// Every variant carries the operation and the path or column involved.
/// Nothing is retried; errors propagate to the caller.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source or partition file missing, unreadable or malformed, or an
    /// artifact could not be written.
    #[error("ingestion error during {operation} ({}): {source}", .path.display())]
    Ingestion {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: TableError,
    },

    /// A declared column is absent from a loaded table.
    #[error("schema error: column `{column}` not found in {context}")]
    Schema { column: String, context: String },

    /// Fitting or applying the transformer failed on the data content.
    #[error("transform error during {operation}: {source}")]
    Transform {
        operation: &'static str,
        #[source]
        source: PreprocessingError,
    },

    /// The fitted transformer could not be serialized or written.
    #[error("persistence error ({}): {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: SerializationError,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Wrap a transformer error raised while working on `context`.
    ///
    /// Missing columns become [`PipelineError::Schema`]; everything else is a
    /// [`PipelineError::Transform`].
    pub fn from_preprocessing(
        operation: &'static str,
        context: impl Into<String>,
        err: PreprocessingError,
    ) -> Self {
        match err {
            PreprocessingError::MissingColumn(column) => PipelineError::Schema {
                column,
                context: context.into(),
            },
            source => PipelineError::Transform { operation, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_maps_to_schema_error() {
        let err = PipelineError::from_preprocessing(
            "fit",
            "training features",
            PreprocessingError::MissingColumn("gender".to_string()),
        );
        match err {
            PipelineError::Schema { column, context } => {
                assert_eq!(column, "gender");
                assert_eq!(context, "training features");
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_value_maps_to_transform_error() {
        let err = PipelineError::from_preprocessing(
            "fit",
            "training features",
            PreprocessingError::InvalidValue {
                column: "reading_score".to_string(),
                row: 3,
                value: "abc".to_string(),
            },
        );
        assert!(matches!(err, PipelineError::Transform { operation: "fit", .. }));
        assert!(err.to_string().contains("reading_score"));
    }

    #[test]
    fn test_ingestion_error_display_names_path() {
        let err = PipelineError::Ingestion {
            operation: "read source",
            path: PathBuf::from("dataset/stud.csv"),
            source: TableError::Empty,
        };
        let msg = err.to_string();
        assert!(msg.contains("read source"));
        assert!(msg.contains("stud.csv"));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PipelineError::Config("bad".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
