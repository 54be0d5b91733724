//! tabprep command-line interface.
//!
//! Runs the ingestion and transformation stages, or applies a persisted
//! transformer to a new table.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabprep::transformation::load_preprocessor;
use tabprep::{DataIngestion, DataTransformation, FittedTransformer, PipelineConfig, RawTable};
use tracing::info;

#[derive(Parser)]
#[command(name = "tabprep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ingest a CSV table and build a persisted feature transformer", long_about = None)]
struct Cli {
    /// JSON configuration file; unspecified fields use defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Raw CSV source (overrides the configuration)
    #[arg(short, long, global = true)]
    source: Option<PathBuf>,

    /// Directory receiving all artifacts (overrides the configuration)
    #[arg(short, long, global = true)]
    artifacts_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest the source, then fit and persist the transformer (default)
    Run,

    /// Write the raw snapshot and the train/test partitions
    Ingest,

    /// Fit the transformer on a training partition and apply it to both
    Transform {
        /// Training partition (defaults to the configured artifact)
        #[arg(long)]
        train: Option<PathBuf>,

        /// Test partition (defaults to the configured artifact)
        #[arg(long)]
        test: Option<PathBuf>,
    },

    /// Transform a table with a persisted transformer
    Apply {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file for the feature matrix
        #[arg(short, long)]
        output: PathBuf,

        /// Persisted transformer (defaults to the configured artifact)
        #[arg(short, long)]
        preprocessor: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabprep=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(config),
        Commands::Ingest => cmd_ingest(config).map(|_| ()),
        Commands::Transform { train, test } => {
            let train = train.unwrap_or_else(|| config.artifacts.train_data_path.clone());
            let test = test.unwrap_or_else(|| config.artifacts.test_data_path.clone());
            cmd_transform(config, &train, &test)
        }
        Commands::Apply {
            input,
            output,
            preprocessor,
        } => {
            let preprocessor =
                preprocessor.unwrap_or_else(|| config.artifacts.preprocessor_path.clone());
            cmd_apply(&config, &input, &output, &preprocessor)
        }
    }
}

fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(source) = &cli.source {
        config = config.with_source(source);
    }
    if let Some(dir) = &cli.artifacts_dir {
        config = config.with_artifacts_dir(dir);
    }
    Ok(config)
}

fn cmd_ingest(config: PipelineConfig) -> Result<(PathBuf, PathBuf)> {
    let artifact = DataIngestion::new(config)
        .initiate_data_ingestion()
        .context("data ingestion stage failed")?;
    println!("train partition: {}", artifact.train_path.display());
    println!("test partition:  {}", artifact.test_path.display());
    Ok((artifact.train_path, artifact.test_path))
}

fn cmd_transform(config: PipelineConfig, train: &Path, test: &Path) -> Result<()> {
    let output = DataTransformation::new(config)
        .initiate_data_transformation(train, test)
        .context("data transformation stage failed")?;
    println!("train array: {:?}", output.train.dim());
    println!("test array:  {:?}", output.test.dim());
    println!("preprocessor: {}", output.preprocessor_path.display());
    Ok(())
}

fn cmd_run(config: PipelineConfig) -> Result<()> {
    let (train, test) = cmd_ingest(config.clone())?;
    cmd_transform(config, &train, &test)
}

fn cmd_apply(config: &PipelineConfig, input: &Path, output: &Path, preprocessor: &Path) -> Result<()> {
    let fitted = load_preprocessor(preprocessor)
        .with_context(|| format!("failed to load transformer {}", preprocessor.display()))?;

    let mut table = RawTable::read_csv(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let target = &config.columns.target;
    if table.column_index(target).is_some() {
        table = table.take_column(target)?.0;
        info!(column = %target, "dropped target column");
    }

    let features = fitted
        .transform(&table)
        .with_context(|| format!("failed to transform {}", input.display()))?;

    let rows = features
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();
    RawTable::new(fitted.feature_names(), rows)?
        .write_csv(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("wrote {:?} features to {}", features.dim(), output.display());
    Ok(())
}
