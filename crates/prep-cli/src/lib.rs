//! Order Feature Preprocessing Driver
//!
//! Reads a JSON array of order records, runs the feature preprocessor, and
//! writes the feature table (and labels, when training) as JSON records.
//!
//! ## Usage
//!
//! ```sh
//! order-prep --input train.json --train --features x.json --labels y.json \
//!     --save-vocabulary vocab.bin
//! order-prep --input batch.json --vocabulary vocab.bin --features batch_x.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use feature_prep::{EncodingVocabulary, FeaturePreprocessor};
use order_table::Table;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod settings;

pub use settings::{LogFormat, Settings};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "order-prep", version, about = "Turn order records into classifier features")]
pub struct Args {
    /// JSON array of order records.
    #[arg(long)]
    pub input: PathBuf,

    /// Training input: CLASS is required and written to --labels.
    #[arg(long)]
    pub train: bool,

    /// Where to write the feature records (stdout when omitted).
    #[arg(long)]
    pub features: Option<PathBuf>,

    /// Where to write the CLASS records of a training run.
    #[arg(long)]
    pub labels: Option<PathBuf>,

    /// Encode with this fitted vocabulary instead of refitting.
    #[arg(long)]
    pub vocabulary: Option<PathBuf>,

    /// Save the vocabulary fitted on this input.
    #[arg(long, conflicts_with = "vocabulary")]
    pub save_vocabulary: Option<PathBuf>,

    /// Settings file (TOML, YAML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Initialize logging
pub fn init_logging(level: Level, format: LogFormat) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    };
    installed.context("Failed to set tracing subscriber")
}

/// Run one preprocessing job
pub fn run(args: Args) -> Result<()> {
    let settings = Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    let level: Level = settings
        .log_level
        .parse()
        .with_context(|| format!("Invalid log level {:?}", settings.log_level))?;
    init_logging(level, settings.log_format)?;

    info!("=== order-prep v{} ===", env!("CARGO_PKG_VERSION"));

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let input = Table::from_json_records(&raw)
        .with_context(|| format!("Failed to parse records in {}", args.input.display()))?;
    info!(
        "Loaded {} records with {} columns from {}",
        input.n_rows(),
        input.n_cols(),
        args.input.display()
    );

    let prep = FeaturePreprocessor::new(settings.preprocess);
    let output = match &args.vocabulary {
        Some(path) => {
            let vocab = EncodingVocabulary::load_from_file(path)
                .with_context(|| format!("Failed to load vocabulary {}", path.display()))?;
            info!("Encoding with vocabulary {}", path.display());
            prep.transform(&input, args.train, &vocab)?
        }
        None => {
            let (output, vocab) = prep.fit_transform(&input, args.train)?;
            if let Some(path) = &args.save_vocabulary {
                vocab
                    .save_to_file(path)
                    .with_context(|| format!("Failed to save vocabulary {}", path.display()))?;
                info!("Saved vocabulary to {}", path.display());
            }
            output
        }
    };

    let (features, label) = output.into_parts();
    info!(
        "Built {} rows x {} feature columns",
        features.n_rows(),
        features.n_cols()
    );
    write_records(&features, args.features.as_deref())?;

    match (label, &args.labels) {
        (Some(label), Some(path)) => {
            let labels = Table::from_columns(vec![label])?;
            write_records(&labels, Some(path.as_path()))?;
        }
        (Some(_), None) => warn!("Training run without --labels; CLASS not written"),
        (None, Some(_)) => warn!("--labels ignored for an inference run"),
        (None, None) => {}
    }

    Ok(())
}

fn write_records(table: &Table, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(&table.to_json_records())?;
    match path {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} records to {}", table.n_rows(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
