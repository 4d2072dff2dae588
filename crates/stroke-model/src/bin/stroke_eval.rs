//! Evaluate (or fit) the stroke classifier against the dataset CSV.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use stroke_model::evaluation;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `stroke-eval` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stroke-eval",
    about = "Score the serialized stroke model on a held-out split of the dataset",
    version
)]
struct CliArgs {
    /// Labelled dataset with a `STROKE` target column.
    #[arg(long, value_name = "path", default_value = "Healthcare-stroke-data.csv", global = true)]
    dataset: PathBuf,
    /// Serialized model artifact.
    #[arg(long, value_name = "path", default_value = "stroke_model.msgpack", global = true)]
    model: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Print accuracy and the classification report (default).
    Evaluate,
    /// Fit on the training split and write the artifact to `--model`.
    Train,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    match args.command.unwrap_or(Command::Evaluate) {
        Command::Evaluate => {
            let result = evaluation::evaluate(&args.dataset, &args.model).with_context(|| {
                format!(
                    "evaluate {} against {}",
                    args.model.display(),
                    args.dataset.display()
                )
            })?;
            println!("Accuracy: {}", result.accuracy);
            println!("Classification Report:");
            println!("{}", result.report);
        }
        Command::Train => {
            evaluation::train(&args.dataset, &args.model)
                .with_context(|| format!("train on {}", args.dataset.display()))?;
            println!("Wrote model to {}", args.model.display());
        }
    }
    Ok(())
}
