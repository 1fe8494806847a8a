use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned per-classification summary table.
    Table,
    /// Full result mapping, including every observed value.
    Json,
    /// Flat rows: classification, feature, min, max, count, values.
    Csv,
}

/// Compute per-class feature value ranges for a classification dataset.
#[derive(Debug, Parser)]
#[command(name = "feature-ranges", version)]
pub struct Args {
    /// Dataset file (.json or .csv).
    pub input: PathBuf,

    /// Write the report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Restrict the report to these classification labels (repeatable).
    #[arg(long = "class", value_name = "LABEL")]
    pub classes: Vec<String>,
}
