//! Command-line parsing for the model-vs-observed comparison tool.
//!
//! Argument parsing and command dispatch stay separate from the
//! alignment/statistics code.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};

use crate::domain::parse_timestamp;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "hydrocomp",
    version,
    about = "Compare modeled hydrologic output against observed gauge data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Align a model parameter with its observed counterpart and print skill statistics.
    Compare(CompareArgs),
    /// Print the metadata and parameters of an input file.
    Inspect(InspectArgs),
    /// Run every statistic over a small built-in sample and print the results.
    Sample,
}

/// Options for a comparison run.
#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    /// Observed gauge file (tab-delimited RDB export).
    #[arg(long, value_name = "FILE")]
    pub observed: PathBuf,

    /// Model output file (tab-delimited WATER export).
    #[arg(long, value_name = "FILE")]
    pub model: PathBuf,

    /// Parameter to compare, matched against both files.
    #[arg(short = 'p', long, default_value = "discharge")]
    pub parameter: String,

    /// Label for the observed series (defaults to the gage name in the file).
    #[arg(long)]
    pub observed_name: Option<String>,

    /// Label for the modeled series.
    #[arg(long, default_value = "WATER")]
    pub model_name: String,

    /// First date to keep from the aligned window (YYYY-MM-DD[ HH:MM]).
    #[arg(long, value_parser = parse_timestamp)]
    pub start: Option<NaiveDateTime>,

    /// Last date to keep from the aligned window (YYYY-MM-DD[ HH:MM]).
    #[arg(long, value_parser = parse_timestamp)]
    pub end: Option<NaiveDateTime>,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Print the comparison as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}

/// Which file to inspect. Exactly one is required.
#[derive(Debug, Args, Clone)]
#[group(required = true, multiple = false)]
pub struct InspectArgs {
    /// Observed gauge file.
    #[arg(long, value_name = "FILE")]
    pub observed: Option<PathBuf>,

    /// Model output file.
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,
}
