//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - dated series (`TimeSeries`) and their aligned pair (`AlignedWindow`)
//! - comparison outputs (`ComparisonResult`, `StatsBundle`)
//! - timestep helpers (`Resolution`, `format_timestep`) and `SeriesSummary`

pub mod types;

pub use types::*;
