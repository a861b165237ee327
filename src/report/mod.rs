//! Reporting utilities: per-date statistic views and formatted terminal output.

use crate::domain::{ComparisonResult, SeriesSummary};

pub mod format;

pub use format::*;

/// A named per-date statistic of a comparison.
#[derive(Debug, Clone, Copy)]
pub struct StatSeries<'a> {
    pub key: &'static str,
    pub label: &'static str,
    pub values: &'a [f64],
}

impl StatSeries<'_> {
    pub fn summary(&self) -> Option<SeriesSummary> {
        SeriesSummary::of(self.values)
    }
}

/// The per-date statistics in display order.
pub fn stat_series(result: &ComparisonResult) -> [StatSeries<'_>; 3] {
    [
        StatSeries {
            key: "relative_error",
            label: "relative error",
            values: &result.stats.relative_error,
        },
        StatSeries {
            key: "percent_error",
            label: "percent error",
            values: &result.stats.percent_error,
        },
        StatSeries {
            key: "percent_difference",
            label: "percent difference",
            values: &result.stats.percent_difference,
        },
    ]
}
