//! Comparison assembly: aligned values in, `ComparisonResult` out.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::domain::{AlignedWindow, ComparisonResult, StatsBundle};
use crate::error::CompareError;
use crate::stats;

/// Labels attached to a comparison for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonLabels {
    pub parameter_name: String,
    pub model_name: String,
    pub observed_name: String,
}

/// Compute every statistic over an aligned modeled/observed pair.
///
/// All three sequences must be the same length and hold at least two points
/// (the timestep is taken from the first two dates). Nothing is computed if
/// either check fails.
pub fn compare(
    labels: &ComparisonLabels,
    modeled: &[f64],
    observed: &[f64],
    dates: &[NaiveDateTime],
) -> Result<ComparisonResult, CompareError> {
    if modeled.len() != observed.len() {
        return Err(CompareError::LengthMismatch {
            left_name: "modeled",
            left: modeled.len(),
            right_name: "observed",
            right: observed.len(),
        });
    }
    if dates.len() != observed.len() {
        return Err(CompareError::LengthMismatch {
            left_name: "dates",
            left: dates.len(),
            right_name: "observed",
            right: observed.len(),
        });
    }
    let &[first, second, ..] = dates else {
        return Err(CompareError::InsufficientPoints {
            needed: 2,
            got: dates.len(),
        });
    };

    let stats = compute_stats(modeled, observed);
    debug!(
        n = dates.len(),
        mse = stats.mean_squared_error,
        r_squared = stats.r_squared,
        nse = stats.nash_sutcliffe,
        "comparison statistics"
    );

    Ok(ComparisonResult {
        parameter_name: labels.parameter_name.clone(),
        model_name: labels.model_name.clone(),
        observed_name: labels.observed_name.clone(),
        dates: dates.to_vec(),
        modeled: modeled.to_vec(),
        observed: observed.to_vec(),
        timestep: second - first,
        stats,
    })
}

/// `compare` over an `AlignedWindow`.
pub fn compare_window(labels: &ComparisonLabels, window: &AlignedWindow) -> Result<ComparisonResult, CompareError> {
    compare(labels, &window.modeled.values, &window.observed.values, window.dates())
}

fn compute_stats(modeled: &[f64], observed: &[f64]) -> StatsBundle {
    StatsBundle {
        relative_error: stats::relative_error(modeled, observed),
        percent_error: stats::percent_error(modeled, observed),
        percent_difference: stats::percent_difference(modeled, observed),
        mean_squared_error: stats::mean_squared_error(modeled, observed),
        r_squared: stats::r_squared(modeled, observed),
        nash_sutcliffe: stats::nash_sutcliffe(modeled, observed),
    }
}
