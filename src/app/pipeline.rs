//! Shared "compare pipeline" logic.
//!
//! read observed -> read model -> select parameter -> align -> restrict -> compare
//!
//! The CLI only handles presentation (text, plots, JSON).

use chrono::NaiveDateTime;
use tracing::info;

use crate::align::align;
use crate::compare::{ComparisonLabels, compare_window};
use crate::domain::{AlignedWindow, CompareConfig, ComparisonResult, TimeSeries};
use crate::error::AppError;
use crate::io::{NwisData, WaterData, read_nwis, read_water};

const DEFAULT_OBSERVED_NAME: &str = "USGS";

/// All computed outputs of a single `hydrocomp compare` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub observed: NwisData,
    pub model: WaterData,
    pub window: AlignedWindow,
    pub result: ComparisonResult,
}

/// Read both files and run the comparison.
pub fn run_compare(config: &CompareConfig) -> Result<RunOutput, AppError> {
    let observed = read_nwis(&config.observed_path)?;
    let model = read_water(&config.model_path)?;

    run_compare_with_data(config, observed, model)
}

/// Run the comparison over already-parsed files.
pub fn run_compare_with_data(
    config: &CompareConfig,
    observed: NwisData,
    model: WaterData,
) -> Result<RunOutput, AppError> {
    let obs_param = observed.find_parameter(&config.parameter).ok_or_else(|| {
        AppError::new(
            2,
            format!("Parameter '{}' not found in observed file.", config.parameter),
        )
    })?;
    let model_param = model.parameter(&config.parameter).ok_or_else(|| {
        AppError::new(
            2,
            format!("Parameter '{}' not found in model file.", config.parameter),
        )
    })?;
    info!(
        observed = %obs_param.description,
        model = %model_param.name,
        "selected parameter"
    );

    let observed_series = observed.series(obs_param)?;
    let model_series = model.series(model_param)?;

    let labels = ComparisonLabels {
        parameter_name: config.parameter.clone(),
        model_name: config.model_name.clone(),
        observed_name: config
            .observed_name
            .clone()
            .or_else(|| observed.gage_name.clone())
            .unwrap_or_else(|| DEFAULT_OBSERVED_NAME.to_string()),
    };

    let (window, result) =
        compare_series(&labels, &model_series, &observed_series, config.start, config.end)?;

    Ok(RunOutput {
        observed,
        model,
        window,
        result,
    })
}

/// Align two series, optionally narrow the window, and compute the statistics.
pub fn compare_series(
    labels: &ComparisonLabels,
    modeled: &TimeSeries,
    observed: &TimeSeries,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Result<(AlignedWindow, ComparisonResult), AppError> {
    let mut window = align(modeled, observed)?;
    if start.is_some() || end.is_some() {
        window = window.restrict(start, end)?;
    }
    info!(
        start = %window.start,
        end = %window.end,
        n = window.len(),
        "aligned window"
    );

    let result = compare_window(labels, &window)?;
    Ok((window, result))
}
