//! Formatted terminal output.
//!
//! Formatting lives here so the alignment/statistics code stays free of
//! presentation concerns and output changes stay localized.

use crate::domain::{ComparisonResult, format_timestep};
use crate::error::AppError;
use crate::io::{NwisData, WaterData};
use crate::stats;

use super::stat_series;

/// Summary of one comparison: labels, window, skill scores, error ranges.
pub fn format_comparison_summary(result: &ComparisonResult) -> String {
    let mut out = String::new();

    out.push_str("=== hydrocomp - model vs observed ===\n");
    out.push_str(&format!("Parameter Name: {}\n", result.parameter_name));
    out.push_str(&format!("Model Name: {}\n", result.model_name));
    out.push_str(&format!("Observed Name: {}\n", result.observed_name));
    out.push_str(&format!(
        "Timestep: {} ({})\n",
        format_timestep(result.timestep),
        result.resolution().display_name()
    ));
    if let (Some(first), Some(last)) = (result.dates.first(), result.dates.last()) {
        out.push_str(&format!("Window: {first} .. {last} (n={})\n", result.len()));
    }

    out.push('\n');
    out.push_str(&format!("Mean Squared Error: {:.2}\n", result.stats.mean_squared_error));
    out.push_str(&format!("R-Squared: {:.2}\n", result.stats.r_squared));
    out.push_str(&format!("Nash-Sutcliffe: {:.2}\n", result.stats.nash_sutcliffe));

    out.push('\n');
    out.push_str(&format!("{:<20} {:>10} {:>10} {:>10}\n", "statistic", "mean", "max", "min"));
    out.push_str(&format!("{:-<20} {:-<10} {:-<10} {:-<10}\n", "", "", "", ""));
    for series in stat_series(result) {
        if let Some(s) = series.summary() {
            out.push_str(&format!(
                "{:<20} {:>10.2} {:>10.2} {:>10.2}\n",
                series.label, s.mean, s.max, s.min
            ));
        }
    }

    out
}

/// Metadata and parameter catalogue of an observed file.
pub fn format_nwis_summary(data: &NwisData) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Date retrieved: {}\n",
        data.date_retrieved.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("Gage name: {}\n", data.gage_name.as_deref().unwrap_or("-")));
    out.push_str(&format!(
        "Timestep: {}\n",
        data.resolution.map_or("-", |r| r.display_name())
    ));
    out.push_str(&format!("Rows: {}\n", data.dates.len()));

    out.push_str("The following are the parameters available in the file:\n");
    for p in &data.parameters {
        match p.summary {
            Some(s) => out.push_str(&format!(
                "  {:<20} {} (mean={:.2} max={:.2} min={:.2})\n",
                p.code, p.description, s.mean, s.max, s.min
            )),
            None => out.push_str(&format!("  {:<20} {}\n", p.code, p.description)),
        }
    }
    out
}

/// Parameter keys of a model file.
pub fn format_water_summary(data: &WaterData) -> String {
    let mut out = String::new();
    out.push_str(&format!("Rows: {}", data.dates.len()));
    if !data.row_errors.is_empty() {
        out.push_str(&format!(" ({} skipped)", data.row_errors.len()));
    }
    out.push('\n');

    out.push_str("The following are the parameters in the model output file:\n");
    for p in &data.parameters {
        out.push_str(&format!("  {:<28} [{}]\n", p.key, p.name));
    }
    out
}

/// Every statistic over a bare modeled/observed pair, one per line.
pub fn format_sample_statistics(modeled: &[f64], observed: &[f64]) -> String {
    let mut out = String::new();
    out.push_str("** Sample Data **\n");
    out.push_str(&format!("Modeled data: {}\n", fmt_vec(modeled, 1)));
    out.push_str(&format!("Observed data: {}\n", fmt_vec(observed, 1)));
    out.push('\n');
    out.push_str("** Statistics **\n");
    out.push_str(&format!(
        "Absolute error: {}\n",
        fmt_vec(&stats::absolute_error(modeled, observed), 8)
    ));
    out.push_str(&format!(
        "Relative error: {}\n",
        fmt_vec(&stats::relative_error(modeled, observed), 8)
    ));
    out.push_str(&format!(
        "Mean squared error: {:.6}\n",
        stats::mean_squared_error(modeled, observed)
    ));
    out.push_str(&format!(
        "Percent error: {}\n",
        fmt_vec(&stats::percent_error(modeled, observed), 8)
    ));
    out.push_str(&format!(
        "Percent difference: {}\n",
        fmt_vec(&stats::percent_difference(modeled, observed), 8)
    ));
    out.push_str(&format!("R squared: {:.6}\n", stats::r_squared(modeled, observed)));
    out.push_str(&format!(
        "Nash-Sutcliffe: {:.6}\n",
        stats::nash_sutcliffe(modeled, observed)
    ));
    out
}

/// Pretty JSON of a comparison. Non-finite statistics are written as `null`.
pub fn comparison_to_json(result: &ComparisonResult) -> Result<String, AppError> {
    serde_json::to_string_pretty(result)
        .map_err(|e| AppError::new(4, format!("Failed to render comparison JSON: {e}")))
}

fn fmt_vec(v: &[f64], precision: usize) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.precision$}")).collect();
    format!("[{}]", parts.join(", "))
}
