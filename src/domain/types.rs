//! Shared domain types.
//!
//! These types are plain records so they can be:
//!
//! - built by the readers and handed to the alignment core
//! - rendered by the report/plot layers without further computation
//! - serialized to JSON for scripting

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Serialize, Serializer};

use crate::error::CompareError;

/// A dated sequence of samples.
///
/// `dates[i]` is the timestamp of `values[i]`. Dates are expected in ascending
/// order; the readers produce them that way and the alignment core relies on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub dates: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    /// Pair dates with values, rejecting sequences of different length.
    pub fn new(dates: Vec<NaiveDateTime>, values: Vec<f64>) -> Result<Self, CompareError> {
        if dates.len() != values.len() {
            return Err(CompareError::LengthMismatch {
                left_name: "dates",
                left: dates.len(),
                right_name: "values",
                right: values.len(),
            });
        }
        Ok(Self { dates, values })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDateTime> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDateTime> {
        self.dates.last().copied()
    }
}

/// Modeled and observed series cut down to the same inclusive date window.
///
/// Both series carry identical date sequences; `align` guarantees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub modeled: TimeSeries,
    pub observed: TimeSeries,
}

impl AlignedWindow {
    /// The shared date axis.
    pub fn dates(&self) -> &[NaiveDateTime] {
        &self.observed.dates
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }
}

/// Goodness-of-fit results for one modeled/observed pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsBundle {
    /// One value per aligned date.
    pub relative_error: Vec<f64>,
    pub percent_error: Vec<f64>,
    pub percent_difference: Vec<f64>,

    pub mean_squared_error: f64,
    pub r_squared: f64,
    pub nash_sutcliffe: f64,
}

/// The full output of one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub parameter_name: String,
    pub model_name: String,
    pub observed_name: String,
    pub dates: Vec<NaiveDateTime>,
    pub modeled: Vec<f64>,
    pub observed: Vec<f64>,
    /// Interval between the first two aligned dates.
    #[serde(serialize_with = "serialize_timestep")]
    pub timestep: TimeDelta,
    pub stats: StatsBundle,
}

impl ComparisonResult {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::from_timestep(self.timestep)
    }
}

fn serialize_timestep<S: Serializer>(timestep: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(timestep.num_seconds())
}

/// Sampling resolution inferred from a series' timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Daily,
    Instantaneous,
}

impl Resolution {
    /// Exactly one day is daily data; anything else is treated as instantaneous.
    pub fn from_timestep(timestep: TimeDelta) -> Self {
        if timestep == TimeDelta::days(1) {
            Resolution::Daily
        } else {
            Resolution::Instantaneous
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Resolution::Daily => "daily",
            Resolution::Instantaneous => "instantaneous",
        }
    }
}

/// Mean / max / min of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl SeriesSummary {
    /// Summarize `values`. Any NaN sample makes every field NaN.
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        if values.iter().any(|v| v.is_nan()) {
            return Some(Self {
                mean: f64::NAN,
                max: f64::NAN,
                min: f64::NAN,
            });
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        Some(Self { mean, max, min })
    }
}

/// Render a timestep as `D day(s), H:MM:SS`, or `H:MM:SS` under a day.
pub fn format_timestep(timestep: TimeDelta) -> String {
    let sign = if timestep < TimeDelta::zero() { "-" } else { "" };
    let total = timestep.num_seconds().unsigned_abs();
    let days = total / 86_400;
    let rem = total % 86_400;
    let (h, m, s) = (rem / 3600, (rem % 3600) / 60, rem % 60);

    match days {
        0 => format!("{sign}{h}:{m:02}:{s:02}"),
        1 => format!("{sign}1 day, {h}:{m:02}:{s:02}"),
        d => format!("{sign}{d} days, {h}:{m:02}:{s:02}"),
    }
}

/// Parse `YYYY-MM-DD` (midnight) or `YYYY-MM-DD HH:MM[:SS]`.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    const FMTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];
    for fmt in FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("Invalid date '{s}'. Expected YYYY-MM-DD or YYYY-MM-DD HH:MM."))
}

/// Configuration for a `hydrocomp compare` run.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub observed_path: PathBuf,
    pub model_path: PathBuf,
    /// Parameter looked up in both files (`discharge` by default).
    pub parameter: String,
    /// Overrides the gage name read from the observed file.
    pub observed_name: Option<String>,
    pub model_name: String,
    /// Optional inclusive restriction of the aligned window.
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub json: bool,
}
