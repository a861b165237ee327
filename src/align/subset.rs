//! Window extraction for a single series.

use chrono::NaiveDateTime;

use crate::domain::{AlignedWindow, TimeSeries};
use crate::error::CompareError;

/// Cut `dates`/`values` down to the inclusive window `[start, end]`.
///
/// A boundary that falls outside the series' own coverage is clamped to the
/// first (start) or last (end) date. After clamping, both boundaries must be
/// exact members of `dates`; there is no nearest-date fallback.
pub fn subset(
    dates: &[NaiveDateTime],
    values: &[f64],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<TimeSeries, CompareError> {
    if dates.len() != values.len() {
        return Err(CompareError::LengthMismatch {
            left_name: "dates",
            left: dates.len(),
            right_name: "values",
            right: values.len(),
        });
    }
    let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
        return Err(CompareError::EmptySeries("subset input"));
    };

    let start = if start < first || start > last { first } else { start };
    let end = if end > last || end < first { last } else { end };

    if start > end {
        return Err(CompareError::DisjointRanges { start, end });
    }

    let start_idx = first_index_of(dates, start)?;
    let end_idx = last_index_of(dates, end)?;

    TimeSeries::new(
        dates[start_idx..=end_idx].to_vec(),
        values[start_idx..=end_idx].to_vec(),
    )
}

impl TimeSeries {
    /// `subset` applied to this series.
    pub fn subset(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<TimeSeries, CompareError> {
        subset(&self.dates, &self.values, start, end)
    }
}

impl AlignedWindow {
    /// Keep the samples dated within `[from, to]`; a missing bound is open.
    ///
    /// Unlike `subset`, the bounds need not be sample dates.
    pub fn restrict(
        &self,
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
    ) -> Result<AlignedWindow, CompareError> {
        let dates = self.dates();
        let lo = from.map_or(0, |f| dates.partition_point(|d| *d < f));
        let hi = to.map_or(dates.len(), |t| dates.partition_point(|d| *d <= t));

        if lo >= hi {
            return Err(CompareError::DisjointRanges {
                start: from.unwrap_or(self.start),
                end: to.unwrap_or(self.end),
            });
        }

        let slice = |s: &TimeSeries| TimeSeries {
            dates: s.dates[lo..hi].to_vec(),
            values: s.values[lo..hi].to_vec(),
        };

        Ok(AlignedWindow {
            start: dates[lo],
            end: dates[hi - 1],
            modeled: slice(&self.modeled),
            observed: slice(&self.observed),
        })
    }
}

fn first_index_of(dates: &[NaiveDateTime], target: NaiveDateTime) -> Result<usize, CompareError> {
    let idx = dates.partition_point(|d| *d < target);
    match dates.get(idx) {
        Some(d) if *d == target => Ok(idx),
        _ => Err(CompareError::DateNotFound(target)),
    }
}

fn last_index_of(dates: &[NaiveDateTime], target: NaiveDateTime) -> Result<usize, CompareError> {
    let idx = dates.partition_point(|d| *d <= target);
    match idx.checked_sub(1).and_then(|i| dates.get(i).map(|d| (i, d))) {
        Some((i, d)) if *d == target => Ok(i),
        _ => Err(CompareError::DateNotFound(target)),
    }
}
