//! Common-window computation and full alignment.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::domain::{AlignedWindow, TimeSeries};
use crate::error::CompareError;

/// Intersection of two ascending date axes: the later first date and the
/// earlier last date.
///
/// The result is not checked for `start <= end`; `align` does that.
pub fn find_common_range(
    model_dates: &[NaiveDateTime],
    observed_dates: &[NaiveDateTime],
) -> Result<(NaiveDateTime, NaiveDateTime), CompareError> {
    let (Some(&m_first), Some(&m_last)) = (model_dates.first(), model_dates.last()) else {
        return Err(CompareError::EmptySeries("modeled"));
    };
    let (Some(&o_first), Some(&o_last)) = (observed_dates.first(), observed_dates.last()) else {
        return Err(CompareError::EmptySeries("observed"));
    };

    Ok((m_first.max(o_first), m_last.min(o_last)))
}

/// Cut both series to their overlap and verify they share a date axis.
pub fn align(modeled: &TimeSeries, observed: &TimeSeries) -> Result<AlignedWindow, CompareError> {
    let (start, end) = find_common_range(&modeled.dates, &observed.dates)?;
    if start > end {
        return Err(CompareError::DisjointRanges { start, end });
    }
    debug!(%start, %end, "common date range");

    let modeled = modeled.subset(start, end)?;
    let observed = observed.subset(start, end)?;

    if modeled.len() != observed.len() {
        return Err(CompareError::LengthMismatch {
            left_name: "modeled",
            left: modeled.len(),
            right_name: "observed",
            right: observed.len(),
        });
    }
    if let Some(index) = modeled
        .dates
        .iter()
        .zip(&observed.dates)
        .position(|(m, o)| m != o)
    {
        return Err(CompareError::MisalignedDates {
            index,
            left: modeled.dates[index],
            right: observed.dates[index],
        });
    }

    Ok(AlignedWindow {
        start,
        end,
        modeled,
        observed,
    })
}
