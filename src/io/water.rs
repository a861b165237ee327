//! Model output tables in the WATER tab-delimited export format.
//!
//! A free-form preamble precedes a header row whose first field is `Date`;
//! every row after it is one day of output:
//!
//! ```text
//! Date	Discharge (cfs)	Subsurface Flow (cfs)	PET (mm)
//! 6/1/2013	1200.5	300.2	3.1
//! ```
//!
//! Each non-date column becomes a parameter keyed by its lower-cased name with
//! the unit dropped (`Discharge (cfs)` → `discharge`).

use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use super::{RowError, read_to_string, record_line, slurp, tab_reader};
use crate::domain::{TimeSeries, parse_timestamp};
use crate::error::{AppError, CompareError};

/// One output column of a model file.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterParameter {
    /// Column name as written in the header.
    pub name: String,
    /// Lookup key (lower case, unit removed).
    pub key: String,
    /// Field index of the column in each row.
    pub column: usize,
    pub values: Vec<f64>,
}

/// Parsed model file.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterData {
    pub dates: Vec<NaiveDateTime>,
    pub parameters: Vec<WaterParameter>,
    /// Rows skipped because of missing or malformed values.
    pub row_errors: Vec<RowError>,
}

impl WaterData {
    pub fn parameter(&self, key: &str) -> Option<&WaterParameter> {
        let key = key.trim().to_lowercase();
        self.parameters.iter().find(|p| p.key == key)
    }

    pub fn series(&self, parameter: &WaterParameter) -> Result<TimeSeries, CompareError> {
        TimeSeries::new(self.dates.clone(), parameter.values.clone())
    }
}

/// Read a model file from disk.
pub fn read_water(path: &Path) -> Result<WaterData, AppError> {
    let text = read_to_string(path)?;
    let data = parse_water_str(&text)?;
    info!(
        path = %path.display(),
        rows = data.dates.len(),
        skipped = data.row_errors.len(),
        "read model file"
    );
    Ok(data)
}

/// Parse a model file from any reader.
pub fn parse_water<R: Read>(reader: R) -> Result<WaterData, AppError> {
    let text = slurp(reader)?;
    parse_water_str(&text)
}

fn parse_water_str(text: &str) -> Result<WaterData, AppError> {
    let header_offset = find_header_offset(text)
        .ok_or_else(|| AppError::new(2, "Model file has no `Date` header row."))?;
    let preamble_lines = text[..header_offset].lines().count() as u64;

    let mut reader = tab_reader(&text[header_offset..]);
    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read model file header: {e}")))?
        .clone();

    let mut parameters: Vec<WaterParameter> = headers
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, name)| !name.is_empty())
        .map(|(column, name)| WaterParameter {
            name: name.to_string(),
            key: parameter_key(name),
            column,
            values: Vec::new(),
        })
        .collect();

    let mut dates = Vec::new();
    let mut row_errors = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| AppError::new(2, format!("Model file parse error: {e}")))?;
        let line = preamble_lines + record_line(&record);

        let parsed = parse_water_date(record.get(0).unwrap_or("")).and_then(|date| {
            let mut row = Vec::with_capacity(parameters.len());
            for p in &parameters {
                let raw = record.get(p.column).unwrap_or("");
                let v = raw
                    .parse::<f64>()
                    .map_err(|_| format!("Missing/invalid `{}` value after {date}", p.name))?;
                row.push(v);
            }
            Ok((date, row))
        });

        match parsed {
            Ok((date, row)) => {
                dates.push(date);
                for (p, v) in parameters.iter_mut().zip(row) {
                    p.values.push(v);
                }
            }
            Err(message) => {
                warn!(line, "skipping model row: {message}");
                row_errors.push(RowError { line, message });
            }
        }
    }

    Ok(WaterData {
        dates,
        parameters,
        row_errors,
    })
}

/// Byte offset of the line whose first tab field is `Date`.
fn find_header_offset(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.split('\t').next().map(str::trim) == Some("Date") {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// `Discharge (cfs)` → `discharge`, `AET(mm)` → `aet`.
fn parameter_key(name: &str) -> String {
    let base = match name.rfind('(') {
        Some(idx) if name.trim_end().ends_with(')') => &name[..idx],
        _ => name,
    };
    base.trim().to_lowercase()
}

/// `M/D/YYYY`, optionally followed by a time; ISO dates are accepted too.
fn parse_water_date(raw: &str) -> Result<NaiveDateTime, String> {
    let date_part = raw.split_whitespace().next().unwrap_or("");
    if let Ok(d) = NaiveDate::parse_from_str(date_part, "%m/%d/%Y") {
        if let Some(dt) = d.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    parse_timestamp(raw).map_err(|_| format!("Invalid date '{raw}'. Expected M/D/YYYY."))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
WATER output file
Basin: Kentucky River
Date\tDischarge (cfs)\tSubsurface Flow (cfs)\tPET (mm)\tAET(mm)\tAverage Soil Root zone (mm)
6/1/2013\t1200.5\t300.2\t3.1\t2.9\t110.0
6/2/2013\t1210.0\t301.0\t3.0\t2.8\t111.0
6/3/2013\t\t302.0\t3.2\t2.7\t112.0
6/4/2013\t1250.0\t303.0\t3.3\t2.6\t113.0
";

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 6, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn parses_columns_after_preamble() {
        let data = parse_water(SAMPLE.as_bytes()).unwrap();
        let keys: Vec<_> = data.parameters.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["discharge", "subsurface flow", "pet", "aet", "average soil root zone"]
        );
        assert_eq!(data.dates, vec![day(1), day(2), day(4)]);

        let q = data.parameter("Discharge").unwrap();
        assert_eq!(q.name, "Discharge (cfs)");
        assert_eq!(q.values, vec![1200.5, 1210.0, 1250.0]);
    }

    #[test]
    fn skips_rows_with_missing_values() {
        let data = parse_water(SAMPLE.as_bytes()).unwrap();
        assert_eq!(data.row_errors.len(), 1);
        assert_eq!(data.row_errors[0].line, 6);
        assert!(data.row_errors[0].message.contains("Discharge (cfs)"));
    }

    #[test]
    fn series_pairs_dates_and_values() {
        let data = parse_water(SAMPLE.as_bytes()).unwrap();
        let pet = data.parameter("pet").unwrap();
        let series = data.series(pet).unwrap();
        assert_eq!(series.values, vec![3.1, 3.0, 3.3]);
        assert_eq!(series.first_date(), Some(day(1)));
    }

    #[test]
    fn unnamed_header_column_keeps_later_columns_in_place() {
        let text = "\
Date\tDischarge (cfs)\t\tPET (mm)
6/1/2013\t100.0\t999.0\t3.1
6/2/2013\t110.0\t999.0\t3.2
";
        let data = parse_water(text.as_bytes()).unwrap();
        assert_eq!(data.parameters.len(), 2);
        assert_eq!(data.parameter("discharge").unwrap().values, vec![100.0, 110.0]);

        let pet = data.parameter("pet").unwrap();
        assert_eq!(pet.column, 3);
        assert_eq!(pet.values, vec![3.1, 3.2]);
        assert!(data.row_errors.is_empty());
    }

    #[test]
    fn missing_header_is_an_input_error() {
        let err = parse_water("no header here\n1\t2\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn parameter_keys() {
        assert_eq!(parameter_key("Discharge (cfs)"), "discharge");
        assert_eq!(parameter_key("AET(mm)"), "aet");
        assert_eq!(parameter_key("Snow Pack"), "snow pack");
    }
}
