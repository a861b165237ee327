//! Observed gauge records in the NWIS tab-delimited (RDB) export format.
//!
//! Layout:
//!
//! ```text
//! # retrieved: 2013-06-26 08:31:47 EDT
//! #    USGS 03290500 KENTUCKY RIVER AT LOCK 2 AT LOCKPORT, KY
//! #    06   00060     00003     Discharge, cubic feet per second (Mean)
//! agency_cd	site_no	datetime	06_00060_00003	06_00060_00003_cd
//! 5s	15s	20d	14n	10s
//! USGS	03290500	2013-06-01	1230	A
//! ```
//!
//! Comment lines carry metadata and the parameter catalogue; the parameter
//! code (`TS_param[_stat]`) names the data column. Instantaneous files add a
//! `tz_cd` column and a time of day in `datetime`.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;
use tracing::{info, warn};

use super::{RowError, build_header_map, read_to_string, record_line, slurp, tab_reader};
use crate::domain::{Resolution, SeriesSummary, TimeSeries, parse_timestamp};
use crate::error::{AppError, CompareError};

/// One parameter column of an observed file.
#[derive(Debug, Clone, PartialEq)]
pub struct NwisParameter {
    /// Column code, e.g. `06_00060_00003`.
    pub code: String,
    pub description: String,
    pub values: Vec<f64>,
    pub summary: Option<SeriesSummary>,
}

/// Parsed observed file.
#[derive(Debug, Clone, PartialEq)]
pub struct NwisData {
    pub date_retrieved: Option<String>,
    pub gage_name: Option<String>,
    pub column_names: Vec<String>,
    pub parameters: Vec<NwisParameter>,
    pub dates: Vec<NaiveDateTime>,
    /// `None` when fewer than two rows were read.
    pub resolution: Option<Resolution>,
    pub row_errors: Vec<RowError>,
}

impl NwisData {
    /// First parameter, in catalogue order, whose description contains `name`
    /// (case-insensitive).
    pub fn find_parameter(&self, name: &str) -> Option<&NwisParameter> {
        let needle = name.trim().to_lowercase();
        self.parameters
            .iter()
            .find(|p| p.description.to_lowercase().contains(&needle))
    }

    /// Pair a parameter's values with the file's dates.
    pub fn series(&self, parameter: &NwisParameter) -> Result<TimeSeries, CompareError> {
        TimeSeries::new(self.dates.clone(), parameter.values.clone())
    }
}

/// Read an observed file from disk.
pub fn read_nwis(path: &Path) -> Result<NwisData, AppError> {
    let text = read_to_string(path)?;
    let data = parse_nwis_str(&text)?;
    info!(
        path = %path.display(),
        rows = data.dates.len(),
        parameters = data.parameters.len(),
        "read observed file"
    );
    Ok(data)
}

/// Parse an observed file from any reader.
pub fn parse_nwis<R: Read>(reader: R) -> Result<NwisData, AppError> {
    let text = slurp(reader)?;
    parse_nwis_str(&text)
}

fn parse_nwis_str(text: &str) -> Result<NwisData, AppError> {
    let mut date_retrieved = None;
    let mut gage_name = None;
    let mut catalogue: Vec<(String, String)> = Vec::new();

    for line in text.lines() {
        let Some(comment) = line.strip_prefix('#') else {
            continue;
        };
        let comment = comment.trim();
        if let Some(rest) = comment.strip_prefix("retrieved:") {
            date_retrieved = rest.split_whitespace().next().map(str::to_string);
        } else if comment.starts_with("USGS ") && gage_name.is_none() {
            gage_name = Some(comment.to_string());
        } else if let Some(entry) = parse_parameter_line(comment) {
            catalogue.push(entry);
        }
    }

    let mut reader = tab_reader(text);
    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read observed file header: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let date_idx = *header_map
        .get("datetime")
        .ok_or_else(|| AppError::new(2, "Observed file is missing the `datetime` column."))?;

    let mut columns = Vec::with_capacity(catalogue.len());
    for (code, _) in &catalogue {
        let idx = header_map.get(code.as_str()).ok_or_else(|| {
            AppError::new(2, format!("Parameter `{code}` has no column in the observed file."))
        })?;
        columns.push(*idx);
    }

    let mut dates = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); catalogue.len()];
    let mut row_errors = Vec::new();

    for result in reader.records() {
        let record =
            result.map_err(|e| AppError::new(2, format!("Observed file parse error: {e}")))?;
        if is_format_row(&record) {
            continue;
        }
        let line = record_line(&record);

        let raw_date = record.get(date_idx).unwrap_or("");
        let date = match parse_timestamp(raw_date) {
            Ok(d) => d,
            Err(e) => {
                warn!(line, "skipping observed row: {e}");
                row_errors.push(RowError { line, message: e });
                continue;
            }
        };

        let mut row = Vec::with_capacity(columns.len());
        for &idx in &columns {
            row.push(parse_value(record.get(idx).unwrap_or(""), date, line)?);
        }

        dates.push(date);
        for (column, v) in values.iter_mut().zip(row) {
            column.push(v);
        }
    }

    let resolution = match dates.as_slice() {
        [first, second, ..] => Some(Resolution::from_timestep(*second - *first)),
        _ => None,
    };

    let parameters = catalogue
        .into_iter()
        .zip(values)
        .map(|((code, description), values)| NwisParameter {
            code,
            description,
            summary: SeriesSummary::of(&values),
            values,
        })
        .collect();

    Ok(NwisData {
        date_retrieved,
        gage_name,
        column_names: headers.iter().map(str::to_string).collect(),
        parameters,
        dates,
        resolution,
        row_errors,
    })
}

/// `TS param [stat] description` → (`TS_param[_stat]`, description).
fn parse_parameter_line(comment: &str) -> Option<(String, String)> {
    let mut tokens = comment.split_whitespace().peekable();
    let ts = tokens.next().filter(|t| is_digits(t, 2))?;
    let param = tokens.next().filter(|t| is_digits(t, 5))?;

    let mut code = format!("{ts}_{param}");
    if let Some(stat) = tokens.next_if(|t| is_digits(t, 5)) {
        code.push('_');
        code.push_str(stat);
    }

    let description = tokens.collect::<Vec<_>>().join(" ");
    if description.is_empty() {
        return None;
    }
    Some((code, description))
}

fn is_digits(token: &str, len: usize) -> bool {
    token.len() == len && token.bytes().all(|b| b.is_ascii_digit())
}

/// The column-width row under the header (`5s  15s  20d ...`).
fn is_format_row(record: &StringRecord) -> bool {
    record
        .get(0)
        .and_then(|f| f.strip_suffix(|c: char| c.is_ascii_alphabetic()))
        .is_some_and(|width| !width.is_empty() && width.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_value(raw: &str, date: NaiveDateTime, line: u64) -> Result<f64, AppError> {
    if let Ok(v) = raw.parse::<f64>() {
        return Ok(v);
    }
    if raw.is_empty() {
        warn!(line, %date, "missing value, filling with NaN");
        return Ok(f64::NAN);
    }
    if let Some((head, _)) = raw.split_once('_') {
        warn!(line, %date, raw, "bad value, keeping the part before '_'");
        if let Ok(v) = head.parse::<f64>() {
            return Ok(v);
        }
    }
    Err(AppError::new(
        2,
        format!("Value on {date} (line {line}) can not be converted to a number: '{raw}'"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};

    const DAILY: &str = "\
# ---------------------------------- WARNING ----------------------------------------
# Provisional data are subject to revision.
#
# retrieved: 2013-06-26 08:31:47 EDT       (caww01)
#
# Data for the following 1 site(s) are contained in this file
#    USGS 03290500 KENTUCKY RIVER AT LOCK 2 AT LOCKPORT, KY
# -----------------------------------------------------------------------------------
#
# Data provided for site 03290500
#    DD parameter statistic   Description
#    06   00060     00003     Discharge, cubic feet per second (Mean)
#    07   00065     00003     Gage height, feet (Mean)
#
# Data-value qualification codes included in this output:
#     A  Approved for publication -- Processed and reviewed by the USGS.
#
agency_cd\tsite_no\tdatetime\t06_00060_00003\t06_00060_00003_cd\t07_00065_00003\t07_00065_00003_cd
5s\t15s\t20d\t14n\t10s\t14n\t10s
USGS\t03290500\t2013-06-01\t1230\tA\t4.5\tA
USGS\t03290500\t2013-06-02\t\tA\t4.6\tA
USGS\t03290500\t2013-06-03\t1350_Eqp\tA\t4.7\tA
USGS\t03290500\t2013-06-04\t1400\tA\t4.8\tA
";

    const INSTANTANEOUS: &str = "\
# retrieved: 2013-06-26 08:31:47 EDT
#    USGS 03290500 KENTUCKY RIVER AT LOCK 2 AT LOCKPORT, KY
#    02   00060     Discharge, cubic feet per second
agency_cd\tsite_no\tdatetime\ttz_cd\t02_00060\t02_00060_cd
5s\t15s\t20d\t6s\t14n\t10s
USGS\t03290500\t2013-06-25 00:00\tEDT\t1230\tP
USGS\t03290500\t2013-06-25 00:15\tEDT\t1240\tP
USGS\t03290500\t2013-06-25 00:30\tEDT\t1250\tP
";

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 6, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn parses_daily_metadata_and_parameters() {
        let data = parse_nwis(DAILY.as_bytes()).unwrap();

        assert_eq!(data.date_retrieved.as_deref(), Some("2013-06-26"));
        assert_eq!(
            data.gage_name.as_deref(),
            Some("USGS 03290500 KENTUCKY RIVER AT LOCK 2 AT LOCKPORT, KY")
        );
        assert_eq!(data.resolution, Some(Resolution::Daily));
        assert_eq!(data.dates, vec![day(1), day(2), day(3), day(4)]);

        assert_eq!(data.parameters.len(), 2);
        let q = &data.parameters[0];
        assert_eq!(q.code, "06_00060_00003");
        assert_eq!(q.description, "Discharge, cubic feet per second (Mean)");
        assert_eq!(q.values[0], 1230.0);
        assert!(q.values[1].is_nan());
        assert_eq!(q.values[2], 1350.0);
        assert!(q.summary.unwrap().mean.is_nan());

        let gh = &data.parameters[1];
        assert_eq!(gh.code, "07_00065_00003");
        let summary = gh.summary.unwrap();
        assert_eq!(summary.max, 4.8);
        assert_eq!(summary.min, 4.5);
    }

    #[test]
    fn finds_parameter_by_description() {
        let data = parse_nwis(DAILY.as_bytes()).unwrap();
        assert_eq!(data.find_parameter("DISCHARGE").unwrap().code, "06_00060_00003");
        assert_eq!(data.find_parameter("gage height").unwrap().code, "07_00065_00003");
        assert!(data.find_parameter("temperature").is_none());

        let param = data.find_parameter("discharge").unwrap();
        let series = data.series(param).unwrap();
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn find_parameter_takes_first_catalogue_match() {
        let text = "\
#    06   00060     00001     Discharge, cubic feet per second (Maximum)
#    06   00060     00003     Discharge, cubic feet per second (Mean)
agency_cd\tsite_no\tdatetime\t06_00060_00001\t06_00060_00003
5s\t15s\t20d\t14n\t14n
USGS\t03290500\t2013-06-01\t1500\t1230
";
        let data = parse_nwis(text.as_bytes()).unwrap();
        assert_eq!(data.find_parameter("discharge").unwrap().code, "06_00060_00001");
        assert_eq!(data.find_parameter("(mean)").unwrap().code, "06_00060_00003");
    }

    #[test]
    fn parses_instantaneous_rows() {
        let data = parse_nwis(INSTANTANEOUS.as_bytes()).unwrap();
        assert_eq!(data.resolution, Some(Resolution::Instantaneous));
        assert_eq!(data.parameters[0].code, "02_00060");
        assert_eq!(data.parameters[0].description, "Discharge, cubic feet per second");
        assert_eq!(data.dates[1], day(25) + TimeDelta::minutes(15));
        assert_eq!(data.parameters[0].values, vec![1230.0, 1240.0, 1250.0]);
    }

    #[test]
    fn rejects_unconvertible_value() {
        let bad = DAILY.replace("1400\tA", "Ice\tA");
        let err = parse_nwis(bad.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("'Ice'"));
    }

    #[test]
    fn rejects_parameter_without_column() {
        let bad = DAILY.replace("07_00065_00003\t07_00065_00003_cd", "x\ty");
        let err = parse_nwis(bad.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("07_00065_00003"));
    }

    #[test]
    fn parameter_line_parsing() {
        assert_eq!(
            parse_parameter_line("06   00060     00003     Discharge, cfs (Mean)"),
            Some(("06_00060_00003".to_string(), "Discharge, cfs (Mean)".to_string()))
        );
        assert_eq!(parse_parameter_line("DD parameter statistic   Description"), None);
        assert_eq!(parse_parameter_line("A  Approved for publication"), None);
    }
}
