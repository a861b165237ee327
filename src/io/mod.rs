//! Readers for the two tab-delimited export formats.
//!
//! - observed gauge records (`nwis`)
//! - model output tables (`water`)
//!
//! Readers only parse; they hand `TimeSeries` to the alignment core and do no
//! comparison work themselves.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::AppError;

pub mod nwis;
pub mod water;

pub use nwis::*;
pub use water::*;

/// A row-level problem encountered while reading.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: u64,
    pub message: String,
}

fn read_to_string(path: &Path) -> Result<String, AppError> {
    let mut file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open '{}': {e}", path.display())))?;
    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", path.display())))?;
    Ok(text)
}

fn slurp<R: Read>(mut reader: R) -> Result<String, AppError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
    Ok(text)
}

fn tab_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}
