use chrono::NaiveDateTime;
use thiserror::Error;

/// Failures raised by the alignment and comparison core.
///
/// Degenerate statistics (zero observed values, constant series) are not
/// errors; they surface as non-finite floats in the results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error("Lengths of {left_name} ({left}) and {right_name} ({right}) are not equal")]
    LengthMismatch {
        left_name: &'static str,
        left: usize,
        right_name: &'static str,
        right: usize,
    },

    #[error("Series '{0}' contains no samples")]
    EmptySeries(&'static str),

    #[error("Date ranges do not overlap (window start {start} is after end {end})")]
    DisjointRanges {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Date {0} is not present in the series")]
    DateNotFound(NaiveDateTime),

    #[error("At least {needed} aligned points are required, got {got}")]
    InsufficientPoints { needed: usize, got: usize },

    #[error("Aligned dates differ at index {index}: {left} vs {right}")]
    MisalignedDates {
        index: usize,
        left: NaiveDateTime,
        right: NaiveDateTime,
    },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<CompareError> for AppError {
    fn from(err: CompareError) -> Self {
        AppError::new(3, format!("Comparison failed: {err}"))
    }
}
