//! Goodness-of-fit statistics between a modeled and an observed sequence.
//!
//! - per-sample error sequences (`pointwise`)
//! - scalar skill scores (`efficiency`)
//!
//! Every function takes the modeled/candidate sequence first and the
//! observed/reference sequence second. Inputs are assumed to be the same
//! length; `compare` checks that before calling in here. Degenerate inputs
//! (zero reference values, constant series) yield NaN or infinities.

pub mod efficiency;
pub mod pointwise;

pub use efficiency::*;
pub use pointwise::*;

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
