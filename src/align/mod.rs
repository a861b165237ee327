//! Date alignment between a modeled and an observed series.
//!
//! Responsibilities:
//!
//! - find the overlapping window of two date axes (`range`)
//! - cut a series down to a window by exact date lookup (`subset`)
//! - produce an `AlignedWindow` whose two series share one date axis

pub mod range;
pub mod subset;

pub use range::*;
pub use subset::*;
