//! Terminal plots of a comparison.

pub mod ascii;

pub use ascii::*;
