//! `hydrocomp` library crate.
//!
//! The binary (`hydrocomp`) is a thin wrapper around this library so that:
//!
//! - the alignment and statistics core is testable without spawning processes
//! - `compare_series` can be driven from in-memory series, not just files

pub mod align;
pub mod app;
pub mod cli;
pub mod compare;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod stats;
