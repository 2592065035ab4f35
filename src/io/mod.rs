//! Output files beyond the charts.
//!
//! - per-day CSV export (`export`)

pub mod export;

pub use export::*;
