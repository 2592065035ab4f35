//! Plotting utilities.
//!
//! - `ascii`: terminal spread plot
//! - `svg`: chart files written with Plotters

pub mod ascii;
pub mod svg;

pub use ascii::render_spread_plot;
pub use svg::write_charts;
