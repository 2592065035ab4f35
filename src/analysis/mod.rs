//! Series analysis.
//!
//! Responsibilities:
//!
//! - align maturity series on a business-day index and fill gaps
//! - estimate the 2-year yield and compute curve spreads
//! - detect inversion runs and summarize the spread

pub mod align;
pub mod inversion;
pub mod spread;
pub mod stats;

pub use align::*;
pub use inversion::*;
pub use spread::*;
pub use stats::*;
