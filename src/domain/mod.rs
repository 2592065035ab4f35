//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - maturities and raw observations (`Maturity`, `YieldObservation`)
//! - pipeline stages' outputs (`AlignedFrame`, `SpreadSeries`, `InversionRun`)
//! - run configuration (`AnalysisConfig`, `TwoYearPolicy`, `SimulationParams`)

pub mod types;

pub use types::*;
