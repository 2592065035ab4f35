//! Reporting: formatted terminal summary of a run.
//!
//! Formatting lives in one place so output changes stay localized and the
//! analysis code never deals with display units.

pub mod format;

pub use format::*;
