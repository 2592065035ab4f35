//! `yc-inversions` library crate.
//!
//! The binary (`yc`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - sources and analysis stages can be driven directly (e.g., from notebooks or tests)
//! - code stays easy to navigate as the project grows

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
