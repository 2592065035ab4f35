//! Command-line parsing for the Treasury 2s10s inversion analyzer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! data and analysis code. Flags map one-to-one onto `AnalysisConfig`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser};

use crate::domain::{JoinPolicy, ShortEnd, TwoYearPolicy};

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "yc",
    version,
    about = "US Treasury yield-curve (2s10s) inversion analyzer (FRED-based)"
)]
pub struct Cli {
    /// First day of the analysis window (YYYY-MM-DD). Defaults to one year before `--end`.
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Last day of the analysis window (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "DATE")]
    pub end: Option<NaiveDate>,

    /// How maturity series with different dates are combined.
    #[arg(long, value_enum, default_value_t = JoinPolicy::Union)]
    pub join: JoinPolicy,

    /// Interpolation weight for the 2Y estimate: short + w * (5Y - short).
    #[arg(long, default_value_t = TwoYearPolicy::DEFAULT_WEIGHT)]
    pub weight: f64,

    /// FRED series for the 2Y slot.
    #[arg(long, default_value = "DGS3MO")]
    pub short_series: String,

    /// FRED series for the 5Y slot.
    #[arg(long, default_value = "DGS5")]
    pub five_series: String,

    /// FRED series for the 10Y slot.
    #[arg(long, default_value = "DGS10")]
    pub ten_series: String,

    /// FRED series for the 30Y slot.
    #[arg(long, default_value = "DGS30")]
    pub thirty_series: String,

    /// Whether `--short-series` is a true 2-year yield or a short-rate proxy.
    #[arg(long, value_enum, default_value_t = ShortEnd::ShortRateProxy)]
    pub short_end: ShortEnd,

    /// HTTP timeout for FRED requests (seconds).
    #[arg(long, default_value_t = 20)]
    pub timeout_secs: u64,

    /// Skip FRED and analyse simulated data.
    #[arg(long)]
    pub simulate: bool,

    /// Fail (exit 4) instead of switching to simulated data when FRED is unavailable.
    #[arg(long)]
    pub no_fallback: bool,

    /// Seed for the simulated source.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Directory for SVG charts.
    #[arg(long, value_name = "DIR", default_value = "charts")]
    pub out_dir: PathBuf,

    /// Do not write SVG charts.
    #[arg(long)]
    pub no_charts: bool,

    /// Export the per-day frame and spreads to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
