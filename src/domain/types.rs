//! Shared domain types.
//!
//! All yields and spreads are stored in **percentage points** (`4.25` means 4.25%).
//! Conversion to basis points happens only when formatting output.

use std::fmt;
use std::path::PathBuf;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Tracked Treasury maturities.
///
/// The `TwoYear` slot may be filled by a short-rate proxy rather than a true
/// 2-year series; the source declares which via [`ShortEnd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Maturity {
    TwoYear,
    FiveYear,
    TenYear,
    ThirtyYear,
}

impl Maturity {
    pub const ALL: [Maturity; 4] = [
        Maturity::TwoYear,
        Maturity::FiveYear,
        Maturity::TenYear,
        Maturity::ThirtyYear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Maturity::TwoYear => "2Y",
            Maturity::FiveYear => "5Y",
            Maturity::TenYear => "10Y",
            Maturity::ThirtyYear => "30Y",
        }
    }

    /// Tenor in years (used as the x coordinate of curve charts).
    pub fn years(self) -> f64 {
        match self {
            Maturity::TwoYear => 2.0,
            Maturity::FiveYear => 5.0,
            Maturity::TenYear => 10.0,
            Maturity::ThirtyYear => 30.0,
        }
    }

    fn index(self) -> usize {
        match self {
            Maturity::TwoYear => 0,
            Maturity::FiveYear => 1,
            Maturity::TenYear => 2,
            Maturity::ThirtyYear => 3,
        }
    }
}

impl fmt::Display for Maturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the source's 2Y slot actually holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShortEnd {
    /// A true 2-year yield series.
    #[value(name = "observed")]
    TwoYear,
    /// A shorter instrument (e.g. 3-month bill); the 2-year yield is interpolated.
    #[value(name = "proxy")]
    ShortRateProxy,
}

/// How maturity series with different day sets are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum JoinPolicy {
    /// Every business day observed by at least one maturity (gaps are filled).
    Union,
    /// Only business days observed by every maturity.
    Intersection,
}

/// A single fetched observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldObservation {
    pub date: NaiveDate,
    pub maturity: Maturity,
    pub yield_pct: f64,
}

impl YieldObservation {
    pub fn new(date: NaiveDate, maturity: Maturity, yield_pct: f64) -> Self {
        Self {
            date,
            maturity,
            yield_pct,
        }
    }
}

/// One aligned day: a value for every maturity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldRow {
    pub date: NaiveDate,
    yields: [f64; 4],
}

impl YieldRow {
    pub fn new(date: NaiveDate, two_year: f64, five_year: f64, ten_year: f64, thirty_year: f64) -> Self {
        Self {
            date,
            yields: [two_year, five_year, ten_year, thirty_year],
        }
    }

    pub fn get(&self, maturity: Maturity) -> f64 {
        self.yields[maturity.index()]
    }
}

/// Maturity series aligned on a common business-day index.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedFrame {
    pub rows: Vec<YieldRow>,
    /// What the 2Y column holds.
    pub short_end: ShortEnd,
    /// Days removed because at least one maturity could not be filled.
    pub dropped: Vec<NaiveDate>,
}

impl AlignedFrame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&YieldRow> {
        self.rows.last()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }
}

/// Per-day derived values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadPoint {
    pub date: NaiveDate,
    /// Observed or interpolated 2-year yield.
    pub two_year: f64,
    /// 10Y − 2Y.
    pub spread_2s10s: f64,
    /// 30Y − 5Y.
    pub spread_5s30s: f64,
}

impl SpreadPoint {
    pub fn is_inverted(&self) -> bool {
        self.spread_2s10s < 0.0
    }
}

/// Spread series, one entry per aligned day, in date order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpreadSeries {
    pub points: Vec<SpreadPoint>,
}

impl SpreadSeries {
    /// Build a bare 2s10s series (other fields zeroed). Mostly useful in tests.
    pub fn from_spreads(points: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        Self {
            points: points
                .into_iter()
                .map(|(date, spread)| SpreadPoint {
                    date,
                    two_year: 0.0,
                    spread_2s10s: spread,
                    spread_5s30s: 0.0,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&SpreadPoint> {
        self.points.last()
    }
}

/// A maximal run of consecutive entries with a negative 2s10s spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InversionRun {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Index of the first entry in the spread series.
    pub start_index: usize,
    /// Index of the last entry in the spread series (inclusive).
    pub end_index: usize,
    /// Number of series entries in the run (not calendar days).
    pub duration: usize,
    /// Most negative spread inside the run.
    pub deepest: f64,
}

impl InversionRun {
    pub fn contains_index(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }

    /// Calendar days spanned, inclusive of both ends.
    pub fn calendar_span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Summary statistics of the 2s10s spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadStats {
    pub current: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (n − 1); zero for a single observation.
    pub std_dev: f64,
    pub n: usize,
}

/// Inclusive date range requested from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// The 365 days ending at `end`.
    pub fn trailing_year(end: NaiveDate) -> Self {
        Self {
            start: end - Duration::days(365),
            end,
        }
    }

    /// Weekdays in the window, ascending.
    pub fn business_days(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .filter(|d| is_business_day(*d))
            .collect()
    }
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Weighting used to estimate the 2-year yield from a short-rate proxy:
/// `y2 ≈ short + weight · (y5 − short)`.
///
/// The weight is a heuristic, not a fitted value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoYearPolicy {
    pub weight: f64,
}

impl TwoYearPolicy {
    pub const DEFAULT_WEIGHT: f64 = 0.7;

    pub fn new(weight: f64) -> Option<Self> {
        if weight.is_finite() && (0.0..=1.0).contains(&weight) {
            Some(Self { weight })
        } else {
            None
        }
    }

    pub fn estimate(&self, short_rate: f64, five_year: f64) -> f64 {
        short_rate + self.weight * (five_year - short_rate)
    }
}

impl Default for TwoYearPolicy {
    fn default() -> Self {
        Self {
            weight: Self::DEFAULT_WEIGHT,
        }
    }
}

/// FRED series used for each maturity slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesMap {
    pub two_year: String,
    pub five_year: String,
    pub ten_year: String,
    pub thirty_year: String,
}

impl SeriesMap {
    pub fn series_id(&self, maturity: Maturity) -> &str {
        match maturity {
            Maturity::TwoYear => &self.two_year,
            Maturity::FiveYear => &self.five_year,
            Maturity::TenYear => &self.ten_year,
            Maturity::ThirtyYear => &self.thirty_year,
        }
    }
}

impl Default for SeriesMap {
    fn default() -> Self {
        Self {
            two_year: "DGS3MO".to_string(),
            five_year: "DGS5".to_string(),
            ten_year: "DGS10".to_string(),
            thirty_year: "DGS30".to_string(),
        }
    }
}

/// Parameters of the simulated yield source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub seed: u64,
    /// Starting 10Y level.
    pub base_ten_year: f64,
    /// Daily step std dev of the 10Y random walk.
    pub daily_vol: f64,
    /// Bounds applied to the 10Y walk.
    pub floor: f64,
    pub cap: f64,
    /// Mean offsets between adjacent maturities.
    pub five_below_ten: f64,
    pub two_below_five: f64,
    pub thirty_above_ten: f64,
    /// Std dev of the per-day curve-shape noise.
    pub shape_noise: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            seed: 42,
            base_ten_year: 4.5,
            daily_vol: 0.05,
            floor: 1.0,
            cap: 7.0,
            five_below_ten: 0.3,
            two_below_five: 0.4,
            thirty_above_ten: 0.2,
            shape_noise: 0.1,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub window: DateWindow,
    pub join: JoinPolicy,
    pub two_year: TwoYearPolicy,

    pub series: SeriesMap,
    pub short_end: ShortEnd,
    pub timeout_secs: u64,

    /// Skip FRED and use the simulated source directly.
    pub simulate: bool,
    /// Allow switching to the simulated source when FRED fails.
    pub fallback: bool,
    pub simulation: SimulationParams,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    /// Directory for SVG charts (`None` disables chart output).
    pub chart_dir: Option<PathBuf>,
    pub export: Option<PathBuf>,
}
