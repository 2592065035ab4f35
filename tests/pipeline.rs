//! End-to-end pipeline runs over in-memory sources.

use approx::assert_relative_eq;
use chrono::NaiveDate;

use yc_inversions::app::pipeline::{acquire_frame, analyze};
use yc_inversions::data::{SimulatedSource, YieldSource};
use yc_inversions::domain::{
    DateWindow, JoinPolicy, Maturity, ShortEnd, SimulationParams, TwoYearPolicy, YieldObservation,
};
use yc_inversions::error::DataError;
use yc_inversions::{io, plot, report};

struct MemorySource {
    short_end: ShortEnd,
    observations: Vec<YieldObservation>,
}

impl YieldSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn short_end(&self) -> ShortEnd {
        self.short_end
    }

    fn fetch(&self, maturity: Maturity, window: &DateWindow) -> Result<Vec<YieldObservation>, DataError> {
        Ok(self
            .observations
            .iter()
            .filter(|o| o.maturity == maturity && o.date >= window.start && o.date <= window.end)
            .copied()
            .collect())
    }
}

struct Offline;

impl YieldSource for Offline {
    fn name(&self) -> &str {
        "offline"
    }

    fn short_end(&self) -> ShortEnd {
        ShortEnd::ShortRateProxy
    }

    fn fetch(&self, _maturity: Maturity, _window: &DateWindow) -> Result<Vec<YieldObservation>, DataError> {
        Err(DataError::ProviderUnavailable {
            provider: "offline".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

fn window() -> DateWindow {
    DateWindow::new(day(1), day(31)).unwrap()
}

/// Mon 6th .. Fri 10th, plus a stray Saturday print. The 5Y is missing Mon/Tue.
fn source(short_end: ShortEnd) -> MemorySource {
    let days = [day(6), day(7), day(8), day(9), day(10)];
    let tens = [4.5, 3.9, 3.95, 4.1, 3.8];
    let fives = [None, None, Some(4.2), Some(4.3), Some(4.4)];

    let mut observations = Vec::new();
    for (i, d) in days.iter().enumerate() {
        observations.push(YieldObservation::new(*d, Maturity::TwoYear, 4.0));
        observations.push(YieldObservation::new(*d, Maturity::TenYear, tens[i]));
        observations.push(YieldObservation::new(*d, Maturity::ThirtyYear, 4.6));
        if let Some(v) = fives[i] {
            observations.push(YieldObservation::new(*d, Maturity::FiveYear, v));
        }
    }
    observations.push(YieldObservation::new(day(11), Maturity::TenYear, -9.0));

    MemorySource {
        short_end,
        observations,
    }
}

#[test]
fn union_join_fills_leading_gap_and_finds_runs() {
    let (frame, provenance) =
        acquire_frame(&source(ShortEnd::TwoYear), None, &window(), JoinPolicy::Union).unwrap();
    assert_eq!(provenance.source, "memory");
    assert!(!provenance.simulated);

    assert_eq!(frame.len(), 5);
    assert!(frame.dropped.is_empty());
    assert_eq!(frame.last_date(), Some(day(10)));
    let fives: Vec<f64> = frame.rows.iter().map(|r| r.get(Maturity::FiveYear)).collect();
    assert_eq!(fives, vec![4.2, 4.2, 4.2, 4.3, 4.4]);

    let run = analyze(frame, provenance, &TwoYearPolicy::default());
    assert_eq!(run.runs.len(), 2);

    let first = run.runs[0];
    assert_eq!((first.start_date, first.end_date), (day(7), day(8)));
    assert_eq!(first.duration, 2);
    assert_relative_eq!(first.deepest, -0.1, epsilon = 1e-12);

    // Open at the end of the data.
    let second = run.runs[1];
    assert_eq!((second.start_index, second.end_index), (4, 4));
    assert_eq!(second.duration, 1);
    assert_eq!(second.end_date, day(10));

    let stats = run.stats.unwrap();
    assert_eq!(stats.n, 5);
    assert_relative_eq!(stats.current, -0.2, epsilon = 1e-12);
    assert_relative_eq!(stats.max, 0.5, epsilon = 1e-12);
}

#[test]
fn intersection_join_keeps_only_fully_observed_days() {
    let (frame, _) =
        acquire_frame(&source(ShortEnd::TwoYear), None, &window(), JoinPolicy::Intersection).unwrap();
    let dates: Vec<NaiveDate> = frame.rows.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![day(8), day(9), day(10)]);
}

#[test]
fn proxy_short_end_interpolates_two_year() {
    let (frame, provenance) =
        acquire_frame(&source(ShortEnd::ShortRateProxy), None, &window(), JoinPolicy::Union).unwrap();
    let run = analyze(frame, provenance, &TwoYearPolicy::default());

    // 4.0 + 0.7 * (4.4 - 4.0) on the last day.
    let last = run.spreads.last().unwrap();
    assert_relative_eq!(last.two_year, 4.28, epsilon = 1e-12);
    assert_relative_eq!(last.spread_2s10s, 3.8 - 4.28, epsilon = 1e-12);
    assert_relative_eq!(last.spread_5s30s, 4.6 - 4.4, epsilon = 1e-12);
}

#[test]
fn offline_source_falls_back_to_simulated_data() {
    let sim = SimulatedSource::new(SimulationParams::default());

    let err = acquire_frame(&Offline, None, &window(), JoinPolicy::Union).unwrap_err();
    assert!(matches!(err, DataError::ProviderUnavailable { .. }));

    let (frame, provenance) =
        acquire_frame(&Offline, Some(&sim as &dyn YieldSource), &window(), JoinPolicy::Union).unwrap();
    assert!(provenance.simulated);
    assert!(provenance.fallback_reason.as_deref().unwrap().contains("connection refused"));
    assert_eq!(frame.len(), window().business_days().len());

    let config = yc_inversions::app::config_from_args(
        &<yc_inversions::cli::Cli as clap::Parser>::try_parse_from(["yc"]).unwrap(),
        day(31),
    )
    .unwrap();
    let run = analyze(frame, provenance, &config.two_year);
    let txt = report::format_run_summary(&run, &config);
    assert!(txt.contains("Source: simulated"));
    assert!(txt.contains("WARNING: simulated data in use"));
    assert!(txt.contains("primary source failed"));
}

#[test]
fn run_writes_report_charts_and_export() {
    let (frame, provenance) =
        acquire_frame(&source(ShortEnd::TwoYear), None, &window(), JoinPolicy::Union).unwrap();
    let run = analyze(frame, provenance, &TwoYearPolicy::default());

    let plot_txt = plot::render_spread_plot(&run.spreads, 40, 8);
    assert!(plot_txt.starts_with("2s10s spread (bp): 2025-01-06 .. 2025-01-10"));
    assert!(plot_txt.contains('x'));

    let dir = tempfile::tempdir().unwrap();
    let charts = plot::write_charts(&dir.path().join("charts"), &run.frame, &run.spreads, &run.runs).unwrap();
    assert_eq!(charts.len(), 2);
    assert!(charts.iter().all(|p| p.exists()));

    let csv_path = dir.path().join("spreads.csv");
    io::write_spreads_csv(&csv_path, &run.frame, &run.spreads).unwrap();
    let csv = std::fs::read_to_string(csv_path).unwrap();
    assert_eq!(csv.lines().count(), 6);
    assert_eq!(csv.lines().filter(|l| l.ends_with(",true")).count(), 3);
}
