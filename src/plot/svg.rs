//! SVG chart artifacts rendered with Plotters.
//!
//! Two charts are written to the output directory:
//! - `spread_2s10s.svg`: 2s10s spread (bp) over time, zero line, shaded inversions
//! - `yield_curve_evolution.svg`: curve snapshots across the window

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use plotters::prelude::*;
use tracing::{info, warn};

use crate::domain::{AlignedFrame, InversionRun, Maturity, SpreadSeries};
use crate::error::AppError;
use crate::report::to_bp;

pub const SPREAD_CHART: &str = "spread_2s10s.svg";
pub const CURVE_CHART: &str = "yield_curve_evolution.svg";

/// Spacing (in observations) between curve snapshots.
const SNAPSHOT_STEP: usize = 20;
/// Maximum number of curve snapshots drawn.
const SNAPSHOT_COUNT: usize = 5;

type DrawResult = Result<(), Box<dyn std::error::Error>>;

/// Write both charts into `dir`, returning the written paths.
///
/// An empty series produces no charts (and no error).
pub fn write_charts(
    dir: &Path,
    frame: &AlignedFrame,
    series: &SpreadSeries,
    runs: &[InversionRun],
) -> Result<Vec<PathBuf>, AppError> {
    if series.is_empty() {
        warn!("no observations; skipping charts");
        return Ok(Vec::new());
    }

    create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create chart dir '{}': {e}", dir.display())))?;

    let spread_path = dir.join(SPREAD_CHART);
    draw_spread_chart(&spread_path, series, runs)
        .map_err(|e| AppError::new(2, format!("Failed to draw '{}': {e}", spread_path.display())))?;

    let curve_path = dir.join(CURVE_CHART);
    draw_curve_chart(&curve_path, frame, series)
        .map_err(|e| AppError::new(2, format!("Failed to draw '{}': {e}", curve_path.display())))?;

    info!(dir = %dir.display(), "wrote charts");
    Ok(vec![spread_path, curve_path])
}

fn draw_spread_chart(path: &Path, series: &SpreadSeries, runs: &[InversionRun]) -> DrawResult {
    let dates: Vec<NaiveDate> = series.points.iter().map(|p| p.date).collect();
    let values: Vec<f64> = series.points.iter().map(|p| to_bp(p.spread_2s10s)).collect();
    let x_max = (values.len().max(2) - 1) as f64;

    let (lo, hi) = values
        .iter()
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let pad = ((hi - lo) * 0.05).max(1.0);
    let (y0, y1) = (lo - pad, hi + pad);

    let root = SVGBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("2s10s Yield Spread (negative = inverted)", ("sans-serif", 20))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0.0..x_max, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Spread (bp)")
        .x_labels(8)
        .y_labels(8)
        .x_label_formatter(&|x| date_label(&dates, *x))
        .draw()?;

    // Inversion periods first so the spread line sits on top.
    chart.draw_series(runs.iter().map(|r| {
        let x0 = (r.start_index as f64 - 0.5).max(0.0);
        let x1 = (r.end_index as f64 + 0.5).min(x_max);
        Rectangle::new([(x0, y0), (x1, y1)], RED.mix(0.2).filled())
    }))?;

    chart.draw_series(LineSeries::new(vec![(0.0, 0.0), (x_max, 0.0)], RED.stroke_width(1)))?;

    chart.draw_series(LineSeries::new(
        values.iter().enumerate().map(|(i, v)| (i as f64, *v)),
        BLUE.stroke_width(2),
    ))?;

    root.present()?;
    Ok(())
}

fn draw_curve_chart(path: &Path, frame: &AlignedFrame, series: &SpreadSeries) -> DrawResult {
    let snapshots = snapshot_indices(frame.len());

    // The 2Y point is the (possibly interpolated) yield the spreads used.
    let curves: Vec<(NaiveDate, Vec<(f64, f64)>)> = snapshots
        .iter()
        .map(|&i| {
            let row = &frame.rows[i];
            let points = Maturity::ALL
                .iter()
                .map(|m| {
                    let y = match m {
                        Maturity::TwoYear => series.points[i].two_year,
                        _ => row.get(*m),
                    };
                    (m.years(), y)
                })
                .collect();
            (row.date, points)
        })
        .collect();

    let (lo, hi) = curves
        .iter()
        .flat_map(|(_, pts)| pts.iter().map(|(_, y)| *y))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
    let pad = ((hi - lo) * 0.1).max(0.1);

    let root = SVGBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("US Treasury Yield Curve Evolution", ("sans-serif", 20))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0.0..32.0, (lo - pad)..(hi + pad))?;

    chart
        .configure_mesh()
        .x_desc("Maturity (years)")
        .y_desc("Yield (%)")
        .draw()?;

    for (i, (date, points)) in curves.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(date.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Up to `SNAPSHOT_COUNT` indices, `SNAPSHOT_STEP` apart, ending near the last row.
fn snapshot_indices(len: usize) -> Vec<usize> {
    let start = len.saturating_sub(SNAPSHOT_COUNT * SNAPSHOT_STEP);
    (start..len).step_by(SNAPSHOT_STEP).collect()
}

fn date_label(dates: &[NaiveDate], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 {
        return String::new();
    }
    dates
        .get(idx as usize)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
