//! Inversion run detection.
//!
//! A run is a maximal stretch of consecutive series entries whose 2s10s spread
//! is strictly negative. Runs are found in one pass with a single piece of
//! state: the index where the currently open run started.
//!
//! Durations count series entries. The series is already on a business-day
//! index, so no calendar arithmetic happens here. A run still open at the end
//! of the data is closed at the last entry; it is never extrapolated.

use crate::domain::{InversionRun, SpreadSeries};

/// Detect all inversion runs, ordered by start.
pub fn detect_runs(series: &SpreadSeries) -> Vec<InversionRun> {
    let points = &series.points;
    let mut runs = Vec::new();
    let mut open: Option<usize> = None;

    for (i, p) in points.iter().enumerate() {
        match (p.is_inverted(), open) {
            (true, None) => open = Some(i),
            (false, Some(start)) => {
                runs.push(close_run(series, start, i - 1));
                open = None;
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        runs.push(close_run(series, start, points.len() - 1));
    }

    runs
}

fn close_run(series: &SpreadSeries, start: usize, end: usize) -> InversionRun {
    let slice = &series.points[start..=end];
    let deepest = slice.iter().map(|p| p.spread_2s10s).fold(f64::INFINITY, f64::min);
    InversionRun {
        start_date: slice[0].date,
        end_date: slice[slice.len() - 1].date,
        start_index: start,
        end_index: end,
        duration: end - start + 1,
        deepest,
    }
}
