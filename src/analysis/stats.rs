//! Descriptive statistics of the 2s10s spread.

use crate::domain::{SpreadSeries, SpreadStats};

/// Summary of the 2s10s spread, or `None` for an empty series.
pub fn spread_stats(series: &SpreadSeries) -> Option<SpreadStats> {
    let current = series.last()?.spread_2s10s;
    let values: Vec<f64> = series.points.iter().map(|p| p.spread_2s10s).collect();

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Sample variance (n - 1 denominator).
    let std_dev = if n > 1 {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
        var.sqrt()
    } else {
        0.0
    };

    Some(SpreadStats {
        current,
        mean,
        min,
        max,
        std_dev,
        n,
    })
}
