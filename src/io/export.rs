//! Export the aligned frame and spreads to CSV.
//!
//! One row per observation day, meant to be easy to consume in spreadsheets or
//! downstream scripts.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{AlignedFrame, Maturity, SpreadSeries};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct ExportRow {
    date: NaiveDate,
    two_year: f64,
    five_year: f64,
    ten_year: f64,
    thirty_year: f64,
    /// 2Y value the spreads were computed from (interpolated under the proxy short end).
    two_year_used: f64,
    spread_2s10s: f64,
    spread_5s30s: f64,
    inverted: bool,
}

/// Write the per-day frame and spreads to a CSV file.
pub fn write_spreads_csv(path: &Path, frame: &AlignedFrame, series: &SpreadSeries) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for (row, point) in frame.rows.iter().zip(&series.points) {
        writer
            .serialize(ExportRow {
                date: row.date,
                two_year: row.get(Maturity::TwoYear),
                five_year: row.get(Maturity::FiveYear),
                ten_year: row.get(Maturity::TenYear),
                thirty_year: row.get(Maturity::ThirtyYear),
                two_year_used: point.two_year,
                spread_2s10s: point.spread_2s10s,
                spread_5s30s: point.spread_5s30s,
                inverted: point.is_inverted(),
            })
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), rows = series.len(), "wrote CSV export");
    Ok(())
}
