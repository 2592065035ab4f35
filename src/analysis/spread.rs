//! 2-year estimation and curve spreads.

use crate::domain::{AlignedFrame, Maturity, ShortEnd, SpreadPoint, SpreadSeries, TwoYearPolicy};

/// Compute 2s10s and 5s30s spreads for every aligned day.
///
/// When the frame's 2Y column is a short-rate proxy the 2-year yield is
/// estimated with `policy`; a true 2-year column is used as is.
/// Values stay in percentage points.
pub fn compute_spreads(frame: &AlignedFrame, policy: &TwoYearPolicy) -> SpreadSeries {
    let points = frame
        .rows
        .iter()
        .map(|row| {
            let short = row.get(Maturity::TwoYear);
            let five = row.get(Maturity::FiveYear);
            let two_year = match frame.short_end {
                ShortEnd::TwoYear => short,
                ShortEnd::ShortRateProxy => policy.estimate(short, five),
            };
            SpreadPoint {
                date: row.date,
                two_year,
                spread_2s10s: row.get(Maturity::TenYear) - two_year,
                spread_5s30s: row.get(Maturity::ThirtyYear) - five,
            }
        })
        .collect();

    SpreadSeries { points }
}
