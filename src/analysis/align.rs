//! Series alignment and gap filling.
//!
//! Maturity series arrive on different day sets (holidays, late prints, missing
//! values). This module puts them on one business-day index and fills gaps:
//! forward-fill first, then backward-fill for leading gaps.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::{AlignedFrame, JoinPolicy, Maturity, ShortEnd, YieldObservation, YieldRow, is_business_day};
use crate::error::DataError;

/// Build an [`AlignedFrame`] from raw observations of all four maturities.
///
/// Weekend dates and non-finite values are ignored; a repeated `(maturity, date)`
/// keeps the last value seen. Fails with `DataUnavailable` if a maturity has no
/// usable observation.
pub fn align_frame(
    observations: &[YieldObservation],
    join: JoinPolicy,
    short_end: ShortEnd,
    provider: &str,
) -> Result<AlignedFrame, DataError> {
    let mut by_maturity: BTreeMap<Maturity, BTreeMap<NaiveDate, f64>> =
        Maturity::ALL.iter().map(|m| (*m, BTreeMap::new())).collect();

    for obs in observations {
        if !obs.yield_pct.is_finite() || !is_business_day(obs.date) {
            continue;
        }
        if let Some(series) = by_maturity.get_mut(&obs.maturity) {
            series.insert(obs.date, obs.yield_pct);
        }
    }

    for (maturity, series) in &by_maturity {
        if series.is_empty() {
            return Err(DataError::data_unavailable(
                provider,
                *maturity,
                "no business-day observations to align",
            ));
        }
    }

    let index = build_index(&by_maturity, join);

    let mut columns: Vec<Vec<Option<f64>>> = Maturity::ALL
        .iter()
        .map(|m| {
            let series = &by_maturity[m];
            index.iter().map(|d| series.get(d).copied()).collect()
        })
        .collect();

    for (maturity, column) in Maturity::ALL.iter().zip(columns.iter_mut()) {
        let missing = column.iter().filter(|v| v.is_none()).count();
        if missing > 0 {
            debug!(%maturity, missing, "filling gaps");
        }
        forward_fill(column);
        backward_fill(column);
    }

    // Every column holds at least one value on `index`, so the fills above leave
    // no gaps and `dropped` stays empty; rows are still checked before use.
    let mut rows = Vec::with_capacity(index.len());
    let mut dropped = Vec::new();
    for (i, date) in index.iter().enumerate() {
        match (columns[0][i], columns[1][i], columns[2][i], columns[3][i]) {
            (Some(two), Some(five), Some(ten), Some(thirty)) => {
                rows.push(YieldRow::new(*date, two, five, ten, thirty));
            }
            _ => dropped.push(*date),
        }
    }

    if !dropped.is_empty() {
        warn!(days = dropped.len(), "dropped days that could not be filled");
    }

    Ok(AlignedFrame {
        rows,
        short_end,
        dropped,
    })
}

fn build_index(by_maturity: &BTreeMap<Maturity, BTreeMap<NaiveDate, f64>>, join: JoinPolicy) -> Vec<NaiveDate> {
    match join {
        JoinPolicy::Union => by_maturity
            .values()
            .flat_map(|s| s.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        JoinPolicy::Intersection => {
            let mut common: Option<BTreeSet<NaiveDate>> = None;
            for series in by_maturity.values() {
                common = Some(match common {
                    None => series.keys().copied().collect(),
                    Some(mut set) => {
                        set.retain(|d| series.contains_key(d));
                        set
                    }
                });
            }
            common.map(|s| s.into_iter().collect()).unwrap_or_default()
        }
    }
}

/// Propagate the last known value forward over `None` entries.
pub fn forward_fill(values: &mut [Option<f64>]) {
    let mut last = None;
    for v in values.iter_mut() {
        match v {
            Some(x) => last = Some(*x),
            None => *v = last,
        }
    }
}

/// Propagate the next known value backward over `None` entries.
pub fn backward_fill(values: &mut [Option<f64>]) {
    let mut next = None;
    for v in values.iter_mut().rev() {
        match v {
            Some(x) => next = Some(*x),
            None => *v = next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // 2025-03-03 is a Monday.
    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap() + chrono::Duration::days(offset)
    }

    fn complete(maturity: Maturity, days: &[i64], level: f64) -> Vec<YieldObservation> {
        days.iter()
            .enumerate()
            .map(|(i, d)| YieldObservation::new(day(*d), maturity, level + i as f64 * 0.01))
            .collect()
    }

    #[test]
    fn fill_helpers() {
        let mut v = vec![None, Some(1.0), None, None, Some(2.0), None];
        forward_fill(&mut v);
        assert_eq!(v, vec![None, Some(1.0), Some(1.0), Some(1.0), Some(2.0), Some(2.0)]);
        backward_fill(&mut v);
        assert_eq!(v[0], Some(1.0));
    }

    #[test]
    fn leading_gap_is_back_filled_from_first_observation() {
        let days = [0, 1, 2, 3, 4];
        let mut obs = Vec::new();
        obs.extend(complete(Maturity::TwoYear, &days, 4.0));
        // 5Y is missing the first two days.
        obs.push(YieldObservation::new(day(2), Maturity::FiveYear, 4.30));
        obs.push(YieldObservation::new(day(3), Maturity::FiveYear, 4.35));
        obs.push(YieldObservation::new(day(4), Maturity::FiveYear, 4.40));
        obs.extend(complete(Maturity::TenYear, &days, 4.5));
        obs.extend(complete(Maturity::ThirtyYear, &days, 4.8));

        let frame = align_frame(&obs, JoinPolicy::Union, ShortEnd::TwoYear, "test").unwrap();
        assert_eq!(frame.len(), 5);
        assert_eq!(frame.rows[0].get(Maturity::FiveYear), 4.30);
        assert_eq!(frame.rows[1].get(Maturity::FiveYear), 4.30);
        assert_eq!(frame.rows[2].get(Maturity::FiveYear), 4.30);
        assert_eq!(frame.rows[3].get(Maturity::FiveYear), 4.35);
        assert_eq!(frame.rows[0].get(Maturity::TenYear), 4.5);
        assert!(frame.dropped.is_empty());
    }

    #[test]
    fn interior_gap_is_forward_filled() {
        let days = [0, 1, 2, 3];
        let mut obs = Vec::new();
        obs.extend(complete(Maturity::TwoYear, &days, 4.0));
        obs.extend(complete(Maturity::FiveYear, &[0, 3], 4.2));
        obs.extend(complete(Maturity::TenYear, &days, 4.5));
        obs.extend(complete(Maturity::ThirtyYear, &days, 4.8));

        let frame = align_frame(&obs, JoinPolicy::Union, ShortEnd::TwoYear, "test").unwrap();
        assert_eq!(frame.rows[1].get(Maturity::FiveYear), 4.2);
        assert_eq!(frame.rows[2].get(Maturity::FiveYear), 4.2);
        assert_eq!(frame.rows[3].get(Maturity::FiveYear), 4.2 + 0.01);
    }

    #[test]
    fn intersection_keeps_only_common_days() {
        let mut obs = Vec::new();
        obs.extend(complete(Maturity::TwoYear, &[0, 1, 2, 3], 4.0));
        obs.extend(complete(Maturity::FiveYear, &[1, 2, 3], 4.2));
        obs.extend(complete(Maturity::TenYear, &[0, 1, 2], 4.5));
        obs.extend(complete(Maturity::ThirtyYear, &[0, 1, 2, 3], 4.8));

        let frame = align_frame(&obs, JoinPolicy::Intersection, ShortEnd::TwoYear, "test").unwrap();
        let dates: Vec<_> = frame.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(1), day(2)]);

        let union = align_frame(&obs, JoinPolicy::Union, ShortEnd::TwoYear, "test").unwrap();
        assert_eq!(union.len(), 4);
    }

    #[test]
    fn weekends_and_duplicates_are_cleaned() {
        // Offsets 5 and 6 are Saturday and Sunday.
        let days = [0, 4, 5, 6, 7];
        let mut obs = Vec::new();
        for m in Maturity::ALL {
            obs.extend(complete(m, &days, 4.0));
        }
        obs.push(YieldObservation::new(day(7), Maturity::TenYear, 9.99));

        let frame = align_frame(&obs, JoinPolicy::Union, ShortEnd::TwoYear, "test").unwrap();
        let dates: Vec<_> = frame.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(0), day(4), day(7)]);
        assert_eq!(frame.rows[2].get(Maturity::TenYear), 9.99);
    }

    #[test]
    fn single_print_per_maturity_fills_every_union_day() {
        let obs = vec![
            YieldObservation::new(day(0), Maturity::TwoYear, 4.0),
            YieldObservation::new(day(1), Maturity::FiveYear, 4.2),
            YieldObservation::new(day(2), Maturity::TenYear, 4.5),
            YieldObservation::new(day(3), Maturity::ThirtyYear, 4.8),
        ];
        let frame = align_frame(&obs, JoinPolicy::Union, ShortEnd::TwoYear, "test").unwrap();
        assert_eq!(frame.len(), 4);
        assert!(frame.dropped.is_empty());
        assert!(frame.rows.iter().all(|r| r.get(Maturity::TenYear) == 4.5));
    }

    #[test]
    fn missing_maturity_is_data_unavailable() {
        let mut obs = Vec::new();
        obs.extend(complete(Maturity::TwoYear, &[0, 1], 4.0));
        obs.extend(complete(Maturity::FiveYear, &[0, 1], 4.2));
        obs.extend(complete(Maturity::TenYear, &[0, 1], 4.5));
        // 30Y only has a weekend print and a NaN.
        obs.push(YieldObservation::new(day(5), Maturity::ThirtyYear, 4.8));
        obs.push(YieldObservation::new(day(1), Maturity::ThirtyYear, f64::NAN));

        let err = align_frame(&obs, JoinPolicy::Union, ShortEnd::TwoYear, "test").unwrap_err();
        assert!(matches!(
            err,
            DataError::DataUnavailable { maturity: Maturity::ThirtyYear, .. }
        ));
    }

    #[test]
    fn disjoint_intersection_is_empty_not_error() {
        let mut obs = Vec::new();
        obs.extend(complete(Maturity::TwoYear, &[0], 4.0));
        obs.extend(complete(Maturity::FiveYear, &[1], 4.2));
        obs.extend(complete(Maturity::TenYear, &[2], 4.5));
        obs.extend(complete(Maturity::ThirtyYear, &[3], 4.8));

        let frame = align_frame(&obs, JoinPolicy::Intersection, ShortEnd::ShortRateProxy, "test").unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame.short_end, ShortEnd::ShortRateProxy);
    }

    fn sparse_observations() -> impl Strategy<Value = Vec<YieldObservation>> {
        let per_maturity = prop::collection::vec((0i64..40, 0.0f64..8.0), 1..30);
        (per_maturity.clone(), per_maturity.clone(), per_maturity.clone(), per_maturity).prop_map(
            |(a, b, c, d)| {
                let mut out = Vec::new();
                for (m, pts) in Maturity::ALL.iter().zip([a, b, c, d]) {
                    // Keep at least one weekday print per maturity.
                    out.push(YieldObservation::new(day(0), *m, 4.0));
                    out.extend(pts.into_iter().map(|(d, y)| YieldObservation::new(day(d), *m, y)));
                }
                out
            },
        )
    }

    proptest! {
        #[test]
        fn union_frame_is_complete_and_ordered(obs in sparse_observations()) {
            let frame = align_frame(&obs, JoinPolicy::Union, ShortEnd::TwoYear, "test").unwrap();

            let expected: BTreeSet<NaiveDate> = obs
                .iter()
                .map(|o| o.date)
                .filter(|d| is_business_day(*d))
                .collect();
            prop_assert_eq!(frame.len(), expected.len());
            prop_assert!(frame.dropped.is_empty());
            prop_assert!(frame.rows.windows(2).all(|w| w[0].date < w[1].date));
            for row in &frame.rows {
                prop_assert!(is_business_day(row.date));
                for m in Maturity::ALL {
                    prop_assert!(row.get(m).is_finite());
                }
            }
        }
    }
}
