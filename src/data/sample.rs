//! Deterministic simulated Treasury yields.
//!
//! Used when the real source is unavailable (or on request). The panel is a
//! seeded random walk on the 10Y with noisy offsets for the other maturities,
//! so the same window and parameters always produce the same data.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::YieldSource;
use crate::domain::{DateWindow, Maturity, ShortEnd, SimulationParams, YieldObservation, YieldRow};
use crate::error::DataError;

const PROVIDER: &str = "simulated";

pub struct SimulatedSource {
    params: SimulationParams,
}

impl SimulatedSource {
    pub fn new(params: SimulationParams) -> Self {
        Self { params }
    }

    /// Generate the full panel (one row per business day of the window).
    pub fn generate(&self, window: &DateWindow) -> Result<Vec<YieldRow>, DataError> {
        let p = &self.params;
        validate(p)?;
        let step = Normal::new(0.0, p.daily_vol).map_err(|e| invalid(format!("invalid daily_vol: {e}")))?;
        let shape = Normal::new(0.0, p.shape_noise).map_err(|e| invalid(format!("invalid shape_noise: {e}")))?;

        let mut rng = StdRng::seed_from_u64(p.seed);
        let mut ten = p.base_ten_year;

        let rows = window
            .business_days()
            .into_iter()
            .map(|date| {
                ten = (ten + step.sample(&mut rng)).clamp(p.floor, p.cap);
                let five = ten - p.five_below_ten + shape.sample(&mut rng);
                let two = five - p.two_below_five + shape.sample(&mut rng);
                let thirty = ten + p.thirty_above_ten + shape.sample(&mut rng);
                YieldRow::new(date, two, five, ten, thirty)
            })
            .collect();

        Ok(rows)
    }
}

fn invalid(reason: String) -> DataError {
    DataError::ProviderUnavailable {
        provider: PROVIDER.to_string(),
        reason,
    }
}

// `Normal::new` accepts a negative std dev, so scales are checked here.
fn validate(p: &SimulationParams) -> Result<(), DataError> {
    for (what, v) in [("daily_vol", p.daily_vol), ("shape_noise", p.shape_noise)] {
        if !v.is_finite() || v < 0.0 {
            return Err(invalid(format!("invalid {what}: {v} (expected a finite value >= 0)")));
        }
    }
    if p.floor.is_nan() || p.cap.is_nan() || p.floor > p.cap {
        return Err(invalid(format!("invalid bounds: floor {} above cap {}", p.floor, p.cap)));
    }
    Ok(())
}

impl YieldSource for SimulatedSource {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn is_simulated(&self) -> bool {
        true
    }

    // The simulated panel models a true 2-year yield.
    fn short_end(&self) -> ShortEnd {
        ShortEnd::TwoYear
    }

    fn fetch(&self, maturity: Maturity, window: &DateWindow) -> Result<Vec<YieldObservation>, DataError> {
        Ok(self
            .generate(window)?
            .into_iter()
            .map(|row| YieldObservation::new(row.date, maturity, row.get(maturity)))
            .collect())
    }
}
