//! Yield sources.
//!
//! Every source implements [`YieldSource`]; the pipeline never knows whether the
//! observations came over HTTP or from the simulator.

pub mod fred;
pub mod sample;

pub use fred::FredClient;
pub use sample::SimulatedSource;

use tracing::{debug, info};

use crate::domain::{DateWindow, Maturity, ShortEnd, YieldObservation};
use crate::error::DataError;

pub trait YieldSource {
    /// Short human-readable provider name (used in logs and the report).
    fn name(&self) -> &str;

    /// Whether the data is synthetic (the report warns about it).
    fn is_simulated(&self) -> bool {
        false
    }

    /// What this source's 2Y slot holds.
    fn short_end(&self) -> ShortEnd;

    /// Observations for one maturity within `window`, in any order.
    fn fetch(&self, maturity: Maturity, window: &DateWindow) -> Result<Vec<YieldObservation>, DataError>;
}

/// Fetch every tracked maturity.
///
/// Fails on the first maturity that errors or comes back empty, so callers
/// either get a complete dataset or nothing.
pub fn fetch_all(source: &dyn YieldSource, window: &DateWindow) -> Result<Vec<YieldObservation>, DataError> {
    info!(
        source = source.name(),
        start = %window.start,
        end = %window.end,
        "fetching treasury yields"
    );

    let mut out = Vec::new();
    for maturity in Maturity::ALL {
        let obs = source.fetch(maturity, window)?;
        if obs.is_empty() {
            return Err(DataError::data_unavailable(
                source.name(),
                maturity,
                "no observations in the requested window",
            ));
        }
        debug!(source = source.name(), %maturity, points = obs.len(), "fetched series");
        out.extend(obs);
    }
    Ok(out)
}
