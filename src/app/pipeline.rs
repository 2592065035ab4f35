//! Shared analysis pipeline.
//!
//! Keeping this in one place keeps the workflow readable:
//! fetch -> align/fill -> spreads -> inversion runs -> stats
//!
//! Source selection (real vs simulated) is explicit: the caller passes the
//! primary source and, optionally, a fallback.

use tracing::{info, warn};

use crate::analysis::{align_frame, compute_spreads, detect_runs, spread_stats};
use crate::data::{YieldSource, fetch_all};
use crate::domain::{AlignedFrame, DateWindow, InversionRun, JoinPolicy, SpreadSeries, SpreadStats, TwoYearPolicy};
use crate::error::DataError;

/// Where the analysed data came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    pub source: String,
    pub simulated: bool,
    /// Why the primary source was abandoned, if it was.
    pub fallback_reason: Option<String>,
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub provenance: Provenance,
    pub frame: AlignedFrame,
    pub spreads: SpreadSeries,
    pub runs: Vec<InversionRun>,
    pub stats: Option<SpreadStats>,
}

/// Fetch every maturity from `source` and align the result.
///
/// A window without business days has nothing to fetch and yields an empty frame.
pub fn load_frame(source: &dyn YieldSource, window: &DateWindow, join: JoinPolicy) -> Result<AlignedFrame, DataError> {
    if window.business_days().is_empty() {
        warn!(start = %window.start, end = %window.end, "window has no business days");
        return Ok(AlignedFrame {
            rows: Vec::new(),
            short_end: source.short_end(),
            dropped: Vec::new(),
        });
    }

    let observations = fetch_all(source, window)?;
    let frame = align_frame(&observations, join, source.short_end(), source.name())?;
    info!(
        source = source.name(),
        observations = observations.len(),
        days = frame.len(),
        dropped = frame.dropped.len(),
        "aligned yield frame"
    );
    Ok(frame)
}

/// Load from `primary`, switching to `fallback` (when given) if it fails.
pub fn acquire_frame(
    primary: &dyn YieldSource,
    fallback: Option<&dyn YieldSource>,
    window: &DateWindow,
    join: JoinPolicy,
) -> Result<(AlignedFrame, Provenance), DataError> {
    match load_frame(primary, window, join) {
        Ok(frame) => Ok((
            frame,
            Provenance {
                source: primary.name().to_string(),
                simulated: primary.is_simulated(),
                fallback_reason: None,
            },
        )),
        Err(err) => recover(err, fallback, window, join),
    }
}

/// Handle a failed primary source: switch to `fallback`, or hand the error back.
///
/// Also used when the primary source could not be constructed at all.
pub fn recover(
    err: DataError,
    fallback: Option<&dyn YieldSource>,
    window: &DateWindow,
    join: JoinPolicy,
) -> Result<(AlignedFrame, Provenance), DataError> {
    let Some(fallback) = fallback else {
        return Err(err);
    };
    warn!(error = %err, fallback = fallback.name(), "primary source failed, using fallback");
    let frame = load_frame(fallback, window, join)?;
    Ok((
        frame,
        Provenance {
            source: fallback.name().to_string(),
            simulated: fallback.is_simulated(),
            fallback_reason: Some(err.to_string()),
        },
    ))
}

/// Run the pure analysis stages on an aligned frame.
pub fn analyze(frame: AlignedFrame, provenance: Provenance, policy: &TwoYearPolicy) -> RunOutput {
    let spreads = compute_spreads(&frame, policy);
    let runs = detect_runs(&spreads);
    let stats = spread_stats(&spreads);

    if spreads.is_empty() {
        warn!("no aligned observations; report will be empty");
    }
    info!(days = spreads.len(), inversions = runs.len(), "detected inversion runs");

    RunOutput {
        provenance,
        frame,
        spreads,
        runs,
        stats,
    }
}
