//! Formatted terminal output.
//!
//! Yields are printed in percent; spreads are converted to basis points here
//! and nowhere else.

use crate::app::pipeline::RunOutput;
use crate::domain::{AnalysisConfig, InversionRun, Maturity, ShortEnd};

/// Percentage points to basis points.
pub fn to_bp(pct: f64) -> f64 {
    pct * 100.0
}

/// Format the full run summary.
pub fn format_run_summary(run: &RunOutput, config: &AnalysisConfig) -> String {
    let mut out = String::new();

    out.push_str("=== yc - Treasury 2s10s Inversion Report ===\n");
    out.push_str(&format!("Source: {}\n", run.provenance.source));
    if run.provenance.simulated {
        out.push_str("WARNING: simulated data in use; levels are illustrative only.\n");
    }
    if let Some(reason) = &run.provenance.fallback_reason {
        out.push_str(&format!("  (primary source failed: {reason})\n"));
    }

    let (Some(first), Some(last), Some(stats)) = (run.frame.first_date(), run.frame.last(), run.stats) else {
        out.push_str("No aligned observations in the requested window; nothing to report.\n");
        return out;
    };

    out.push_str(&format!(
        "Period: {} to {} | observations={}",
        first,
        last.date,
        run.frame.len()
    ));
    if !run.frame.dropped.is_empty() {
        out.push_str(&format!(" | dropped={}", run.frame.dropped.len()));
    }
    out.push('\n');
    out.push_str(&format!("2Y basis: {}\n", two_year_basis(run.frame.short_end, config)));

    out.push_str(&format!("\nCurrent yield levels ({}):\n", last.date));
    for m in Maturity::ALL {
        let value = match (m, run.spreads.last()) {
            (Maturity::TwoYear, Some(p)) => p.two_year,
            _ => last.get(m),
        };
        out.push_str(&format!("  {:<4} {:>6.2}%\n", m.label(), value));
    }

    out.push_str("\nSpread analysis (bp):\n");
    let status = if stats.current < 0.0 { "INVERTED" } else { "normal" };
    out.push_str(&format!("  Current 2s10s : {:>8.1} ({status})\n", to_bp(stats.current)));
    out.push_str(&format!("  Average       : {:>8.1}\n", to_bp(stats.mean)));
    out.push_str(&format!("  Maximum       : {:>8.1}\n", to_bp(stats.max)));
    out.push_str(&format!("  Minimum       : {:>8.1}\n", to_bp(stats.min)));
    out.push_str(&format!("  Std dev       : {:>8.1}\n", to_bp(stats.std_dev)));
    if let Some(p) = run.spreads.last() {
        out.push_str(&format!("  Current 5s30s : {:>8.1}\n", to_bp(p.spread_5s30s)));
    }

    out.push('\n');
    out.push_str(&format_runs(&run.runs));

    out
}

fn two_year_basis(short_end: ShortEnd, config: &AnalysisConfig) -> String {
    match short_end {
        ShortEnd::TwoYear => "observed".to_string(),
        ShortEnd::ShortRateProxy => format!(
            "interpolated: short + {:.2} x (5Y - short)",
            config.two_year.weight
        ),
    }
}

/// Format the inversion run table.
pub fn format_runs(runs: &[InversionRun]) -> String {
    let mut out = String::new();

    if runs.is_empty() {
        out.push_str("No yield curve inversions detected in this period.\n");
        return out;
    }

    out.push_str(&format!("Inversion periods (2s10s < 0): {}\n", runs.len()));
    out.push_str(
        format!(
            "{:>3} {:<10} {:<10} {:>5} {:>9} {:>12}\n",
            "#", "start", "end", "obs", "cal_days", "deepest_bp"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<3} {:-<10} {:-<10} {:-<5} {:-<9} {:-<12}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (i, r) in runs.iter().enumerate() {
        out.push_str(
            format!(
                "{:>3} {:<10} {:<10} {:>5} {:>9} {:>12.1}\n",
                i + 1,
                r.start_date,
                r.end_date,
                r.duration,
                r.calendar_span_days(),
                to_bp(r.deepest),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}
