//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - picks the yield source (FRED, or simulated data on request/failure)
//! - runs the analysis pipeline
//! - prints the report and terminal plot
//! - writes charts and the optional export

use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::data::{FredClient, SimulatedSource, YieldSource};
use crate::domain::{AnalysisConfig, DateWindow, SeriesMap, SimulationParams, TwoYearPolicy};
use crate::error::AppError;

pub mod pipeline;

use pipeline::RunOutput;

/// Entry point for the `yc` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config_from_args(&cli, Local::now().date_naive())?;
    let run = run_analysis(&config)?;

    println!("{}", crate::report::format_run_summary(&run, &config));

    if config.plot {
        println!(
            "{}",
            crate::plot::render_spread_plot(&run.spreads, config.plot_width, config.plot_height)
        );
    }

    if let Some(dir) = &config.chart_dir {
        for path in crate::plot::write_charts(dir, &run.frame, &run.spreads, &run.runs)? {
            println!("Chart written: {}", path.display());
        }
    }
    if let Some(path) = &config.export {
        crate::io::write_spreads_csv(path, &run.frame, &run.spreads)?;
        println!("Export written: {}", path.display());
    }

    Ok(())
}

/// Logs go to stderr so stdout stays the report. `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

/// Acquire data for `config` and run every analysis stage.
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let simulated = SimulatedSource::new(config.simulation);

    let (frame, provenance) = if config.simulate {
        info!("simulated data requested");
        pipeline::acquire_frame(&simulated, None, &config.window, config.join)?
    } else {
        let fallback = config.fallback.then_some(&simulated as &dyn YieldSource);
        let timeout = Duration::from_secs(config.timeout_secs);
        match FredClient::from_env(config.series.clone(), config.short_end, timeout) {
            Ok(fred) => pipeline::acquire_frame(&fred, fallback, &config.window, config.join)?,
            Err(err) => pipeline::recover(err, fallback, &config.window, config.join)?,
        }
    };

    Ok(pipeline::analyze(frame, provenance, &config.two_year))
}

/// Map parsed flags onto the pipeline configuration.
///
/// `today` anchors the default window.
pub fn config_from_args(args: &Cli, today: NaiveDate) -> Result<AnalysisConfig, AppError> {
    let end = args.end.unwrap_or(today);
    let window = match args.start {
        Some(start) => DateWindow::new(start, end)
            .ok_or_else(|| AppError::new(2, format!("Invalid window: start {start} is after end {end}")))?,
        None => DateWindow::trailing_year(end),
    };

    let two_year = TwoYearPolicy::new(args.weight)
        .ok_or_else(|| AppError::new(2, format!("Invalid --weight {}: expected a value in [0, 1]", args.weight)))?;

    Ok(AnalysisConfig {
        window,
        join: args.join,
        two_year,
        series: SeriesMap {
            two_year: args.short_series.clone(),
            five_year: args.five_series.clone(),
            ten_year: args.ten_series.clone(),
            thirty_year: args.thirty_series.clone(),
        },
        short_end: args.short_end,
        timeout_secs: args.timeout_secs,
        simulate: args.simulate,
        fallback: !args.no_fallback,
        simulation: SimulationParams {
            seed: args.seed,
            ..SimulationParams::default()
        },
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        chart_dir: (!args.no_charts).then(|| args.out_dir.clone()),
        export: args.export.clone(),
    })
}
