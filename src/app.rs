//! Top-level application orchestration.
//!
//! `src/main.rs` is tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - runs the comparison pipeline
//! - prints reports/plots

use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::cli::{Command, CompareArgs, InspectArgs};
use crate::domain::CompareConfig;
use crate::error::AppError;

pub mod pipeline;

/// Modeled/observed pair used by `hydrocomp sample`.
const SAMPLE_MODELED: [f64; 5] = [55.5, 62.1, 65.3, 64.4, 61.2];
const SAMPLE_OBSERVED: [f64; 5] = [55.7, 62.0, 65.5, 64.7, 61.1];

/// Entry point for the `hydrocomp` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Compare(args) => handle_compare(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Sample => handle_sample(),
    }
}

/// Logs go to stderr so stdout carries only reports.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // Already set when embedded in another subscriber-owning process.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let config = compare_config_from_args(&args);
    let run = pipeline::run_compare(&config)?;

    if config.json {
        println!("{}", crate::report::comparison_to_json(&run.result)?);
        return Ok(());
    }

    println!("{}", crate::report::format_comparison_summary(&run.result));

    if config.plot {
        println!(
            "{}",
            crate::plot::render_comparison_plot(&run.result, config.plot_width, config.plot_height)
        );
        for series in crate::report::stat_series(&run.result) {
            println!(
                "{}",
                crate::plot::render_stat_plot(
                    series.label,
                    &run.result.dates,
                    series.values,
                    config.plot_width,
                    config.plot_height,
                )
            );
        }
    }

    Ok(())
}

fn handle_inspect(args: InspectArgs) -> Result<(), AppError> {
    if let Some(path) = &args.observed {
        let data = crate::io::read_nwis(path)?;
        print!("{}", crate::report::format_nwis_summary(&data));
    }
    if let Some(path) = &args.model {
        let data = crate::io::read_water(path)?;
        print!("{}", crate::report::format_water_summary(&data));
    }
    Ok(())
}

fn handle_sample() -> Result<(), AppError> {
    print!(
        "{}",
        crate::report::format_sample_statistics(&SAMPLE_MODELED, &SAMPLE_OBSERVED)
    );
    Ok(())
}

pub fn compare_config_from_args(args: &CompareArgs) -> CompareConfig {
    CompareConfig {
        observed_path: args.observed.clone(),
        model_path: args.model.clone(),
        parameter: args.parameter.clone(),
        observed_name: args.observed_name.clone(),
        model_name: args.model_name.clone(),
        start: args.start,
        end: args.end,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        json: args.json,
    }
}
