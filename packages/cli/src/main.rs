#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the ward air-quality toolchain.
//!
//! `run` executes the scoring pipeline and writes the artifact; `serve`
//! starts the dashboard API over an existing artifact.

use std::path::PathBuf;
use std::process::ExitCode;

use aqi_map_pipeline::PipelineConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aqi-map", about = "Ward-level air-quality scoring toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the scoring pipeline and write the CSV artifact.
    Run {
        /// Path to a TOML config file; defaults are used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Serve the dashboard API from an existing artifact.
    Serve {
        /// Path to the pipeline's CSV artifact.
        #[arg(long, default_value = "data/ward_level_aqi_complete.csv")]
        artifact: PathBuf,
        /// Path to the raw sensor readings CSV, for the trend series.
        #[arg(long, default_value = "data/aqi.csv")]
        readings: PathBuf,
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on.
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
}

fn main() -> ExitCode {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    match cli.command {
        Command::Run { config } => {
            let config = match config {
                Some(path) => match PipelineConfig::load(&path) {
                    Ok(config) => config,
                    Err(e) => {
                        log::error!("{e}");
                        return ExitCode::FAILURE;
                    }
                },
                None => PipelineConfig::default(),
            };
            match aqi_map_pipeline::run(&config) {
                Ok(summary) => {
                    log::info!(
                        "Scored {} wards against {} stations ({} skipped)",
                        summary.zone_count,
                        summary.station_count,
                        summary.skipped_zones
                    );
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    log::error!("Pipeline failed: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Serve {
            artifact,
            readings,
            bind,
            port,
        } => {
            let result = actix_web::rt::System::new()
                .block_on(aqi_map_server::run_server(&artifact, &readings, &bind, port));
            match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    log::error!("Server failed: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
