#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the dashboard API server.
//!
//! Configuration comes from the environment: `AQI_MAP_ARTIFACT` and
//! `AQI_MAP_READINGS` for the input paths, `BIND_ADDR` and `PORT` for
//! the listen address.

use std::path::PathBuf;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let artifact = std::env::var("AQI_MAP_ARTIFACT")
        .map_or_else(|_| PathBuf::from("data/ward_level_aqi_complete.csv"), PathBuf::from);
    let readings = std::env::var("AQI_MAP_READINGS")
        .map_or_else(|_| PathBuf::from("data/aqi.csv"), PathBuf::from);
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    aqi_map_server::run_server(&artifact, &readings, &bind_addr, port).await
}
