#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web dashboard API server for ward air-quality scores.
//!
//! Serves the read-only REST API for the ward dashboard frontend. All
//! responses are derived from the artifact snapshot and the raw reading
//! history, both loaded once at startup; restart the server after a
//! pipeline run to pick up fresh scores.

mod handlers;
mod trend;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use aqi_map_pipeline_models::FinalZoneRecord;

pub use trend::TrendSummary;

/// Shared application state.
pub struct AppState {
    /// Artifact snapshot, loaded once at startup.
    pub snapshot: Arc<Vec<FinalZoneRecord>>,
    /// Trend payloads precomputed from the raw reading history.
    pub trend: Arc<TrendSummary>,
}

/// Starts the dashboard API server.
///
/// Loads the artifact snapshot from `artifact_path` and the raw reading
/// history from `readings_path`, then binds the Actix-Web HTTP server.
/// This is a regular async function; the caller is responsible for
/// providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an error if either input cannot be read or the server fails
/// to bind.
#[allow(clippy::future_not_send)]
pub async fn run_server(
    artifact_path: &Path,
    readings_path: &Path,
    bind_addr: &str,
    port: u16,
) -> std::io::Result<()> {
    log::info!("Loading artifact from {}", artifact_path.display());
    let records = aqi_map_pipeline::artifact::read_artifact(artifact_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    log::info!("Loaded {} ward records", records.len());

    log::info!("Loading reading history from {}", readings_path.display());
    let readings = aqi_map_ingest::sensors::load_readings(readings_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    let trend = TrendSummary::from_readings(&readings);

    let state = web::Data::new(AppState {
        snapshot: Arc::new(records),
        trend: Arc::new(trend),
    });

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/dashboard", web::get().to(handlers::dashboard))
                    .route("/wards", web::get().to(handlers::wards)),
            )
    })
    .bind((bind_addr.to_string(), port))?
    .run()
    .await
}
