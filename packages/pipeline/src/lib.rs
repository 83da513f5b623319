#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ward-level air-quality scoring pipeline.
//!
//! A synchronous batch job with a strict stage chain: load and repair
//! ward boundaries, aggregate sensor readings per station, assign every
//! ward its nearest station in a metric UTM plane, score traffic and
//! industrial proxies within a buffer of each ward, then merge and
//! normalize everything into one sorted CSV artifact. Each stage runs to
//! completion on immutable inputs before the next consumes its output.

pub mod artifact;
pub mod assign;
pub mod config;
pub mod merge;
pub mod project;
pub mod proxy;

use aqi_map_ingest::{IngestError, infra, sensors, zones};
use aqi_map_spatial::{FeatureGeometry, FeatureIndex, MetricProjection, ProjectionError, StationLocator};
use thiserror::Error;

pub use config::PipelineConfig;

/// Errors that can abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input layer failed to load.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Coordinate reprojection failed.
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// Path of the config file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be parsed.
    #[error("invalid config {path}: {source}")]
    Config {
        /// Path of the config file.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// No wards survived geometry repair; nothing to score.
    #[error("no wards remained after geometry repair")]
    NoZones,

    /// The sensor data produced no stations; assignment is impossible.
    #[error("station set is empty; at least one sensor station is required")]
    NoStations,

    /// A ward's geometry was valid but too degenerate to have a centroid.
    #[error("ward {name} has a degenerate geometry")]
    DegenerateZone {
        /// Name of the offending ward.
        name: String,
    },

    /// Writing or renaming the artifact failed.
    #[error("artifact I/O error for {path}: {source}")]
    ArtifactIo {
        /// Artifact path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serializing or parsing the artifact CSV failed.
    #[error("artifact CSV error for {path}: {source}")]
    ArtifactCsv {
        /// Artifact path.
        path: String,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

/// Counters from a completed run, for logging and exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Wards scored and written to the artifact.
    pub zone_count: usize,
    /// Distinct sensor stations after aggregation.
    pub station_count: usize,
    /// Ward features dropped during geometry repair.
    pub skipped_zones: usize,
}

/// Runs the full pipeline and writes the artifact.
///
/// # Errors
///
/// Returns the first error of any stage; the artifact is only renamed
/// into place after every stage has succeeded.
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary, PipelineError> {
    log::info!("Loading ward boundaries from {}", config.wards_path.display());
    let load = zones::load_zones(&config.wards_path)?;
    if !load.skipped.is_empty() {
        log::warn!("Skipped {} invalid ward features", load.skipped.len());
    }
    if load.zones.is_empty() {
        return Err(PipelineError::NoZones);
    }
    log::info!("Loaded {} wards", load.zones.len());

    log::info!(
        "Loading sensor readings from {}",
        config.readings_path.display()
    );
    let readings = sensors::load_readings(&config.readings_path)?;
    let stations = sensors::aggregate(&readings);
    if stations.is_empty() {
        return Err(PipelineError::NoStations);
    }
    log::info!(
        "Aggregated {} readings into {} stations",
        readings.len(),
        stations.len()
    );

    let projection = MetricProjection::utm(config.utm_zone)?;
    let projected_zones = project::project_zones(&load.zones, &projection)?;
    let station_points = project::project_stations(&stations, &projection)?;

    let locator = StationLocator::new(&station_points);
    let centroids: Vec<_> = projected_zones.iter().map(|zone| zone.centroid).collect();
    let assignments = assign::assign_stations(&centroids, &locator)?;
    log::info!("Assigned {} wards to nearest stations", assignments.len());

    log::info!("Loading road layer from {}", config.roads_path.display());
    let roads = infra::load_roads(&config.roads_path)?;
    let road_weights = proxy::resolve_road_weights(&roads, &config.road_weights);
    let road_index = FeatureIndex::new(project_features(
        roads.iter().map(|road| &road.geometry),
        &projection,
    )?);

    log::info!(
        "Loading industrial layer from {}",
        config.industry_path.display()
    );
    let industry = infra::load_industry(&config.industry_path)?;
    let industry_index = FeatureIndex::new(project_features(
        industry.iter().map(|site| &site.geometry),
        &projection,
    )?);

    let scores = proxy::score_zones(
        &projected_zones,
        &road_index,
        &road_weights,
        &industry_index,
        config.buffer_meters,
    );

    let records = merge::merge_records(&projected_zones, &stations, &assignments, &scores);
    artifact::write_artifact(&config.artifact_path, &records)?;
    log::info!(
        "Wrote {} ward records to {}",
        records.len(),
        config.artifact_path.display()
    );

    Ok(PipelineSummary {
        zone_count: records.len(),
        station_count: stations.len(),
        skipped_zones: load.skipped.len(),
    })
}

/// Projects infrastructure geometries and flattens them for indexing.
/// Unsupported geometry types become empty placeholders so feature
/// indices keep lining up with their weights.
fn project_features<'a>(
    geometries: impl Iterator<Item = &'a geo::Geometry<f64>>,
    projection: &MetricProjection,
) -> Result<Vec<FeatureGeometry>, PipelineError> {
    geometries
        .map(|geometry| {
            let projected = projection.project_geometry(geometry)?;
            Ok(FeatureGeometry::from_geometry(&projected)
                .unwrap_or_else(|| FeatureGeometry::Points(Vec::new())))
        })
        .collect()
}
