//! Projection of zones and stations into the metric plane.

use aqi_map_ingest::sensors::StationAggregate;
use aqi_map_ingest::zones::Zone;
use aqi_map_spatial::MetricProjection;
use geo::{Area, Centroid, MultiPolygon, Point};

use crate::PipelineError;

/// A zone carried through the pipeline in projected (meters) space.
#[derive(Debug, Clone)]
pub struct ProjectedZone {
    /// Unique ward identifier.
    pub name: String,
    /// Geometry in UTM meters.
    pub geometry: MultiPolygon<f64>,
    /// Projected geographic centroid, UTM meters.
    pub centroid: Point<f64>,
    /// Area in square kilometers, from the projected geometry.
    pub area_sqkm: f64,
}

/// Projects repaired zones into the metric plane, deriving centroid and
/// area along the way.
///
/// The centroid is computed on the geographic geometry and then projected,
/// matching the upstream dataset's published figures; the area comes from
/// the projected polygon.
///
/// # Errors
///
/// Returns an error if projection fails or a zone's geometry is too
/// degenerate to have a centroid.
pub fn project_zones(
    zones: &[Zone],
    projection: &MetricProjection,
) -> Result<Vec<ProjectedZone>, PipelineError> {
    zones
        .iter()
        .map(|zone| {
            let centroid = zone
                .geometry
                .centroid()
                .ok_or_else(|| PipelineError::DegenerateZone {
                    name: zone.name.clone(),
                })?;
            let geometry = projection.project_multi_polygon(&zone.geometry)?;
            Ok(ProjectedZone {
                name: zone.name.clone(),
                centroid: projection.project_point(centroid)?,
                area_sqkm: geometry.unsigned_area() / 1.0e6,
                geometry,
            })
        })
        .collect()
}

/// Projects station locations into the metric plane, preserving order.
///
/// # Errors
///
/// Returns an error if any station coordinate fails to project.
pub fn project_stations(
    stations: &[StationAggregate],
    projection: &MetricProjection,
) -> Result<Vec<Point<f64>>, PipelineError> {
    stations
        .iter()
        .map(|station| {
            projection
                .project_point(Point::new(station.lon, station.lat))
                .map_err(PipelineError::from)
        })
        .collect()
}
