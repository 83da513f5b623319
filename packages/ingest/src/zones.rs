//! Ward boundary loading: geometry repair and name resolution.
//!
//! Source data is an OSM extract, so geometries arrive with the usual
//! defects (self-intersecting rings, degenerate parts) and many features
//! have no `name` property at all. Every feature either becomes a valid,
//! uniquely named [`Zone`] or a [`SkippedZone`] carrying the reason; a bad
//! feature never aborts the load.

use std::collections::HashSet;
use std::path::Path;

use geo::orient::{Direction, Orient};
use geo::{BooleanOps, MultiPolygon, Validation};
use thiserror::Error;

use crate::IngestError;

/// An administrative zone with a repaired geometry and a unique name.
#[derive(Debug, Clone)]
pub struct Zone {
    /// Unique, non-empty identifier.
    pub name: String,
    /// Valid polygon geometry in geographic WGS84 coordinates.
    pub geometry: MultiPolygon<f64>,
}

/// Why a feature was excluded from the output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The feature carried no geometry at all.
    #[error("feature has no geometry")]
    MissingGeometry,

    /// The geometry parsed but was not polygonal.
    #[error("unsupported geometry type {0}")]
    UnsupportedGeometry(String),

    /// The geometry could not be parsed.
    #[error("unparseable geometry: {0}")]
    Unparseable(String),

    /// Repair produced an empty or still-invalid geometry.
    #[error("geometry could not be repaired")]
    Unrepairable,
}

/// A feature dropped during loading, identified by its positional index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedZone {
    /// Zero-based index of the feature in the input collection.
    pub index: usize,
    /// Why it was dropped.
    pub reason: SkipReason,
}

/// Result of loading the ward layer: retained zones in input order plus
/// the features that had to be dropped.
#[derive(Debug)]
pub struct ZoneLoad {
    /// Zones with valid geometry and unique names, input order preserved.
    pub zones: Vec<Zone>,
    /// Features excluded from the output.
    pub skipped: Vec<SkippedZone>,
}

/// Loads the ward boundary FeatureCollection.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a GeoJSON
/// FeatureCollection. Individual bad features are skipped, not fatal.
pub fn load_zones(path: &Path) -> Result<ZoneLoad, IngestError> {
    let collection = crate::read_feature_collection(path)?;
    Ok(zones_from_features(collection.features))
}

/// Converts raw features into zones, repairing geometry and resolving
/// names in input order.
fn zones_from_features(features: Vec<geojson::Feature>) -> ZoneLoad {
    let mut zones: Vec<Zone> = Vec::with_capacity(features.len());
    let mut skipped = Vec::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    for (index, feature) in features.into_iter().enumerate() {
        match feature_geometry(&feature) {
            Ok(geometry) => {
                let name = unique_name(resolve_name(&feature, index), index, &mut seen_names);
                zones.push(Zone { name, geometry });
            }
            Err(reason) => {
                log::warn!("Skipped ward feature {index}: {reason}");
                skipped.push(SkippedZone { index, reason });
            }
        }
    }

    ZoneLoad { zones, skipped }
}

/// Extracts and repairs the polygonal geometry of one feature.
fn feature_geometry(feature: &geojson::Feature) -> Result<MultiPolygon<f64>, SkipReason> {
    let Some(geometry) = feature.geometry.clone() else {
        return Err(SkipReason::MissingGeometry);
    };
    let parsed: geo::Geometry<f64> = geometry
        .try_into()
        .map_err(|e: geojson::Error| SkipReason::Unparseable(e.to_string()))?;
    let multi = match parsed {
        geo::Geometry::Polygon(polygon) => MultiPolygon::new(vec![polygon]),
        geo::Geometry::MultiPolygon(multi) => multi,
        other => {
            return Err(SkipReason::UnsupportedGeometry(
                geometry_type_name(&other).to_string(),
            ));
        }
    };
    make_valid(multi)
}

/// Deterministic make-valid: fix ring orientation, then re-noodle any
/// remaining self-intersections through a boolean union with the empty
/// set, which splits crossing rings into their valid covering.
fn make_valid(shape: MultiPolygon<f64>) -> Result<MultiPolygon<f64>, SkipReason> {
    let oriented = shape.orient(Direction::Default);
    if oriented.is_valid() {
        return Ok(oriented);
    }
    let repaired = oriented.union(&MultiPolygon::new(Vec::new()));
    if repaired.0.is_empty() || !repaired.is_valid() {
        return Err(SkipReason::Unrepairable);
    }
    Ok(repaired)
}

/// Disambiguates a resolved name against every name taken so far. The
/// first collision gets the positional index suffixed; if that name is
/// itself already taken, a counter keeps bumping until one is free.
fn unique_name(resolved: String, index: usize, seen: &mut HashSet<String>) -> String {
    if seen.insert(resolved.clone()) {
        return resolved;
    }
    let mut candidate = format!("{resolved}_{index}");
    let mut bump = 1_usize;
    while !seen.insert(candidate.clone()) {
        bump += 1;
        candidate = format!("{resolved}_{index}_{bump}");
    }
    candidate
}

/// Resolves the zone name: existing `name` property, else the number from
/// an OSM-style `@id` (`relation/3538431` becomes `Ward_3538431`), else
/// the positional index.
fn resolve_name(feature: &geojson::Feature, index: usize) -> String {
    if let Some(name) = crate::string_property(feature, "name") {
        return name;
    }
    if let Some(osm_id) = crate::string_property(feature, "@id") {
        if let Some((_, number)) = osm_id.rsplit_once('/') {
            return format!("Ward_{number}");
        }
    }
    format!("Ward_{index}")
}

const fn geometry_type_name(geometry: &geo::Geometry<f64>) -> &'static str {
    match geometry {
        geo::Geometry::Point(_) => "Point",
        geo::Geometry::Line(_) => "Line",
        geo::Geometry::LineString(_) => "LineString",
        geo::Geometry::Polygon(_) => "Polygon",
        geo::Geometry::MultiPoint(_) => "MultiPoint",
        geo::Geometry::MultiLineString(_) => "MultiLineString",
        geo::Geometry::MultiPolygon(_) => "MultiPolygon",
        geo::Geometry::GeometryCollection(_) => "GeometryCollection",
        geo::Geometry::Rect(_) => "Rect",
        geo::Geometry::Triangle(_) => "Triangle",
    }
}
