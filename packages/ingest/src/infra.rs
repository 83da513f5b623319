//! Road and industrial-site layer loading.
//!
//! Both layers are plain GeoJSON FeatureCollections. Roads carry a
//! `highway` class label used by the traffic proxy's weight table;
//! industrial sites need no attributes at all. Features with missing or
//! unparseable geometry are dropped quietly; these layers are bulk OSM
//! extracts and a handful of bad rows is normal.

use std::path::Path;

use geo::Geometry;

use crate::IngestError;

/// One road feature: class label plus geometry in WGS84.
#[derive(Debug, Clone)]
pub struct RoadFeature {
    /// OSM `highway` class (`motorway`, `primary`, ...), if present.
    pub class: Option<String>,
    /// Road geometry, usually a LineString.
    pub geometry: Geometry<f64>,
}

/// One industrial site: geometry only, point or polygon.
#[derive(Debug, Clone)]
pub struct IndustrialSite {
    /// Site geometry in WGS84.
    pub geometry: Geometry<f64>,
}

/// Loads the road layer.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed as a
/// FeatureCollection.
pub fn load_roads(path: &Path) -> Result<Vec<RoadFeature>, IngestError> {
    let collection = crate::read_feature_collection(path)?;
    let mut roads = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let class = crate::string_property(&feature, "highway");
        let Some(geometry) = parse_geometry(feature, index, "road") else {
            continue;
        };
        roads.push(RoadFeature { class, geometry });
    }
    Ok(roads)
}

/// Loads the industrial-site layer.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed as a
/// FeatureCollection.
pub fn load_industry(path: &Path) -> Result<Vec<IndustrialSite>, IngestError> {
    let collection = crate::read_feature_collection(path)?;
    let mut sites = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(geometry) = parse_geometry(feature, index, "industry") else {
            continue;
        };
        sites.push(IndustrialSite { geometry });
    }
    Ok(sites)
}

fn parse_geometry(feature: geojson::Feature, index: usize, layer: &str) -> Option<Geometry<f64>> {
    let Some(geometry) = feature.geometry else {
        log::debug!("{layer} feature {index} has no geometry");
        return None;
    };
    match Geometry::<f64>::try_from(geometry) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::debug!("{layer} feature {index} has unparseable geometry: {e}");
            None
        }
    }
}
