#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Input-layer loading for the ward air-quality pipeline.
//!
//! Three loaders live here: ward boundary GeoJSON with geometry repair and
//! name resolution ([`zones`]), the raw sensor-reading CSV with per-station
//! aggregation ([`sensors`]), and the road/industrial-site GeoJSON layers
//! ([`infra`]). All geometries come out in geographic WGS84 coordinates;
//! reprojection happens downstream.

pub mod infra;
pub mod sensors;
pub mod zones;

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while loading input layers.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Reading an input file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the failing file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A CSV file could not be parsed.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// Path of the failing file.
        path: String,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A GeoJSON file could not be parsed.
    #[error("GeoJSON error in {path}: {source}")]
    GeoJson {
        /// Path of the failing file.
        path: String,
        /// Underlying GeoJSON error.
        #[source]
        source: geojson::Error,
    },

    /// The GeoJSON document was valid but not a FeatureCollection.
    #[error("{path} does not contain a FeatureCollection")]
    NotAFeatureCollection {
        /// Path of the offending file.
        path: String,
    },
}

/// Reads and parses a GeoJSON FeatureCollection from disk.
pub(crate) fn read_feature_collection(
    path: &Path,
) -> Result<geojson::FeatureCollection, IngestError> {
    let raw = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let parsed: geojson::GeoJson = raw.parse().map_err(|source| IngestError::GeoJson {
        path: path.display().to_string(),
        source,
    })?;
    match parsed {
        geojson::GeoJson::FeatureCollection(collection) => Ok(collection),
        geojson::GeoJson::Feature(_) | geojson::GeoJson::Geometry(_) => {
            Err(IngestError::NotAFeatureCollection {
                path: path.display().to_string(),
            })
        }
    }
}

/// Reads a string property from a GeoJSON feature, treating empty strings
/// as absent.
pub(crate) fn string_property(feature: &geojson::Feature, key: &str) -> Option<String> {
    feature
        .property(key)
        .and_then(serde_json::Value::as_str)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}
