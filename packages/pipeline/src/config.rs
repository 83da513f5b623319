//! Pipeline configuration with deployment-tunable scoring constants.
//!
//! The defaults reproduce the documented Delhi deployment: a 2000 m
//! scoring buffer, UTM zone 43N as the metric plane, and the standard
//! road-class weight table. A TOML file can override any subset.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::PipelineError;

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Ward boundary GeoJSON (FeatureCollection of polygons).
    pub wards_path: PathBuf,
    /// Raw sensor readings CSV.
    pub readings_path: PathBuf,
    /// Road network GeoJSON with a `highway` class property.
    pub roads_path: PathBuf,
    /// Industrial site GeoJSON.
    pub industry_path: PathBuf,
    /// Output artifact CSV.
    pub artifact_path: PathBuf,
    /// Outward buffer around each ward when scoring proxies, meters.
    pub buffer_meters: f64,
    /// Northern-hemisphere UTM zone used as the metric plane.
    pub utm_zone: u8,
    /// Road class to weight table for the traffic proxy; unlisted classes
    /// weigh 0.
    pub road_weights: BTreeMap<String, f64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            wards_path: PathBuf::from("data/delhi_wards.geojson"),
            readings_path: PathBuf::from("data/aqi.csv"),
            roads_path: PathBuf::from("data/traffic.geojson"),
            industry_path: PathBuf::from("data/industry.geojson"),
            artifact_path: PathBuf::from("data/ward_level_aqi_complete.csv"),
            buffer_meters: 2000.0,
            utm_zone: 43,
            road_weights: default_road_weights(),
        }
    }
}

impl PipelineConfig {
    /// Loads configuration from a TOML file, with defaults for anything
    /// not specified.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| PipelineError::Config {
            path: path.display().to_string(),
            source,
        })
    }
}

fn default_road_weights() -> BTreeMap<String, f64> {
    [
        ("motorway", 3.0),
        ("motorway_link", 3.0),
        ("trunk", 3.0),
        ("trunk_link", 3.0),
        ("primary", 2.0),
        ("primary_link", 2.0),
        ("secondary", 1.0),
        ("secondary_link", 1.0),
        ("tertiary", 1.0),
        ("tertiary_link", 1.0),
    ]
    .into_iter()
    .map(|(class, weight)| (class.to_string(), weight))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_deployment() {
        let config = PipelineConfig::default();
        assert!((config.buffer_meters - 2000.0).abs() < f64::EPSILON);
        assert_eq!(config.utm_zone, 43);
        assert_eq!(config.road_weights.get("motorway"), Some(&3.0));
        assert_eq!(config.road_weights.get("primary_link"), Some(&2.0));
        assert_eq!(config.road_weights.get("tertiary"), Some(&1.0));
        assert_eq!(config.road_weights.get("residential"), None);
    }

    #[test]
    fn partial_toml_overrides_keep_remaining_defaults() {
        let config: PipelineConfig = toml::from_str(
            r#"
            buffer_meters = 500.0
            artifact_path = "out/scores.csv"
            "#,
        )
        .unwrap();
        assert!((config.buffer_meters - 500.0).abs() < f64::EPSILON);
        assert_eq!(config.artifact_path, PathBuf::from("out/scores.csv"));
        assert_eq!(config.utm_zone, 43);
        assert_eq!(config.road_weights.len(), 10);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: Result<PipelineConfig, _> = toml::from_str("buffer_metres = 1.0");
        assert!(parsed.is_err());
    }

    #[test]
    fn weight_table_can_be_replaced() {
        let config: PipelineConfig = toml::from_str(
            r#"
            [road_weights]
            motorway = 5.0
            "#,
        )
        .unwrap();
        assert_eq!(config.road_weights.len(), 1);
        assert_eq!(config.road_weights.get("motorway"), Some(&5.0));
    }
}
