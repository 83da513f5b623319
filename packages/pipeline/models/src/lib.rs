#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Artifact row and scoring taxonomies for the ward air-quality pipeline.
//!
//! [`FinalZoneRecord`] is the one-row-per-ward shape persisted by the
//! pipeline and consumed by the serving layer. Its serde field names are
//! the exact artifact column headers, declared in artifact column order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One fully scored ward as persisted in the output artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalZoneRecord {
    /// Unique ward identifier.
    pub name: String,
    /// Label of the assigned (nearest) monitoring station.
    pub location: String,
    /// Distance from the ward centroid to the assigned station, kilometers.
    pub distance_km: f64,
    /// Ward area in square kilometers, measured in the metric plane.
    pub area_sqkm: f64,
    /// Mean composite air-quality index at the assigned station.
    #[serde(rename = "avg_AQI")]
    pub avg_aqi: f64,
    /// Mean PM2.5 concentration at the assigned station.
    pub pm2_5: f64,
    /// Mean PM10 concentration at the assigned station.
    pub pm10: f64,
    /// Mean CO concentration at the assigned station.
    pub co: f64,
    /// Mean NO2 concentration at the assigned station.
    pub no2: f64,
    /// Raw weighted sum of road features within the scoring buffer.
    pub traffic_raw: f64,
    /// Raw count of industrial sites within the scoring buffer.
    pub industrial_count: u64,
    /// Traffic proxy normalized to 0-100 against the citywide maximum.
    pub vehicular_pct: f64,
    /// Industrial proxy normalized to 0-100 against the citywide maximum.
    pub industrial_pct: f64,
}

impl FinalZoneRecord {
    /// Dominant emission source implied by the proxy percentages.
    #[must_use]
    pub fn source_class(&self) -> SourceClass {
        if self.vehicular_pct > self.industrial_pct {
            SourceClass::Traffic
        } else if self.industrial_pct > 0.0 {
            SourceClass::Industrial
        } else {
            SourceClass::Mixed
        }
    }

    /// The particulate size class with the higher mean concentration.
    #[must_use]
    pub fn dominant_pollutant(&self) -> &'static str {
        if self.pm2_5 > self.pm10 { "PM2.5" } else { "PM10" }
    }

    /// Whether the ward name was synthesized during ingestion rather than
    /// taken from the source data.
    #[must_use]
    pub fn has_synthesized_name(&self) -> bool {
        self.name.starts_with("Ward_")
    }
}

/// AQI bands used for dashboard classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    /// AQI up to 50.
    Good,
    /// AQI 51-100.
    Moderate,
    /// AQI 101-200.
    Unhealthy,
    /// AQI 201-300.
    VeryUnhealthy,
    /// AQI above 300.
    Hazardous,
}

impl AqiCategory {
    /// Classifies a composite AQI value.
    #[must_use]
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            Self::Good
        } else if aqi <= 100.0 {
            Self::Moderate
        } else if aqi <= 200.0 {
            Self::Unhealthy
        } else if aqi <= 300.0 {
            Self::VeryUnhealthy
        } else {
            Self::Hazardous
        }
    }
}

/// Dominant-source classification consumed by the dashboard ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceClass {
    /// Road traffic dominates the proxy scores.
    Traffic,
    /// Industrial sites dominate the proxy scores.
    Industrial,
    /// Neither proxy dominates.
    Mixed,
}

impl fmt::Display for SourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Traffic => "Traffic",
            Self::Industrial => "Industrial",
            Self::Mixed => "Mixed",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vehicular_pct: f64, industrial_pct: f64) -> FinalZoneRecord {
        FinalZoneRecord {
            name: "Karol Bagh".to_string(),
            location: "ITO".to_string(),
            distance_km: 2.5,
            area_sqkm: 4.0,
            avg_aqi: 180.0,
            pm2_5: 90.0,
            pm10: 120.0,
            co: 1.1,
            no2: 40.0,
            traffic_raw: 12.0,
            industrial_count: 3,
            vehicular_pct,
            industrial_pct,
        }
    }

    #[test]
    fn traffic_dominates_when_vehicular_is_higher() {
        assert_eq!(record(60.0, 40.0).source_class(), SourceClass::Traffic);
    }

    #[test]
    fn industrial_dominates_when_nonzero_and_not_beaten() {
        assert_eq!(record(40.0, 60.0).source_class(), SourceClass::Industrial);
        assert_eq!(record(50.0, 50.0).source_class(), SourceClass::Industrial);
    }

    #[test]
    fn both_zero_is_mixed() {
        assert_eq!(record(0.0, 0.0).source_class(), SourceClass::Mixed);
    }

    #[test]
    fn aqi_band_boundaries_are_inclusive_on_the_left_band() {
        assert_eq!(AqiCategory::from_aqi(50.0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(51.0), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(200.0), AqiCategory::Unhealthy);
        assert_eq!(AqiCategory::from_aqi(300.0), AqiCategory::VeryUnhealthy);
        assert_eq!(AqiCategory::from_aqi(301.0), AqiCategory::Hazardous);
    }

    #[test]
    fn pm10_wins_the_pollutant_tie() {
        let r = record(0.0, 0.0);
        assert_eq!(r.dominant_pollutant(), "PM10");
    }

    #[test]
    fn synthesized_names_are_detected() {
        let mut r = record(0.0, 0.0);
        assert!(!r.has_synthesized_name());
        r.name = "Ward_3538431".to_string();
        assert!(r.has_synthesized_name());
    }
}
