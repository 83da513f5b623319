#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! JSON response types for the ward air-quality dashboard API.
//!
//! These types shape the REST payloads consumed by the dashboard front
//! end. They are separate from the artifact row type so the API contract
//! can evolve independently of the persisted file.

use aqi_map_pipeline_models::{AqiCategory, FinalZoneRecord, SourceClass};
use serde::{Deserialize, Serialize};

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Always true when the server can respond.
    pub healthy: bool,
    /// Crate version.
    pub version: String,
}

/// Alert severity bands for the dashboard feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// AQI of 300 and above.
    Critical,
    /// AQI of 200 and above.
    Warning,
    /// Everything below the warning threshold.
    Emerging,
}

impl AlertSeverity {
    /// Classifies a ward's mean AQI into an alert severity.
    #[must_use]
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi >= 300.0 {
            Self::Critical
        } else if aqi >= 200.0 {
            Self::Warning
        } else {
            Self::Emerging
        }
    }
}

/// Human-readable alert type shown next to the severity badge.
#[must_use]
pub fn alert_type(aqi: f64) -> &'static str {
    if aqi >= 300.0 {
        "Emergency"
    } else if aqi >= 200.0 {
        "Forecast Alert"
    } else {
        "Hotspot Detected"
    }
}

/// One dashboard alert derived from a worst-ranked ward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAlert {
    /// Stable identifier within this response (rank order).
    pub id: usize,
    /// Severity band.
    pub severity: AlertSeverity,
    /// Ward name.
    pub ward: String,
    /// Ward mean AQI, rounded down.
    pub aqi: i64,
    /// Alert type label.
    #[serde(rename = "type")]
    pub alert_type: String,
}

/// City-wide key performance indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKpis {
    /// Mean AQI across all named wards.
    pub city_aqi: i64,
    /// Highest ward mean AQI.
    pub worst_ward: i64,
    /// Number of wards at or above the warning threshold (200).
    pub critical_count: usize,
    /// Signed percentage comparing the last seven days of readings to the
    /// full history, e.g. `+12%`.
    pub trend: String,
}

/// Daily city mean AQI series over trailing windows, for the trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiTrendData {
    /// Trailing 7 days, oldest date first.
    #[serde(rename = "7days")]
    pub seven_days: Vec<i64>,
    /// Trailing 30 days, oldest date first.
    #[serde(rename = "30days")]
    pub thirty_days: Vec<i64>,
    /// Trailing 90 days, oldest date first.
    #[serde(rename = "90days")]
    pub ninety_days: Vec<i64>,
}

/// One row of the ranked ward-risk table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiWardRisk {
    /// 1-based rank, worst first.
    pub rank: usize,
    /// Ward name.
    pub ward: String,
    /// Ward mean AQI, rounded down.
    pub aqi: i64,
    /// Dominant particulate size class.
    pub pollutant: String,
    /// Dominant-source classification.
    pub source: SourceClass,
    /// AQI category band.
    pub status: AqiCategory,
}

/// Ward counts per AQI category band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCitySummary {
    /// AQI up to 50.
    pub good: usize,
    /// AQI 51-100.
    pub moderate: usize,
    /// AQI 101-200.
    pub unhealthy: usize,
    /// AQI 201-300.
    pub very_unhealthy: usize,
    /// AQI above 300.
    pub hazardous: usize,
}

/// `GET /api/dashboard` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDashboard {
    /// Top worst-ward alerts.
    pub alerts: Vec<ApiAlert>,
    /// City-wide KPIs.
    pub kpis: ApiKpis,
    /// Daily mean AQI series for the trend chart.
    pub trend_data: ApiTrendData,
    /// Ranked ward-risk table.
    pub ward_risks: Vec<ApiWardRisk>,
    /// Category histogram.
    pub city_summary: ApiCitySummary,
    /// ISO 8601 timestamp of this response.
    pub last_updated: String,
}

/// `GET /api/wards` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiWards {
    /// Ward records for map rendering.
    pub wards: Vec<FinalZoneRecord>,
    /// Number of wards returned.
    pub count: usize,
}
