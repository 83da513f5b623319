//! HTTP handler functions for the ward dashboard API.

use actix_web::{HttpResponse, web};
use aqi_map_pipeline_models::{AqiCategory, FinalZoneRecord};
use aqi_map_server_models::{
    AlertSeverity, ApiAlert, ApiCitySummary, ApiDashboard, ApiHealth, ApiKpis, ApiWardRisk,
    ApiWards, alert_type,
};

use crate::{AppState, TrendSummary};

/// Number of alerts surfaced on the dashboard.
const ALERT_COUNT: usize = 3;
/// Number of rows in the ranked ward-risk table.
const RISK_COUNT: usize = 10;
/// Wards at or above this AQI count as critical for the KPI strip.
const CRITICAL_AQI: f64 = 200.0;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/dashboard`
///
/// Returns alerts, KPIs, the trend series, the ranked ward-risk table,
/// and the citywide category histogram.
pub async fn dashboard(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(build_dashboard(&state.snapshot, &state.trend))
}

/// `GET /api/wards`
///
/// Returns the named ward records for map rendering.
pub async fn wards(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(build_wards(&state.snapshot))
}

/// Builds the ward listing, excluding zones with synthesized names.
fn build_wards(snapshot: &[FinalZoneRecord]) -> ApiWards {
    let wards: Vec<FinalZoneRecord> = snapshot
        .iter()
        .filter(|record| !record.has_synthesized_name())
        .cloned()
        .collect();
    let count = wards.len();
    ApiWards { wards, count }
}

/// Builds the full dashboard payload from the artifact snapshot.
///
/// Wards with synthesized names carry no recognizable label, so they are
/// excluded from alerts, KPIs, rankings, and the histogram. They remain
/// visible through `GET /api/wards`.
#[allow(clippy::cast_possible_truncation)]
fn build_dashboard(snapshot: &[FinalZoneRecord], trend: &TrendSummary) -> ApiDashboard {
    let mut named: Vec<&FinalZoneRecord> = snapshot
        .iter()
        .filter(|record| !record.has_synthesized_name())
        .collect();
    named.sort_by(|a, b| b.avg_aqi.total_cmp(&a.avg_aqi));

    let alerts = named
        .iter()
        .take(ALERT_COUNT)
        .enumerate()
        .map(|(i, record)| ApiAlert {
            id: i + 1,
            severity: AlertSeverity::from_aqi(record.avg_aqi),
            ward: record.name.clone(),
            aqi: record.avg_aqi as i64,
            alert_type: alert_type(record.avg_aqi).to_string(),
        })
        .collect();

    let city_aqi = if named.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let count = named.len() as f64;
        named.iter().map(|record| record.avg_aqi).sum::<f64>() / count
    };
    let kpis = ApiKpis {
        city_aqi: city_aqi as i64,
        worst_ward: named.first().map_or(0, |record| record.avg_aqi as i64),
        critical_count: named
            .iter()
            .filter(|record| record.avg_aqi >= CRITICAL_AQI)
            .count(),
        trend: trend.label.clone(),
    };

    let ward_risks = named
        .iter()
        .take(RISK_COUNT)
        .enumerate()
        .map(|(i, record)| ApiWardRisk {
            rank: i + 1,
            ward: record.name.clone(),
            aqi: record.avg_aqi as i64,
            pollutant: record.dominant_pollutant().to_string(),
            source: record.source_class(),
            status: AqiCategory::from_aqi(record.avg_aqi),
        })
        .collect();

    let mut city_summary = ApiCitySummary {
        good: 0,
        moderate: 0,
        unhealthy: 0,
        very_unhealthy: 0,
        hazardous: 0,
    };
    for record in &named {
        match AqiCategory::from_aqi(record.avg_aqi) {
            AqiCategory::Good => city_summary.good += 1,
            AqiCategory::Moderate => city_summary.moderate += 1,
            AqiCategory::Unhealthy => city_summary.unhealthy += 1,
            AqiCategory::VeryUnhealthy => city_summary.very_unhealthy += 1,
            AqiCategory::Hazardous => city_summary.hazardous += 1,
        }
    }

    ApiDashboard {
        alerts,
        kpis,
        trend_data: trend.series.clone(),
        ward_risks,
        city_summary,
        last_updated: chrono::Utc::now().to_rfc3339(),
    }
}
