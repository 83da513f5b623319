//! Final merge and normalization into artifact rows.
//!
//! Joins the station assignments with the proxy scores, converts the raw
//! proxy sums into percentages of the citywide maximum, and sorts by ward
//! name. A citywide maximum of zero normalizes every zone to zero rather
//! than dividing by it.

use aqi_map_ingest::sensors::StationAggregate;
use aqi_map_pipeline_models::FinalZoneRecord;

use crate::assign::ZoneStationAssignment;
use crate::project::ProjectedZone;
use crate::proxy::ZoneProxyScore;

/// Builds the final artifact rows, sorted by zone name ascending.
///
/// Each assignment names its zone explicitly; `scores` is indexed by the
/// same zone ordering and `stations` by the assignment's station index.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn merge_records(
    zones: &[ProjectedZone],
    stations: &[StationAggregate],
    assignments: &[ZoneStationAssignment],
    scores: &[ZoneProxyScore],
) -> Vec<FinalZoneRecord> {
    let traffic_max = scores
        .iter()
        .map(|s| s.traffic_raw)
        .fold(0.0_f64, f64::max);
    let industrial_max = scores
        .iter()
        .map(|s| s.industrial_count)
        .max()
        .unwrap_or(0);

    let mut records: Vec<FinalZoneRecord> = assignments
        .iter()
        .map(|assignment| {
            let zone = &zones[assignment.zone_index];
            let score = &scores[assignment.zone_index];
            let station = &stations[assignment.station_index];
            FinalZoneRecord {
                name: zone.name.clone(),
                location: station.location.clone(),
                distance_km: assignment.distance_km,
                area_sqkm: zone.area_sqkm,
                avg_aqi: station.avg_aqi,
                pm2_5: station.pm2_5,
                pm10: station.pm10,
                co: station.co,
                no2: station.no2,
                traffic_raw: score.traffic_raw,
                industrial_count: score.industrial_count,
                vehicular_pct: percentage(score.traffic_raw, traffic_max),
                industrial_pct: percentage(
                    score.industrial_count as f64,
                    industrial_max as f64,
                ),
            }
        })
        .collect();

    records.sort_by(|a, b| a.name.cmp(&b.name));
    records
}

/// `100 * value / max`, defined as 0 when the maximum is 0.
fn percentage(value: f64, max: f64) -> f64 {
    if max > 0.0 { 100.0 * value / max } else { 0.0 }
}
