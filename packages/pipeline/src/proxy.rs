//! Traffic and industrial proxy scoring within a buffer of each ward.
//!
//! Both proxies share the same buffered-zone predicate: a feature counts
//! for a zone when it lies within the configured buffer distance of the
//! zone's (projected) geometry. Every zone produces a score row even when
//! nothing intersects; the normalization step downstream divides by the
//! maximum and must see every zone.

use std::collections::BTreeMap;

use aqi_map_ingest::infra::RoadFeature;
use aqi_map_spatial::FeatureIndex;

use crate::project::ProjectedZone;

/// Raw proxy scores for one zone, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneProxyScore {
    /// Weighted sum of intersecting road features.
    pub traffic_raw: f64,
    /// Count of intersecting industrial sites.
    pub industrial_count: u64,
}

/// Resolves each road's class label through the weight table. Unmapped or
/// missing classes weigh 0.
#[must_use]
pub fn resolve_road_weights(
    roads: &[RoadFeature],
    table: &BTreeMap<String, f64>,
) -> Vec<f64> {
    roads
        .iter()
        .map(|road| {
            road.class
                .as_ref()
                .and_then(|class| table.get(class))
                .copied()
                .unwrap_or(0.0)
        })
        .collect()
}

/// Scores every zone against both infrastructure indexes.
///
/// `road_weights` is parallel to the road index's input ordering. Each
/// intersecting feature counts once per (zone, feature) pair.
#[must_use]
pub fn score_zones(
    zones: &[ProjectedZone],
    road_index: &FeatureIndex,
    road_weights: &[f64],
    industry_index: &FeatureIndex,
    buffer_meters: f64,
) -> Vec<ZoneProxyScore> {
    zones
        .iter()
        .map(|zone| {
            let traffic_raw = road_index
                .within_distance(&zone.geometry, buffer_meters)
                .into_iter()
                .map(|index| road_weights[index])
                .sum();
            let industrial_count = industry_index
                .within_distance(&zone.geometry, buffer_meters)
                .len() as u64;
            ZoneProxyScore {
                traffic_raw,
                industrial_count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_map_spatial::FeatureGeometry;
    use geo::{LineString, MultiPolygon, Point, polygon};

    fn zone_at(x: f64) -> ProjectedZone {
        ProjectedZone {
            name: format!("zone_{x}"),
            geometry: MultiPolygon::new(vec![polygon![
                (x: x, y: 0.0),
                (x: x + 1_000.0, y: 0.0),
                (x: x + 1_000.0, y: 1_000.0),
                (x: x, y: 1_000.0),
            ]]),
            centroid: Point::new(x + 500.0, 500.0),
            area_sqkm: 1.0,
        }
    }

    fn weight_table() -> BTreeMap<String, f64> {
        [("motorway", 3.0), ("primary", 2.0), ("secondary", 1.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn road(class: Option<&str>) -> RoadFeature {
        RoadFeature {
            class: class.map(ToString::to_string),
            geometry: geo::Geometry::LineString(LineString::from(vec![
                (0.0, 500.0),
                (1_000.0, 500.0),
            ])),
        }
    }

    #[test]
    fn unmapped_and_missing_classes_weigh_zero() {
        let roads = vec![road(Some("motorway")), road(Some("residential")), road(None)];
        assert_eq!(
            resolve_road_weights(&roads, &weight_table()),
            vec![3.0, 0.0, 0.0]
        );
    }

    #[test]
    fn weights_sum_per_zone_and_empty_zones_score_zero() {
        let roads = [
            FeatureGeometry::Lines(vec![LineString::from(vec![(0.0, 500.0), (900.0, 500.0)])]),
            FeatureGeometry::Lines(vec![LineString::from(vec![(0.0, 600.0), (900.0, 600.0)])]),
        ];
        let road_index = FeatureIndex::new(roads.to_vec());
        let industry_index = FeatureIndex::new(vec![FeatureGeometry::Points(vec![Point::new(
            500.0, 500.0,
        )])]);

        let zones = vec![zone_at(0.0), zone_at(1.0e6)];
        let scores = score_zones(&zones, &road_index, &[3.0, 2.0], &industry_index, 100.0);

        assert!((scores[0].traffic_raw - 5.0).abs() < f64::EPSILON);
        assert_eq!(scores[0].industrial_count, 1);
        // The far zone still gets a present record, scored zero.
        assert!((scores[1].traffic_raw - 0.0).abs() < f64::EPSILON);
        assert_eq!(scores[1].industrial_count, 0);
    }

    #[test]
    fn buffer_growth_never_shrinks_scores() {
        let road_index = FeatureIndex::new(vec![FeatureGeometry::Lines(vec![
            LineString::from(vec![(2_500.0, 0.0), (2_500.0, 1_000.0)]),
        ])]);
        let industry_index = FeatureIndex::new(vec![FeatureGeometry::Points(vec![
            Point::new(3_000.0, 500.0),
        ])]);
        let zones = vec![zone_at(0.0)];

        let mut last = ZoneProxyScore {
            traffic_raw: 0.0,
            industrial_count: 0,
        };
        for buffer in [0.0, 1_000.0, 2_000.0, 5_000.0] {
            let score = score_zones(&zones, &road_index, &[2.0], &industry_index, buffer)[0];
            assert!(score.traffic_raw >= last.traffic_raw);
            assert!(score.industrial_count >= last.industrial_count);
            last = score;
        }
        assert!((last.traffic_raw - 2.0).abs() < f64::EPSILON);
        assert_eq!(last.industrial_count, 1);
    }
}
