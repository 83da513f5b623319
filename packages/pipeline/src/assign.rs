//! Nearest-station assignment for ward centroids.
//!
//! A total left join: every zone gets exactly one station, however far
//! away it is. An empty station set is a configuration error and fails
//! the run up front rather than producing holes.

use aqi_map_spatial::StationLocator;
use geo::Point;

use crate::PipelineError;

/// One zone paired with its nearest station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneStationAssignment {
    /// Index into the zone ordering.
    pub zone_index: usize,
    /// Index into the station ordering.
    pub station_index: usize,
    /// Centroid-to-station distance, kilometers.
    pub distance_km: f64,
}

/// Assigns every centroid its nearest station.
///
/// # Errors
///
/// Returns [`PipelineError::NoStations`] when the locator is empty.
pub fn assign_stations(
    centroids: &[Point<f64>],
    locator: &StationLocator,
) -> Result<Vec<ZoneStationAssignment>, PipelineError> {
    if locator.is_empty() {
        return Err(PipelineError::NoStations);
    }
    centroids
        .iter()
        .enumerate()
        .map(|(zone_index, centroid)| {
            let nearest = locator
                .nearest(*centroid)
                .ok_or(PipelineError::NoStations)?;
            Ok(ZoneStationAssignment {
                zone_index,
                station_index: nearest.index,
                distance_km: nearest.distance_m / 1000.0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_zone_appears_exactly_once() {
        let locator = StationLocator::new(&[Point::new(0.0, 0.0), Point::new(10_000.0, 0.0)]);
        let centroids = vec![
            Point::new(100.0, 0.0),
            Point::new(9_000.0, 0.0),
            Point::new(500_000.0, 500_000.0),
        ];
        let assignments = assign_stations(&centroids, &locator).unwrap();
        assert_eq!(assignments.len(), centroids.len());
        for (i, assignment) in assignments.iter().enumerate() {
            assert_eq!(assignment.zone_index, i);
        }
    }

    #[test]
    fn distances_convert_to_kilometers() {
        let locator = StationLocator::new(&[Point::new(0.0, 0.0)]);
        let assignments = assign_stations(&[Point::new(3_000.0, 4_000.0)], &locator).unwrap();
        assert!((assignments[0].distance_km - 5.0).abs() < 1e-9);
    }

    #[test]
    fn empty_station_set_fails_fast() {
        let locator = StationLocator::new(&[]);
        let result = assign_stations(&[Point::new(0.0, 0.0)], &locator);
        assert!(matches!(result, Err(PipelineError::NoStations)));
    }
}
