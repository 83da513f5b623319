//! Sensor reading ingestion and per-station aggregation.
//!
//! The raw CSV carries one row per reading. Stations are identified by the
//! exact `(location, lat, lon)` triple; the same label at two coordinates
//! is two stations. Aggregation takes the arithmetic mean of each
//! pollutant column, skipping rows where that column is missing.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::IngestError;

/// One raw sensor reading row from the AQI CSV export.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorReading {
    /// Station location label.
    pub location: String,
    /// Station latitude, degrees.
    pub lat: f64,
    /// Station longitude, degrees.
    pub lon: f64,
    /// Reading date, `day/month/year`.
    pub date_ist: String,
    /// Composite air-quality index.
    pub aqi_index: Option<f64>,
    /// PM2.5 concentration.
    pub pm2_5: Option<f64>,
    /// PM10 concentration.
    pub pm10: Option<f64>,
    /// CO concentration.
    pub co: Option<f64>,
    /// NO2 concentration.
    pub no2: Option<f64>,
}

impl SensorReading {
    /// Parses the reading date, if well formed.
    #[must_use]
    pub fn reading_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date_ist, "%d/%m/%Y").ok()
    }
}

/// Mean pollutant values for one physical station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationAggregate {
    /// Station location label.
    pub location: String,
    /// Station latitude, degrees.
    pub lat: f64,
    /// Station longitude, degrees.
    pub lon: f64,
    /// Mean composite air-quality index.
    pub avg_aqi: f64,
    /// Mean PM2.5 concentration.
    pub pm2_5: f64,
    /// Mean PM10 concentration.
    pub pm10: f64,
    /// Mean CO concentration.
    pub co: f64,
    /// Mean NO2 concentration.
    pub no2: f64,
}

/// Loads raw readings from the sensor CSV.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row fails to
/// deserialize.
pub fn load_readings(path: &Path) -> Result<Vec<SensorReading>, IngestError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| IngestError::Csv {
        path: path.display().to_string(),
        source,
    })?;
    let mut readings = Vec::new();
    for row in reader.deserialize() {
        readings.push(row.map_err(|source| IngestError::Csv {
            path: path.display().to_string(),
            source,
        })?);
    }
    Ok(readings)
}

#[derive(Default)]
struct MeanAccumulator {
    sum: f64,
    count: u64,
}

impl MeanAccumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    /// Mean of the observed values; 0 when the column never appeared.
    #[allow(clippy::cast_precision_loss)]
    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

#[derive(Default)]
struct StationAccumulator {
    aqi: MeanAccumulator,
    pm2_5: MeanAccumulator,
    pm10: MeanAccumulator,
    co: MeanAccumulator,
    no2: MeanAccumulator,
}

/// Groups readings by `(location, lat, lon)` and computes per-column means.
///
/// Output order follows the first appearance of each station in the
/// readings, which downstream tie-breaking relies on.
#[must_use]
pub fn aggregate(readings: &[SensorReading]) -> Vec<StationAggregate> {
    // Float keys are grouped by bit pattern: the source data repeats
    // coordinates verbatim per station, so exact equality is the intent.
    let mut index_by_key: BTreeMap<(String, u64, u64), usize> = BTreeMap::new();
    let mut stations: Vec<(&SensorReading, StationAccumulator)> = Vec::new();

    for reading in readings {
        let key = (
            reading.location.clone(),
            reading.lat.to_bits(),
            reading.lon.to_bits(),
        );
        let slot = *index_by_key.entry(key).or_insert_with(|| {
            stations.push((reading, StationAccumulator::default()));
            stations.len() - 1
        });
        let (_, acc) = &mut stations[slot];
        acc.aqi.push(reading.aqi_index);
        acc.pm2_5.push(reading.pm2_5);
        acc.pm10.push(reading.pm10);
        acc.co.push(reading.co);
        acc.no2.push(reading.no2);
    }

    stations
        .into_iter()
        .map(|(first, acc)| StationAggregate {
            location: first.location.clone(),
            lat: first.lat,
            lon: first.lon,
            avg_aqi: acc.aqi.mean(),
            pm2_5: acc.pm2_5.mean(),
            pm10: acc.pm10.mean(),
            co: acc.co.mean(),
            no2: acc.no2.mean(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(location: &str, lat: f64, lon: f64, aqi: Option<f64>) -> SensorReading {
        SensorReading {
            location: location.to_string(),
            lat,
            lon,
            date_ist: "01/06/2024".to_string(),
            aqi_index: aqi,
            pm2_5: None,
            pm10: None,
            co: None,
            no2: None,
        }
    }

    #[test]
    fn means_are_computed_per_station() {
        let stations = aggregate(&[
            reading("Anand Vihar", 28.65, 77.31, Some(80.0)),
            reading("Anand Vihar", 28.65, 77.31, Some(120.0)),
        ]);
        assert_eq!(stations.len(), 1);
        assert!((stations[0].avg_aqi - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_values_are_excluded_from_the_mean() {
        let stations = aggregate(&[
            reading("ITO", 28.63, 77.24, Some(10.0)),
            reading("ITO", 28.63, 77.24, None),
            reading("ITO", 28.63, 77.24, Some(20.0)),
        ]);
        assert!((stations[0].avg_aqi - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn an_all_missing_column_aggregates_to_zero() {
        let stations = aggregate(&[reading("ITO", 28.63, 77.24, None)]);
        assert!((stations[0].avg_aqi - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn same_label_at_different_coordinates_is_two_stations() {
        let stations = aggregate(&[
            reading("DPCC", 28.60, 77.20, Some(50.0)),
            reading("DPCC", 28.70, 77.10, Some(150.0)),
        ]);
        assert_eq!(stations.len(), 2);
    }

    #[test]
    fn first_appearance_order_is_preserved() {
        let stations = aggregate(&[
            reading("Zeta", 28.0, 77.0, Some(1.0)),
            reading("Alpha", 28.1, 77.1, Some(2.0)),
            reading("Zeta", 28.0, 77.0, Some(3.0)),
        ]);
        let labels: Vec<&str> = stations.iter().map(|s| s.location.as_str()).collect();
        assert_eq!(labels, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn reading_dates_parse_day_first() {
        let r = reading("ITO", 28.63, 77.24, None);
        assert_eq!(
            r.reading_date(),
            Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        );
    }
}
