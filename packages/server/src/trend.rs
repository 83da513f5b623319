//! City-wide AQI trend derived from the raw reading history.
//!
//! The trend chart shows daily mean AQI over trailing windows anchored at
//! the most recent reading date; the KPI strip compares the last seven
//! days against the full history. Both are computed once per process,
//! alongside the artifact snapshot.

use std::collections::BTreeMap;

use aqi_map_ingest::sensors::SensorReading;
use aqi_map_server_models::ApiTrendData;
use chrono::{Duration, NaiveDate};

/// Precomputed trend payloads for the dashboard.
#[derive(Debug, Clone)]
pub struct TrendSummary {
    /// Signed percentage label for the KPI strip, e.g. `+12%`.
    pub label: String,
    /// Daily mean series for the trend chart.
    pub series: ApiTrendData,
}

impl TrendSummary {
    /// Builds the trend summary from raw readings.
    ///
    /// Readings without a parseable date or without an AQI value are
    /// ignored. An empty history yields empty series and a `0%` label.
    #[must_use]
    pub fn from_readings(readings: &[SensorReading]) -> Self {
        let dated: Vec<(NaiveDate, f64)> = readings
            .iter()
            .filter_map(|reading| match (reading.reading_date(), reading.aqi_index) {
                (Some(date), Some(aqi)) => Some((date, aqi)),
                _ => None,
            })
            .collect();

        let Some(max_date) = dated.iter().map(|(date, _)| *date).max() else {
            return Self {
                label: "0%".to_string(),
                series: ApiTrendData {
                    seven_days: Vec::new(),
                    thirty_days: Vec::new(),
                    ninety_days: Vec::new(),
                },
            };
        };

        Self {
            label: trend_label(&dated, max_date),
            series: ApiTrendData {
                seven_days: daily_means(&dated, max_date, 7),
                thirty_days: daily_means(&dated, max_date, 30),
                ninety_days: daily_means(&dated, max_date, 90),
            },
        }
    }
}

/// Daily mean AQI over the trailing window, oldest date first.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn daily_means(dated: &[(NaiveDate, f64)], max_date: NaiveDate, days: i64) -> Vec<i64> {
    let cutoff = max_date - Duration::days(days);
    let mut by_date: BTreeMap<NaiveDate, (f64, u64)> = BTreeMap::new();
    for (date, aqi) in dated {
        if *date >= cutoff {
            let entry = by_date.entry(*date).or_insert((0.0, 0));
            entry.0 += aqi;
            entry.1 += 1;
        }
    }
    by_date
        .into_values()
        .map(|(sum, count)| (sum / count as f64) as i64)
        .collect()
}

/// Percentage change of the last-7-days mean against the full-history
/// mean, truncated toward zero, with an explicit `+` when positive.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn trend_label(dated: &[(NaiveDate, f64)], max_date: NaiveDate) -> String {
    let overall = dated.iter().map(|(_, aqi)| aqi).sum::<f64>() / dated.len() as f64;
    if overall <= 0.0 {
        return "0%".to_string();
    }
    let cutoff = max_date - Duration::days(7);
    let recent: Vec<f64> = dated
        .iter()
        .filter(|(date, _)| *date >= cutoff)
        .map(|(_, aqi)| *aqi)
        .collect();
    let recent_mean = recent.iter().sum::<f64>() / recent.len() as f64;
    let pct = (recent_mean - overall) / overall * 100.0;
    let value = pct as i64;
    if pct > 0.0 {
        format!("+{value}%")
    } else {
        format!("{value}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(date: &str, aqi: Option<f64>) -> SensorReading {
        SensorReading {
            location: "ITO".to_string(),
            lat: 28.63,
            lon: 77.24,
            date_ist: date.to_string(),
            aqi_index: aqi,
            pm2_5: None,
            pm10: None,
            co: None,
            no2: None,
        }
    }

    #[test]
    fn daily_series_averages_per_date_oldest_first() {
        let summary = TrendSummary::from_readings(&[
            reading("02/06/2024", Some(200.0)),
            reading("01/06/2024", Some(80.0)),
            reading("01/06/2024", Some(120.0)),
        ]);
        assert_eq!(summary.series.seven_days, vec![100, 200]);
    }

    #[test]
    fn windows_anchor_at_the_latest_reading_date() {
        let summary = TrendSummary::from_readings(&[
            reading("01/01/2024", Some(50.0)),
            reading("01/06/2024", Some(150.0)),
            reading("10/06/2024", Some(250.0)),
        ]);
        // January is outside even the 90-day window ending 10 June.
        assert_eq!(summary.series.seven_days, vec![250]);
        assert_eq!(summary.series.thirty_days, vec![150, 250]);
        assert_eq!(summary.series.ninety_days, vec![150, 250]);
    }

    #[test]
    fn rising_recent_readings_get_a_positive_label() {
        // History mean 150; the last week alone means 250: +66%.
        let summary = TrendSummary::from_readings(&[
            reading("01/01/2024", Some(50.0)),
            reading("10/06/2024", Some(250.0)),
        ]);
        assert_eq!(summary.label, "+66%");
    }

    #[test]
    fn falling_recent_readings_get_a_negative_label() {
        let summary = TrendSummary::from_readings(&[
            reading("01/01/2024", Some(250.0)),
            reading("10/06/2024", Some(50.0)),
        ]);
        assert_eq!(summary.label, "-66%");
    }

    #[test]
    fn undated_and_missing_readings_are_ignored() {
        let summary = TrendSummary::from_readings(&[
            reading("not a date", Some(500.0)),
            reading("01/06/2024", None),
            reading("01/06/2024", Some(90.0)),
        ]);
        assert_eq!(summary.series.seven_days, vec![90]);
        assert_eq!(summary.label, "0%");
    }

    #[test]
    fn empty_history_yields_empty_series_and_zero_label() {
        let summary = TrendSummary::from_readings(&[]);
        assert!(summary.series.ninety_days.is_empty());
        assert_eq!(summary.label, "0%");
    }
}
