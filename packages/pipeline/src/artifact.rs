//! Persisted artifact I/O.
//!
//! The artifact is a CSV file with one row per ward, written through a
//! temporary sibling file and renamed into place so a failing run never
//! leaves a partial artifact behind.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use aqi_map_pipeline_models::FinalZoneRecord;

use crate::PipelineError;

/// Writes the artifact atomically.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be written or renamed.
pub fn write_artifact(path: &Path, records: &[FinalZoneRecord]) -> Result<(), PipelineError> {
    let tmp = tmp_path(path);
    let csv_err = |source| PipelineError::ArtifactCsv {
        path: path.display().to_string(),
        source,
    };
    let io_err = |source| PipelineError::ArtifactIo {
        path: path.display().to_string(),
        source,
    };

    let mut writer = csv::Writer::from_path(&tmp).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(io_err)?;
    drop(writer);

    std::fs::rename(&tmp, path).map_err(io_err)
}

/// Reads the artifact back, e.g. for the serving layer's snapshot.
///
/// # Errors
///
/// Returns an error if the file is missing or any row fails to parse.
pub fn read_artifact(path: &Path) -> Result<Vec<FinalZoneRecord>, PipelineError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| PipelineError::ArtifactCsv {
        path: path.display().to_string(),
        source,
    })?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row.map_err(|source| PipelineError::ArtifactCsv {
            path: path.display().to_string(),
            source,
        })?);
    }
    Ok(records)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> FinalZoneRecord {
        FinalZoneRecord {
            name: name.to_string(),
            location: "ITO".to_string(),
            distance_km: 1.25,
            area_sqkm: 3.5,
            avg_aqi: 180.0,
            pm2_5: 90.0,
            pm10: 120.0,
            co: 1.1,
            no2: 40.0,
            traffic_raw: 12.0,
            industrial_count: 3,
            vehicular_pct: 100.0,
            industrial_pct: 60.0,
        }
    }

    #[test]
    fn header_row_matches_the_artifact_contract() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_artifact(&path, &[record("Karol Bagh")]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let header = contents.lines().next().unwrap();
        assert_eq!(
            header,
            "name,location,distance_km,area_sqkm,avg_AQI,pm2_5,pm10,co,no2,\
             traffic_raw,industrial_count,vehicular_pct,industrial_pct"
        );
    }

    #[test]
    fn no_temp_file_survives_a_successful_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_artifact(&path, &[record("A")]).unwrap();
        assert!(path.exists());
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn the_server_reads_back_what_the_pipeline_wrote() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![record("A"), record("B")];
        write_artifact(&path, &records).unwrap();
        assert_eq!(read_artifact(&path).unwrap(), records);
    }

    #[test]
    fn reading_a_missing_artifact_fails_with_its_path() {
        let err = read_artifact(Path::new("/nonexistent/scores.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/scores.csv"));
    }
}
