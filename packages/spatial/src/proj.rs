//! Reprojection between geographic lon/lat (WGS84) and a metric UTM plane.
//!
//! `proj4rs` takes geographic input in radians and produces projected
//! output in meters, so the degree/radian conversion happens here and
//! callers only ever see degrees in and meters out.

use geo::{Coord, Geometry, MapCoords, MultiPolygon, Point};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use thiserror::Error;

/// Errors from building or applying a coordinate transform.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The PROJ.4 definition string was rejected.
    #[error("invalid PROJ definition: {0}")]
    Definition(String),

    /// A coordinate could not be transformed (out of the projection's domain).
    #[error("coordinate transform failed at ({x}, {y})")]
    Transform {
        /// Longitude of the failing coordinate.
        x: f64,
        /// Latitude of the failing coordinate.
        y: f64,
    },
}

/// A fixed transform from WGS84 lon/lat into one UTM zone (meters).
pub struct MetricProjection {
    geographic: Proj,
    metric: Proj,
}

impl MetricProjection {
    /// Builds the transform for a northern-hemisphere UTM zone.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::Definition`] if either PROJ.4 string is
    /// rejected (out-of-range zone).
    pub fn utm(zone: u8) -> Result<Self, ProjectionError> {
        let geographic = Proj::from_proj_string("+proj=longlat +datum=WGS84 +no_defs")
            .map_err(|e| ProjectionError::Definition(e.to_string()))?;
        let metric =
            Proj::from_proj_string(&format!("+proj=utm +zone={zone} +datum=WGS84 +units=m +no_defs"))
                .map_err(|e| ProjectionError::Definition(e.to_string()))?;
        Ok(Self { geographic, metric })
    }

    /// Projects a single lon/lat coordinate to UTM meters.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::Transform`] if the coordinate is outside
    /// the projection's domain.
    pub fn project_coord(&self, coord: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
        let mut point = (coord.x.to_radians(), coord.y.to_radians(), 0.0);
        transform(&self.geographic, &self.metric, &mut point).map_err(|_| {
            ProjectionError::Transform {
                x: coord.x,
                y: coord.y,
            }
        })?;
        Ok(Coord {
            x: point.0,
            y: point.1,
        })
    }

    /// Projects a lon/lat point to UTM meters.
    ///
    /// # Errors
    ///
    /// See [`Self::project_coord`].
    pub fn project_point(&self, point: Point<f64>) -> Result<Point<f64>, ProjectionError> {
        self.project_coord(point.0).map(Point::from)
    }

    /// Projects every coordinate of a polygon collection.
    ///
    /// # Errors
    ///
    /// See [`Self::project_coord`].
    pub fn project_multi_polygon(
        &self,
        shape: &MultiPolygon<f64>,
    ) -> Result<MultiPolygon<f64>, ProjectionError> {
        shape.try_map_coords(|coord| self.project_coord(coord))
    }

    /// Projects every coordinate of an arbitrary geometry.
    ///
    /// # Errors
    ///
    /// See [`Self::project_coord`].
    pub fn project_geometry(
        &self,
        geometry: &Geometry<f64>,
    ) -> Result<Geometry<f64>, ProjectionError> {
        geometry.try_map_coords(|coord| self.project_coord(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_delhi_into_utm_43n_range() {
        let projection = MetricProjection::utm(43).unwrap();
        let projected = projection
            .project_point(Point::new(77.2090, 28.6139))
            .unwrap();
        // Zone 43N central meridian is 75E; Delhi sits ~2.2 degrees east.
        assert!(projected.x() > 700_000.0 && projected.x() < 730_000.0);
        assert!(projected.y() > 3_100_000.0 && projected.y() < 3_200_000.0);
    }

    #[test]
    fn central_meridian_maps_to_false_easting() {
        let projection = MetricProjection::utm(43).unwrap();
        let projected = projection.project_point(Point::new(75.0, 28.0)).unwrap();
        assert!((projected.x() - 500_000.0).abs() < 1.0);
    }

    #[test]
    fn preserves_relative_distances() {
        let projection = MetricProjection::utm(43).unwrap();
        let a = projection.project_point(Point::new(77.20, 28.60)).unwrap();
        let b = projection.project_point(Point::new(77.21, 28.60)).unwrap();
        // ~0.01 degrees of longitude at 28.6N is roughly 977 meters.
        let dx = (b.x() - a.x()).abs();
        assert!(dx > 900.0 && dx < 1_050.0, "dx = {dx}");
    }

    #[test]
    fn rejects_bad_zone() {
        assert!(MetricProjection::utm(99).is_err());
    }
}
