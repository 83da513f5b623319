//! Buffered intersection queries against infrastructure layers.
//!
//! A zone buffered outward by `r` intersects a feature exactly when the
//! Euclidean distance between the unbuffered zone and the feature is at
//! most `r`, so the buffer never has to be materialized as a polygon. The
//! R-tree pre-filters candidates with the zone's bounding box expanded by
//! `r`; the distance predicate settles the rest.

use geo::{
    BoundingRect, Distance, Euclidean, Geometry, Intersects, LineString, MultiPolygon, Point,
    Polygon,
};
use rstar::{AABB, RTree, RTreeObject};

/// Geometry of one infrastructure feature, flattened into primitive parts.
///
/// One value corresponds to one input feature row, so intersection counts
/// stay per-feature even when the source geometry was a multi-part.
#[derive(Debug, Clone)]
pub enum FeatureGeometry {
    /// Road-like linear parts.
    Lines(Vec<LineString<f64>>),
    /// Point sites.
    Points(Vec<Point<f64>>),
    /// Polygonal sites.
    Areas(Vec<Polygon<f64>>),
}

impl FeatureGeometry {
    /// Flattens a geometry into feature parts. Returns `None` for geometry
    /// types the scoring predicates cannot handle, or for empty geometries.
    #[must_use]
    pub fn from_geometry(geometry: &Geometry<f64>) -> Option<Self> {
        let flattened = match geometry {
            Geometry::LineString(line) => Self::Lines(vec![line.clone()]),
            Geometry::MultiLineString(lines) => Self::Lines(lines.0.clone()),
            Geometry::Point(point) => Self::Points(vec![*point]),
            Geometry::MultiPoint(points) => Self::Points(points.0.clone()),
            Geometry::Polygon(polygon) => Self::Areas(vec![polygon.clone()]),
            Geometry::MultiPolygon(polygons) => Self::Areas(polygons.0.clone()),
            _ => return None,
        };
        if flattened.is_empty() {
            return None;
        }
        Some(flattened)
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Lines(parts) => parts.iter().all(|line| line.0.is_empty()),
            Self::Points(parts) => parts.is_empty(),
            Self::Areas(parts) => parts.iter().all(|poly| poly.exterior().0.is_empty()),
        }
    }

    fn envelope(&self) -> Option<AABB<[f64; 2]>> {
        let mut bounds: Option<[f64; 4]> = None;
        let mut extend = |x: f64, y: f64| {
            bounds = Some(match bounds {
                None => [x, y, x, y],
                Some([min_x, min_y, max_x, max_y]) => {
                    [min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)]
                }
            });
        };
        match self {
            Self::Lines(parts) => {
                for line in parts {
                    for coord in &line.0 {
                        extend(coord.x, coord.y);
                    }
                }
            }
            Self::Points(parts) => {
                for point in parts {
                    extend(point.x(), point.y());
                }
            }
            Self::Areas(parts) => {
                for poly in parts {
                    if let Some(rect) = poly.bounding_rect() {
                        extend(rect.min().x, rect.min().y);
                        extend(rect.max().x, rect.max().y);
                    }
                }
            }
        }
        bounds.map(|[min_x, min_y, max_x, max_y]| {
            AABB::from_corners([min_x, min_y], [max_x, max_y])
        })
    }

    /// Whether any part of this feature lies within `radius` of `zone`.
    fn within(&self, zone: &MultiPolygon<f64>, radius: f64) -> bool {
        zone.0.iter().any(|polygon| match self {
            Self::Lines(parts) => parts.iter().any(|line| line_within(polygon, line, radius)),
            Self::Points(parts) => parts
                .iter()
                .any(|point| point_within(polygon, point, radius)),
            Self::Areas(parts) => parts.iter().any(|area| area_within(polygon, area, radius)),
        })
    }
}

fn line_within(polygon: &Polygon<f64>, line: &LineString<f64>, radius: f64) -> bool {
    polygon.intersects(line) || (radius > 0.0 && Euclidean.distance(polygon, line) <= radius)
}

fn point_within(polygon: &Polygon<f64>, point: &Point<f64>, radius: f64) -> bool {
    polygon.intersects(point) || (radius > 0.0 && Euclidean.distance(polygon, point) <= radius)
}

fn area_within(polygon: &Polygon<f64>, area: &Polygon<f64>, radius: f64) -> bool {
    polygon.intersects(area) || (radius > 0.0 && Euclidean.distance(polygon, area) <= radius)
}

struct FeatureEntry {
    index: usize,
    envelope: AABB<[f64; 2]>,
    geometry: FeatureGeometry,
}

impl RTreeObject for FeatureEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// R-tree index over projected infrastructure features.
pub struct FeatureIndex {
    tree: RTree<FeatureEntry>,
}

impl FeatureIndex {
    /// Builds the index; indices refer back into `features`. Features with
    /// no coordinates are dropped.
    #[must_use]
    pub fn new(features: Vec<FeatureGeometry>) -> Self {
        let entries = features
            .into_iter()
            .enumerate()
            .filter_map(|(index, geometry)| {
                let Some(envelope) = geometry.envelope() else {
                    log::debug!("Dropping empty infrastructure feature {index}");
                    return None;
                };
                Some(FeatureEntry {
                    index,
                    envelope,
                    geometry,
                })
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index holds no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Indices of features within `radius` meters of the zone boundary
    /// (or intersecting the zone itself), in ascending input order.
    #[must_use]
    pub fn within_distance(&self, zone: &MultiPolygon<f64>, radius: f64) -> Vec<usize> {
        let Some(rect) = zone.bounding_rect() else {
            return Vec::new();
        };
        let envelope = AABB::from_corners(
            [rect.min().x - radius, rect.min().y - radius],
            [rect.max().x + radius, rect.max().y + radius],
        );
        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.geometry.within(zone, radius))
            .map(|entry| entry.index)
            .collect();
        hits.sort_unstable();
        hits
    }
}
