//! Nearest-station lookup over projected sensor locations.
//!
//! Stations are loaded into an R-tree keyed by their UTM position. The
//! lookup is total for any non-empty station set: every query point has a
//! nearest station. Ties at exactly the minimal distance go to the station
//! that appeared first in the input ordering, which keeps assignment
//! deterministic across runs.

use geo::Point;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// A projected station point stored in the R-tree with its input position.
struct StationEntry {
    index: usize,
    position: [f64; 2],
}

impl RTreeObject for StationEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for StationEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx.mul_add(dx, dy * dy)
    }
}

/// Result of a nearest-station query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestStation {
    /// Index of the station in the input ordering.
    pub index: usize,
    /// Euclidean distance in the projected plane, meters.
    pub distance_m: f64,
}

/// R-tree index over projected station points.
pub struct StationLocator {
    tree: RTree<StationEntry>,
}

impl StationLocator {
    /// Builds the index from projected station positions (meters).
    #[must_use]
    pub fn new(positions: &[Point<f64>]) -> Self {
        let entries = positions
            .iter()
            .enumerate()
            .map(|(index, point)| StationEntry {
                index,
                position: [point.x(), point.y()],
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed stations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index holds no stations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Finds the nearest station to a projected point.
    ///
    /// Returns `None` only when the station set is empty. Among stations at
    /// exactly the minimal squared distance, the lowest input index wins.
    #[must_use]
    pub fn nearest(&self, point: Point<f64>) -> Option<NearestStation> {
        let query = [point.x(), point.y()];
        let mut candidates = self.tree.nearest_neighbor_iter_with_distance_2(&query);
        let (first, best_distance_2) = candidates.next()?;
        let mut best = first;
        for (entry, distance_2) in candidates {
            if distance_2 > best_distance_2 {
                break;
            }
            if entry.index < best.index {
                best = entry;
            }
        }
        Some(NearestStation {
            index: best.index,
            distance_m: best_distance_2.sqrt(),
        })
    }
}
