//! Nearest-neighbor lookups over geographic points
//!
//! The same index type serves two purposes: locating the analysis point
//! closest to a query coordinate, and snapping coordinates to road graph
//! nodes. Both are bulk-loaded R*-trees, built once and read-only afterwards.

use geo::{Distance, Haversine, Point};
use rstar::{RTree, primitives::GeomWithData};

use crate::Error;

/// Point stored in the tree together with the payload it identifies.
pub type IndexedPoint<T> = GeomWithData<Point<f64>, T>;

/// Result of a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<T> {
    pub item: T,
    pub location: Point<f64>,
    /// Great-circle distance between the query and `location`, in meters.
    pub distance_m: f64,
}

/// Balanced spatial index over a fixed set of points.
///
/// The search metric is planar Euclidean distance on (lon, lat) degrees;
/// the distance reported back is the haversine distance in meters.
#[derive(Debug, Clone)]
pub struct SpatialIndex<T> {
    tree: RTree<IndexedPoint<T>>,
}

impl<T: Copy> SpatialIndex<T> {
    /// Bulk-loads the tree in O(n log n).
    pub fn build(points: Vec<IndexedPoint<T>>) -> Self {
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (Point<f64>, T)>,
    {
        Self::build(
            points
                .into_iter()
                .map(|(point, item)| GeomWithData::new(point, item))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Returns the entry closest to `query`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyIndex`] when the index holds no points,
    /// [`Error::InvalidData`] when the query is not a finite coordinate.
    pub fn nearest(&self, query: &Point<f64>) -> Result<Neighbor<T>, Error> {
        if !(query.x().is_finite() && query.y().is_finite()) {
            return Err(Error::InvalidData(format!(
                "Query coordinate ({}, {}) is not finite",
                query.x(),
                query.y()
            )));
        }

        let nearest = self.tree.nearest_neighbor(query).ok_or(Error::EmptyIndex)?;
        let location = *nearest.geom();

        Ok(Neighbor {
            item: nearest.data,
            location,
            distance_m: Haversine.distance(*query, location),
        })
    }
}
