//! Result of a route planning query

use geo::Point;

use crate::NodeKey;

/// Least-cost path between two snapped road nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Keys of the traversed nodes, origin first
    pub node_keys: Vec<NodeKey>,
    /// Node coordinates in traversal order
    pub coordinates: Vec<Point<f64>>,
    /// Sum of edge traversal costs
    pub total_cost: f64,
    /// Sum of edge lengths in meters
    pub total_length_m: f64,
    /// Length-weighted mean edge safety, `None` for a single-node route
    pub mean_safety: Option<f64>,
    /// Distance between the requested origin and its snapped node
    pub origin_snap_m: f64,
    /// Distance between the requested destination and its snapped node
    pub destination_snap_m: f64,
}

impl Route {
    pub fn node_count(&self) -> usize {
        self.node_keys.len()
    }
}
