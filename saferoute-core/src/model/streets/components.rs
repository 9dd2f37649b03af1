//! Road network components - intersections and road segments

use geo::Point;

use crate::NodeKey;

/// Road graph node (intersection)
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Stable key assigned by the road network source
    pub key: NodeKey,
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Road graph edge (directed road segment)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Physical length in meters, as supplied by the source
    pub length_m: Option<f64>,
}

impl RoadEdge {
    pub fn new(length_m: f64) -> Self {
        Self {
            length_m: Some(length_m),
        }
    }

    /// Length if it is usable for costing: present, finite and non-negative.
    pub fn valid_length(&self) -> Option<f64> {
        self.length_m.filter(|l| l.is_finite() && *l >= 0.0)
    }
}

/// Safety score and traversal cost attached to an edge by the annotator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeAnnotation {
    /// Normalized safety score sampled at the segment midpoint
    pub safety: f64,
    /// `length / (safety + epsilon)`
    pub cost: f64,
}
