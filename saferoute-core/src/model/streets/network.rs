//! Road graph with a spatial index over its nodes

use geo::Point;
use hashbrown::HashMap;
use log::debug;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use super::{RoadEdge, RoadNode};
use crate::{
    Error, NodeKey,
    model::BoundingBox,
    spatial::{Neighbor, SpatialIndex},
};

/// Directed road network. Two-way roads are stored as a pair of edges.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    pub(crate) graph: DiGraph<RoadNode, RoadEdge>,
    rtree: SpatialIndex<NodeIndex>,
    keys: HashMap<NodeKey, NodeIndex>,
}

impl RoadGraph {
    pub fn builder() -> RoadGraphBuilder {
        RoadGraphBuilder::default()
    }

    pub fn graph(&self) -> &DiGraph<RoadNode, RoadEdge> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&RoadNode> {
        self.graph.node_weight(index)
    }

    pub fn node_index(&self, key: NodeKey) -> Option<NodeIndex> {
        self.keys.get(&key).copied()
    }

    /// Endpoint nodes of an edge.
    pub fn endpoints(&self, edge: EdgeIndex) -> Option<(&RoadNode, &RoadNode)> {
        let (source, target) = self.graph.edge_endpoints(edge)?;
        Some((&self.graph[source], &self.graph[target]))
    }

    /// Snaps a point to the closest graph node.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyIndex`] when the graph has no nodes.
    pub fn nearest_node(&self, point: &Point<f64>) -> Result<Neighbor<NodeIndex>, Error> {
        self.rtree.nearest(point)
    }

    /// Bounding box of all nodes, `None` for an empty graph.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.graph.node_weights().map(|node| node.geometry))
    }
}

/// Incremental construction of a [`RoadGraph`].
#[derive(Debug, Default)]
pub struct RoadGraphBuilder {
    graph: DiGraph<RoadNode, RoadEdge>,
    keys: HashMap<NodeKey, NodeIndex>,
}

impl RoadGraphBuilder {
    /// # Errors
    ///
    /// [`Error::InvalidData`] for a duplicate key or a non-finite coordinate.
    pub fn add_node(&mut self, key: NodeKey, geometry: Point<f64>) -> Result<NodeIndex, Error> {
        if !(geometry.x().is_finite() && geometry.y().is_finite()) {
            return Err(Error::InvalidData(format!(
                "Road node {key} has a non-finite coordinate"
            )));
        }
        if self.keys.contains_key(&key) {
            return Err(Error::InvalidData(format!("Duplicate road node key {key}")));
        }

        let index = self.graph.add_node(RoadNode { key, geometry });
        self.keys.insert(key, index);
        Ok(index)
    }

    /// Adds a road between two known nodes. Unless `oneway` is set, the
    /// reverse direction is added as well.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidData`] if either endpoint key is unknown.
    pub fn add_road(
        &mut self,
        from: NodeKey,
        to: NodeKey,
        length_m: Option<f64>,
        oneway: bool,
    ) -> Result<(), Error> {
        let source = self.lookup(from)?;
        let target = self.lookup(to)?;

        let edge = RoadEdge { length_m };
        self.graph.add_edge(source, target, edge.clone());
        if !oneway {
            self.graph.add_edge(target, source, edge);
        }
        Ok(())
    }

    fn lookup(&self, key: NodeKey) -> Result<NodeIndex, Error> {
        self.keys
            .get(&key)
            .copied()
            .ok_or_else(|| Error::InvalidData(format!("Road references unknown node {key}")))
    }

    pub fn build(self) -> RoadGraph {
        let rtree = SpatialIndex::from_points(
            self.graph
                .node_indices()
                .map(|index| (self.graph[index].geometry, index)),
        );
        debug!(
            "Road graph built: {} nodes, {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );

        RoadGraph {
            graph: self.graph,
            rtree,
            keys: self.keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> RoadGraph {
        let mut builder = RoadGraph::builder();
        builder.add_node(1, Point::new(0.0, 0.0)).unwrap();
        builder.add_node(2, Point::new(0.001, 0.0)).unwrap();
        builder.add_node(3, Point::new(0.0, 0.001)).unwrap();
        builder.add_road(1, 2, Some(111.0), false).unwrap();
        builder.add_road(2, 3, Some(157.0), true).unwrap();
        builder.add_road(3, 1, None, false).unwrap();
        builder.build()
    }

    #[test]
    fn two_way_roads_become_edge_pairs() {
        let graph = triangle();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 5);

        let a = graph.node_index(1).unwrap();
        let b = graph.node_index(2).unwrap();
        let c = graph.node_index(3).unwrap();
        assert!(graph.graph().find_edge(a, b).is_some());
        assert!(graph.graph().find_edge(b, a).is_some());
        assert!(graph.graph().find_edge(b, c).is_some());
        assert!(graph.graph().find_edge(c, b).is_none());
    }

    #[test]
    fn snaps_to_nearest_node() {
        let graph = triangle();
        let hit = graph.nearest_node(&Point::new(0.0009, 0.0001)).unwrap();
        assert_eq!(graph.node(hit.item).unwrap().key, 2);
        assert!(hit.distance_m > 0.0 && hit.distance_m < 20.0);
    }

    #[test]
    fn rejects_duplicate_and_unknown_keys() {
        let mut builder = RoadGraph::builder();
        builder.add_node(7, Point::new(0.0, 0.0)).unwrap();
        assert!(builder.add_node(7, Point::new(1.0, 1.0)).is_err());
        assert!(builder.add_road(7, 8, Some(1.0), false).is_err());
    }

    #[test]
    fn valid_length_filters_bad_values() {
        assert_eq!(RoadEdge::new(12.5).valid_length(), Some(12.5));
        assert_eq!(RoadEdge { length_m: None }.valid_length(), None);
        assert_eq!(RoadEdge::new(-1.0).valid_length(), None);
        assert_eq!(RoadEdge::new(f64::NAN).valid_length(), None);
    }

    #[test]
    fn empty_graph_cannot_snap() {
        let graph = RoadGraph::builder().build();
        assert!(graph.bounds().is_none());
        assert!(matches!(
            graph.nearest_node(&Point::new(0.0, 0.0)),
            Err(Error::EmptyIndex)
        ));
    }
}
