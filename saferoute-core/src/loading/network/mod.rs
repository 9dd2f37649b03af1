//! Loading a road network from node and edge tables

mod de;
mod raw_types;

use std::io::Read;
use std::path::Path;

use geo::Point;
use log::{info, warn};

pub use raw_types::{EdgeRow, NodeRow};

use super::parser::{deserialize_csv, open_csv};
use crate::{Error, model::RoadGraph};

/// Loads a road graph from a node CSV (`id, longitude, latitude`) and an
/// edge CSV (`source, target, length, oneway`).
///
/// # Errors
///
/// Returns an error if a file cannot be read, a table is malformed, or an
/// edge references an unknown node.
pub fn load_road_graph(nodes_path: &Path, edges_path: &Path) -> Result<RoadGraph, Error> {
    info!(
        "Loading road network: nodes {}, edges {}",
        nodes_path.display(),
        edges_path.display()
    );
    road_graph_from_readers(open_csv(nodes_path)?, open_csv(edges_path)?)
}

/// Same as [`load_road_graph`] for arbitrary CSV sources.
///
/// # Errors
///
/// Returns an error if a table is malformed or an edge references an
/// unknown node.
pub fn road_graph_from_readers<N: Read, E: Read>(nodes: N, edges: E) -> Result<RoadGraph, Error> {
    let node_rows: Vec<NodeRow> = deserialize_csv(nodes, &raw_types::NODE_COLUMNS)?;
    let edge_rows: Vec<EdgeRow> = deserialize_csv(edges, &raw_types::EDGE_COLUMNS)?;

    let mut builder = RoadGraph::builder();
    for row in &node_rows {
        builder.add_node(row.id, Point::new(row.longitude, row.latitude))?;
    }

    let mut missing_length = 0usize;
    for row in &edge_rows {
        if row.length.is_none() {
            missing_length += 1;
        }
        builder.add_road(row.source, row.target, row.length, row.oneway)?;
    }
    if missing_length > 0 {
        warn!("{missing_length} road segments have no length and cannot be annotated");
    }

    let graph = builder.build();
    info!(
        "Road network loaded: {} nodes, {} directed edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
