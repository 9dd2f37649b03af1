use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering};

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::{
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use super::state::State;
use crate::{Error, algo::AnnotatedGraph};

/// Node and edge sequence of a least-cost path.
#[derive(Debug, Clone)]
pub(crate) struct TracedPath {
    pub(crate) nodes: Vec<NodeIndex>,
    pub(crate) edges: Vec<EdgeIndex>,
    pub(crate) cost: f64,
}

/// Dijkstra's algorithm over edge traversal costs, stopping as soon as
/// `target` is settled.
///
/// A predecessor is only replaced by a strictly cheaper one, so among
/// equal-cost paths the first discovered wins. `cancel` is checked before
/// every node expansion.
pub(crate) fn dijkstra_path(
    graph: &AnnotatedGraph,
    start: NodeIndex,
    target: NodeIndex,
    cancel: &AtomicBool,
) -> Result<TracedPath, Error> {
    let streets = graph.road_graph().graph();

    // Most searches settle a small neighborhood of the graph
    let estimated_nodes = streets.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, EdgeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut settled = FixedBitSet::with_capacity(streets.node_count());
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        if cancel.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }

        // Stale heap entry
        if settled.contains(node.index()) {
            continue;
        }
        settled.insert(node.index());

        if node == target {
            return Ok(trace_back(streets, &predecessors, start, target, cost));
        }

        for edge in streets.edges(node) {
            let next = edge.target();
            if settled.contains(next.index()) {
                continue;
            }

            let Some(annotation) = graph.annotation(edge.id()) else {
                continue;
            };
            let next_cost = cost + annotation.cost;

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, edge.id());
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, edge.id());
                    }
                }
            }
        }
    }

    Err(Error::NoPath)
}

fn trace_back<N, E>(
    streets: &petgraph::graph::DiGraph<N, E>,
    predecessors: &HashMap<NodeIndex, EdgeIndex>,
    start: NodeIndex,
    target: NodeIndex,
    cost: f64,
) -> TracedPath {
    let mut nodes = vec![target];
    let mut edges = Vec::new();

    // Follow predecessors backward from target to start
    let mut current = target;
    while current != start {
        let Some(&edge) = predecessors.get(&current) else {
            break;
        };
        let Some((source, _)) = streets.edge_endpoints(edge) else {
            break;
        };
        edges.push(edge);
        nodes.push(source);
        current = source;
    }

    nodes.reverse();
    edges.reverse();

    TracedPath { nodes, edges, cost }
}
