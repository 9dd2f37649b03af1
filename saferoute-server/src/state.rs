//! Shared application state.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use geo::Point;
use saferoute_core::{NamedGraph, RoutingConfig, RoutingModel, SafetyScorer};
use serde::Serialize;

/// Annotated graphs keyed by the area they serve.
///
/// Lookups take the read lock and clone an `Arc`, so searches never hold it.
#[derive(Debug, Default)]
pub struct GraphCache {
    entries: RwLock<Vec<NamedGraph>>,
}

/// Entry of `GET /graphs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub name: String,
    /// `[west, south, east, north]`
    pub bounds: [f64; 4],
    pub node_count: usize,
    pub edge_count: usize,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a graph, replacing any graph with the same name.
    pub fn insert(&self, graph: NamedGraph) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|existing| existing.name != graph.name);
        tracing::info!("Caching road network '{}'", graph.name);
        entries.push(graph);
    }

    /// First cached graph whose area contains both coordinates.
    pub fn covering(&self, origin: Point<f64>, destination: Point<f64>) -> Option<NamedGraph> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|graph| graph.covers(origin, destination))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summaries(&self) -> Vec<GraphSummary> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|named| {
                let (min, max) = (named.bounds.min(), named.bounds.max());
                let road_graph = named.graph.road_graph();
                GraphSummary {
                    name: named.name.clone(),
                    bounds: [min.x, min.y, max.x, max.y],
                    node_count: road_graph.node_count(),
                    edge_count: road_graph.edge_count(),
                }
            })
            .collect()
    }
}

/// Application state shared by all handlers.
#[derive(Debug)]
pub struct AppState {
    pub scorer: Arc<SafetyScorer>,
    pub graphs: GraphCache,
    pub routing: RoutingConfig,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        scorer: Arc<SafetyScorer>,
        routing: RoutingConfig,
        request_timeout: Duration,
    ) -> Self {
        Self {
            scorer,
            graphs: GraphCache::new(),
            routing,
            request_timeout,
        }
    }

    /// Moves a freshly built model into server state.
    pub fn from_model(
        model: RoutingModel,
        routing: RoutingConfig,
        request_timeout: Duration,
    ) -> Self {
        let state = Self::new(model.scorer, routing, request_timeout);
        for graph in model.graphs {
            state.graphs.insert(graph);
        }
        state
    }
}
