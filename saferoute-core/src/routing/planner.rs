//! Safest-route queries over an annotated road graph

use std::sync::atomic::AtomicBool;

use geo::Point;
use log::{debug, info};
use petgraph::graph::NodeIndex;

use super::dijkstra::{TracedPath, dijkstra_path};
use crate::{Error, algo::AnnotatedGraph, config::RoutingConfig, model::Route, spatial::Neighbor};

/// Plans least-cost routes on a shared, read-only [`AnnotatedGraph`].
#[derive(Debug, Clone)]
pub struct RoutePlanner<'a> {
    graph: &'a AnnotatedGraph,
    config: RoutingConfig,
}

impl<'a> RoutePlanner<'a> {
    /// # Errors
    ///
    /// [`Error::InvalidData`] for a non-positive epsilon or snap threshold.
    pub fn new(graph: &'a AnnotatedGraph, config: RoutingConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { graph, config })
    }

    /// Safest route between two (lon, lat) coordinates.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] when a coordinate is too far from the network,
    /// [`Error::NoPath`] when the destination is unreachable.
    pub fn plan_route(
        &self,
        origin: Point<f64>,
        destination: Point<f64>,
    ) -> Result<Route, Error> {
        self.plan_route_with_cancel(origin, destination, &AtomicBool::new(false))
    }

    /// Like [`RoutePlanner::plan_route`], giving up with
    /// [`Error::Cancelled`] once `cancel` is set.
    ///
    /// # Errors
    ///
    /// See [`RoutePlanner::plan_route`].
    pub fn plan_route_with_cancel(
        &self,
        origin: Point<f64>,
        destination: Point<f64>,
        cancel: &AtomicBool,
    ) -> Result<Route, Error> {
        let from = self.snap(&origin)?;
        let to = self.snap(&destination)?;

        debug!(
            "Snapped origin to node {} ({:.1} m), destination to node {} ({:.1} m)",
            from.item.index(),
            from.distance_m,
            to.item.index(),
            to.distance_m
        );

        let path = dijkstra_path(self.graph, from.item, to.item, cancel)?;
        let route = self.build_route(&path, from.distance_m, to.distance_m)?;

        info!(
            "Planned route over {} nodes, {:.0} m, cost {:.2}",
            route.node_count(),
            route.total_length_m,
            route.total_cost
        );

        Ok(route)
    }

    fn snap(&self, point: &Point<f64>) -> Result<Neighbor<NodeIndex>, Error> {
        let nearest = self.graph.road_graph().nearest_node(point)?;
        if let Some(threshold_m) = self.config.max_snap_distance_m
            && nearest.distance_m > threshold_m
        {
            return Err(Error::OutOfBounds {
                distance_m: nearest.distance_m,
                threshold_m,
            });
        }
        Ok(nearest)
    }

    fn build_route(
        &self,
        path: &TracedPath,
        origin_snap_m: f64,
        destination_snap_m: f64,
    ) -> Result<Route, Error> {
        let road_graph = self.graph.road_graph();

        let (node_keys, coordinates): (Vec<_>, Vec<_>) = path
            .nodes
            .iter()
            .map(|&idx| {
                road_graph
                    .node(idx)
                    .map(|node| (node.key, node.geometry))
                    .ok_or_else(|| {
                        Error::InvalidData(format!("Route node {} is missing", idx.index()))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .unzip();

        let mut total_length_m = 0.0;
        let mut weighted_safety = 0.0;
        for &edge in &path.edges {
            let length = road_graph.graph()[edge].length_m.unwrap_or_default();
            let safety = self
                .graph
                .annotation(edge)
                .map(|annotation| annotation.safety)
                .unwrap_or_default();
            total_length_m += length;
            weighted_safety += length * safety;
        }

        let mean_safety = if path.edges.is_empty() {
            None
        } else if total_length_m > 0.0 {
            Some(weighted_safety / total_length_m)
        } else {
            // Only zero-length edges: fall back to the plain mean
            let sum: f64 = path
                .edges
                .iter()
                .filter_map(|&edge| self.graph.annotation(edge))
                .map(|annotation| annotation.safety)
                .sum();
            Some(sum / path.edges.len() as f64)
        };

        Ok(Route {
            node_keys,
            coordinates,
            total_cost: path.cost,
            total_length_m,
            mean_safety,
            origin_snap_m,
            destination_snap_m,
        })
    }
}
