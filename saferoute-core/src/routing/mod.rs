//! Safest-route search over annotated road graphs

pub(crate) mod dijkstra;
mod to_geojson;
mod planner;

pub use planner::RoutePlanner;
