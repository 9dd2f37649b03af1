//! This module is responsible for loading the analysis point table and road
//! networks from CSV and building a routing model.

mod builder;
mod config;
pub mod features;
pub mod network;
mod parser;

pub use builder::create_routing_model;
pub use config::{GraphSource, RoutingModelConfig};
pub use network::{load_road_graph, road_graph_from_readers};
