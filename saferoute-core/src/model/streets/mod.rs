//! Road network model

pub mod components;
pub mod network;

pub use components::{EdgeAnnotation, RoadEdge, RoadNode};
pub use network::{RoadGraph, RoadGraphBuilder};
