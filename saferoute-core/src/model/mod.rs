//! Data model for safety-weighted routing
//!
//! Contains the analysis point table, the road network, route results and
//! the assembled routing model.

pub mod bbox;
pub mod features;
pub mod route;
pub mod routing_model;
pub mod streets;

pub use bbox::BoundingBox;
pub use features::{AnalysisPoint, FeatureStore, NightlifeMix, Proximity};
pub use route::Route;
pub use routing_model::{NamedGraph, RoutingModel};
pub use streets::{EdgeAnnotation, RoadEdge, RoadGraph, RoadGraphBuilder, RoadNode};
