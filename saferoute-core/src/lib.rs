//! Safety-weighted pedestrian routing
//!
//! Locations are scored from a precomputed table of urban features
//! (street lights, police stations, transit stops, nightlife venues). Road
//! segments are annotated with the score at their midpoint, and routes
//! minimize `length / (safety + epsilon)` instead of plain distance.

pub mod algo;
pub mod config;
mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod scoring;
pub mod spatial;

pub use error::Error;

pub use algo::{AnnotatedGraph, annotate};
pub use config::{CountCoefficients, RoutingConfig, SafetyWeights, ScoringConfig};
pub use loading::{GraphSource, RoutingModelConfig, create_routing_model};
pub use model::{
    AnalysisPoint, BoundingBox, FeatureStore, NamedGraph, RoadGraph, Route, RoutingModel,
};
pub use routing::RoutePlanner;
pub use scoring::{SafetyAssessment, SafetyScorer};

/// Stable identifier of a road node, as given in the node table
pub type NodeKey = u64;

/// Guard added to the safety score in the traversal cost denominator
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Distance recorded when no feature of a category lies within the radius
pub const NO_FEATURE_DISTANCE: f64 = 9999.0;
