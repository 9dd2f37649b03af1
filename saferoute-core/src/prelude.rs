pub use crate::{DEFAULT_EPSILON, NO_FEATURE_DISTANCE, NodeKey};

// Re-export key components
pub use crate::algo::{AnnotatedGraph, annotate, annotate_with, traversal_cost};
pub use crate::config::{CountCoefficients, RoutingConfig, SafetyWeights, ScoringConfig};
pub use crate::loading::{RoutingModelConfig, create_routing_model, load_road_graph};
pub use crate::model::{
    AnalysisPoint, BoundingBox, FeatureStore, NamedGraph, Proximity, RoadGraph, Route,
    RoutingModel,
};
pub use crate::routing::RoutePlanner;
pub use crate::scoring::{SafetyAssessment, SafetyScorer};
pub use crate::spatial::{Neighbor, SpatialIndex};
