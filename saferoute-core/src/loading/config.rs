use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{RoutingConfig, ScoringConfig};

/// Node and edge tables of one road network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSource {
    pub name: String,
    pub nodes_path: PathBuf,
    pub edges_path: PathBuf,
}

/// Everything needed to build a [`RoutingModel`](crate::model::RoutingModel).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingModelConfig {
    pub features_path: PathBuf,
    pub graphs: Vec<GraphSource>,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
}
