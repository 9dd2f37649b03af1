//! Server configuration file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use saferoute_core::{GraphSource, RoutingConfig, RoutingModelConfig, ScoringConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of the TOML config file.
///
/// ```toml
/// port = 8080
/// features_path = "data/features.csv"
///
/// [scoring.weights]
/// nightlife = -0.7
///
/// [[graphs]]
/// name = "south-delhi"
/// nodes_path = "data/south_delhi_nodes.csv"
/// edges_path = "data/south_delhi_edges.csv"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single route search
    pub request_timeout_ms: u64,
    pub max_concurrent_requests: usize,
    pub features_path: PathBuf,
    pub scoring: ScoringConfig,
    pub routing: RoutingConfig,
    pub graphs: Vec<GraphSource>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_ms: 5_000,
            max_concurrent_requests: 64,
            features_path: PathBuf::from("features.csv"),
            scoring: ScoringConfig::default(),
            routing: RoutingConfig::default(),
            graphs: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Input of the startup construction phase.
    pub fn model_config(&self) -> RoutingModelConfig {
        RoutingModelConfig {
            features_path: self.features_path.clone(),
            graphs: self.graphs.clone(),
            scoring: self.scoring,
            routing: self.routing,
        }
    }
}
