use serde::Deserialize;

use super::de::deserialize_flag;
use crate::NodeKey;

#[derive(Debug, Deserialize)]
pub struct NodeRow {
    pub id: NodeKey,
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct EdgeRow {
    pub source: NodeKey,
    pub target: NodeKey,
    /// Meters. Left empty when the source has no length for the segment.
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub oneway: bool,
}

pub(crate) const NODE_COLUMNS: [&str; 3] = ["id", "longitude", "latitude"];
pub(crate) const EDGE_COLUMNS: [&str; 2] = ["source", "target"];
