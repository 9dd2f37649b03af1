//! Scoring and routing parameters
//!
//! All values are plain numbers, passed explicitly to the component that
//! needs them. Nothing here is read from global state, so scorers with
//! different weights can live side by side.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_EPSILON, Error};

/// Weights of the safety components in the raw score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyWeights {
    pub street_light: f64,
    pub police: f64,
    pub transit: f64,
    /// Conventionally negative: dense nightlife lowers the score.
    pub nightlife: f64,
}

impl Default for SafetyWeights {
    fn default() -> Self {
        Self {
            street_light: 1.0,
            police: 1.5,
            transit: 0.5,
            nightlife: -0.7,
        }
    }
}

/// Per-instance bonus added to a component for every feature counted
/// within the search radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountCoefficients {
    pub street_light: f64,
    pub police: f64,
    pub transit: f64,
}

impl Default for CountCoefficients {
    fn default() -> Self {
        Self {
            street_light: 0.01,
            police: 0.1,
            transit: 0.02,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: SafetyWeights,
    pub count_coefficients: CountCoefficients,
    /// Radius the feature table counts were computed with, in meters.
    /// Informational: counts arrive precomputed.
    pub count_radius_m: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: SafetyWeights::default(),
            count_coefficients: CountCoefficients::default(),
            count_radius_m: 500.0,
        }
    }
}

impl ScoringConfig {
    pub fn with_weights(weights: SafetyWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        let w = &self.weights;
        let c = &self.count_coefficients;
        let values = [
            w.street_light,
            w.police,
            w.transit,
            w.nightlife,
            c.street_light,
            c.police,
            c.transit,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidData(
                "Scoring weights and coefficients must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Added to the safety score before dividing the edge length by it.
    pub epsilon: f64,
    /// Largest accepted distance between a query coordinate and the road
    /// node it snaps to. `None` disables the check.
    pub max_snap_distance_m: Option<f64>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_snap_distance_m: Some(1_000.0),
        }
    }
}

impl RoutingConfig {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(Error::InvalidData(format!(
                "Epsilon must be a positive number, got {}",
                self.epsilon
            )));
        }
        if let Some(threshold) = self.max_snap_distance_m
            && !(threshold.is_finite() && threshold >= 0.0)
        {
            return Err(Error::InvalidData(format!(
                "Snap distance threshold must be non-negative, got {threshold}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_policy() {
        let config = ScoringConfig::default();
        assert_eq!(config.weights.street_light, 1.0);
        assert_eq!(config.weights.police, 1.5);
        assert_eq!(config.weights.transit, 0.5);
        assert_eq!(config.weights.nightlife, -0.7);
        assert_eq!(config.count_coefficients.police, 0.1);
    }

    #[test]
    fn partial_weights_fill_in_defaults() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{"weights": {"nightlife": -2.0}}"#).unwrap();
        assert_eq!(config.weights.nightlife, -2.0);
        assert_eq!(config.weights.police, 1.5);
        assert_eq!(config.count_radius_m, 500.0);
    }

    #[test]
    fn rejects_non_finite_weights() {
        let config = ScoringConfig::with_weights(SafetyWeights {
            police: f64::NAN,
            ..SafetyWeights::default()
        });
        assert!(matches!(config.validate(), Err(Error::InvalidData(_))));
    }

    #[test]
    fn rejects_non_positive_epsilon() {
        let config = RoutingConfig {
            epsilon: 0.0,
            ..RoutingConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(RoutingConfig::default().validate().is_ok());
    }
}
