//! Rule-based safety scoring
//!
//! A location's score is taken from its nearest analysis point: a weighted
//! sum of proximity components, min-max normalized against the raw scores of
//! the whole feature store.

use std::sync::Arc;

use geo::Point;
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;

use crate::{
    Error,
    config::{CountCoefficients, SafetyWeights, ScoringConfig},
    model::{AnalysisPoint, FeatureStore, Proximity},
    spatial::SpatialIndex,
};

/// Normalized score returned when every analysis point has the same raw score.
pub const UNIFORM_SCORE: f64 = 0.5;

/// Unweighted safety components of one analysis point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyComponents {
    pub street_light: f64,
    pub police: f64,
    pub transit: f64,
    /// Raw venue count, deliberately not distance-decayed.
    pub nightlife: f64,
}

impl SafetyComponents {
    pub fn of(point: &AnalysisPoint, coefficients: &CountCoefficients) -> Self {
        Self {
            street_light: proximity_component(point.street_light, coefficients.street_light),
            police: proximity_component(point.police, coefficients.police),
            transit: proximity_component(point.transit, coefficients.transit),
            nightlife: f64::from(point.nightlife_total()),
        }
    }

    pub fn weighted_sum(&self, weights: &SafetyWeights) -> f64 {
        weights.street_light * self.street_light
            + weights.police * self.police
            + weights.transit * self.transit
            + weights.nightlife * self.nightlife
    }
}

fn proximity_component(proximity: Proximity, count_coefficient: f64) -> f64 {
    1.0 / (1.0 + proximity.distance) + f64::from(proximity.count) * count_coefficient
}

/// Full breakdown of a score query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyAssessment {
    /// Normalized score in [0, 1], higher is safer
    pub score: f64,
    pub raw: f64,
    pub components: SafetyComponents,
    /// Position of the nearest analysis point in the feature store
    pub nearest_point: usize,
    pub nearest_distance_m: f64,
}

/// Scores arbitrary coordinates against a feature store.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug, Clone)]
pub struct SafetyScorer {
    store: Arc<FeatureStore>,
    index: SpatialIndex<usize>,
    config: ScoringConfig,
    min_raw: f64,
    max_raw: f64,
}

impl SafetyScorer {
    /// Builds the spatial index and fixes the normalization bounds.
    ///
    /// # Errors
    ///
    /// [`Error::NoData`] for an empty store, [`Error::InvalidData`] for
    /// non-finite weights.
    pub fn new(store: Arc<FeatureStore>, config: ScoringConfig) -> Result<Self, Error> {
        config.validate()?;
        if store.is_empty() {
            return Err(Error::NoData);
        }

        let (min_raw, max_raw) = store
            .points()
            .par_iter()
            .map(|point| raw_score(point, &config))
            .collect::<Vec<_>>()
            .into_iter()
            .minmax_by(f64::total_cmp)
            .into_option()
            .ok_or(Error::NoData)?;

        let index = SpatialIndex::from_points(
            store
                .iter()
                .enumerate()
                .map(|(position, point)| (point.geometry, position)),
        );

        info!(
            "Safety scorer ready: {} analysis points, raw score range [{min_raw:.4}, {max_raw:.4}]",
            store.len()
        );

        Ok(Self {
            store,
            index,
            config,
            min_raw,
            max_raw,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    /// Global (min, max) raw score over the feature store.
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_raw, self.max_raw)
    }

    pub fn raw_score(&self, point: &AnalysisPoint) -> f64 {
        raw_score(point, &self.config)
    }

    /// Maps a raw score into [0, 1] using the cached bounds.
    pub fn normalize(&self, raw: f64) -> f64 {
        let span = self.max_raw - self.min_raw;
        if span <= 0.0 {
            return UNIFORM_SCORE;
        }
        ((raw - self.min_raw) / span).clamp(0.0, 1.0)
    }

    /// Normalized score of the analysis point at `position`.
    pub fn point_score(&self, position: usize) -> Option<f64> {
        self.store
            .get(position)
            .map(|point| self.normalize(self.raw_score(point)))
    }

    /// Normalized safety score of the analysis point nearest to `location`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidData`] for a non-finite coordinate.
    pub fn score(&self, location: &Point<f64>) -> Result<f64, Error> {
        self.assess(location).map(|assessment| assessment.score)
    }

    /// Like [`SafetyScorer::score`], with the raw score, components and the
    /// analysis point that was used.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidData`] for a non-finite coordinate.
    pub fn assess(&self, location: &Point<f64>) -> Result<SafetyAssessment, Error> {
        let nearest = self.index.nearest(location)?;
        let point = self.store.get(nearest.item).ok_or_else(|| {
            Error::InvalidData(format!("Analysis point {} is missing", nearest.item))
        })?;

        let components = SafetyComponents::of(point, &self.config.count_coefficients);
        let raw = components.weighted_sum(&self.config.weights);
        let score = self.normalize(raw);

        debug!(
            "Scored ({:.6}, {:.6}) via point {} at {:.1} m: {score:.4}",
            location.x(),
            location.y(),
            nearest.item,
            nearest.distance_m
        );

        Ok(SafetyAssessment {
            score,
            raw,
            components,
            nearest_point: nearest.item,
            nearest_distance_m: nearest.distance_m,
        })
    }
}

/// Weighted raw score of a single analysis point.
pub fn raw_score(point: &AnalysisPoint, config: &ScoringConfig) -> f64 {
    SafetyComponents::of(point, &config.count_coefficients).weighted_sum(&config.weights)
}
