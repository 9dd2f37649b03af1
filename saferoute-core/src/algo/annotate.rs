//! Safety annotation of road graph edges
//!
//! Every edge gets the safety score sampled at the midpoint of its two
//! endpoints and a traversal cost of `length / (safety + epsilon)`.
//! Edges are independent, so the pass runs in parallel.

use std::io::Write;

use geo::Point;
use log::info;
use petgraph::graph::EdgeIndex;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    Error, NodeKey,
    model::{EdgeAnnotation, RoadGraph},
    scoring::SafetyScorer,
};

/// Road graph whose every edge carries an [`EdgeAnnotation`].
#[derive(Debug, Clone)]
pub struct AnnotatedGraph {
    graph: RoadGraph,
    annotations: Vec<EdgeAnnotation>,
}

impl AnnotatedGraph {
    pub fn road_graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn annotation(&self, edge: EdgeIndex) -> Option<&EdgeAnnotation> {
        self.annotations.get(edge.index())
    }

    pub fn annotations(&self) -> &[EdgeAnnotation] {
        &self.annotations
    }

    /// Gives the graph back, dropping the annotation so it can be redone.
    pub fn into_inner(self) -> RoadGraph {
        self.graph
    }

    /// Writes one CSV row per directed edge:
    /// `source, target, length_m, safety, cost`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CsvError`] if writing fails.
    pub fn write_edges_csv<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut writer = csv::Writer::from_writer(writer);
        let graph = self.graph.graph();

        for edge in graph.edge_indices() {
            let (Some((source, target)), Some(annotation)) =
                (self.graph.endpoints(edge), self.annotation(edge))
            else {
                continue;
            };
            writer.serialize(AnnotatedEdgeRow {
                source: source.key,
                target: target.key,
                length_m: graph[edge].length_m.unwrap_or_default(),
                safety: annotation.safety,
                cost: annotation.cost,
            })?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct AnnotatedEdgeRow {
    source: NodeKey,
    target: NodeKey,
    length_m: f64,
    safety: f64,
    cost: f64,
}

/// Traversal cost of a segment.
///
/// The epsilon keeps the division finite for a safety of zero.
pub fn traversal_cost(length_m: f64, safety: f64, epsilon: f64) -> f64 {
    length_m / (safety + epsilon)
}

/// Annotates every edge of `graph` with a safety score and traversal cost.
///
/// Topology, keys and lengths are left untouched. Running the pass again on
/// [`AnnotatedGraph::into_inner`] overwrites the previous annotation.
///
/// # Errors
///
/// [`Error::MissingLength`] if any edge lacks a usable length and
/// [`Error::InvalidData`] for a non-positive epsilon. Any failure aborts the
/// whole pass; no partially annotated graph is returned.
pub fn annotate(
    graph: RoadGraph,
    scorer: &SafetyScorer,
    epsilon: f64,
) -> Result<AnnotatedGraph, Error> {
    annotate_with(graph, epsilon, |midpoint| scorer.score(midpoint))
}

/// Like [`annotate`], with safety taken from `safety_at(midpoint)`.
///
/// # Errors
///
/// See [`annotate`]. An error from `safety_at` also aborts the pass, as does
/// a safety outside [0, 1].
pub fn annotate_with<F>(
    graph: RoadGraph,
    epsilon: f64,
    safety_at: F,
) -> Result<AnnotatedGraph, Error>
where
    F: Fn(&Point<f64>) -> Result<f64, Error> + Sync,
{
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(Error::InvalidData(format!(
            "Epsilon must be a positive number, got {epsilon}"
        )));
    }

    let edge_count = graph.edge_count();
    info!("Annotating {edge_count} road segments with safety scores");

    let annotations = (0..edge_count)
        .into_par_iter()
        .map(|idx| annotate_edge(&graph, EdgeIndex::new(idx), &safety_at, epsilon))
        .collect::<Result<Vec<_>, _>>()?;

    info!("Annotated {} road segments", annotations.len());

    Ok(AnnotatedGraph { graph, annotations })
}

fn annotate_edge<F>(
    graph: &RoadGraph,
    edge: EdgeIndex,
    safety_at: &F,
    epsilon: f64,
) -> Result<EdgeAnnotation, Error>
where
    F: Fn(&Point<f64>) -> Result<f64, Error>,
{
    let (source, target) = graph
        .endpoints(edge)
        .ok_or_else(|| Error::InvalidData(format!("Edge {} has no endpoints", edge.index())))?;

    let length = graph.graph()[edge]
        .valid_length()
        .ok_or(Error::MissingLength {
            from_node: source.key,
            to_node: target.key,
        })?;

    let midpoint = Point::new(
        (source.geometry.x() + target.geometry.x()) / 2.0,
        (source.geometry.y() + target.geometry.y()) / 2.0,
    );
    let safety = safety_at(&midpoint)?;
    if !(0.0..=1.0).contains(&safety) {
        return Err(Error::InvalidData(format!(
            "Safety {safety} of edge {} -> {} is outside [0, 1]",
            source.key, target.key
        )));
    }

    Ok(EdgeAnnotation {
        safety,
        cost: traversal_cost(length, safety, epsilon),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        DEFAULT_EPSILON,
        config::ScoringConfig,
        model::{AnalysisPoint, FeatureStore, Proximity},
    };

    fn scorer() -> SafetyScorer {
        let mut lit = AnalysisPoint::new(Point::new(0.0, 0.0));
        lit.street_light = Proximity::new(5.0, 12);
        lit.police = Proximity::new(100.0, 1);
        let mut rowdy = AnalysisPoint::new(Point::new(0.01, 0.0));
        rowdy.nightlife.count = 8;
        let store = FeatureStore::new(vec![lit, rowdy]).unwrap();
        SafetyScorer::new(Arc::new(store), ScoringConfig::default()).unwrap()
    }

    fn road(length: Option<f64>) -> RoadGraph {
        let mut builder = RoadGraph::builder();
        builder.add_node(1, Point::new(0.0, 0.0)).unwrap();
        builder.add_node(2, Point::new(0.0005, 0.0)).unwrap();
        builder.add_node(3, Point::new(0.0095, 0.0)).unwrap();
        builder.add_node(4, Point::new(0.0105, 0.0)).unwrap();
        builder.add_road(1, 2, Some(55.0), false).unwrap();
        builder.add_road(3, 4, length, true).unwrap();
        builder.build()
    }

    #[test]
    fn annotates_every_edge() {
        let annotated = annotate(road(Some(111.0)), &scorer(), DEFAULT_EPSILON).unwrap();
        assert_eq!(annotated.annotations().len(), 3);

        let safe = annotated.annotation(EdgeIndex::new(0)).unwrap();
        let unsafe_edge = annotated.annotation(EdgeIndex::new(2)).unwrap();
        assert_eq!(safe.safety, 1.0);
        assert_eq!(unsafe_edge.safety, 0.0);
        assert!((safe.cost - 55.0 / (1.0 + DEFAULT_EPSILON)).abs() < 1e-9);
        assert!((unsafe_edge.cost - 111.0 / DEFAULT_EPSILON).abs() < 1e-3);
        assert!(annotated.annotations().iter().all(|a| a.cost > 0.0));
    }

    #[test]
    fn reannotation_is_idempotent() {
        let scorer = scorer();
        let first = annotate(road(Some(111.0)), &scorer, DEFAULT_EPSILON).unwrap();
        let snapshot = first.annotations().to_vec();
        let second = annotate(first.into_inner(), &scorer, DEFAULT_EPSILON).unwrap();
        assert_eq!(snapshot, second.annotations());
    }

    #[test]
    fn missing_length_aborts_the_pass() {
        let err = annotate(road(None), &scorer(), DEFAULT_EPSILON).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingLength {
                from_node: 3,
                to_node: 4
            }
        ));
    }

    #[test]
    fn negative_length_counts_as_missing() {
        assert!(matches!(
            annotate(road(Some(-5.0)), &scorer(), DEFAULT_EPSILON),
            Err(Error::MissingLength { .. })
        ));
    }

    #[test]
    fn higher_safety_means_lower_cost() {
        let low = traversal_cost(100.0, 0.2, DEFAULT_EPSILON);
        let high = traversal_cost(100.0, 0.9, DEFAULT_EPSILON);
        assert!(high < low);
        assert!(traversal_cost(100.0, 0.0, DEFAULT_EPSILON).is_finite());
        assert!(traversal_cost(200.0, 0.5, DEFAULT_EPSILON) > traversal_cost(100.0, 0.5, DEFAULT_EPSILON));
    }

    #[test]
    fn custom_safety_source() {
        let annotated = annotate_with(road(Some(111.0)), DEFAULT_EPSILON, |midpoint| {
            Ok(if midpoint.x() < 0.005 { 0.25 } else { 1.0 })
        })
        .unwrap();
        let safeties: Vec<f64> = annotated.annotations().iter().map(|a| a.safety).collect();
        assert_eq!(safeties, vec![0.25, 0.25, 1.0]);
    }

    #[test]
    fn out_of_range_safety_aborts_the_pass() {
        let err = annotate_with(road(Some(111.0)), DEFAULT_EPSILON, |_| Ok(1.5)).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn exports_edges_as_csv() {
        let annotated = annotate(road(Some(111.0)), &scorer(), DEFAULT_EPSILON).unwrap();
        let mut buffer = Vec::new();
        annotated.write_edges_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("source,target,length_m,safety,cost"));
        assert_eq!(lines.count(), 3);
    }
}
