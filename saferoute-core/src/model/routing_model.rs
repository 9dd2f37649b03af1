//! Scorer plus annotated graphs, ready to answer queries

use std::sync::Arc;

use geo::Point;

use super::BoundingBox;
use crate::{Error, algo::AnnotatedGraph, scoring::SafetyScorer};

/// Margin added around a graph's node extent when matching queries, in
/// degrees (about 1 km at the equator).
pub const COVERAGE_MARGIN_DEG: f64 = 0.01;

/// Annotated graph together with the area it serves.
#[derive(Debug, Clone)]
pub struct NamedGraph {
    pub name: String,
    pub bounds: BoundingBox,
    pub graph: Arc<AnnotatedGraph>,
}

impl NamedGraph {
    /// # Errors
    ///
    /// [`Error::EmptyIndex`] for a graph
    /// without nodes.
    pub fn new(name: impl Into<String>, graph: AnnotatedGraph) -> Result<Self, Error> {
        let bounds = graph
            .road_graph()
            .bounds()
            .ok_or(Error::EmptyIndex)?
            .expand_by(COVERAGE_MARGIN_DEG);
        Ok(Self {
            name: name.into(),
            bounds,
            graph: Arc::new(graph),
        })
    }

    /// True when both coordinates fall inside the served area.
    pub fn covers(&self, origin: Point<f64>, destination: Point<f64>) -> bool {
        BoundingBox::from_points([origin, destination])
            .is_some_and(|query| self.bounds.covers(&query))
    }
}

/// Immutable result of the construction phase, shared across queries.
#[derive(Debug, Clone)]
pub struct RoutingModel {
    pub scorer: Arc<SafetyScorer>,
    pub graphs: Vec<NamedGraph>,
}

impl RoutingModel {
    /// First graph whose bounding box contains both coordinates.
    pub fn graph_covering(
        &self,
        origin: Point<f64>,
        destination: Point<f64>,
    ) -> Option<&NamedGraph> {
        self.graphs
            .iter()
            .find(|named| named.covers(origin, destination))
    }

    pub fn graph(&self, name: &str) -> Option<&NamedGraph> {
        self.graphs.iter().find(|named| named.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DEFAULT_EPSILON,
        algo::annotate,
        config::ScoringConfig,
        model::{AnalysisPoint, FeatureStore, RoadGraph},
    };

    fn model() -> RoutingModel {
        let store = FeatureStore::new(vec![AnalysisPoint::new(Point::new(0.0, 0.0))]).unwrap();
        let scorer = Arc::new(SafetyScorer::new(Arc::new(store), ScoringConfig::default()).unwrap());

        let graphs = [("west", 0.0), ("east", 10.0)]
            .into_iter()
            .map(|(name, x)| {
                let mut builder = RoadGraph::builder();
                builder.add_node(1, Point::new(x, 0.0)).unwrap();
                builder.add_node(2, Point::new(x + 0.1, 0.1)).unwrap();
                builder.add_road(1, 2, Some(15_000.0), false).unwrap();
                let graph = annotate(builder.build(), &scorer, DEFAULT_EPSILON).unwrap();
                NamedGraph::new(name, graph).unwrap()
            })
            .collect();

        RoutingModel { scorer, graphs }
    }

    #[test]
    fn picks_graph_covering_both_endpoints() {
        let model = model();
        let east = model
            .graph_covering(Point::new(10.01, 0.01), Point::new(10.09, 0.09))
            .unwrap();
        assert_eq!(east.name, "east");
        assert!(
            model
                .graph_covering(Point::new(0.05, 0.05), Point::new(10.05, 0.05))
                .is_none()
        );
    }

    #[test]
    fn margin_extends_coverage() {
        let model = model();
        let west = model
            .graph_covering(Point::new(-0.005, 0.0), Point::new(0.1, 0.105))
            .unwrap();
        assert_eq!(west.name, "west");
        assert!(model.graph("east").is_some());
        assert!(model.graph("north").is_none());
    }
}
