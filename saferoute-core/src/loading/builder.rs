use std::sync::Arc;
use std::thread::JoinHandle;

use log::{info, warn};

use super::config::{GraphSource, RoutingModelConfig};
use super::network::load_road_graph;
use crate::{
    Error,
    algo::annotate,
    model::{BoundingBox, FeatureStore, NamedGraph, RoadGraph, RoutingModel},
    scoring::SafetyScorer,
};

/// Creates a routing model based on the provided configuration
///
/// Road networks are parsed on background threads while the feature table
/// loads; every graph is then annotated with the shared scorer.
///
/// # Errors
///
/// Returns an error if there are problems reading or processing data
pub fn create_routing_model(config: &RoutingModelConfig) -> Result<RoutingModel, Error> {
    validate_config(config)?;

    // Start road network parsing in separate threads
    let handles: Vec<(String, JoinHandle<Result<RoadGraph, Error>>)> = config
        .graphs
        .iter()
        .map(|source| {
            info!(
                "Processing road network '{}': {}",
                source.name,
                source.nodes_path.display()
            );
            let GraphSource {
                name,
                nodes_path,
                edges_path,
            } = source.clone();
            let handle = std::thread::spawn(move || load_road_graph(&nodes_path, &edges_path));
            (name, handle)
        })
        .collect();

    info!("Processing analysis points");
    let store = FeatureStore::load(&config.features_path)?;
    let scorer = Arc::new(SafetyScorer::new(Arc::new(store), config.scoring)?);

    let mut graphs = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        let road_graph = handle
            .join()
            .map_err(|_| Error::UnrecoverableError("Road network loading thread panicked"))??;

        validate_graph_feature_overlap(&name, &road_graph, &scorer);

        let annotated = annotate(road_graph, &scorer, config.routing.epsilon)?;
        graphs.push(NamedGraph::new(name, annotated)?);
    }

    info!("Routing model created with {} road networks", graphs.len());
    Ok(RoutingModel { scorer, graphs })
}

fn validate_config(config: &RoutingModelConfig) -> Result<(), Error> {
    if !config.features_path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "Feature table not found: {}",
                config.features_path.display()
            ),
        )));
    }

    if config.graphs.is_empty() {
        return Err(Error::InvalidData(
            "No road networks provided in the configuration".to_string(),
        ));
    }

    for source in &config.graphs {
        for path in [&source.nodes_path, &source.edges_path] {
            if !path.exists() {
                return Err(Error::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!(
                        "Road network '{}' file not found: {}",
                        source.name,
                        path.display()
                    ),
                )));
            }
        }
    }

    config.scoring.validate()?;
    config.routing.validate()
}

/// Segments far from every analysis point inherit the score of whatever
/// point happens to be closest, which is rarely meaningful.
fn validate_graph_feature_overlap(name: &str, graph: &RoadGraph, scorer: &SafetyScorer) {
    let (Some(graph_bounds), Some(feature_bounds)) = (graph.bounds(), scorer.store().bounds())
    else {
        return;
    };

    if !covers_loosely(&feature_bounds, &graph_bounds) {
        warn!(
            "Road network '{name}' extends beyond the analysis point coverage area. \
        Segments outside it are scored from the nearest edge of the feature table."
        );
    }
}

fn covers_loosely(features: &BoundingBox, graph: &BoundingBox) -> bool {
    features.expand_by(0.01).covers(graph)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::*;

    fn scratch_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "saferoute-builder-{test}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn config(dir: &Path) -> RoutingModelConfig {
        let features_path = write(
            dir,
            "features.csv",
            "longitude,latitude,distance_to_nearest_streetlight,count_of_nearby_streetlight_500m_approx,\
             distance_to_nearest_policestation,count_of_nearby_policestation_500m_approx,\
             distance_to_nearest_transportstation,count_of_nearby_transportstation_500m_approx,\
             count_of_nearby_nightlifevenue_500m_approx\n\
             0.0,0.0,5.0,10,,0,,0,0\n\
             0.002,0.0,900.0,0,,0,,0,0\n",
        );
        let nodes_path = write(dir, "nodes.csv", "id,longitude,latitude\n1,0.0,0.0\n2,0.001,0.0\n3,0.002,0.0\n");
        let edges_path = write(
            dir,
            "edges.csv",
            "source,target,length,oneway\n1,2,111.0,false\n2,3,111.0,true\n",
        );

        RoutingModelConfig {
            features_path,
            graphs: vec![GraphSource {
                name: "line".to_string(),
                nodes_path,
                edges_path,
            }],
            ..RoutingModelConfig::default()
        }
    }

    #[test]
    fn builds_model_from_files() {
        let dir = scratch_dir("ok");
        let model = create_routing_model(&config(&dir)).unwrap();

        assert_eq!(model.scorer.store().len(), 2);
        assert_eq!(model.graphs.len(), 1);
        let line = model.graph("line").unwrap();
        assert_eq!(line.graph.road_graph().edge_count(), 3);
        assert_eq!(line.graph.annotations().len(), 3);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_feature_table_is_reported() {
        let dir = scratch_dir("missing");
        let mut config = config(&dir);
        config.features_path = dir.join("nope.csv");
        assert!(matches!(
            create_routing_model(&config),
            Err(Error::IoError(_))
        ));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn requires_at_least_one_graph() {
        let dir = scratch_dir("empty");
        let mut config = config(&dir);
        config.graphs.clear();
        assert!(matches!(
            create_routing_model(&config),
            Err(Error::InvalidData(_))
        ));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn loose_coverage_tolerates_small_overhang() {
        let features = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let inside = BoundingBox::new(-0.005, 0.0, 1.0, 1.005).unwrap();
        let outside = BoundingBox::new(-0.5, 0.0, 1.0, 1.0).unwrap();
        assert!(covers_loosely(&features, &inside));
        assert!(!covers_loosely(&features, &outside));
    }
}
