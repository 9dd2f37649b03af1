use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed feature data: {0}")]
    DataFormat(String),
    #[error("Spatial index is empty")]
    EmptyIndex,
    #[error("Feature store contains no analysis points")]
    NoData,
    #[error("Edge {from_node} -> {to_node} has no valid length")]
    MissingLength { from_node: u64, to_node: u64 },
    #[error("No path between origin and destination")]
    NoPath,
    #[error(
        "Coordinate is {distance_m:.1} m away from the nearest road node (limit is {threshold_m:.1} m)"
    )]
    OutOfBounds { distance_m: f64, threshold_m: f64 },
    #[error("Route search was cancelled")]
    Cancelled,
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("{0}")]
    UnrecoverableError(&'static str),
}
