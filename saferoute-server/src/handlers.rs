//! HTTP handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use geo::Point;
use geojson::Feature;
use saferoute_core::RoutePlanner;
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState, state::GraphSummary};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScoreRequest {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ComponentsResponse {
    pub street_light: f64,
    pub police: f64,
    pub transit: f64,
    pub nightlife: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreResponse {
    pub longitude: f64,
    pub latitude: f64,
    pub score: f64,
    pub raw_score: f64,
    pub nearest_point: usize,
    pub nearest_distance_m: f64,
    pub components: ComponentsResponse,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RouteRequest {
    /// `[lon, lat]`
    pub origin: [f64; 2],
    /// `[lon, lat]`
    pub destination: [f64; 2],
}

#[derive(Debug, Serialize)]
pub struct GraphsResponse {
    pub graphs: Vec<GraphSummary>,
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Safety score of a single location.
pub async fn score(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let location = parse_coordinate("location", [request.longitude, request.latitude])?;

    let assessment = state.scorer.assess(&location)?;
    Ok(Json(ScoreResponse {
        longitude: request.longitude,
        latitude: request.latitude,
        score: assessment.score,
        raw_score: assessment.raw,
        nearest_point: assessment.nearest_point,
        nearest_distance_m: assessment.nearest_distance_m,
        components: ComponentsResponse {
            street_light: assessment.components.street_light,
            police: assessment.components.police,
            transit: assessment.components.transit,
            nightlife: assessment.components.nightlife,
        },
    }))
}

/// Safest route between two coordinates, as a `GeoJSON` feature.
///
/// The search runs on the blocking pool. When the request timeout fires the
/// search is told to stop and the client gets a 504.
pub async fn route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<Feature>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let origin = parse_coordinate("origin", request.origin)?;
    let destination = parse_coordinate("destination", request.destination)?;

    let named = state
        .graphs
        .covering(origin, destination)
        .ok_or(ApiError::NoCoverage)?;
    tracing::debug!("Routing on '{}'", named.name);

    let cancel = Arc::new(AtomicBool::new(false));
    let search_cancel = Arc::clone(&cancel);
    let routing = state.routing;
    let search = tokio::task::spawn_blocking(move || {
        RoutePlanner::new(&named.graph, routing)?.plan_route_with_cancel(
            origin,
            destination,
            &search_cancel,
        )
    });

    let route = match tokio::time::timeout(state.request_timeout, search).await {
        Ok(Ok(result)) => result?,
        Ok(Err(join_error)) => return Err(ApiError::Internal(join_error.to_string())),
        Err(_) => {
            cancel.store(true, Ordering::Relaxed);
            return Err(ApiError::Timeout(
                u64::try_from(state.request_timeout.as_millis()).unwrap_or(u64::MAX),
            ));
        }
    };

    Ok(Json(route.to_feature()?))
}

pub async fn list_graphs(State(state): State<Arc<AppState>>) -> Json<GraphsResponse> {
    Json(GraphsResponse {
        graphs: state.graphs.summaries(),
    })
}

fn parse_coordinate(name: &str, [longitude, latitude]: [f64; 2]) -> Result<Point<f64>, ApiError> {
    if !(longitude.is_finite() && (-180.0..=180.0).contains(&longitude)) {
        return Err(ApiError::BadRequest(format!(
            "{name} longitude {longitude} is outside [-180, 180]"
        )));
    }
    if !(latitude.is_finite() && (-90.0..=90.0).contains(&latitude)) {
        return Err(ApiError::BadRequest(format!(
            "{name} latitude {latitude} is outside [-90, 90]"
        )));
    }
    Ok(Point::new(longitude, latitude))
}
