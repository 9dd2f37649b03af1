//! HTTP interface for safety-weighted routing.
//!
//! Endpoints:
//! - `GET /health`
//! - `POST /score` scores a single location
//! - `POST /route` plans the safest route between two locations
//! - `GET /graphs` lists the loaded road networks

pub mod config;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::ServerConfig;
pub use error::{ApiError, ErrorResponse};
pub use handlers::{
    GraphsResponse, RouteRequest, ScoreRequest, ScoreResponse, health_check, list_graphs, route,
    score,
};
pub use state::{AppState, GraphCache, GraphSummary};

/// Builds the API router around shared state.
pub fn build_router(state: Arc<AppState>, max_concurrent_requests: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/score", post(score))
        .route("/route", post(route))
        .route("/graphs", get(list_graphs))
        .with_state(state)
        .layer(GlobalConcurrencyLimitLayer::new(max_concurrent_requests.max(1)))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
