//! Mapping of failures to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use saferoute_core::Error as CoreError;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("No loaded road network covers both origin and destination")]
    NoCoverage,
    #[error("Route search exceeded the {0} ms time limit")]
    Timeout(u64),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("{0}")]
    Internal(String),
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Core(CoreError::InvalidData(_)) => StatusCode::BAD_REQUEST,
            Self::NoCoverage | Self::Core(CoreError::OutOfBounds { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Core(CoreError::NoPath) => StatusCode::NOT_FOUND,
            Self::Timeout(_) | Self::Core(CoreError::Cancelled) => StatusCode::GATEWAY_TIMEOUT,
            Self::Core(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) | Self::Core(CoreError::InvalidData(_)) => "invalid_request",
            Self::NoCoverage => "no_coverage",
            Self::Core(CoreError::OutOfBounds { .. }) => "out_of_bounds",
            Self::Core(CoreError::NoPath) => "no_path",
            Self::Timeout(_) | Self::Core(CoreError::Cancelled) => "timeout",
            Self::Core(_) | Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("{self}");
        }

        let body = ErrorResponse {
            error: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
