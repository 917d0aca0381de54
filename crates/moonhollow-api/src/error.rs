//! Moonhollow — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use moonhollow_core::error::GameError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `GameError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub GameError);

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            GameError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            GameError::InvalidPhase { .. } => (StatusCode::CONFLICT, "invalid_phase"),
            GameError::TiedVote(_) => (StatusCode::CONFLICT, "tied_vote"),
            GameError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            GameError::Provider(_) => (StatusCode::BAD_GATEWAY, "provider_error"),
            GameError::EmptyReply => (StatusCode::BAD_GATEWAY, "empty_reply"),
            GameError::MalformedJson(_) => (StatusCode::BAD_GATEWAY, "malformed_reply"),
            GameError::ArbiterParse(_) => (StatusCode::BAD_GATEWAY, "arbiter_parse_error"),
            GameError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: GameError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(status_of(GameError::game_not_found("g-1")), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_phase_and_tie_conflicts_map_to_409() {
        assert_eq!(
            status_of(GameError::InvalidPhase {
                expected: "night".into(),
                actual: "day discussion".into(),
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(GameError::TiedVote(vec!["Ada".into(), "Bea".into()])),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(GameError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_provider_side_failures_map_to_502() {
        assert_eq!(
            status_of(GameError::Provider("timeout".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status_of(GameError::EmptyReply), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_of(GameError::MalformedJson("not json".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(GameError::ArbiterParse("no names".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(GameError::Infrastructure("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
