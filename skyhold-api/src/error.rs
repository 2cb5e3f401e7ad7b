use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures surfaced by the reporting endpoints, rendered as `{"error": ...}`.
#[derive(Debug)]
pub enum AppError {
    /// The flight has no seat with this number
    SeatNotFound(String),
    /// Report rendering failed (e.g. Prometheus encoding)
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::SeatNotFound(seat) => {
                (StatusCode::NOT_FOUND, format!("Seat {} not found", seat))
            }
            AppError::Internal(err) => {
                tracing::error!("Failed to render report: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
