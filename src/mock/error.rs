//! Mock server errors
//!
//! Rendered the way the real admin API renders them: a JSON body with a
//! `message` field. Injected upstream failures use a plain-text body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MockError {
    #[error("Unauthenticated.")]
    Unauthenticated,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(String),

    /// Injected failure
    #[error("Upstream failure {}", .0.as_u16())]
    Upstream(StatusCode),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = match &self {
            MockError::Unauthenticated | MockError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            MockError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MockError::Upstream(status) => *status,
        };

        if let MockError::Upstream(status) = self {
            let text = status.canonical_reason().unwrap_or("Error");
            return (status, text.to_string()).into_response();
        }

        tracing::debug!(status = status.as_u16(), error = %self, "Mock request rejected");
        let body = json!({
            "status": false,
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
