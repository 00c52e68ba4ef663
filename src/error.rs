use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use crate::dice::RollError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Roll failed: {0}")]
    Roll(#[from] RollError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Roll(e) => {
                tracing::warn!("Roll rejected: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
