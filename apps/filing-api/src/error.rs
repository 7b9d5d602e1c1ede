//! Error types for the filing API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Case not found: {0}")]
    CaseNotFound(String),

    #[error("Draft not found: {0}")]
    DraftNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Compile error: {0}")]
    Compile(#[from] filing_compiler::CompileError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::CaseNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Case not found: {}", id))
            }
            ApiError::DraftNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Draft not found: {}", id))
            }
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            // Row loading failures surface verbatim so a broken column is
            // diagnosable from the client.
            ApiError::Database(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Compile(e) => {
                tracing::error!("Compile error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
