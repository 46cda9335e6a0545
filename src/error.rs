use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid period window: {0}")]
    InvalidWindow(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Upstream returned {status} for {path}")]
    UpstreamStatus { status: u16, path: String },

    #[error("Upstream sent invalid data: {0}")]
    UpstreamData(String),

    #[error("Response superseded by a newer request (generation {0})")]
    Stale(u64),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidWindow(_) | AppError::InvalidInput(_) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Stale(generation) => {
                tracing::debug!(generation, "Discarding superseded response");
                StatusCode::CONFLICT
            }
            AppError::Upstream(e) => {
                tracing::error!("Upstream error: {:?}", e);
                StatusCode::BAD_GATEWAY
            }
            AppError::UpstreamStatus { status, path } => {
                tracing::error!(status, path = %path, "Upstream returned an error status");
                StatusCode::BAD_GATEWAY
            }
            AppError::UpstreamData(msg) => {
                tracing::error!("Upstream sent invalid data: {}", msg);
                StatusCode::BAD_GATEWAY
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Input errors raised while processing provider data become `UpstreamData`.
    pub fn from_upstream(self) -> Self {
        match self {
            AppError::InvalidInput(msg) => AppError::UpstreamData(msg),
            other => other,
        }
    }
}
