//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use hoopcast_clients::{ClientError, Collaborator};
use hoopcast_models::{DurationError, RequestError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input was rejected. `summary` becomes the `message` field.
    #[error("{detail}")]
    InvalidInput { summary: String, detail: String },

    #[error(transparent)]
    Upstream(#[from] ClientError),

    #[error("{0} returned no commentary")]
    EmptyGeneration(Collaborator),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_input(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidInput {
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream(e) if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            ApiError::Upstream(ClientError::Config { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(_) | ApiError::EmptyGeneration(_) => StatusCode::BAD_GATEWAY,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Pipeline step that failed, when the failure came from a collaborator.
    pub fn failed_step(&self) -> Option<&'static str> {
        match self {
            ApiError::Upstream(e) => Some(e.collaborator().pipeline_step()),
            ApiError::EmptyGeneration(c) => Some(c.pipeline_step()),
            _ => None,
        }
    }

    /// Short human-readable summary for the `message` field.
    pub fn summary(&self) -> String {
        match self {
            ApiError::InvalidInput { summary, .. } => summary.clone(),
            ApiError::Upstream(e) => format!("{} request failed", e.collaborator().vendor()),
            ApiError::EmptyGeneration(_) => "Failed to generate commentary".to_string(),
            ApiError::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Error detail, with internal details hidden in production.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Internal(_) | ApiError::Upstream(ClientError::Config { .. })
                if std::env::var("ENVIRONMENT")
                    .map(|v| v.eq_ignore_ascii_case("production"))
                    .unwrap_or(false) =>
            {
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl From<DurationError> for ApiError {
    fn from(e: DurationError) -> Self {
        Self::invalid_input("Invalid duration", e.to_string())
    }
}

impl From<RequestError> for ApiError {
    fn from(e: RequestError) -> Self {
        Self::invalid_input("Description is required", e.to_string())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    success: bool,
    message: String,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_step: Option<&'static str>,
    timestamp: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = ErrorResponse {
            success: false,
            message: self.summary(),
            error: self.detail(),
            failed_step: self.failed_step(),
            timestamp: Utc::now().to_rfc3339(),
        };

        let mut response = (status, Json(body)).into_response();
        if matches!(self, ApiError::RateLimited) {
            response
                .headers_mut()
                .insert("Retry-After", axum::http::HeaderValue::from_static("1"));
        }
        response
    }
}
