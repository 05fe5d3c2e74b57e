//! Health check handlers.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use hoopcast_clients::Collaborator;

use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub environment: String,
    pub collaborators: Vec<CollaboratorStatus>,
}

#[derive(Serialize)]
pub struct CollaboratorStatus {
    pub step: &'static str,
    pub vendor: &'static str,
    pub status: &'static str,
}

/// Readiness check endpoint (readiness probe).
///
/// Vendor keys are checked at startup, so every collaborator of a running
/// server is configured. Makes no upstream calls.
pub async fn ready(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let collaborators = [
        Collaborator::VideoAnalysis,
        Collaborator::TextGeneration,
        Collaborator::SpeechSynthesis,
    ]
    .into_iter()
    .map(|c| CollaboratorStatus {
        step: c.pipeline_step(),
        vendor: c.vendor(),
        status: "configured",
    })
    .collect();

    Json(ReadinessResponse {
        status: "ready".to_string(),
        environment: state.config.environment.clone(),
        collaborators,
    })
}
