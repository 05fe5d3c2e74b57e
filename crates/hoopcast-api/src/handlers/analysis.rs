//! Video analysis smoke test.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    pub message: String,
    pub video_id: String,
    pub analysis: String,
    pub timestamp: String,
}

/// `GET /api/test-video-analysis`: analyze the configured sample video.
pub async fn test_video_analysis(State(state): State<AppState>) -> ApiResult<Json<AnalysisResponse>> {
    let video_id = state.config.sample_video_id.clone();
    let analysis = state.pipeline.describe(&video_id).await?;

    Ok(Json(AnalysisResponse {
        success: true,
        message: "Video analysis completed successfully".to_string(),
        video_id,
        analysis: analysis.text,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
