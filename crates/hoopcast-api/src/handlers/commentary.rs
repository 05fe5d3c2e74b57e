//! Commentary text endpoints.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use hoopcast_models::{GenerationRequest, RequestError, TargetDuration};

use crate::error::ApiResult;
use crate::handlers::require_video_id;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCommentaryQuery {
    pub video_id: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionCommentaryBody {
    #[serde(default)]
    pub description: Option<String>,
    /// Number or numeric string; `null` means absent
    #[serde(default)]
    pub duration: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentaryResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    pub original_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<TargetDuration>,
    pub commentary: String,
    pub word_budget: u32,
    pub word_count: usize,
    pub timestamp: String,
}

/// `GET /api/basketball-commentary?videoId=&duration=`
pub async fn get_commentary(
    State(state): State<AppState>,
    Query(query): Query<VideoCommentaryQuery>,
) -> ApiResult<Json<CommentaryResponse>> {
    let video_id = require_video_id(query.video_id.as_deref())?;
    let duration = TargetDuration::parse_optional(query.duration.as_deref())?;
    info!(video_id = %video_id, duration = ?duration.map(|d| d.seconds()), "Commentary requested for video");

    let result = state.pipeline.commentate_video(&video_id, duration).await?;

    Ok(Json(CommentaryResponse {
        success: true,
        message: "Basketball commentary generated successfully".to_string(),
        video_id: Some(video_id),
        original_description: result.analysis.text,
        duration,
        commentary: result.commentary.text,
        word_budget: result.commentary.word_budget,
        word_count: result.commentary.word_count,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// `POST /api/basketball-commentary` with `{description, duration?}`
pub async fn create_commentary(
    State(state): State<AppState>,
    Json(body): Json<DescriptionCommentaryBody>,
) -> ApiResult<Json<CommentaryResponse>> {
    let description = body
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or(RequestError::MissingDescription)?;
    let duration = TargetDuration::from_json(body.duration.as_ref())?;
    let request = GenerationRequest::new(description, duration)?;

    let commentary = state.pipeline.commentate(&request).await?;

    Ok(Json(CommentaryResponse {
        success: true,
        message: "Basketball commentary generated successfully".to_string(),
        video_id: None,
        original_description: request.source_description,
        duration,
        commentary: commentary.text,
        word_budget: commentary.word_budget,
        word_count: commentary.word_count,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
