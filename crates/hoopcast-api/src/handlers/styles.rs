//! Commentary style and voice listings.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use hoopcast_clients::Voice;
use hoopcast_models::CommentaryStyle;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StylesResponse {
    pub success: bool,
    pub message: String,
    pub styles: &'static [CommentaryStyle],
    pub default_style: &'static str,
    pub count: usize,
    pub timestamp: String,
}

/// `GET /api/commentary-styles`
pub async fn list_commentary_styles() -> Json<StylesResponse> {
    Json(StylesResponse {
        success: true,
        message: "Commentary styles retrieved successfully".to_string(),
        styles: CommentaryStyle::ALL,
        default_style: CommentaryStyle::default_style().id,
        count: CommentaryStyle::ALL.len(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicesResponse {
    pub success: bool,
    pub voices: Vec<Voice>,
    pub count: usize,
    pub timestamp: String,
}

/// `GET /api/voices`
pub async fn list_voices(State(state): State<AppState>) -> ApiResult<Json<VoicesResponse>> {
    let voices = state.pipeline.voices().await?;
    Ok(Json(VoicesResponse {
        success: true,
        count: voices.len(),
        voices,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
