//! Commentary audio endpoints.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{self, header, HeaderName, HeaderValue, StatusCode};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use hoopcast_models::{GenerationRequest, TargetDuration, VoiceSelection};

use crate::error::{ApiError, ApiResult};
use crate::handlers::require_video_id;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAudioQuery {
    pub video_id: Option<String>,
    pub duration: Option<String>,
    pub commentary_style: Option<String>,
    /// Legacy explicit voice; overrides `commentaryStyle`
    pub voice_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechBody {
    /// Spoken verbatim when present
    #[serde(default)]
    pub text: Option<String>,
    /// Turned into commentary first when `text` is absent
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub commentary_style: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
}

/// Resolve the voice for a request, logging when a style was not recognised.
pub(crate) fn select_voice(voice_id: Option<&str>, commentary_style: Option<&str>) -> VoiceSelection {
    let voice = VoiceSelection::resolve(voice_id, commentary_style);
    if let Some(rejected) = &voice.rejected_style {
        warn!(requested = %rejected, fallback = %voice.style_label, "Unknown commentary style");
    }
    voice
}

/// Keep filename components to a conservative character set.
pub(crate) fn filename_part(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect()
}

/// MP3 attachment response with optional extra headers. Headers whose
/// value is not a valid header value are skipped.
pub(crate) fn mp3_response(audio: Vec<u8>, filename: &str, extra: &[(&'static str, String)]) -> ApiResult<Response> {
    let mut builder = http::Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .header(header::CONTENT_LENGTH, audio.len())
        .header(header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename));

    for (name, value) in extra {
        match HeaderValue::from_str(value) {
            Ok(value) => builder = builder.header(HeaderName::from_static(*name), value),
            Err(_) => warn!(header = *name, "Skipping invalid response header value"),
        }
    }

    builder
        .body(Body::from(audio))
        .map_err(|e| ApiError::internal(format!("Failed to build audio response: {}", e)))
}

/// `GET /api/basketball-audio?videoId=&duration=&commentaryStyle=&voiceId=`
pub async fn get_commentary_audio_for_video(
    State(state): State<AppState>,
    Query(query): Query<VideoAudioQuery>,
) -> ApiResult<Response> {
    let voice = select_voice(query.voice_id.as_deref(), query.commentary_style.as_deref());
    let video_id = require_video_id(query.video_id.as_deref())?;
    let duration = TargetDuration::parse_optional(query.duration.as_deref())?;

    let result = state.pipeline.commentate_video(&video_id, duration).await?;
    let audio = state.pipeline.speak(&result.commentary.text, &voice).await?;
    info!(video_id = %video_id, bytes = audio.len(), style = %voice.style_label, "Commentary audio ready");

    let filename = format!(
        "basketball-commentary-{}-{}.mp3",
        filename_part(&voice.style_label),
        filename_part(&video_id)
    );
    mp3_response(audio, &filename, &[])
}

/// `POST /api/basketball-audio` with `{text?, description?, duration?, commentaryStyle?, voiceId?}`
pub async fn create_commentary_audio(
    State(state): State<AppState>,
    Json(body): Json<SpeechBody>,
) -> ApiResult<Response> {
    let voice = select_voice(body.voice_id.as_deref(), body.commentary_style.as_deref());

    let text = match body.text.filter(|t| !t.trim().is_empty()) {
        Some(text) => text,
        None => {
            let description = body
                .description
                .filter(|d| !d.trim().is_empty())
                .ok_or_else(|| {
                    ApiError::invalid_input(
                        "Text or description is required",
                        "Please provide either text or description in the request body",
                    )
                })?;
            let duration = TargetDuration::from_json(body.duration.as_ref())?;
            let request = GenerationRequest::new(description, duration)?;
            state.pipeline.commentate(&request).await?.text
        }
    };

    let audio = state.pipeline.speak(&text, &voice).await?;
    info!(bytes = audio.len(), style = %voice.style_label, "Speech audio ready");

    let filename = format!("basketball-commentary-{}.mp3", filename_part(&voice.style_label));
    mp3_response(audio, &filename, &[])
}
