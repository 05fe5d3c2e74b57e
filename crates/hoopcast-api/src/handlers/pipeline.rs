//! Full analysis → commentary → speech endpoint.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};

use hoopcast_models::TargetDuration;

use crate::error::{ApiError, ApiResult};
use crate::handlers::audio::{filename_part, mp3_response, select_voice, VideoAudioQuery};
use crate::handlers::require_video_id;
use crate::services::PipelineRun;
use crate::state::AppState;

/// Returned with status 200 when only speech synthesis failed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOnlyResponse {
    pub success: bool,
    pub message: String,
    pub video_id: String,
    pub duration: TargetDuration,
    pub commentary_style: String,
    pub voice_id: String,
    pub original_description: String,
    pub commentary: String,
    pub audio_generation_error: String,
    pub timestamp: String,
    pub note: String,
}

/// Error body for a run that failed before any commentary was produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineFailureResponse {
    pub success: bool,
    pub message: String,
    pub error: String,
    pub failed_step: &'static str,
    pub video_id: String,
    pub duration: TargetDuration,
    pub commentary_style: String,
    pub voice_id: String,
    pub timestamp: String,
}

/// `GET /api/get-commentary-audio?videoId=&duration=&commentaryStyle=&voiceId=`
///
/// `duration` is required here. Analysis and generation failures produce an
/// error naming the failed step; a speech failure still answers 200 with the
/// commentary text.
pub async fn get_commentary_audio(
    State(state): State<AppState>,
    Query(query): Query<VideoAudioQuery>,
) -> ApiResult<Response> {
    let voice = select_voice(query.voice_id.as_deref(), query.commentary_style.as_deref());
    let video_id = require_video_id(query.video_id.as_deref())?;
    let raw_duration = query.duration.as_deref().filter(|d| !d.trim().is_empty());
    let duration = TargetDuration::parse_optional(raw_duration)?.ok_or_else(|| {
        ApiError::invalid_input("Duration is required", "Please provide a duration parameter (in seconds)")
    })?;

    info!(
        video_id = %video_id,
        duration = duration.seconds(),
        style = %voice.style_label,
        voice_id = %voice.voice_id,
        "Starting commentary audio pipeline"
    );

    let run = match state.pipeline.run(&video_id, Some(duration), &voice).await {
        Ok(run) => run,
        Err(e) => {
            let failed_step = e.failed_step().unwrap_or("unknown");
            error!(video_id = %video_id, failed_step, error = %e, "Commentary audio pipeline failed");
            let body = PipelineFailureResponse {
                success: false,
                message: "Commentary audio pipeline failed".to_string(),
                error: e.detail(),
                failed_step,
                video_id,
                duration,
                commentary_style: voice.style_label,
                voice_id: voice.voice_id,
                timestamp: Utc::now().to_rfc3339(),
            };
            return Ok((e.status_code(), Json(body)).into_response());
        }
    };

    let PipelineRun {
        analysis,
        commentary,
        audio,
    } = run;

    let audio = match audio {
        Ok(audio) => audio,
        Err(e) => {
            return Ok(Json(TextOnlyResponse {
                success: true,
                message: "Pipeline completed successfully (audio generation failed, returning text)".to_string(),
                video_id,
                duration,
                commentary_style: voice.style_label,
                voice_id: voice.voice_id,
                original_description: analysis.text,
                commentary: commentary.text,
                audio_generation_error: e.detail(),
                timestamp: Utc::now().to_rfc3339(),
                note: "Audio generation failed - this response contains the generated commentary text".to_string(),
            })
            .into_response());
        }
    };

    info!(
        video_id = %video_id,
        description_chars = analysis.text.chars().count(),
        commentary_chars = commentary.text.chars().count(),
        words = commentary.word_count,
        audio_bytes = audio.len(),
        "Commentary audio pipeline complete"
    );

    let filename = format!(
        "commentary-{}-{}-{}s.mp3",
        filename_part(&voice.style_label),
        filename_part(&video_id),
        duration
    );
    let headers = [
        ("x-video-id", urlencoding::encode(&video_id).into_owned()),
        ("x-duration", duration.to_string()),
        ("x-commentary-style", voice.style_label.clone()),
        ("x-voice-id", urlencoding::encode(&voice.voice_id).into_owned()),
        ("x-commentary", urlencoding::encode(&commentary.text).into_owned()),
        ("x-commentary-length", commentary.text.chars().count().to_string()),
        ("x-description-length", analysis.text.chars().count().to_string()),
    ];

    mp3_response(audio, &filename, &headers)
}
