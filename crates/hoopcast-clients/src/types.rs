//! Collaborator request/response types.

use serde::{Deserialize, Serialize};

/// Text description of a video produced by the video-analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoAnalysis {
    pub text: String,
    pub video_id: String,
}

/// One text-generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub prompt: String,
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// A voice offered by the speech-synthesis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}
