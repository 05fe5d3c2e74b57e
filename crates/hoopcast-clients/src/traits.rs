//! Collaborator seams.
//!
//! The API server only talks to these traits, so each vendor client can be
//! swapped for a fake in tests.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::types::{CompletionRequest, VideoAnalysis, Voice};

/// Turns a video id into a text description.
#[async_trait]
pub trait VideoAnalyzer: Send + Sync {
    async fn analyze(&self, video_id: &str) -> ClientResult<VideoAnalysis>;
}

/// Generates text from a prompt. `Ok(None)` means the service answered
/// without content.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> ClientResult<Option<String>>;
}

/// Renders text as MP3 audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice_id: &str) -> ClientResult<Vec<u8>>;

    async fn list_voices(&self) -> ClientResult<Vec<Voice>>;
}
