//! ElevenLabs text-to-speech client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ClientError, ClientResult, Collaborator};
use crate::http::{build_client, ensure_success, env_or, env_secs, required_env, trim_base_url};
use crate::traits::SpeechSynthesizer;
use crate::types::Voice;

const COLLABORATOR: Collaborator = Collaborator::SpeechSynthesis;

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
pub const DEFAULT_MODEL: &str = "eleven_turbo_v2";

/// Voice rendering parameters sent with every synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.8,
            similarity_boost: 0.8,
            style: 0.5,
            use_speaker_boost: true,
        }
    }
}

/// Configuration for the ElevenLabs client.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: String,
    /// Base URL, without trailing slash
    pub base_url: String,
    pub model: String,
    pub voice_settings: VoiceSettings,
    pub timeout: Duration,
}

impl ElevenLabsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            voice_settings: VoiceSettings::default(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        let api_key = required_env(COLLABORATOR, "ELEVENLABS_API_KEY")?;
        Ok(Self {
            base_url: trim_base_url(&env_or("ELEVENLABS_BASE_URL", DEFAULT_BASE_URL)),
            model: env_or("ELEVENLABS_MODEL", DEFAULT_MODEL),
            timeout: env_secs("ELEVENLABS_TIMEOUT", 60),
            ..Self::new(api_key)
        })
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<Voice>,
}

/// Client for the ElevenLabs text-to-speech and voices endpoints.
pub struct ElevenLabsClient {
    http: Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsClient {
    pub fn new(config: ElevenLabsConfig) -> ClientResult<Self> {
        let http = build_client(COLLABORATOR, config.timeout)?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ElevenLabsConfig::from_env()?)
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str, voice_id: &str) -> ClientResult<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(ClientError::invalid_input(COLLABORATOR, "text must not be empty"));
        }
        if voice_id.trim().is_empty() {
            return Err(ClientError::invalid_input(COLLABORATOR, "voiceId must not be empty"));
        }

        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url,
            urlencoding::encode(voice_id.trim())
        );
        info!(voice_id, chars = text.len(), "Generating speech");

        let response = self
            .http
            .post(&url)
            .header("xi-api-key", &self.config.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&SpeechRequest {
                text,
                model_id: &self.config.model,
                voice_settings: self.config.voice_settings,
            })
            .send()
            .await
            .map_err(|e| ClientError::network(COLLABORATOR, e))?;

        let response = ensure_success(COLLABORATOR, response).await?;
        let audio = response
            .bytes()
            .await
            .map_err(|e| ClientError::network(COLLABORATOR, e))?;

        if audio.is_empty() {
            return Err(ClientError::invalid_response(COLLABORATOR, "empty audio body"));
        }

        info!(bytes = audio.len(), "Speech generated");
        Ok(audio.to_vec())
    }

    async fn list_voices(&self) -> ClientResult<Vec<Voice>> {
        let url = format!("{}/v1/voices", self.config.base_url);

        let response = self
            .http
            .get(&url)
            .header("xi-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| ClientError::network(COLLABORATOR, e))?;

        let response = ensure_success(COLLABORATOR, response).await?;
        let body: VoicesResponse = response
            .json()
            .await
            .map_err(|e| ClientError::invalid_response(COLLABORATOR, e.to_string()))?;

        info!(count = body.voices.len(), "Fetched available voices");
        Ok(body.voices)
    }
}
