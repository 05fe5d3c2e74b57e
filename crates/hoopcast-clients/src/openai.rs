//! OpenAI chat completions client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult, Collaborator};
use crate::http::{build_client, ensure_success, env_or, env_secs, required_env, trim_base_url};
use crate::traits::TextGenerator;
use crate::types::CompletionRequest;

const COLLABORATOR: Collaborator = Collaborator::TextGeneration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Configuration for the OpenAI client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// Base URL, without trailing slash
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        let api_key = required_env(COLLABORATOR, "OPENAI_API_KEY")?;
        Ok(Self {
            base_url: trim_base_url(&env_or("OPENAI_BASE_URL", DEFAULT_BASE_URL)),
            model: env_or("OPENAI_MODEL", DEFAULT_MODEL),
            timeout: env_secs("OPENAI_TIMEOUT", 60),
            ..Self::new(api_key)
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for `POST /chat/completions`.
pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> ClientResult<Self> {
        let http = build_client(COLLABORATOR, config.timeout)?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(OpenAiConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> ClientResult<Option<String>> {
        let url = format!("{}/chat/completions", self.config.base_url);
        info!(
            model = %self.config.model,
            max_tokens = request.max_output_tokens,
            "Requesting completion"
        );

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::network(COLLABORATOR, e))?;

        let response = ensure_success(COLLABORATOR, response).await?;
        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClientError::invalid_response(COLLABORATOR, e.to_string()))?;

        let choice = chat.choices.into_iter().next();
        if let Some(reason) = choice.as_ref().and_then(|c| c.finish_reason.as_deref()) {
            debug!(finish_reason = reason, "Completion finished");
        }

        Ok(choice
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty()))
    }
}
