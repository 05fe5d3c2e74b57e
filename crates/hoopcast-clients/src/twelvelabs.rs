//! Twelve Labs video analysis client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult, Collaborator};
use crate::http::{build_client, ensure_success, env_or, env_secs, required_env, trim_base_url};
use crate::traits::VideoAnalyzer;
use crate::types::VideoAnalysis;

const COLLABORATOR: Collaborator = Collaborator::VideoAnalysis;

pub const DEFAULT_BASE_URL: &str = "https://api.twelvelabs.io/v1.3";
pub const DEFAULT_ANALYSIS_PROMPT: &str =
    "Provide a comprehensive description and summary of this video content.";

/// Placeholder returned when the service answers without any text.
pub const EMPTY_ANALYSIS_TEXT: &str = "No analysis text available";

/// Configuration for the Twelve Labs client.
#[derive(Debug, Clone)]
pub struct TwelveLabsConfig {
    pub api_key: String,
    /// Base URL, without trailing slash
    pub base_url: String,
    pub timeout: Duration,
    pub prompt: String,
    pub temperature: f32,
}

impl TwelveLabsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
            prompt: DEFAULT_ANALYSIS_PROMPT.to_string(),
            temperature: 0.2,
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        let api_key = required_env(COLLABORATOR, "TWELVE_LABS_API_KEY")?;
        Ok(Self {
            base_url: trim_base_url(&env_or("TWELVE_LABS_BASE_URL", DEFAULT_BASE_URL)),
            timeout: env_secs("TWELVE_LABS_TIMEOUT", 120),
            prompt: env_or("TWELVE_LABS_PROMPT", DEFAULT_ANALYSIS_PROMPT),
            ..Self::new(api_key)
        })
    }
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    video_id: &'a str,
    prompt: &'a str,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl AnalyzeResponse {
    fn into_text(self) -> String {
        self.data
            .filter(|s| !s.is_empty())
            .or(self.text.filter(|s| !s.is_empty()))
            .unwrap_or_else(|| EMPTY_ANALYSIS_TEXT.to_string())
    }
}

/// Client for the Twelve Labs `analyze` endpoint.
pub struct TwelveLabsClient {
    http: Client,
    config: TwelveLabsConfig,
}

impl TwelveLabsClient {
    pub fn new(config: TwelveLabsConfig) -> ClientResult<Self> {
        let http = build_client(COLLABORATOR, config.timeout)?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(TwelveLabsConfig::from_env()?)
    }
}

#[async_trait]
impl VideoAnalyzer for TwelveLabsClient {
    async fn analyze(&self, video_id: &str) -> ClientResult<VideoAnalysis> {
        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(ClientError::invalid_input(
                COLLABORATOR,
                "Invalid videoId: must be a non-empty string",
            ));
        }

        let url = format!("{}/analyze", self.config.base_url);
        info!(video_id, "Analyzing video");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(&AnalyzeRequest {
                video_id,
                prompt: &self.config.prompt,
                temperature: self.config.temperature,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| ClientError::network(COLLABORATOR, e))?;

        let response = ensure_success(COLLABORATOR, response).await?;
        let body: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| ClientError::invalid_response(COLLABORATOR, e.to_string()))?;

        let text = body.into_text();
        debug!(video_id, chars = text.len(), "Video analysis received");

        Ok(VideoAnalysis {
            text,
            video_id: video_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TwelveLabsClient {
        let config = TwelveLabsConfig {
            base_url: server.uri(),
            ..TwelveLabsConfig::new("tl-key")
        };
        TwelveLabsClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_returns_data_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(header("x-api-key", "tl-key"))
            .and(body_partial_json(json!({
                "video_id": "vid-1",
                "prompt": DEFAULT_ANALYSIS_PROMPT,
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "res-1",
                "data": "A player in white drives to the rim and dunks."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let analysis = client_for(&server).analyze("vid-1").await.unwrap();
        assert_eq!(analysis.video_id, "vid-1");
        assert_eq!(analysis.text, "A player in white drives to the rim and dunks.");
    }

    #[tokio::test]
    async fn test_analyze_falls_back_to_text_then_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(body_partial_json(json!({ "video_id": "with-text" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "", "text": "Fast break." })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(body_partial_json(json!({ "video_id": "empty" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.analyze("with-text").await.unwrap().text, "Fast break.");
        assert_eq!(client.analyze("empty").await.unwrap().text, EMPTY_ANALYSIS_TEXT);
    }

    #[tokio::test]
    async fn test_analyze_maps_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(404).set_body_string("video not found"))
            .mount(&server)
            .await;

        let err = client_for(&server).analyze("missing").await.unwrap_err();
        match &err {
            ClientError::Api { collaborator, status, body } => {
                assert_eq!(*collaborator, Collaborator::VideoAnalysis);
                assert_eq!(*status, 404);
                assert_eq!(body, "video not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Twelve Labs API error: 404 - video not found");
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_id_without_calling_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server).analyze("  ").await.unwrap_err();
        assert!(err.is_invalid_input());
    }
}
