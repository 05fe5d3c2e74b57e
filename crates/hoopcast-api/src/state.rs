//! Application state.

use std::sync::Arc;

use hoopcast_clients::{
    ClientResult, ElevenLabsClient, OpenAiClient, SpeechSynthesizer, TextGenerator, TwelveLabsClient,
    VideoAnalyzer,
};

use crate::config::ApiConfig;
use crate::services::CommentaryPipeline;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pipeline: CommentaryPipeline,
}

impl AppState {
    /// Build state with vendor clients configured from the environment.
    /// Fails when an API key is missing.
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        let analyzer = TwelveLabsClient::from_env()?;
        let generator = OpenAiClient::from_env()?;
        let synthesizer = ElevenLabsClient::from_env()?;

        Ok(Self::with_clients(
            config,
            Arc::new(analyzer),
            Arc::new(generator),
            Arc::new(synthesizer),
        ))
    }

    /// Build state around arbitrary collaborator implementations.
    pub fn with_clients(
        config: ApiConfig,
        analyzer: Arc<dyn VideoAnalyzer>,
        generator: Arc<dyn TextGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            config,
            pipeline: CommentaryPipeline::new(analyzer, generator, synthesizer),
        }
    }
}
