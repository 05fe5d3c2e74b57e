//! Video analysis → commentary → speech.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use hoopcast_clients::{
    ClientResult, Collaborator, SpeechSynthesizer, TextGenerator, VideoAnalysis, VideoAnalyzer, Voice,
};
use hoopcast_models::{GenerationRequest, TargetDuration, VoiceSelection};

use crate::error::ApiResult;
use crate::metrics;
use crate::services::commentator::{Commentary, Commentator};

/// Description of a video and the commentary generated from it.
#[derive(Debug, Clone)]
pub struct VideoCommentary {
    pub analysis: VideoAnalysis,
    pub commentary: Commentary,
}

/// Outcome of a full run. Speech failure does not discard the text.
#[derive(Debug)]
pub struct PipelineRun {
    pub analysis: VideoAnalysis,
    pub commentary: Commentary,
    pub audio: ApiResult<Vec<u8>>,
}

/// Orchestrates the three collaborators. Cheap to clone.
#[derive(Clone)]
pub struct CommentaryPipeline {
    analyzer: Arc<dyn VideoAnalyzer>,
    commentator: Commentator,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl CommentaryPipeline {
    pub fn new(
        analyzer: Arc<dyn VideoAnalyzer>,
        generator: Arc<dyn TextGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            analyzer,
            commentator: Commentator::new(generator),
            synthesizer,
        }
    }

    /// Describe a video.
    pub async fn describe(&self, video_id: &str) -> ApiResult<VideoAnalysis> {
        let analysis = timed(Collaborator::VideoAnalysis, self.analyzer.analyze(video_id)).await?;
        info!(video_id, chars = analysis.text.len(), "Video analysis complete");
        Ok(analysis)
    }

    /// Generate commentary from a text description.
    pub async fn commentate(&self, request: &GenerationRequest) -> ApiResult<Commentary> {
        self.commentator.generate(request).await
    }

    /// Describe a video and generate commentary for it.
    pub async fn commentate_video(
        &self,
        video_id: &str,
        duration: Option<TargetDuration>,
    ) -> ApiResult<VideoCommentary> {
        let analysis = self.describe(video_id).await?;
        let request = GenerationRequest::new(analysis.text.clone(), duration)?;
        let commentary = self.commentate(&request).await?;
        Ok(VideoCommentary { analysis, commentary })
    }

    /// Speak `text` with the selected voice.
    pub async fn speak(&self, text: &str, voice: &VoiceSelection) -> ApiResult<Vec<u8>> {
        info!(style = %voice.style_label, voice_id = %voice.voice_id, "Synthesizing commentary");
        let audio = timed(
            Collaborator::SpeechSynthesis,
            self.synthesizer.synthesize(text, &voice.voice_id),
        )
        .await?;
        Ok(audio)
    }

    pub async fn voices(&self) -> ApiResult<Vec<Voice>> {
        Ok(timed(Collaborator::SpeechSynthesis, self.synthesizer.list_voices()).await?)
    }

    /// Run all three steps. Analysis and generation failures abort the run;
    /// a speech failure is carried in [`PipelineRun::audio`].
    pub async fn run(
        &self,
        video_id: &str,
        duration: Option<TargetDuration>,
        voice: &VoiceSelection,
    ) -> ApiResult<PipelineRun> {
        let VideoCommentary { analysis, commentary } = self.commentate_video(video_id, duration).await?;

        let audio = self.speak(&commentary.text, voice).await;
        if let Err(e) = &audio {
            warn!(video_id, error = %e, "Speech generation failed, returning text only");
            metrics::record_speech_degraded();
        }

        Ok(PipelineRun {
            analysis,
            commentary,
            audio,
        })
    }
}

async fn timed<T>(collaborator: Collaborator, call: impl Future<Output = ClientResult<T>>) -> ClientResult<T> {
    let start = Instant::now();
    let result = call.await;
    metrics::record_upstream_call(collaborator, result.is_ok(), start.elapsed());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::error::ApiError;
    use hoopcast_clients::{ClientError, CompletionRequest};
    use mockall::mock;

    mock! {
        pub Analyzer {}

        #[async_trait]
        impl VideoAnalyzer for Analyzer {
            async fn analyze(&self, video_id: &str) -> ClientResult<VideoAnalysis>;
        }
    }

    mock! {
        pub Generator {}

        #[async_trait]
        impl TextGenerator for Generator {
            async fn complete(&self, request: &CompletionRequest) -> ClientResult<Option<String>>;
        }
    }

    mock! {
        pub Synthesizer {}

        #[async_trait]
        impl SpeechSynthesizer for Synthesizer {
            async fn synthesize(&self, text: &str, voice_id: &str) -> ClientResult<Vec<u8>>;
            async fn list_voices(&self) -> ClientResult<Vec<Voice>>;
        }
    }

    fn analyzer_returning(text: &'static str) -> MockAnalyzer {
        let mut analyzer = MockAnalyzer::new();
        analyzer.expect_analyze().returning(move |id| {
            Ok(VideoAnalysis {
                text: text.to_string(),
                video_id: id.to_string(),
            })
        });
        analyzer
    }

    fn generator_returning(text: &'static str) -> MockGenerator {
        let mut generator = MockGenerator::new();
        generator
            .expect_complete()
            .returning(move |_| Ok(Some(text.to_string())));
        generator
    }

    fn pipeline(analyzer: MockAnalyzer, generator: MockGenerator, synthesizer: MockSynthesizer) -> CommentaryPipeline {
        CommentaryPipeline::new(Arc::new(analyzer), Arc::new(generator), Arc::new(synthesizer))
    }

    #[tokio::test]
    async fn test_run_speaks_trimmed_commentary_with_selected_voice() {
        let mut synthesizer = MockSynthesizer::new();
        synthesizer
            .expect_synthesize()
            .withf(|text, voice| {
                text.to_string() == "Harden steps back. Splash!" && voice.to_string() == "YiUJCEfHcazOOIxtzmUX"
            })
            .times(1)
            .returning(|_, _| Ok(vec![1, 2, 3]));

        let run = pipeline(
            analyzer_returning("Harden hits a step-back three."),
            generator_returning("Harden steps back. Splash!"),
            synthesizer,
        )
        .run(
            "vid-9",
            Some(TargetDuration::new(8.0).unwrap()),
            &VoiceSelection::resolve(None, Some("kevin-harlan")),
        )
        .await
        .unwrap();

        assert_eq!(run.analysis.video_id, "vid-9");
        assert_eq!(run.commentary.word_budget, 20);
        assert_eq!(run.audio.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_speech_failure_keeps_commentary() {
        let mut synthesizer = MockSynthesizer::new();
        synthesizer.expect_synthesize().returning(|_, _| {
            Err(ClientError::Api {
                collaborator: Collaborator::SpeechSynthesis,
                status: 401,
                body: "quota exceeded".to_string(),
            })
        });

        let run = pipeline(
            analyzer_returning("A block at the rim."),
            generator_returning("Rejected!"),
            synthesizer,
        )
        .run("vid", None, &VoiceSelection::resolve(None, None))
        .await
        .unwrap();

        assert_eq!(run.commentary.text, "Rejected!");
        let err = run.audio.unwrap_err();
        assert_eq!(err.failed_step(), Some("speech-generation"));
    }

    #[tokio::test]
    async fn test_analysis_failure_stops_before_generation() {
        let mut analyzer = MockAnalyzer::new();
        analyzer.expect_analyze().returning(|_| {
            Err(ClientError::Api {
                collaborator: Collaborator::VideoAnalysis,
                status: 404,
                body: "video not found".to_string(),
            })
        });
        let mut generator = MockGenerator::new();
        generator.expect_complete().never();
        let mut synthesizer = MockSynthesizer::new();
        synthesizer.expect_synthesize().never();

        let err = pipeline(analyzer, generator, synthesizer)
            .run("missing", None, &VoiceSelection::resolve(None, None))
            .await
            .unwrap_err();
        assert_eq!(err.failed_step(), Some("video-analysis"));
    }

    #[tokio::test]
    async fn test_empty_generation_stops_before_speech() {
        let mut generator = MockGenerator::new();
        generator.expect_complete().returning(|_| Ok(None));
        let mut synthesizer = MockSynthesizer::new();
        synthesizer.expect_synthesize().never();

        let err = pipeline(analyzer_returning("A layup."), generator, synthesizer)
            .run("vid", None, &VoiceSelection::resolve(None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::EmptyGeneration(_)));
    }
}
