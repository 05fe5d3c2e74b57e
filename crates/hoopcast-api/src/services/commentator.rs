//! Duration-aware commentary generation.
//!
//! Plans the word budget and prompt, asks the text generator for a draft
//! under a generous token cap, then trims the draft back to whole sentences.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use hoopcast_clients::{Collaborator, CompletionRequest, TextGenerator};
use hoopcast_commentary::{plan_commentary, trim_commentary, TrimOutcome};
use hoopcast_models::GenerationRequest;

use crate::error::{ApiError, ApiResult};
use crate::metrics;

/// Commentary ready to be returned or spoken.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Commentary {
    pub text: String,
    pub word_budget: u32,
    pub word_count: usize,
    /// Words in the untrimmed draft
    pub raw_word_count: usize,
    pub trim_outcome: TrimOutcome,
}

#[derive(Clone)]
pub struct Commentator {
    generator: Arc<dyn TextGenerator>,
}

impl Commentator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generate commentary for `request`, fitted to its duration.
    pub async fn generate(&self, request: &GenerationRequest) -> ApiResult<Commentary> {
        let plan = plan_commentary(request);
        info!(
            duration = ?request.duration_seconds(),
            word_budget = plan.word_budget,
            max_tokens = plan.max_output_tokens,
            "Generating commentary"
        );

        let completion = CompletionRequest {
            system_prompt: plan.system_prompt,
            prompt: plan.prompt,
            max_output_tokens: plan.max_output_tokens,
            temperature: plan.temperature,
        };

        let start = Instant::now();
        let result = self.generator.complete(&completion).await;
        metrics::record_upstream_call(Collaborator::TextGeneration, result.is_ok(), start.elapsed());

        let draft = result?
            .filter(|text| !text.trim().is_empty())
            .ok_or(ApiError::EmptyGeneration(Collaborator::TextGeneration))?;

        let trimmed = trim_commentary(&draft, plan.word_budget);
        metrics::record_trim(trimmed.outcome, trimmed.word_count);

        if trimmed.outcome == TrimOutcome::ForcedFirst {
            warn!(
                word_budget = plan.word_budget,
                word_count = trimmed.word_count,
                "First sentence exceeds budget, returning it anyway"
            );
        }
        info!(
            outcome = trimmed.outcome.as_str(),
            raw_words = trimmed.raw_word_count,
            words = trimmed.word_count,
            sentences = trimmed.sentences_kept,
            "Commentary trimmed"
        );

        Ok(Commentary {
            text: trimmed.text,
            word_budget: plan.word_budget,
            word_count: trimmed.word_count,
            raw_word_count: trimmed.raw_word_count,
            trim_outcome: trimmed.outcome,
        })
    }
}
