//! Prompt construction for the text-generation collaborator.

use hoopcast_models::GenerationRequest;
use serde::Serialize;

use crate::budget::{generation_limit, word_budget};
use crate::guidance::duration_guidance;

/// Sampling temperature for commentary generation.
pub const COMMENTARY_TEMPERATURE: f32 = 0.8;

/// System message establishing the commentator persona.
pub const SYSTEM_PROMPT: &str = "You are an expert ESPN basketball commentator known for your exciting, knowledgeable, and dramatic commentary style. You bring basketball games to life with your words.";

/// Everything needed to issue one generation request and trim its output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentaryPlan {
    /// Target spoken word count
    pub word_budget: u32,
    /// Output cap passed to the generator
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub guidance: String,
    pub system_prompt: String,
    pub prompt: String,
}

/// Map a request to generation parameters. Pure; performs no I/O.
pub fn plan_commentary(request: &GenerationRequest) -> CommentaryPlan {
    let duration = request.duration_seconds();
    let word_budget = word_budget(duration);
    let guidance = duration_guidance(duration);
    let prompt = build_commentary_prompt(&request.source_description, &guidance);

    CommentaryPlan {
        word_budget,
        max_output_tokens: generation_limit(word_budget),
        temperature: COMMENTARY_TEMPERATURE,
        guidance,
        system_prompt: SYSTEM_PROMPT.to_string(),
        prompt,
    }
}

/// Build the user prompt for a video description.
pub fn build_commentary_prompt(video_description: &str, guidance: &str) -> String {
    format!(
        r#"You are a legendary ESPN basketball commentator with decades of experience calling the most exciting games in NBA history. Your style is energetic, knowledgeable, and captures the drama and excitement of every moment on the court.

Transform the following video description into captivating ESPN-style basketball commentary. Make it sound like you're calling a live game with:

- High energy and excitement
- Expert basketball knowledge and terminology
- Dramatic flair and storytelling
- References to player skills, strategy, and game context
- Use of classic basketball commentary phrases
- Build tension and excitement around key moments
- Professional broadcaster voice and pacing

{guidance}

Always finish your final sentence. Never stop mid-sentence.

Video Description: "{description}"

Commentary:"#,
        guidance = guidance,
        description = video_description.trim(),
    )
}
