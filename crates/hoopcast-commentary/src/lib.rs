//! Duration-aware commentary sizing.
//!
//! Two pure halves around a single generation call:
//! - [`plan_commentary`] turns a request into a word budget, a generous
//!   token cap and the prompt text;
//! - [`trim_to_budget`] cuts the generated text back to whole sentences
//!   near the word budget.
//!
//! Nothing here performs I/O.

pub mod budget;
pub mod guidance;
pub mod prompt;
pub mod trim;

pub use budget::{generation_limit, word_budget, DEFAULT_WORD_BUDGET};
pub use guidance::duration_guidance;
pub use prompt::{build_commentary_prompt, plan_commentary, CommentaryPlan, COMMENTARY_TEMPERATURE, SYSTEM_PROMPT};
pub use trim::{count_words, split_sentences, trim_commentary, trim_to_budget, Sentence, TrimOutcome, TrimmedCommentary};
