//! Sentence-boundary trimming of generated commentary.
//!
//! Generated text may stop mid-sentence (token cap) or run past the word
//! budget (the guidance is only advisory). The trimmer keeps whole sentences
//! only, and picks a prefix whose word count lands near the budget:
//!
//! - up to 120% of the budget, everything is kept;
//! - beyond that, sentences are added in order while the running total stays
//!   within 130% of the budget;
//! - the first sentence is always kept, even if it alone exceeds the ceiling.
//!
//! The result is never empty and always ends in `.`, `!` or `?`.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Keep everything when the total is within this factor of the budget.
pub const WITHIN_BUDGET_TOLERANCE: f64 = 1.2;

/// Hard ceiling factor for greedy accumulation.
pub const CEILING_TOLERANCE: f64 = 1.3;

/// Minimum length (in characters) of an unterminated tail to be kept.
const MIN_TAIL_CHARS: usize = 10;

/// Substrings that make an unterminated tail look like a complete clause.
const TAIL_CONNECTIVES: &[&str] = &[" and ", " with ", " as "];

const TERMINATORS: [char; 3] = ['.', '!', '?'];

fn terminal_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("valid sentence terminator pattern"))
}

/// How the final text was derived from the raw generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimOutcome {
    /// All sentences fit within the tolerance band
    WithinBudget,
    /// A shorter prefix of sentences was selected
    Trimmed,
    /// Only the first sentence, which alone exceeds the ceiling
    ForcedFirst,
    /// No sentence boundary found; a period was appended
    Fallback,
}

impl TrimOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrimOutcome::WithinBudget => "within_budget",
            TrimOutcome::Trimmed => "trimmed",
            TrimOutcome::ForcedFirst => "forced_first",
            TrimOutcome::Fallback => "fallback",
        }
    }
}

/// A complete sentence and its word count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub words: usize,
}

impl Sentence {
    fn new(text: String) -> Self {
        let words = count_words(&text);
        Self { text, words }
    }
}

/// Result of trimming, with enough detail for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrimmedCommentary {
    pub text: String,
    pub outcome: TrimOutcome,
    /// Words in the returned text
    pub word_count: usize,
    /// Words in the raw generation
    pub raw_word_count: usize,
    pub sentences_kept: usize,
    pub sentences_total: usize,
}

/// Whitespace-delimited token count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn ends_with_terminator(text: &str) -> bool {
    text.ends_with(TERMINATORS)
}

/// Whether an unterminated tail is probably a finished clause.
///
/// Accepts some false positives: anything over ten characters that contains
/// a connective passes.
fn tail_looks_complete(tail: &str) -> bool {
    let trimmed = tail.trim();
    trimmed.chars().count() > MIN_TAIL_CHARS
        && (ends_with_terminator(trimmed) || TAIL_CONNECTIVES.iter().any(|c| tail.contains(c)))
}

/// Split text into sentences closed by runs of `.`, `!` or `?`.
///
/// A trailing fragment is kept only if [`tail_looks_complete`] accepts it, in
/// which case it is closed with a period.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for run in terminal_run().find_iter(text) {
        let sentence = text[start..run.end()].trim();
        if !sentence.is_empty() {
            sentences.push(Sentence::new(sentence.to_string()));
        }
        start = run.end();
    }

    let tail = &text[start..];
    if tail_looks_complete(tail) {
        let mut sentence = tail.trim().to_string();
        if !ends_with_terminator(&sentence) {
            sentence.push('.');
        }
        sentences.push(Sentence::new(sentence));
    }

    sentences
}

fn join(sentences: &[Sentence]) -> String {
    sentences
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trim generated text to whole sentences near `word_budget` words.
pub fn trim_commentary(raw: &str, word_budget: u32) -> TrimmedCommentary {
    let text = raw.trim();
    let raw_word_count = count_words(text);
    let sentences = split_sentences(text);

    if sentences.is_empty() {
        let mut fallback = text.to_string();
        if !ends_with_terminator(&fallback) {
            fallback.push('.');
        }
        return TrimmedCommentary {
            word_count: count_words(&fallback),
            text: fallback,
            outcome: TrimOutcome::Fallback,
            raw_word_count,
            sentences_kept: 0,
            sentences_total: 0,
        };
    }

    let budget = f64::from(word_budget);
    let total: usize = sentences.iter().map(|s| s.words).sum();

    let (kept, outcome) = if total as f64 <= budget * WITHIN_BUDGET_TOLERANCE {
        (sentences.len(), TrimOutcome::WithinBudget)
    } else {
        let ceiling = budget * CEILING_TOLERANCE;
        let mut used = 0;
        let mut kept = 0;
        for sentence in &sentences {
            if (used + sentence.words) as f64 > ceiling {
                break;
            }
            used += sentence.words;
            kept += 1;
        }
        if kept == 0 {
            (1, TrimOutcome::ForcedFirst)
        } else {
            (kept, TrimOutcome::Trimmed)
        }
    };

    let selected = &sentences[..kept];
    TrimmedCommentary {
        text: join(selected),
        outcome,
        word_count: selected.iter().map(|s| s.words).sum(),
        raw_word_count,
        sentences_kept: kept,
        sentences_total: sentences.len(),
    }
}

/// Trim generated text to whole sentences near `word_budget` words.
pub fn trim_to_budget(raw: &str, word_budget: u32) -> String {
    trim_commentary(raw, word_budget).text
}
