//! Word and token budgets derived from clip duration.
//!
//! Spoken commentary is sized at 2.5 words per second. The generation cap
//! is three times the word budget (at least 150 tokens); anything past the
//! budget is cut by [`crate::trim`].

/// Assumed speaking rate.
pub const WORDS_PER_SECOND: f64 = 2.5;

/// Word budget when no duration is known.
pub const DEFAULT_WORD_BUDGET: u32 = 40;

/// Generation cap as a multiple of the word budget.
pub const GENERATION_MULTIPLIER: u32 = 3;

/// Floor for the generation cap.
pub const MIN_GENERATION_LIMIT: u32 = 150;

/// Target number of spoken words for a clip.
///
/// Durations that are absent, non-finite or not positive use
/// [`DEFAULT_WORD_BUDGET`].
pub fn word_budget(duration_seconds: Option<f64>) -> u32 {
    match duration_seconds {
        Some(seconds) if seconds.is_finite() && seconds > 0.0 => {
            (seconds * WORDS_PER_SECOND).round() as u32
        }
        _ => DEFAULT_WORD_BUDGET,
    }
}

/// Output cap for the generation request.
pub fn generation_limit(word_budget: u32) -> u32 {
    word_budget
        .saturating_mul(GENERATION_MULTIPLIER)
        .max(MIN_GENERATION_LIMIT)
}
