//! Length instructions embedded in the generation prompt.

use crate::budget::word_budget;

/// Instruction used when no duration is known.
pub const DEFAULT_GUIDANCE: &str = "Generate a moderate-length commentary (about 30-40 words).";

/// Length instruction for a clip of the given duration.
///
/// Buckets are inclusive upper bounds of 5, 15, 30, 60 and 120 seconds.
/// The text is advisory; the generator is free to ignore it.
pub fn duration_guidance(duration_seconds: Option<f64>) -> String {
    let seconds = match duration_seconds {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => return DEFAULT_GUIDANCE.to_string(),
    };

    let words = word_budget(Some(seconds));
    let (length, shape) = if seconds <= 5.0 {
        ("a very brief", "just 1-2 short sentences for this quick moment")
    } else if seconds <= 15.0 {
        ("a short", "2-3 sentences for this brief action")
    } else if seconds <= 30.0 {
        ("a moderate", "about 1 paragraph for this sequence")
    } else if seconds <= 60.0 {
        ("a detailed", "2 paragraphs for this extended sequence")
    } else if seconds <= 120.0 {
        ("a comprehensive", "2-3 paragraphs for this long sequence")
    } else {
        ("an extensive", "3-4 paragraphs for this lengthy sequence")
    };

    format!("Generate {length} commentary ({words} words maximum) - {shape}.")
}
