//! Shared data models for hoopcast.
//!
//! This crate provides Serde-serializable types for:
//! - Commentary styles and voice selection
//! - Target clip durations
//! - Commentary generation requests

pub mod duration;
pub mod request;
pub mod style;

// Re-export common types
pub use duration::{DurationError, TargetDuration};
pub use request::{GenerationRequest, RequestError};
pub use style::{CommentaryStyle, StyleParseError, VoiceSelection, CUSTOM_STYLE_LABEL};
