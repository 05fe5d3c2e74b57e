//! Request handlers.

pub mod analysis;
pub mod audio;
pub mod commentary;
pub mod health;
pub mod pipeline;
pub mod styles;

pub use analysis::*;
pub use audio::*;
pub use commentary::*;
pub use health::*;
pub use pipeline::*;
pub use styles::*;

use crate::error::{ApiError, ApiResult};

/// Trimmed, non-empty video id from a query parameter.
pub(crate) fn require_video_id(video_id: Option<&str>) -> ApiResult<String> {
    video_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::invalid_input("Video ID is required", "Please provide a videoId parameter"))
}
