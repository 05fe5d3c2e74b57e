//! Business logic services.

pub mod commentator;
pub mod pipeline;

pub use commentator::{Commentary, Commentator};
pub use pipeline::{CommentaryPipeline, PipelineRun, VideoCommentary};
