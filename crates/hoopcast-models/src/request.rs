//! Commentary generation request.

use serde::Serialize;
use thiserror::Error;

use crate::duration::TargetDuration;

/// Input to the commentary length controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// What happens in the clip, as described by the video collaborator or the caller
    pub source_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_duration: Option<TargetDuration>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("Description is required")]
    MissingDescription,
}

impl GenerationRequest {
    pub fn new(
        source_description: impl Into<String>,
        target_duration: Option<TargetDuration>,
    ) -> Result<Self, RequestError> {
        let source_description = source_description.into();
        if source_description.trim().is_empty() {
            return Err(RequestError::MissingDescription);
        }
        Ok(Self {
            source_description,
            target_duration,
        })
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.target_duration.map(|d| d.seconds())
    }
}
