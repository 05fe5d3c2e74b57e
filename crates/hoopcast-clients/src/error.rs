//! Client error types.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// The external service an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collaborator {
    VideoAnalysis,
    TextGeneration,
    SpeechSynthesis,
}

impl Collaborator {
    /// Vendor name used in error messages.
    pub fn vendor(&self) -> &'static str {
        match self {
            Collaborator::VideoAnalysis => "Twelve Labs",
            Collaborator::TextGeneration => "OpenAI",
            Collaborator::SpeechSynthesis => "ElevenLabs",
        }
    }

    /// Pipeline step reported to API callers when this collaborator fails.
    pub fn pipeline_step(&self) -> &'static str {
        match self {
            Collaborator::VideoAnalysis => "video-analysis",
            Collaborator::TextGeneration => "commentary-generation",
            Collaborator::SpeechSynthesis => "speech-generation",
        }
    }

    /// Metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collaborator::VideoAnalysis => "video_analysis",
            Collaborator::TextGeneration => "text_generation",
            Collaborator::SpeechSynthesis => "speech_synthesis",
        }
    }
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.vendor())
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{collaborator} rejected input: {message}")]
    InvalidInput {
        collaborator: Collaborator,
        message: String,
    },

    #[error("{collaborator} API error: {status} - {body}")]
    Api {
        collaborator: Collaborator,
        status: u16,
        body: String,
    },

    #[error("{collaborator} request failed: {source}")]
    Network {
        collaborator: Collaborator,
        #[source]
        source: reqwest::Error,
    },

    #[error("{collaborator} returned an invalid response: {message}")]
    InvalidResponse {
        collaborator: Collaborator,
        message: String,
    },

    #[error("{collaborator} is not configured: {message}")]
    Config {
        collaborator: Collaborator,
        message: String,
    },
}

impl ClientError {
    pub fn invalid_input(collaborator: Collaborator, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            collaborator,
            message: message.into(),
        }
    }

    pub fn invalid_response(collaborator: Collaborator, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            collaborator,
            message: message.into(),
        }
    }

    pub fn config(collaborator: Collaborator, message: impl Into<String>) -> Self {
        Self::Config {
            collaborator,
            message: message.into(),
        }
    }

    pub fn network(collaborator: Collaborator, source: reqwest::Error) -> Self {
        Self::Network {
            collaborator,
            source,
        }
    }

    /// Which service failed.
    pub fn collaborator(&self) -> Collaborator {
        match self {
            ClientError::InvalidInput { collaborator, .. }
            | ClientError::Api { collaborator, .. }
            | ClientError::Network { collaborator, .. }
            | ClientError::InvalidResponse { collaborator, .. }
            | ClientError::Config { collaborator, .. } => *collaborator,
        }
    }

    /// Whether the failure was caused by the caller's input rather than the service.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ClientError::InvalidInput { .. })
    }
}
