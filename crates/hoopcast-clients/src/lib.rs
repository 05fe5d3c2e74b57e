//! Clients for the external AI services hoopcast chains together.
//!
//! - [`TwelveLabsClient`]: video id to text description
//! - [`OpenAiClient`]: prompt to commentary text
//! - [`ElevenLabsClient`]: text to MP3 speech
//!
//! Each client implements one of the traits in [`traits`] and reports
//! failures as a [`ClientError`] tagged with the [`Collaborator`] it came from.

pub mod elevenlabs;
pub mod error;
mod http;
pub mod openai;
pub mod traits;
pub mod twelvelabs;
pub mod types;

pub use elevenlabs::{ElevenLabsClient, ElevenLabsConfig, VoiceSettings};
pub use error::{ClientError, ClientResult, Collaborator};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use traits::{SpeechSynthesizer, TextGenerator, VideoAnalyzer};
pub use twelvelabs::{TwelveLabsClient, TwelveLabsConfig};
pub use types::{CompletionRequest, VideoAnalysis, Voice};
