//! Commentary styles and the voices that speak them.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A commentary persona paired with a speech-synthesis voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentaryStyle {
    /// Stable identifier used in requests (e.g. `kevin-harlan`)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    pub description: &'static str,
    /// Voice identifier understood by the speech collaborator
    pub voice_id: &'static str,
    pub characteristics: &'static [&'static str],
}

impl CommentaryStyle {
    pub const KEVIN_HARLAN: CommentaryStyle = CommentaryStyle {
        id: "kevin-harlan",
        name: "Kevin Harlan",
        description: "Legendary NBA broadcaster known for dramatic, passionate play-by-play",
        voice_id: "YiUJCEfHcazOOIxtzmUX",
        characteristics: &["Dramatic", "Passionate", "Legendary", "Play-by-play Master"],
    };

    pub const MIKE_BREEN: CommentaryStyle = CommentaryStyle {
        id: "mike-breen",
        name: "Mike Breen",
        description: "High-energy, exciting commentary perfect for highlight reels",
        voice_id: "bJwlnpYc7IzL75IA8ehy",
        characteristics: &["High Energy", "Exciting", "Modern", "Hype-focused"],
    };

    pub const BRITISH_ANALYST: CommentaryStyle = CommentaryStyle {
        id: "british-analyst",
        name: "British Analyst",
        description: "Sophisticated, articulate commentary with British flair",
        voice_id: "8t6x0k43h2faV0HDWfnn",
        characteristics: &["Sophisticated", "Articulate", "Professional", "International"],
    };

    pub const ESPN_STEROID: CommentaryStyle = CommentaryStyle {
        id: "espn-steroid",
        name: "ESPN on Steroid",
        description: "Traditional ESPN-style professional basketball commentary with extra intensity",
        voice_id: "6XVUA6jZZtcqPTW6amVC",
        characteristics: &["Professional", "Intense", "Authoritative", "High Energy"],
    };

    /// Every registered style, in display order.
    pub const ALL: &'static [CommentaryStyle] = &[
        Self::KEVIN_HARLAN,
        Self::MIKE_BREEN,
        Self::BRITISH_ANALYST,
        Self::ESPN_STEROID,
    ];

    /// Style used when none (or an unknown one) is requested.
    pub const fn default_style() -> CommentaryStyle {
        Self::ESPN_STEROID
    }

    /// Look up a style by identifier.
    pub fn find(style_id: &str) -> Option<CommentaryStyle> {
        Self::ALL.iter().copied().find(|s| s.id == style_id)
    }

    /// Reverse lookup by voice identifier.
    pub fn from_voice_id(voice_id: &str) -> Option<CommentaryStyle> {
        Self::ALL.iter().copied().find(|s| s.voice_id == voice_id)
    }

    pub fn is_valid(style_id: &str) -> bool {
        Self::ALL.iter().any(|s| s.id == style_id)
    }

    /// Voice for a style id, falling back to the default style's voice.
    pub fn voice_id_for(style_id: &str) -> &'static str {
        Self::find(style_id)
            .unwrap_or_else(Self::default_style)
            .voice_id
    }
}

impl Default for CommentaryStyle {
    fn default() -> Self {
        Self::default_style()
    }
}

impl fmt::Display for CommentaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl FromStr for CommentaryStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::find(s.trim()).ok_or_else(|| StyleParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown commentary style: {0}")]
pub struct StyleParseError(String);

/// Label reported for voices chosen directly by id rather than by style.
pub const CUSTOM_STYLE_LABEL: &str = "custom";

/// The voice a request will be spoken with, and how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSelection {
    pub voice_id: String,
    /// Style id, or `custom` for an explicit voice id
    pub style_label: String,
    /// Style that was asked for but not recognised
    pub rejected_style: Option<String>,
}

impl VoiceSelection {
    /// Resolve the voice for a request.
    ///
    /// An explicit voice id wins over any style. A recognised style maps to its
    /// voice. Anything else falls back to the default style and records the
    /// unrecognised style name so callers can report it.
    pub fn resolve(voice_id: Option<&str>, style_id: Option<&str>) -> Self {
        if let Some(voice_id) = voice_id.filter(|v| !v.trim().is_empty()) {
            return Self {
                voice_id: voice_id.trim().to_string(),
                style_label: CUSTOM_STYLE_LABEL.to_string(),
                rejected_style: None,
            };
        }

        let requested = style_id.map(str::trim).filter(|s| !s.is_empty());
        if let Some(style) = requested.and_then(CommentaryStyle::find) {
            return Self::from_style(style);
        }

        Self {
            rejected_style: requested.map(str::to_string),
            ..Self::from_style(CommentaryStyle::default_style())
        }
    }

    pub fn from_style(style: CommentaryStyle) -> Self {
        Self {
            voice_id: style.voice_id.to_string(),
            style_label: style.id.to_string(),
            rejected_style: None,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.style_label == CUSTOM_STYLE_LABEL
    }
}
