//! Target clip duration.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of the clip being commentated, in seconds. Always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TargetDuration(f64);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DurationError {
    #[error("Duration must be a positive number (in seconds)")]
    NotPositive,

    #[error("Duration must be a positive number (in seconds), got '{0}'")]
    NotANumber(String),
}

impl TargetDuration {
    pub fn new(seconds: f64) -> Result<Self, DurationError> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(DurationError::NotPositive);
        }
        Ok(Self(seconds))
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }

    /// Parse an optional duration parameter.
    ///
    /// `None` means the caller did not send one. A value that was sent but is
    /// blank, non-numeric or not positive is rejected rather than ignored.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, DurationError> {
        raw.map(str::parse::<Self>).transpose()
    }

    /// Parse a JSON body field, which may be a number or a numeric string.
    /// `null` counts as absent.
    pub fn from_json(value: Option<&serde_json::Value>) -> Result<Option<Self>, DurationError> {
        match value {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::Number(n)) => {
                let seconds = n
                    .as_f64()
                    .ok_or_else(|| DurationError::NotANumber(n.to_string()))?;
                Self::new(seconds).map(Some)
            }
            Some(serde_json::Value::String(s)) => s.parse::<Self>().map(Some),
            Some(other) => Err(DurationError::NotANumber(other.to_string())),
        }
    }
}

impl FromStr for TargetDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seconds: f64 = s
            .trim()
            .parse()
            .map_err(|_| DurationError::NotANumber(s.to_string()))?;
        Self::new(seconds)
    }
}

impl fmt::Display for TargetDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TargetDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}
