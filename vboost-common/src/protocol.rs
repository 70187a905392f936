//! Control protocol messages
//!
//! Request/response messages exchanged between a control surface and the gain
//! engine running inside a page. Wire shape is JSON, tagged by `type`:
//!
//! ```text
//! {"type":"GET_VOLUME"}                  -> {"level":150}
//! {"type":"SET_VOLUME","level":250}      -> {"success":true}
//!                                        -> {"success":false,"error":"..."}
//! ```

use crate::level::GainLevel;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Request sent from a control surface to a page engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlRequest {
    /// Query the engine's current level
    GetVolume,

    /// Apply a level; out-of-range values are clamped on decode
    SetVolume { level: GainLevel },
}

impl ControlRequest {
    /// Decode a raw message.
    ///
    /// A message with no matching request kind is a caller-side protocol
    /// violation and is reported as `Error::Protocol`.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| Error::Protocol(format!("Unrecognized control message: {}", e)))
    }

    /// Encode for the wire
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Reply produced by the page engine, exactly one per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlResponse {
    /// Reply to `GET_VOLUME`
    Level { level: GainLevel },

    /// Reply to `SET_VOLUME`
    Status {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl ControlResponse {
    pub fn level(level: GainLevel) -> Self {
        Self::Level { level }
    }

    pub fn ok() -> Self {
        Self::Status {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Status {
            success: false,
            error: Some(message.into()),
        }
    }

    /// True for a successful status reply or any level reply
    pub fn is_success(&self) -> bool {
        match self {
            Self::Level { .. } => true,
            Self::Status { success, .. } => *success,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
