//! Error types for resource and level loading
//!
//! None of these abort the frame loop. Callers log them and fall back to a
//! degraded value (empty level, blank texture, default settings).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// A texture, shader, level or settings file is absent or unreadable
    #[error("resource missing at {path}: {source}")]
    ResourceMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Level text parsed to nothing usable
    #[error("invalid level data: {reason}")]
    InvalidLevelData { reason: String },

    /// Lookup of a name that was never loaded
    #[error("unknown {kind} '{name}'")]
    UnknownResource { kind: &'static str, name: String },

    /// Settings file exists but is not valid JSON for [`crate::Settings`]
    #[error("malformed settings at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl GameError {
    pub fn invalid_level(reason: impl Into<String>) -> Self {
        GameError::InvalidLevelData {
            reason: reason.into(),
        }
    }
}
