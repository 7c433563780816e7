//! Error types
//!
//! The simulation itself cannot fail. Errors only come from the edges:
//! start requests the controller refuses, and configuration it cannot load.

use thiserror::Error;

/// Why a start request was refused. The shell ignores these; no run begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("no character selected")]
    NoCharacter,
    #[error("unknown character id: {0}")]
    UnknownCharacter(String),
    #[error("a run is already in progress")]
    AlreadyRunning,
}

/// Configuration (tuning or settings) that could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}
