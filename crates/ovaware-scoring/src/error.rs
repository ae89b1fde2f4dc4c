use std::time::Duration;

use ovaware_core::FailureKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("scoring service unreachable: {0}")]
    Unreachable(String),

    #[error("scoring service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("scoring process failed: {0}")]
    Process(String),

    #[error("scoring call timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to encode scoring request: {0}")]
    Encode(String),

    #[error("invalid scorer configuration: {0}")]
    Config(String),

    #[error("malformed scoring response: {0}")]
    Malformed(String),
}

impl ScoringError {
    /// Failure class reported to the form.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Malformed(_) => FailureKind::MalformedResponse,
            Self::Unreachable(_)
            | Self::Status { .. }
            | Self::Process(_)
            | Self::Timeout(_)
            | Self::Encode(_)
            | Self::Config(_) => FailureKind::Transport,
        }
    }
}
