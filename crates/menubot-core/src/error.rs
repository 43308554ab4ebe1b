use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure kinds surfaced by the generation collaborator.
///
/// The orchestrator pattern-matches on these instead of intercepting
/// exceptions; every variant maps to the fixed apology text, but only
/// transient ones are worth retrying.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API rejected the request (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed completion response: {0}")]
    Malformed(String),
}

impl GenerationError {
    /// Transport hiccups and server-side errors may clear on retry;
    /// client-side rejections (bad credentials, bad request) will not.
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::Transport(_) | GenerationError::Timeout(_) => true,
            GenerationError::Api { status, .. } => *status >= 500,
            GenerationError::Malformed(_) => false,
        }
    }
}
