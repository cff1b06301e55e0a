//! Team workspace error types.

use leapp_storage::StorageError;
use thiserror::Error;

/// Result type for team workspace operations.
pub type TeamResult<T> = Result<T, TeamError>;

/// Severity attached to an error when it reaches a log or a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Errors raised while signing in, switching, or reconciling workspaces.
#[derive(Debug, Error)]
pub enum TeamError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A chained session's parent could not be pinned to exactly one role.
    #[error("{0}")]
    Resolution(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("integration {id} failed to sync: {reason}")]
    IntegrationSync { id: String, reason: String },

    #[error("crypto error: {0}")]
    Crypto(#[from] leapp_crypto::CryptoError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("a workspace transition is already in progress")]
    TransitionInProgress,

    /// Failure reported by an injected service.
    #[error("collaborator error: {0}")]
    Collaborator(String),
}

impl TeamError {
    pub fn severity(&self) -> LogLevel {
        match self {
            TeamError::Authentication(_) | TeamError::TransitionInProgress => LogLevel::Warn,
            TeamError::Resolution(_)
            | TeamError::Storage(_)
            | TeamError::IntegrationSync { .. }
            | TeamError::Crypto(_)
            | TeamError::Serialization(_)
            | TeamError::Collaborator(_) => LogLevel::Error,
        }
    }
}
