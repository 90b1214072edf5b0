//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the game task, the prompt channels and snapshot
//! persistence so clients can bubble them up with consistent context.
use thiserror::Error;

use hexalchemy_core::{ActionError, ErrorSeverity, GameError, InputError, PromptKey};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no game is running")]
    NoActiveGame,

    #[error("prompt channel closed")]
    PromptChannelClosed,

    /// The game that asked the question is gone, so the answer has nowhere
    /// to go.
    #[error("prompt {key} was rejected: its game is no longer running")]
    PromptRejected { key: PromptKey },

    #[error("game worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Game(#[from] ActionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RuntimeError {
    /// True when the game stopped because a controller abandoned a prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Game(ActionError::Input(InputError::Cancelled { .. }))
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Game(error) => error.severity(),
            Self::PromptRejected { .. } | Self::NoActiveGame => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Fatal,
        }
    }
}
