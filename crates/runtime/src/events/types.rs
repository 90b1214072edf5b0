//! Event types for different topics.

use serde::{Deserialize, Serialize};

use hexalchemy_core::{ErrorContext, GameAction, Prompt, Shown, TransitionPhase};

use crate::api::PromptRequest;

/// Events related to game state changes (start, actions, failures, end)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// A game was set up and is about to ask for its first action
    GameStarted {
        seed: u64,
        /// True when the game continues from a snapshot
        resumed: bool,
        prompt_number: u64,
        digest: String,
    },

    /// An action resolved and the game moved on
    ActionExecuted {
        action: GameAction,
        prompt_number: u64,
        turn_number: u64,
        /// Digest of the state after the action
        digest: String,
    },

    /// An action was rejected; the game is unchanged
    ActionFailed {
        action: GameAction,
        phase: TransitionPhase,
        error: String,
        code: String,
        context: ErrorContext,
    },

    /// The game task stopped and will ask nothing more
    GameEnded {
        prompt_number: u64,
        reason: String,
        code: Option<String>,
    },
}

/// Traffic between the game and its controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PromptEvent {
    /// A question was handed to the client
    Asked {
        prompt: Prompt,
        request: PromptRequest,
    },

    /// A notification pushed through `Output::show`
    Shown { prompt: Prompt, value: Shown },
}
