//! Questions the game task hands to the client.
//!
//! Each outstanding question carries its own reply channel. Dropping a
//! [`PendingPrompt`] without answering abandons the question, and the game
//! stops with `InputError::Cancelled`. Once the game that asked is gone,
//! [`PendingPrompt::answer`] reports the prompt as rejected.
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use hexalchemy_core::{Choice, Prompt};

use super::errors::{Result, RuntimeError};

/// What shape of answer the game expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptRequest {
    /// Any value in `[lo, hi]`.
    Range { lo: u32, hi: u32 },
    /// An index into the options.
    Options(Vec<Choice>),
}

impl PromptRequest {
    /// Inclusive bounds of a valid answer.
    pub fn bounds(&self) -> (u32, u32) {
        match self {
            Self::Range { lo, hi } => (*lo, *hi),
            Self::Options(options) => (0, options.len().saturating_sub(1) as u32),
        }
    }
}

/// A question waiting for the client.
#[derive(Debug)]
pub struct PendingPrompt {
    pub prompt: Prompt,
    pub request: PromptRequest,
    reply: oneshot::Sender<u32>,
}

impl PendingPrompt {
    pub(crate) fn new(prompt: Prompt, request: PromptRequest) -> (Self, oneshot::Receiver<u32>) {
        let (reply, answer) = oneshot::channel();
        (
            Self {
                prompt,
                request,
                reply,
            },
            answer,
        )
    }

    /// Sends `answer` back to the game that asked.
    ///
    /// Range checking happens on the game side; an out-of-range answer is
    /// reported there and the question is asked again.
    pub fn answer(self, answer: u32) -> Result<()> {
        let key = self.prompt.key;
        self.reply
            .send(answer)
            .map_err(|_| RuntimeError::PromptRejected { key })
    }

    /// True once the game that asked has stopped waiting.
    pub fn is_rejected(&self) -> bool {
        self.reply.is_closed()
    }

    /// Resolves when the game that asked stops waiting.
    pub async fn rejected(&mut self) {
        self.reply.closed().await;
    }
}
