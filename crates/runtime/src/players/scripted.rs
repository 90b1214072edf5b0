use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use hexalchemy_core::{Input, InputError, Output, Prompt, Shown, input::check_range};

/// Answers from a fixed list and abandons the first prompt past its end.
///
/// A game driven by a script therefore stops by itself once the script runs
/// out, with `InputError::Cancelled`.
#[derive(Debug, Default)]
pub struct ScriptedPlayer {
    answers: Mutex<VecDeque<u32>>,
}

impl ScriptedPlayer {
    pub fn new(answers: impl IntoIterator<Item = u32>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into_iter().collect()),
        })
    }

    pub fn remaining(&self) -> usize {
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Input for ScriptedPlayer {
    async fn choose_from_range(
        &self,
        prompt: &Prompt,
        lo: u32,
        hi: u32,
    ) -> Result<u32, InputError> {
        let next = self
            .answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(answer) => check_range(answer, lo, hi),
            None => Err(InputError::Cancelled {
                key: prompt.key.clone(),
            }),
        }
    }
}

impl Output for ScriptedPlayer {
    fn show(&self, _prompt: &Prompt, _value: &Shown) {}
}
