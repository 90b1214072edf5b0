use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{Choice, Input, InputError, Output, Prompt, Shown, check_range, last_index};

/// Replays answers from a key → answer recording.
///
/// Prompts whose key was recorded are answered from the recording (after a
/// range check); anything else goes to the fallback. Notifications always go
/// to the fallback.
///
/// Each recorded answer is handed out once. A key asked again, because its
/// answer was out of range or the action it picked was rejected, goes to the
/// fallback.
pub struct RecordedInput<I> {
    recording: Mutex<BTreeMap<String, u32>>,
    fallback: I,
}

impl<I> RecordedInput<I> {
    pub fn new(recording: BTreeMap<String, u32>, fallback: I) -> Self {
        Self {
            recording: Mutex::new(recording),
            fallback,
        }
    }

    /// Removes and returns the recorded answer for `prompt`.
    pub fn take_recorded(&self, prompt: &Prompt) -> Option<u32> {
        self.recording
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(prompt.key.as_str())
    }

    /// Recorded answers not handed out yet.
    pub fn remaining(&self) -> usize {
        self.recording
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn into_inner(self) -> I {
        self.fallback
    }
}

#[async_trait]
impl<I: Input> Input for RecordedInput<I> {
    async fn choose_from_range(
        &self,
        prompt: &Prompt,
        lo: u32,
        hi: u32,
    ) -> Result<u32, InputError> {
        match self.take_recorded(prompt) {
            Some(answer) => check_range(answer, lo, hi),
            None => self.fallback.choose_from_range(prompt, lo, hi).await,
        }
    }

    async fn choose_from_list(
        &self,
        prompt: &Prompt,
        options: &[Choice],
    ) -> Result<usize, InputError> {
        match self.take_recorded(prompt) {
            Some(answer) => Ok(check_range(answer, 0, last_index(options)?)? as usize),
            None => self.fallback.choose_from_list(prompt, options).await,
        }
    }
}

impl<I: Output> Output for RecordedInput<I> {
    fn show(&self, prompt: &Prompt, value: &Shown) {
        self.fallback.show(prompt, value);
    }
}
