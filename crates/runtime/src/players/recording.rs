use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use hexalchemy_core::{Choice, Input, InputError, Output, Player, Prompt, Shown};

use crate::repository::HistoryEntry;

/// Shared, append-only log of controller traffic.
#[derive(Clone, Default)]
pub struct History(Arc<Mutex<Vec<HistoryEntry>>>);

impl History {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self(Arc::new(Mutex::new(entries)))
    }

    pub fn push(&self, entry: HistoryEntry) {
        self.lock().push(entry);
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HistoryEntry>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Passes everything through to `inner` and logs it in a [`History`].
///
/// Only answers that reached the game are logged, so an abandoned prompt
/// leaves no trace. The per-turn game state is forwarded but not logged:
/// every snapshot already carries the state it was taken at.
pub struct RecordingPlayer {
    inner: Arc<dyn Player>,
    history: History,
}

impl RecordingPlayer {
    pub fn new(inner: Arc<dyn Player>, history: History) -> Self {
        Self { inner, history }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn answered(&self, prompt: &Prompt, answer: u32) {
        self.history.push(HistoryEntry::Answered {
            prompt: prompt.clone(),
            answer,
        });
    }
}

#[async_trait]
impl Input for RecordingPlayer {
    async fn choose_from_range(
        &self,
        prompt: &Prompt,
        lo: u32,
        hi: u32,
    ) -> Result<u32, InputError> {
        let answer = self.inner.choose_from_range(prompt, lo, hi).await?;
        self.answered(prompt, answer);
        Ok(answer)
    }

    async fn choose_from_list(
        &self,
        prompt: &Prompt,
        options: &[Choice],
    ) -> Result<usize, InputError> {
        let idx = self.inner.choose_from_list(prompt, options).await?;
        self.answered(prompt, idx as u32);
        Ok(idx)
    }
}

impl Output for RecordingPlayer {
    fn show(&self, prompt: &Prompt, value: &Shown) {
        if !matches!(value, Shown::GameState(_)) {
            self.history.push(HistoryEntry::Shown {
                prompt: prompt.clone(),
                value: value.clone(),
            });
        }
        self.inner.show(prompt, value);
    }
}
