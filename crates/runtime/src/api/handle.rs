//! Cloneable façade for clients of the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing: it hands out the questions the
//! running game asks, the latest committed snapshot, and event streams for
//! specific topics. It stays valid across games started on the same runtime.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, mpsc, watch};

use super::errors::{Result, RuntimeError};
use super::prompts::PendingPrompt;
use crate::events::{Event, EventBus, Topic};
use crate::repository::Snapshot;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    prompts: Arc<Mutex<mpsc::Receiver<PendingPrompt>>>,
    snapshots: watch::Receiver<Option<Snapshot>>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(
        prompts: mpsc::Receiver<PendingPrompt>,
        snapshots: watch::Receiver<Option<Snapshot>>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            prompts: Arc::new(Mutex::new(prompts)),
            snapshots,
            event_bus,
        }
    }

    /// Waits for the next question that still has a game waiting on it.
    ///
    /// Questions left behind by a game that has since been replaced are
    /// skipped.
    pub async fn next_prompt(&self) -> Result<PendingPrompt> {
        let mut prompts = self.prompts.lock().await;
        loop {
            let pending = prompts
                .recv()
                .await
                .ok_or(RuntimeError::PromptChannelClosed)?;
            if !pending.is_rejected() {
                return Ok(pending);
            }
            tracing::debug!(
                target: "runtime::handle",
                key = %pending.prompt.key,
                "skipping prompt of a finished game"
            );
        }
    }

    /// Latest snapshot committed by the running (or last) game.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified every time a new snapshot is committed.
    pub fn watch_snapshots(&self) -> watch::Receiver<Option<Snapshot>> {
        self.snapshots.clone()
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - Game start and end, action outcomes
    /// - `Topic::Prompt` - Questions asked and notifications shown
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use hexalchemy_runtime::Topic;
    ///
    /// let mut game_rx = handle.subscribe(Topic::GameState);
    /// while let Ok(event) = game_rx.recv().await {
    ///     // Handle game state events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }
}
