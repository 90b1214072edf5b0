//! High-level runtime orchestrator.
//!
//! The runtime owns the game task, wires up the prompt and event channels,
//! and swaps games in and out. Starting a game while another one waits on a
//! prompt aborts the old task first, so its question is rejected.

use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use hexalchemy_core::{Player, RecordedInput};

use crate::api::{PendingPrompt, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, GameStateEvent, Topic};
use crate::players::ChannelPlayer;
use crate::repository::Snapshot;
use crate::workers::{GameSetup, GameWorker};

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Seed for [`Runtime::start_configured_game`]; a fresh one is picked
    /// when unset.
    pub seed: Option<u64>,
    pub event_buffer_size: usize,
    pub question_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            event_buffer_size: 100,
            question_buffer_size: 8,
        }
    }
}

impl RuntimeConfig {
    pub const SEED_VAR: &'static str = "HEXALCHEMY_SEED";
    pub const EVENT_BUFFER_VAR: &'static str = "HEXALCHEMY_EVENT_BUFFER";
    pub const QUESTION_BUFFER_VAR: &'static str = "HEXALCHEMY_QUESTION_BUFFER";

    /// Load configuration from environment variables, reading `.env` first.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            seed: read(&lookup, Self::SEED_VAR),
            event_buffer_size: read(&lookup, Self::EVENT_BUFFER_VAR)
                .unwrap_or(defaults.event_buffer_size),
            question_buffer_size: read(&lookup, Self::QUESTION_BUFFER_VAR)
                .unwrap_or(defaults.question_buffer_size),
        }
    }
}

fn read<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|value| value.trim().parse().ok())
}

/// Main runtime that orchestrates the game task
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    config: RuntimeConfig,
    handle: RuntimeHandle,
    event_bus: EventBus,
    prompt_tx: mpsc::Sender<PendingPrompt>,
    snapshot_tx: Arc<watch::Sender<Option<Snapshot>>>,
    game: Option<JoinHandle<Result<()>>>,
}

impl Runtime {
    pub fn new(config: RuntimeConfig) -> Self {
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let (prompt_tx, prompt_rx) = mpsc::channel(config.question_buffer_size.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(None);
        let handle = RuntimeHandle::new(prompt_rx, snapshot_rx, event_bus.clone());

        Self {
            config,
            handle,
            event_bus,
            prompt_tx,
            snapshot_tx: Arc::new(snapshot_tx),
            game: None,
        }
    }

    pub fn from_env() -> Self {
        Self::new(RuntimeConfig::from_env())
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Latest committed snapshot.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.handle.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.game.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Controller that forwards questions to [`RuntimeHandle::next_prompt`].
    pub fn channel_player(&self) -> ChannelPlayer {
        ChannelPlayer::new(self.prompt_tx.clone(), self.event_bus.clone())
    }

    /// Starts a game with the configured seed, or a fresh one. Returns the
    /// seed used.
    pub async fn start_configured_game(&mut self) -> Result<u64> {
        let seed = self.config.seed.unwrap_or_else(fresh_seed);
        self.start_new_game(seed).await?;
        Ok(seed)
    }

    /// Starts a game answered through the handle.
    pub async fn start_new_game(&mut self, seed: u64) -> Result<()> {
        let player = Arc::new(self.channel_player());
        self.start_new_game_with(seed, player).await
    }

    /// Starts a game answered by `player`.
    pub async fn start_new_game_with(&mut self, seed: u64, player: Arc<dyn Player>) -> Result<()> {
        self.launch(GameSetup::New { seed }, player).await
    }

    /// Continues `snapshot`, answered through the handle.
    pub async fn resume(&mut self, snapshot: Snapshot) -> Result<()> {
        let player = Arc::new(self.channel_player());
        self.resume_with(snapshot, player).await
    }

    pub async fn resume_with(&mut self, snapshot: Snapshot, player: Arc<dyn Player>) -> Result<()> {
        self.launch(GameSetup::Resume(Box::new(snapshot)), player)
            .await
    }

    /// Replays a game from its seed, answering recorded keys from
    /// `recording` and everything else through the handle.
    ///
    /// Truncating a recording and replaying it is how moves are undone.
    pub async fn replay(&mut self, seed: u64, recording: BTreeMap<String, u32>) -> Result<()> {
        let player = Arc::new(RecordedInput::new(recording, self.channel_player()));
        self.start_new_game_with(seed, player).await
    }

    /// Waits for the current game to end and returns how it ended.
    pub async fn join(&mut self) -> Result<()> {
        let task = self.game.take().ok_or(RuntimeError::NoActiveGame)?;
        match task.await {
            Ok(result) => result,
            Err(error) if error.is_cancelled() => Ok(()),
            Err(error) => Err(RuntimeError::WorkerJoin(error)),
        }
    }

    /// Aborts the current game, if any.
    ///
    /// Returns once the game task is gone, so any question it was waiting
    /// on is already rejected.
    pub async fn stop(&mut self) -> Result<()> {
        let Some(task) = self.game.take() else {
            return Ok(());
        };
        if task.is_finished() {
            return match task.await {
                Ok(_) => Ok(()),
                Err(error) => Err(RuntimeError::WorkerJoin(error)),
            };
        }

        task.abort();
        if let Err(error) = task.await
            && error.is_panic()
        {
            return Err(RuntimeError::WorkerJoin(error));
        }

        let prompt_number = self
            .snapshot()
            .map(|snapshot| snapshot.prompt_number)
            .unwrap_or_default();
        tracing::info!(target: "runtime", prompt_number, "game aborted");
        self.event_bus.publish(GameStateEvent::GameEnded {
            prompt_number,
            reason: "aborted".to_owned(),
            code: None,
        });
        Ok(())
    }

    /// Shutdown the runtime, aborting any running game
    pub async fn shutdown(mut self) -> Result<()> {
        self.stop().await
    }

    async fn launch(&mut self, setup: GameSetup, player: Arc<dyn Player>) -> Result<()> {
        self.stop().await?;
        self.snapshot_tx.send_replace(None);

        let worker = GameWorker::new(self.event_bus.clone(), Arc::clone(&self.snapshot_tx));
        self.game = Some(tokio::spawn(worker.run(setup, player)));
        Ok(())
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        if let Some(task) = &self.game {
            task.abort();
        }
    }
}

fn fresh_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_overrides_defaults() {
        let vars: BTreeMap<&str, &str> = [
            ("HEXALCHEMY_SEED", "42"),
            ("HEXALCHEMY_EVENT_BUFFER", " 256 "),
        ]
        .into_iter()
        .collect();
        let config = RuntimeConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.event_buffer_size, 256);
        assert_eq!(
            config.question_buffer_size,
            RuntimeConfig::default().question_buffer_size
        );
    }

    #[test]
    fn every_variable_is_read() {
        let vars: BTreeMap<&str, &str> = [
            (RuntimeConfig::SEED_VAR, "7"),
            (RuntimeConfig::EVENT_BUFFER_VAR, "512"),
            (RuntimeConfig::QUESTION_BUFFER_VAR, "2"),
        ]
        .into_iter()
        .collect();
        let config = RuntimeConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(
            config,
            RuntimeConfig {
                seed: Some(7),
                event_buffer_size: 512,
                question_buffer_size: 2,
            }
        );
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = RuntimeConfig::from_lookup(|key| {
            (key == RuntimeConfig::SEED_VAR).then(|| "not a number".to_owned())
        });
        assert_eq!(config, RuntimeConfig::default());
    }

    #[tokio::test]
    async fn join_without_a_game_is_an_error() {
        let mut runtime = Runtime::new(RuntimeConfig::default());
        assert!(matches!(
            runtime.join().await,
            Err(RuntimeError::NoActiveGame)
        ));
        assert!(!runtime.is_running());
    }
}
