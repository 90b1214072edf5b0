//! Runtime orchestration for hexalchemy games.
//!
//! This crate runs a [`hexalchemy_core::BootstrappedGame`] on a tokio task,
//! hands its questions to a client through [`RuntimeHandle`], reports every
//! outcome on a topic-based [`EventBus`], and turns running games into
//! [`Snapshot`]s that can be stored and resumed.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and its configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`players`] holds the controllers a game can be driven by
//! - [`repository`] is the persistence boundary
//! - `workers` keeps the game task internal to the crate
pub mod api;
pub mod events;
pub mod players;
pub mod repository;
pub mod runtime;
pub mod utils;

mod workers;

pub use api::{PendingPrompt, PromptRequest, Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, GameStateEvent, PromptEvent, Topic};
pub use players::{ChannelPlayer, History, RecordingPlayer, ScriptedPlayer};
pub use repository::{FileSnapshotRepository, HistoryEntry, RepositoryError, Snapshot};
pub use runtime::{Runtime, RuntimeConfig};
pub use utils::hash::state_digest;
