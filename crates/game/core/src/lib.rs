//! Deterministic rules of the hex alchemy board game.
//!
//! `hexalchemy-core` defines the canonical rules (actions, generators, world
//! state) and exposes them as pure transitions over immutable snapshots.
//! Every decision, random or human, is obtained through the keyed [`Input`]
//! capability, so a game replays bit for bit from its seed and answers. All
//! state changes flow through [`engine::BootstrappedGame`], and the runtime
//! crate depends on the types re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod progress;
pub mod state;
pub mod world;

pub use action::{
    ActionError, ActionTransition, CaveWay, GameAction, Interaction, MarketTrade,
    MarketTradeType, MarlonInteraction,
};
pub use config::GameConfig;
pub use engine::{
    BootstrappedGame, ExecuteError, GameRng, StepOutcome, SubKeys, TransitionPhase,
    TransitionPhaseError,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use input::{
    Choice, Input, InputError, Output, Player, Prng, PrngState, Prompt, PromptContext, PromptKey,
    QuestionContext, RecordedInput, RerollDecision, RerollInput, RngContext, ShowContext, Shown,
    choose, choose_without_replacement,
};
pub use progress::{LostPage, LostPagesGenerator, Recipe, RecipeGenerator, Village, VillagePage};
pub use state::{
    AlchemicalResource, Artifact, Character, Counts, Dialect, GameState, Inventory, Skill,
    StateError,
};
pub use world::{Cell, GridError, Position, SageId, TemplateTile, Terrain, World, WorldObject};
