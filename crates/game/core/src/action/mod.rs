//! Action resolution.
//!
//! A [`GameAction`] is either a move or an interaction with an adjacent hex.
//! Each concrete action implements [`ActionTransition`] and runs through the
//! same three phases: `pre_validate` on the game as it stands, `apply` to build
//! the successor state (prompting the controller and the RNG as needed), and
//! `post_validate` on the result. A failure in any phase discards the
//! successor, so a rejected action never leaves a partial change behind.
//!
//! Prompts issued while resolving an action are keyed `[n, i]` where `n` is
//! the prompt number the action runs under and `i` counts up within it.

mod cave;
mod error;
mod interact;
mod market;
mod marlon;
mod merchant;
mod movement;
mod portal;
mod sage;
mod village;

pub use cave::{CaveAction, CaveWay};
pub use error::ActionError;
pub use interact::{BuildAction, InteractAction, Interaction, ProduceAction};
pub use market::{MarketAction, MarketTrade, MarketTradeType};
pub use marlon::{MarlonAction, MarlonInteraction};
pub use merchant::MerchantAction;
pub use movement::MoveAction;
pub use portal::PortalAction;
pub use sage::SageAction;
pub use village::VillageAction;

use async_trait::async_trait;

use crate::engine::BootstrappedGame;
use crate::state::{Character, GameState};
use crate::world::{Cell, Position};

/// What the controller asks the character to do on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameAction {
    Move(Position),
    Interact(Position),
}

impl GameAction {
    pub fn target(&self) -> Position {
        match self {
            GameAction::Move(target) | GameAction::Interact(target) => *target,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GameAction::Move(_) => "move",
            GameAction::Interact(_) => "interact",
        }
    }
}

/// Defines how a concrete action turns one game state into the next.
///
/// `pre_validate` and `post_validate` must stay side-effect free. `apply` may
/// prompt the controller and the RNG through the game it is given, and
/// returns the successor state instead of mutating in place.
#[async_trait]
pub trait ActionTransition: Send + Sync {
    /// Validates pre-conditions using the state **before** the action.
    fn pre_validate(&self, _game: &BootstrappedGame) -> Result<(), ActionError> {
        Ok(())
    }

    /// Resolves the action. Implementations may assume `pre_validate` passed.
    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError>;

    /// Validates post-conditions using the state **after** the action.
    fn post_validate(&self, state: &GameState) -> Result<(), ActionError> {
        state.check_invariants().map_err(ActionError::from)
    }
}

/// Traversal predicate for BFS over the map.
pub(crate) fn traversable(character: &Character) -> impl Fn(&Cell) -> bool + '_ {
    move |cell| character.can_traverse(cell)
}
