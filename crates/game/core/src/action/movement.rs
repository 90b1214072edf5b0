use async_trait::async_trait;

use crate::engine::BootstrappedGame;
use crate::state::GameState;
use crate::world::{Position, can_reach_and_end_turn_there};

use super::{ActionError, ActionTransition, traversable};

/// Walks to a free hex within movement range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveAction {
    pub target: Position,
}

impl MoveAction {
    pub fn new(target: Position) -> Self {
        Self { target }
    }
}

#[async_trait]
impl ActionTransition for MoveAction {
    fn pre_validate(&self, game: &BootstrappedGame) -> Result<(), ActionError> {
        let state = &game.state;
        // Staying put is not a move.
        if self.target == state.char_pos {
            return Err(ActionError::Unreachable);
        }
        let cell = state.cell(self.target).ok_or(ActionError::Unreachable)?;
        if !cell.is_free() {
            return Err(ActionError::Occupied);
        }
        let character = &state.character;
        can_reach_and_end_turn_there(
            &state.world,
            state.char_pos,
            self.target,
            character.movement_speed(),
            traversable(character),
        )?
        .ok_or(ActionError::Unreachable)?;
        Ok(())
    }

    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError> {
        game.state.move_character(self.target)
    }
}
