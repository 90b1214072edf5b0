//! Authoritative game state.
//!
//! [`GameState`] is an immutable snapshot: every rule returns a new value and
//! never mutates one another holder can observe. Runtime layers clone it,
//! encode it, and compare it, but only action resolution produces new ones.
mod character;
mod error;
mod inventory;
mod items;

pub use character::{Artifacts, Character, Skills};
pub use error::StateError;
pub use inventory::{Counts, Inventory};
pub use items::{AlchemicalResource, Artifact, Dialect, Skill};

use crate::action::ActionError;
use crate::progress::{LostPagesGenerator, Recipe, RecipeGenerator};
use crate::world::{Cell, Position, TemplateTile, World, WorldObject};

/// Canonical snapshot of one point in a game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub character: Character,
    pub world: World<Cell>,
    pub char_pos: Position,
    /// In-game time. Moves cost one turn, a cave visit three more.
    pub turn_number: u64,
    pub lost_pages_generator: LostPagesGenerator,
    /// Cave the character last came out of; it cannot be entered again
    /// straight away.
    pub last_visited_cave: Option<Position>,
    pub recipes: Vec<Recipe>,
    pub recipe_generator: RecipeGenerator,
}

impl GameState {
    /// Fresh state on `template` with the character standing on `start`.
    pub fn initial(template: &World<TemplateTile>, start: Position) -> Result<Self, StateError> {
        if template.get(start) != Some(&TemplateTile::Start) {
            return Err(StateError::InvalidStart { position: start });
        }
        Ok(Self {
            character: Character::new(),
            world: template.map(|tile| tile.to_cell()),
            char_pos: start,
            turn_number: 0,
            lost_pages_generator: LostPagesGenerator::new(),
            last_visited_cave: None,
            recipes: Recipe::initial_set(),
            recipe_generator: RecipeGenerator::new(),
        })
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.world.get(pos)
    }

    #[must_use]
    pub fn with_character(&self, character: Character) -> Self {
        Self {
            character,
            ..self.clone()
        }
    }

    /// Places the character on `target`, spending one turn and marking the
    /// hex as visited on the new turn.
    pub fn move_character(&self, target: Position) -> Result<GameState, ActionError> {
        let cell = self.cell(target).ok_or(ActionError::Unreachable)?;
        if !cell.is_free() {
            return Err(ActionError::Occupied);
        }
        let turn_number = self.turn_number + 1;
        let visited = cell
            .clone()
            .with_object(WorldObject::PreviouslyVisited { turn_number });

        let mut next = self.clone();
        next.world.set(target, visited)?;
        next.char_pos = target;
        next.turn_number = turn_number;
        Ok(next)
    }

    /// Checks the invariants every reachable state satisfies.
    pub fn check_invariants(&self) -> Result<(), StateError> {
        if !self.character.is_within_capacity() {
            return Err(StateError::CapacityExceeded {
                capacity: self.character.storage_capacity(),
            });
        }
        if let Some(index) = self.recipes.iter().position(|r| !r.is_consistent()) {
            return Err(StateError::RecipeOvercollected { index });
        }
        if !self.world.contains(self.char_pos) {
            return Err(StateError::CharacterOffMap {
                position: self.char_pos,
            });
        }
        Ok(())
    }
}
