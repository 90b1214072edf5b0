use async_trait::async_trait;

use crate::engine::BootstrappedGame;
use crate::input::{Prompt, QuestionContext, choose};
use crate::state::{Artifact, GameState};
use crate::world::{Position, list_cells_can_reach_and_end_turn_there};

use super::{ActionError, ActionTransition, traversable};

/// Steps through a portal to a free hex next to any other portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortalAction {
    pub target: Position,
}

impl PortalAction {
    /// Landing hexes around every portal except the one being used.
    pub fn destinations(&self, state: &GameState) -> Result<Vec<Position>, ActionError> {
        let mut destinations = Vec::new();
        let others = state
            .world
            .list_hexes()
            .filter(|(pos, cell)| cell.is_portal() && *pos != self.target);
        for (portal, _) in others {
            let around = list_cells_can_reach_and_end_turn_there(
                &state.world,
                portal,
                1,
                traversable(&state.character),
            )?;
            destinations.extend(around.into_iter().map(|(pos, _)| pos));
        }
        Ok(destinations)
    }
}

#[async_trait]
impl ActionTransition for PortalAction {
    fn pre_validate(&self, game: &BootstrappedGame) -> Result<(), ActionError> {
        if !game.state.character.has_artifact(Artifact::PortalStone) {
            return Err(ActionError::MissingArtifact(Artifact::PortalStone));
        }
        if self.destinations(&game.state)?.is_empty() {
            return Err(ActionError::NoCandidates);
        }
        Ok(())
    }

    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError> {
        let destinations = self.destinations(&game.state)?;
        let destination = choose(
            game.player(),
            &Prompt::question(QuestionContext::PortalDestination, game.key(0)),
            &destinations,
        )
        .await?;
        game.state.move_character(destination)
    }
}
