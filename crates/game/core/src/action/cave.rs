use async_trait::async_trait;
use strum::IntoEnumIterator;

use crate::config::GameConfig;
use crate::engine::BootstrappedGame;
use crate::input::{Prompt, QuestionContext, RngContext, ShowContext, Shown, choose};
use crate::state::{AlchemicalResource, Artifact, GameState, Inventory, Skill};
use crate::world::{Position, list_cells_can_reach_and_end_turn_there};

use super::{ActionError, ActionTransition, traversable};

/// Path taken after the first barrel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaveWay {
    Barrel,
    Treasure,
}

/// Explores a cave: a barrel of loot, then a second barrel or a treasure,
/// then out through a free neighbouring hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaveAction {
    pub target: Position,
}

impl CaveAction {
    fn exits(&self, state: &GameState) -> Result<Vec<Position>, ActionError> {
        Ok(list_cells_can_reach_and_end_turn_there(
            &state.world,
            self.target,
            1,
            traversable(&state.character),
        )?
        .into_iter()
        .map(|(pos, _)| pos)
        .collect())
    }
}

/// Loot a barrel can hold.
pub fn barrel_contents() -> [Inventory; 3] {
    let mut mixed = Inventory::empty().with_rubies(1);
    for resource in AlchemicalResource::iter() {
        mixed = mixed.with_alchemy(resource, 1);
    }
    [
        Inventory::empty().with_rubies(2),
        Inventory::empty().with_rubies(3),
        mixed,
    ]
}

#[async_trait]
impl ActionTransition for CaveAction {
    fn pre_validate(&self, game: &BootstrappedGame) -> Result<(), ActionError> {
        let state = &game.state;
        if !state.character.has_skill(Skill::Spelunking) {
            return Err(ActionError::MissingSkill(Skill::Spelunking));
        }
        if state.last_visited_cave == Some(self.target) {
            return Err(ActionError::NothingToDo);
        }
        if self.exits(state)?.is_empty() {
            return Err(ActionError::NoCandidates);
        }
        Ok(())
    }

    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError> {
        let rng = game.rng();
        let player = game.player();
        let state = &game.state;
        let exits = self.exits(state)?;

        let first_key = game.key(0);
        let first = choose(
            &rng,
            &Prompt::rng(RngContext::CaveBarrel1, first_key.clone()),
            &barrel_contents(),
        )
        .await?;
        player.show(
            &Prompt::show(ShowContext::Revealed(RngContext::CaveBarrel1), first_key),
            &Shown::Loot(first.clone()),
        );
        let mut character = state.character.gain_items(&first);

        let mut ways = vec![CaveWay::Barrel];
        if state.character.artifact_count() < GameConfig::MAX_ARTIFACTS {
            ways.push(CaveWay::Treasure);
        }
        let way = choose(
            player,
            &Prompt::question(QuestionContext::CaveWhichWay, game.key(1)),
            &ways,
        )
        .await?;

        let second_key = game.key(2);
        match way {
            CaveWay::Barrel => {
                let second = choose(
                    &rng,
                    &Prompt::rng(RngContext::CaveBarrel2, second_key.clone()),
                    &barrel_contents(),
                )
                .await?;
                player.show(
                    &Prompt::show(ShowContext::Revealed(RngContext::CaveBarrel2), second_key),
                    &Shown::Loot(second.clone()),
                );
                character = character.gain_items(&second);
            }
            CaveWay::Treasure => {
                let unowned: Vec<Artifact> = Artifact::iter()
                    .filter(|artifact| !state.character.has_artifact(*artifact))
                    .collect();
                let artifact = choose(
                    &rng,
                    &Prompt::rng(RngContext::CaveTreasure, second_key.clone()),
                    &unowned,
                )
                .await?;
                player.show(
                    &Prompt::show(ShowContext::Revealed(RngContext::CaveTreasure), second_key),
                    &Shown::Artifact(artifact),
                );
                character = character.with_artifact(artifact);
            }
        }

        let mut inside = state.with_character(character);
        inside.turn_number += GameConfig::CAVE_EXTRA_TURNS;
        inside.last_visited_cave = Some(self.target);

        let exit = choose(
            player,
            &Prompt::question(QuestionContext::CaveExit, game.key(3)),
            &exits,
        )
        .await?;
        inside.move_character(exit)
    }
}
