use async_trait::async_trait;

use crate::engine::BootstrappedGame;
use crate::input::{Prompt, RngContext, ShowContext, Shown};
use crate::progress::Village;
use crate::state::GameState;
use crate::world::{Position, WorldObject};

use super::{ActionError, ActionTransition};

/// Reveals a village's first page, or buys the page currently on offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VillageAction {
    pub target: Position,
}

impl VillageAction {
    fn village<'a>(&self, state: &'a GameState) -> Result<&'a Village, ActionError> {
        match state.cell(self.target).and_then(|cell| cell.object.as_ref()) {
            Some(WorldObject::Village(village)) => Ok(village),
            _ => Err(ActionError::NothingToDo),
        }
    }
}

#[async_trait]
impl ActionTransition for VillageAction {
    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError> {
        let state = &game.state;
        let village = self.village(state)?;
        let rng = game.rng();
        let key = game.key(0);

        let (context, village, character, generator) = if village.is_unexplored() {
            let context = RngContext::VillageRevealPage;
            let prompt = Prompt::rng(context, key.clone());
            let (village, generator) = village
                .reveal_first_page(&state.lost_pages_generator, &rng, &prompt)
                .await?;
            (context, village, state.character.clone(), generator)
        } else {
            let context = RngContext::VillageNextPage;
            let prompt = Prompt::rng(context, key.clone());
            let (village, character, generator) = village
                .purchase_page(&state.character, &state.lost_pages_generator, &rng, &prompt)
                .await?;
            (context, village, character, generator)
        };

        if let Some(offer) = village.current_offer() {
            game.player().show(
                &Prompt::show(ShowContext::Revealed(context), key),
                &Shown::LostPage(offer.page),
            );
        }

        let cell = state
            .cell(self.target)
            .ok_or(ActionError::Unreachable)?
            .clone()
            .with_object(WorldObject::Village(village));
        let mut next = state.with_character(character);
        next.world.set(self.target, cell)?;
        next.lost_pages_generator = generator;
        Ok(next)
    }
}
