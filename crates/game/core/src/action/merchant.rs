use async_trait::async_trait;
use strum::IntoEnumIterator;

use crate::engine::BootstrappedGame;
use crate::input::{Prompt, QuestionContext, choose};
use crate::state::{Character, Dialect, GameState, Inventory, Skill};

use super::{ActionError, ActionTransition};

/// Swaps one page for a raw page of another dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MerchantAction;

impl MerchantAction {
    /// Dialects the character holds at least one page of, raw or translated.
    fn tradeable(character: &Character) -> Vec<Dialect> {
        let inventory = &character.inventory;
        Dialect::iter()
            .filter(|d| inventory.raw_pages.get(*d) + inventory.translated_pages.get(*d) > 0)
            .collect()
    }

    /// One page of `dialect`, translated when the character has one.
    fn payment(character: &Character, dialect: Dialect) -> Inventory {
        if character.inventory.translated_pages.get(dialect) > 0 {
            Inventory::empty().with_translated_pages(dialect, 1)
        } else {
            Inventory::empty().with_raw_pages(dialect, 1)
        }
    }
}

#[async_trait]
impl ActionTransition for MerchantAction {
    fn pre_validate(&self, game: &BootstrappedGame) -> Result<(), ActionError> {
        let character = &game.state.character;
        if !character.has_skill(Skill::Negotiation) {
            return Err(ActionError::MissingSkill(Skill::Negotiation));
        }
        if Self::tradeable(character).is_empty() {
            return Err(ActionError::NoCandidates);
        }
        Ok(())
    }

    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError> {
        let player = game.player();
        let character = &game.state.character;

        let give = choose(
            player,
            &Prompt::question(QuestionContext::MerchantTradeWhat, game.key(0)),
            &Self::tradeable(character),
        )
        .await?;
        let others: Vec<Dialect> = Dialect::iter().filter(|d| *d != give).collect();
        let take = choose(
            player,
            &Prompt::question(QuestionContext::MerchantTradeFor, game.key(1)),
            &others,
        )
        .await?;

        let character = character.trade_items(
            &Self::payment(character, give),
            &Inventory::empty().with_raw_pages(take, 1),
        )?;
        Ok(game.state.with_character(character))
    }
}
