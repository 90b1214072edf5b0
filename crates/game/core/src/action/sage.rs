use async_trait::async_trait;
use strum::IntoEnumIterator;

use crate::config::GameConfig;
use crate::engine::BootstrappedGame;
use crate::input::{Prompt, QuestionContext, choose};
use crate::state::{Character, Dialect, GameState, Inventory, Skill};
use crate::world::SageId;

use super::{ActionError, ActionTransition};

/// Translates one raw page, then optionally teaches one of the sage's skills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SageAction {
    pub sage: SageId,
}

impl SageAction {
    pub fn skills(sage: SageId) -> [Skill; 2] {
        match sage {
            SageId::WithChimney => [Skill::HeftyPockets, Skill::Negotiation],
            SageId::SmoothRoof => [Skill::WoodlandExplorer, Skill::SwiftBoots],
            SageId::SharpRoof => [Skill::Mountaineering, Skill::Spelunking],
        }
    }

    fn translation_cost() -> Inventory {
        Inventory::empty().with_rubies(GameConfig::TRANSLATION_COST_RUBIES)
    }

    fn skill_cost() -> Inventory {
        Inventory::empty().with_rubies(GameConfig::SKILL_COST_RUBIES)
    }

    fn raw_dialects(character: &Character) -> Vec<Dialect> {
        Dialect::iter()
            .filter(|d| character.inventory.raw_pages.get(*d) > 0)
            .collect()
    }

    /// Skills this sage can still teach `character`, if it can pay for one.
    fn learnable(&self, character: &Character) -> Vec<Skill> {
        if !Self::skill_cost().is_affordable_from(&character.inventory) {
            return Vec::new();
        }
        Self::skills(self.sage)
            .into_iter()
            .filter(|skill| !character.has_skill(*skill))
            .collect()
    }
}

#[async_trait]
impl ActionTransition for SageAction {
    fn pre_validate(&self, game: &BootstrappedGame) -> Result<(), ActionError> {
        let character = &game.state.character;
        if Self::raw_dialects(character).is_empty() {
            return Err(ActionError::NoCandidates);
        }
        if !Self::translation_cost().is_affordable_from(&character.inventory) {
            return Err(ActionError::InsufficientResources);
        }
        Ok(())
    }

    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError> {
        let player = game.player();
        let character = &game.state.character;

        let dialect = choose(
            player,
            &Prompt::question(QuestionContext::SageTranslateWhat, game.key(0)),
            &Self::raw_dialects(character),
        )
        .await?;
        let mut character = character.trade_items(
            &Self::translation_cost().with_raw_pages(dialect, 1),
            &Inventory::empty().with_translated_pages(dialect, 1),
        )?;

        let learnable = self.learnable(&character);
        if !learnable.is_empty() {
            // Declining is the last option.
            let options: Vec<Option<Skill>> = learnable
                .into_iter()
                .map(Some)
                .chain(std::iter::once(None))
                .collect();
            let prompt = Prompt::question(QuestionContext::SageLearnWhat, game.key(1));
            if let Some(skill) = choose(player, &prompt, &options).await? {
                character = character
                    .trade_items(&Self::skill_cost(), &Inventory::empty())?
                    .with_skill(skill);
            }
        }
        Ok(game.state.with_character(character))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_skill_is_taught_by_exactly_one_sage() {
        let taught: Vec<Skill> = [SageId::WithChimney, SageId::SharpRoof, SageId::SmoothRoof]
            .into_iter()
            .flat_map(SageAction::skills)
            .collect();
        for skill in Skill::iter() {
            assert_eq!(taught.iter().filter(|s| **s == skill).count(), 1, "{skill}");
        }
    }

    #[test]
    fn known_skills_and_empty_purses_learn_nothing() {
        let sage = SageAction {
            sage: SageId::SharpRoof,
        };
        let character = Character::new().with_skill(Skill::Spelunking);
        assert_eq!(sage.learnable(&character), vec![Skill::Mountaineering]);

        let broke = character.with_inventory(Inventory::empty());
        assert!(sage.learnable(&broke).is_empty());
    }
}
