use async_trait::async_trait;

use crate::engine::{BootstrappedGame, SubKeys};
use crate::input::{
    Input, Prompt, PromptKey, QuestionContext, RngContext, ShowContext, Shown, choose,
};
use crate::progress::{Recipe, RecipeGenerator};
use crate::state::{Character, Counts, GameState, Inventory};

use super::{ActionError, ActionTransition};

/// Services Marlon offers for the recipes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarlonInteraction {
    /// Pay the recipe's ruby cost to learn its dialect.
    RevealDialect,
    /// Hand over the recipe's pages, translated into its dialect, to learn
    /// its ingredients.
    RevealIngredients,
    GiveIngredients,
}

/// Working copy of everything a Marlon visit can change.
#[derive(Clone, Debug)]
struct Workshop {
    character: Character,
    recipes: Vec<Recipe>,
    generator: RecipeGenerator,
}

impl Workshop {
    fn from_state(state: &GameState) -> Self {
        Self {
            character: state.character.clone(),
            recipes: state.recipes.clone(),
            generator: state.recipe_generator.clone(),
        }
    }

    fn candidates(&self, interaction: MarlonInteraction) -> Vec<usize> {
        let inventory = &self.character.inventory;
        self.recipes
            .iter()
            .enumerate()
            .filter(|(_, recipe)| match (interaction, recipe) {
                (MarlonInteraction::RevealDialect, Recipe::Unknown { rubies_cost, .. }) => {
                    !self.generator.dialects.is_empty() && inventory.rubies >= *rubies_cost
                }
                (
                    MarlonInteraction::RevealIngredients,
                    Recipe::DialectKnown { dialect, num_pages },
                ) => {
                    !self.generator.combinations.is_empty()
                        && self.generator.counts.len() >= 2
                        && inventory.translated_pages.get(*dialect) >= *num_pages
                }
                (
                    MarlonInteraction::GiveIngredients,
                    Recipe::IngredientsKnown {
                        ingredients,
                        collected,
                        ..
                    },
                ) => ingredients.iter().any(|(resource, needed)| {
                    collected.get(resource) < needed && inventory.alchemy.get(resource) > 0
                }),
                _ => false,
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    fn available(&self) -> Vec<MarlonInteraction> {
        [
            MarlonInteraction::RevealDialect,
            MarlonInteraction::RevealIngredients,
            MarlonInteraction::GiveIngredients,
        ]
        .into_iter()
        .filter(|interaction| !self.candidates(*interaction).is_empty())
        .collect()
    }

    fn recipe(&self, idx: usize) -> Result<&Recipe, ActionError> {
        self.recipes.get(idx).ok_or(ActionError::NoCandidates)
    }

    /// Pays `cost` and replaces recipe `idx` with its next stage.
    async fn reveal(
        &mut self,
        idx: usize,
        cost: Inventory,
        rng: &(dyn Input + '_),
        game: &BootstrappedGame,
        key: PromptKey,
    ) -> Result<(), ActionError> {
        let character = self.character.trade_items(&cost, &Inventory::empty())?;
        let recipe = self.recipe(idx)?;
        let context = match recipe {
            Recipe::Unknown { .. } => RngContext::RecipeDialect,
            _ => RngContext::RecipeIngredients,
        };
        let (recipe, generator) = self.generator.generate(recipe, rng, &key).await?;
        game.player().show(
            &Prompt::show(ShowContext::Revealed(context), key),
            &Shown::Recipe(recipe.clone()),
        );
        self.character = character;
        self.recipes[idx] = recipe;
        self.generator = generator;
        Ok(())
    }

    async fn give_ingredients(
        &mut self,
        idx: usize,
        game: &BootstrappedGame,
        keys: &mut SubKeys,
    ) -> Result<(), ActionError> {
        let recipe = self.recipe(idx)?.clone();
        let Recipe::IngredientsKnown { ingredients, .. } = &recipe else {
            return Err(ActionError::NothingToDo);
        };

        let mut contribution = Counts::new();
        for resource in ingredients.keys() {
            let held = self.character.inventory.alchemy.get(resource);
            let prompt = Prompt::question(
                QuestionContext::MarlonIngredientAmount(resource),
                keys.next_key(),
            );
            let amount = game.player().choose_from_range(&prompt, 0, held).await?;
            contribution.set(resource, amount);
        }

        let (recipe, inventory) =
            recipe.contribute_ingredients(&self.character.inventory, &contribution)?;
        self.character = self.character.with_inventory(inventory);
        self.recipes[idx] = recipe;
        Ok(())
    }
}

/// Visits Marlon and works on recipes until the controller leaves or nothing
/// remains to be done.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarlonAction;

#[async_trait]
impl ActionTransition for MarlonAction {
    fn pre_validate(&self, game: &BootstrappedGame) -> Result<(), ActionError> {
        if Workshop::from_state(&game.state).available().is_empty() {
            return Err(ActionError::NoCandidates);
        }
        Ok(())
    }

    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError> {
        let player = game.player();
        let rng = game.rng();
        let mut keys = game.sub_keys();
        let mut workshop = Workshop::from_state(&game.state);
        let mut completed = 0usize;

        loop {
            let available = workshop.available();
            if available.is_empty() {
                break;
            }
            let options: Vec<Option<MarlonInteraction>> = std::iter::once(None)
                .chain(available.into_iter().map(Some))
                .collect();
            let prompt = Prompt::question(QuestionContext::MarlonInteraction, keys.next_key());
            let Some(interaction) = choose(player, &prompt, &options).await? else {
                break;
            };

            let which = match interaction {
                MarlonInteraction::RevealDialect => QuestionContext::MarlonRevealDialectRecipe,
                MarlonInteraction::RevealIngredients => {
                    QuestionContext::MarlonRevealIngredientsRecipe
                }
                MarlonInteraction::GiveIngredients => QuestionContext::MarlonGiveIngredientsRecipe,
            };
            let candidates = workshop.candidates(interaction);
            let idx = choose(player, &Prompt::question(which, keys.next_key()), &candidates).await?;

            match (interaction, workshop.recipe(idx)?.clone()) {
                (MarlonInteraction::RevealDialect, Recipe::Unknown { rubies_cost, .. }) => {
                    let cost = Inventory::empty().with_rubies(rubies_cost);
                    workshop.reveal(idx, cost, &rng, game, keys.next_key()).await?;
                }
                (
                    MarlonInteraction::RevealIngredients,
                    Recipe::DialectKnown { dialect, num_pages },
                ) => {
                    let cost = Inventory::empty().with_translated_pages(dialect, num_pages);
                    workshop.reveal(idx, cost, &rng, game, keys.next_key()).await?;
                }
                (MarlonInteraction::GiveIngredients, _) => {
                    workshop.give_ingredients(idx, game, &mut keys).await?;
                }
                _ => return Err(ActionError::NothingToDo),
            }
            completed += 1;
        }

        if completed == 0 {
            return Err(ActionError::NothingToDo);
        }
        let mut next = game.state.with_character(workshop.character);
        next.recipes = workshop.recipes;
        next.recipe_generator = workshop.generator;
        Ok(next)
    }
}
