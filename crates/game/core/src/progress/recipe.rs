use crate::action::ActionError;
use crate::config::GameConfig;
use crate::input::{Input, Prompt, PromptKey, RngContext, choose_without_replacement};
use crate::state::{AlchemicalResource, Counts, Dialect, Inventory};

/// Progress of one recipe slot, from fully unknown to finished.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Recipe {
    Unknown {
        num_pages: u32,
        rubies_cost: u32,
    },
    DialectKnown {
        dialect: Dialect,
        num_pages: u32,
    },
    IngredientsKnown {
        dialect: Dialect,
        num_pages: u32,
        ingredients: Counts<AlchemicalResource>,
        collected: Counts<AlchemicalResource>,
    },
    Finished {
        dialect: Dialect,
        num_pages: u32,
        ingredients: Counts<AlchemicalResource>,
    },
}

impl Recipe {
    /// The three recipe slots every game starts with.
    pub fn initial_set() -> Vec<Recipe> {
        GameConfig::INITIAL_RECIPES
            .iter()
            .map(|&(num_pages, rubies_cost)| Recipe::Unknown {
                num_pages,
                rubies_cost,
            })
            .collect()
    }

    pub fn num_pages(&self) -> u32 {
        match self {
            Recipe::Unknown { num_pages, .. }
            | Recipe::DialectKnown { num_pages, .. }
            | Recipe::IngredientsKnown { num_pages, .. }
            | Recipe::Finished { num_pages, .. } => *num_pages,
        }
    }

    pub fn dialect(&self) -> Option<Dialect> {
        match self {
            Recipe::Unknown { .. } => None,
            Recipe::DialectKnown { dialect, .. }
            | Recipe::IngredientsKnown { dialect, .. }
            | Recipe::Finished { dialect, .. } => Some(*dialect),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Recipe::Finished { .. })
    }

    /// Holds when no ingredient has been over-collected.
    pub fn is_consistent(&self) -> bool {
        match self {
            Recipe::IngredientsKnown {
                ingredients,
                collected,
                ..
            } => collected
                .iter()
                .all(|(resource, amount)| amount <= ingredients.get(resource)),
            _ => true,
        }
    }

    /// Moves up to `contribution` of each required resource from `inventory`
    /// into the recipe.
    ///
    /// Each resource contributes the smallest of what was offered, what is
    /// held, and what is still missing. Completing every ingredient finishes
    /// the recipe.
    pub fn contribute_ingredients(
        &self,
        inventory: &Inventory,
        contribution: &Counts<AlchemicalResource>,
    ) -> Result<(Recipe, Inventory), ActionError> {
        let Recipe::IngredientsKnown {
            dialect,
            num_pages,
            ingredients,
            collected,
        } = self
        else {
            return Err(ActionError::NothingToDo);
        };

        let mut inventory = inventory.clone();
        let mut collected = collected.clone();
        for (resource, needed) in ingredients.iter() {
            let missing = needed.saturating_sub(collected.get(resource));
            let given = contribution
                .get(resource)
                .min(inventory.alchemy.get(resource))
                .min(missing);
            inventory
                .alchemy
                .set(resource, inventory.alchemy.get(resource) - given);
            collected.set(resource, collected.get(resource) + given);
        }

        let complete = ingredients
            .iter()
            .all(|(resource, needed)| collected.get(resource) >= needed);
        let recipe = if complete {
            Recipe::Finished {
                dialect: *dialect,
                num_pages: *num_pages,
                ingredients: ingredients.clone(),
            }
        } else {
            Recipe::IngredientsKnown {
                dialect: *dialect,
                num_pages: *num_pages,
                ingredients: ingredients.clone(),
                collected,
            }
        };
        Ok((recipe, inventory))
    }
}

/// Pools shared by every recipe; each draw removes what it hands out so no
/// two recipes share a dialect or an ingredient pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipeGenerator {
    pub dialects: Vec<Dialect>,
    pub combinations: Vec<[AlchemicalResource; 2]>,
    pub counts: Vec<u32>,
}

impl Default for RecipeGenerator {
    fn default() -> Self {
        use AlchemicalResource::{Honey, Mushroom, Waterlily};
        Self {
            dialects: vec![Dialect::Bird, Dialect::Dragonfly, Dialect::Fish, Dialect::Mouse],
            combinations: vec![[Honey, Waterlily], [Waterlily, Mushroom], [Mushroom, Honey]],
            counts: vec![1, 2, 2, 3, 3, 4],
        }
    }
}

impl RecipeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveals the next stage of `recipe`: its dialect when unknown, its
    /// ingredients once the dialect is known.
    pub async fn generate<I>(
        &self,
        recipe: &Recipe,
        input: &I,
        key: &PromptKey,
    ) -> Result<(Recipe, RecipeGenerator), ActionError>
    where
        I: Input + ?Sized,
    {
        match recipe {
            Recipe::Unknown { num_pages, .. } => {
                if self.dialects.is_empty() {
                    return Err(ActionError::NothingToDo);
                }
                let prompt = Prompt::rng(RngContext::RecipeDialect, key.clone());
                let (dialect, dialects) =
                    choose_without_replacement(input, &prompt, &self.dialects).await?;
                let recipe = Recipe::DialectKnown {
                    dialect,
                    num_pages: *num_pages,
                };
                Ok((
                    recipe,
                    RecipeGenerator {
                        dialects,
                        ..self.clone()
                    },
                ))
            }
            Recipe::DialectKnown { dialect, num_pages } => {
                if self.combinations.is_empty() || self.counts.len() < 2 {
                    return Err(ActionError::NothingToDo);
                }
                let combination_prompt = Prompt::rng(RngContext::RecipeIngredients, key.sub(0));
                let ([first, second], combinations) =
                    choose_without_replacement(input, &combination_prompt, &self.combinations)
                        .await?;
                let first_prompt = Prompt::rng(RngContext::RecipeIngredientCount, key.sub(1));
                let (first_count, counts) =
                    choose_without_replacement(input, &first_prompt, &self.counts).await?;
                let second_prompt = Prompt::rng(RngContext::RecipeIngredientCount, key.sub(2));
                let (second_count, counts) =
                    choose_without_replacement(input, &second_prompt, &counts).await?;

                let recipe = Recipe::IngredientsKnown {
                    dialect: *dialect,
                    num_pages: *num_pages,
                    ingredients: Counts::new()
                        .with(first, first_count)
                        .with(second, second_count),
                    collected: Counts::new(),
                };
                Ok((
                    recipe,
                    RecipeGenerator {
                        dialects: self.dialects.clone(),
                        combinations,
                        counts,
                    },
                ))
            }
            Recipe::IngredientsKnown { .. } | Recipe::Finished { .. } => {
                Err(ActionError::NothingToDo)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    use crate::input::Prng;
    use crate::input::testing::ScriptedInput;
    use AlchemicalResource::*;

    fn key() -> PromptKey {
        PromptKey::pair(6, 2)
    }

    fn known(ingredients: Counts<AlchemicalResource>) -> Recipe {
        Recipe::IngredientsKnown {
            dialect: Dialect::Fish,
            num_pages: 3,
            ingredients,
            collected: Counts::new(),
        }
    }

    #[test]
    fn initial_recipes_match_page_and_ruby_costs() {
        let recipes = Recipe::initial_set();
        assert_eq!(
            recipes,
            vec![
                Recipe::Unknown { num_pages: 4, rubies_cost: 1 },
                Recipe::Unknown { num_pages: 3, rubies_cost: 2 },
                Recipe::Unknown { num_pages: 2, rubies_cost: 3 },
            ]
        );
    }

    #[tokio::test]
    async fn dialect_then_ingredients() {
        let generator = RecipeGenerator::new();
        let input = ScriptedInput::new([2, 1, 5, 0]);
        let unknown = Recipe::Unknown {
            num_pages: 3,
            rubies_cost: 2,
        };

        let (recipe, generator) = generator.generate(&unknown, &input, &key()).await.unwrap();
        assert_eq!(
            recipe,
            Recipe::DialectKnown {
                dialect: Dialect::Fish,
                num_pages: 3
            }
        );
        assert_eq!(
            generator.dialects,
            vec![Dialect::Bird, Dialect::Dragonfly, Dialect::Mouse]
        );

        let (recipe, generator) = generator.generate(&recipe, &input, &key()).await.unwrap();
        assert_eq!(recipe, known(Counts::new().with(Waterlily, 4).with(Mushroom, 1)));
        assert_eq!(generator.combinations, vec![[Honey, Waterlily], [Mushroom, Honey]]);
        assert_eq!(generator.counts, vec![2, 2, 3, 3]);
        assert_eq!(
            input.asked_keys(),
            vec!["[6,2]", "[[6,2],0]", "[[6,2],1]", "[[6,2],2]"]
        );
    }

    #[tokio::test]
    async fn recipes_from_one_generator_never_share_pool_entries() {
        for seed in [0, 1, 7, 42, 0x5eed, u64::MAX] {
            let rng = Prng::new(seed);
            let mut generator = RecipeGenerator::new();
            let mut recipes = Vec::new();

            for (slot, recipe) in Recipe::initial_set().into_iter().enumerate() {
                let (recipe, next) = generator
                    .generate(&recipe, &rng, &PromptKey::pair(10, slot as u32))
                    .await
                    .unwrap();
                let (recipe, next) = next
                    .generate(&recipe, &rng, &PromptKey::pair(20, slot as u32))
                    .await
                    .unwrap();
                generator = next;
                recipes.push(recipe);
            }

            let dialects: HashSet<_> = recipes.iter().filter_map(Recipe::dialect).collect();
            assert_eq!(dialects.len(), 3, "seed {seed}: {recipes:?}");

            let mut pairs = HashSet::new();
            let mut counts = Vec::new();
            for recipe in &recipes {
                let Recipe::IngredientsKnown { ingredients, .. } = recipe else {
                    panic!("seed {seed}: ingredients not revealed: {recipe:?}");
                };
                let (resources, amounts): (Vec<_>, Vec<_>) = ingredients.iter().unzip();
                assert_eq!(resources.len(), 2);
                assert!(pairs.insert(resources.into_iter().collect::<BTreeSet<_>>()));
                counts.extend(amounts);
            }

            // Six draws empty the count pool, each entry handed out once.
            counts.sort_unstable();
            assert_eq!(counts, vec![1, 2, 2, 3, 3, 4], "seed {seed}");
            assert!(generator.counts.is_empty());
            assert!(generator.combinations.is_empty());
            assert_eq!(generator.dialects.len(), 1);
        }
    }

    #[tokio::test]
    async fn known_or_finished_recipes_have_nothing_to_reveal() {
        let generator = RecipeGenerator::new();
        let input = ScriptedInput::new([]);
        let recipe = known(Counts::new().with(Honey, 1));
        assert_eq!(
            generator.generate(&recipe, &input, &key()).await,
            Err(ActionError::NothingToDo)
        );
    }

    #[tokio::test]
    async fn exhausted_pools_have_nothing_to_reveal() {
        let generator = RecipeGenerator {
            dialects: Vec::new(),
            combinations: Vec::new(),
            counts: vec![1],
        };
        let input = ScriptedInput::new([]);
        let unknown = Recipe::Unknown {
            num_pages: 2,
            rubies_cost: 3,
        };
        let dialect_known = Recipe::DialectKnown {
            dialect: Dialect::Bird,
            num_pages: 2,
        };
        assert_eq!(
            generator.generate(&unknown, &input, &key()).await,
            Err(ActionError::NothingToDo)
        );
        assert_eq!(
            generator.generate(&dialect_known, &input, &key()).await,
            Err(ActionError::NothingToDo)
        );
    }

    #[test]
    fn contribution_takes_the_smallest_of_offer_holding_and_need() {
        let recipe = known(Counts::new().with(Honey, 3).with(Mushroom, 2));
        let inventory = Inventory::empty()
            .with_alchemy(Honey, 1)
            .with_alchemy(Mushroom, 2)
            .with_alchemy(Waterlily, 2);
        let offer = Counts::new().with(Honey, 2).with(Mushroom, 1).with(Waterlily, 2);

        let (recipe, inventory) = recipe.contribute_ingredients(&inventory, &offer).unwrap();
        let Recipe::IngredientsKnown { collected, .. } = &recipe else {
            panic!("recipe should still be collecting: {recipe:?}");
        };
        assert_eq!(collected.get(Honey), 1);
        assert_eq!(collected.get(Mushroom), 1);
        assert_eq!(collected.get(Waterlily), 0);
        assert_eq!(inventory.alchemy.get(Honey), 0);
        assert_eq!(inventory.alchemy.get(Mushroom), 1);
        assert_eq!(inventory.alchemy.get(Waterlily), 2);
        assert!(recipe.is_consistent());
    }

    #[test]
    fn completing_every_ingredient_finishes_the_recipe() {
        let recipe = known(Counts::new().with(Honey, 1).with(Mushroom, 1));
        let inventory = Inventory::empty().with_alchemy(Honey, 2).with_alchemy(Mushroom, 2);
        let offer = Counts::new().with(Honey, 2).with(Mushroom, 2);

        let (recipe, inventory) = recipe.contribute_ingredients(&inventory, &offer).unwrap();
        assert!(recipe.is_finished());
        assert_eq!(inventory.alchemy.get(Honey), 1);
        assert_eq!(inventory.alchemy.get(Mushroom), 1);

        assert_eq!(
            recipe.contribute_ingredients(&inventory, &offer),
            Err(ActionError::NothingToDo)
        );
    }
}
