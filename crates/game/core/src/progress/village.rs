use crate::action::ActionError;
use crate::config::GameConfig;
use crate::input::{Input, Prompt};
use crate::state::{Character, Inventory};

use super::lost_pages::{LostPage, LostPagesGenerator};

/// One page a village offers, priced in the page's cost resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VillagePage {
    pub page: LostPage,
    pub cost: u32,
    pub purchased: bool,
}

/// Page slots of a village. At most one slot is unpurchased and it is always
/// the last one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Village {
    pub pages: Vec<VillagePage>,
}

impl Village {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unexplored(&self) -> bool {
        self.pages.is_empty()
    }

    /// Slot currently for sale, if any.
    pub fn current_offer(&self) -> Option<&VillagePage> {
        self.pages.last().filter(|slot| !slot.purchased)
    }

    pub async fn reveal_first_page<I>(
        &self,
        generator: &LostPagesGenerator,
        input: &I,
        prompt: &Prompt,
    ) -> Result<(Village, LostPagesGenerator), ActionError>
    where
        I: Input + ?Sized,
    {
        if !self.is_unexplored() {
            return Err(ActionError::NothingToDo);
        }
        let (page, generator) = generator.generate(input, prompt).await?;
        let village = Village {
            pages: vec![VillagePage {
                page,
                cost: 1,
                purchased: false,
            }],
        };
        Ok((village, generator))
    }

    /// Buys the current slot for its cost in alchemy and hands over one raw
    /// page of its dialect. While the village has room, the next slot is
    /// revealed at a price one higher than the number of slots before it.
    pub async fn purchase_page<I>(
        &self,
        character: &Character,
        generator: &LostPagesGenerator,
        input: &I,
        prompt: &Prompt,
    ) -> Result<(Village, Character, LostPagesGenerator), ActionError>
    where
        I: Input + ?Sized,
    {
        let offer = *self.current_offer().ok_or(ActionError::NothingToDo)?;
        let cost = Inventory::empty().with_alchemy(offer.page.cost, offer.cost);
        let gain = Inventory::empty().with_raw_pages(offer.page.dialect, 1);
        let character = character.trade_items(&cost, &gain)?;

        let mut village = self.clone();
        if let Some(slot) = village.pages.last_mut() {
            slot.purchased = true;
        }

        let slots = self.pages.len();
        let mut generator = generator.clone();
        if slots < GameConfig::VILLAGE_MAX_SLOTS {
            let (page, next) = generator.generate(input, prompt).await?;
            village.pages.push(VillagePage {
                page,
                cost: slots as u32 + 1,
                purchased: false,
            });
            generator = next;
        }
        Ok((village, character, generator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::testing::ScriptedInput;
    use crate::input::{PromptKey, RngContext};
    use crate::state::{AlchemicalResource, Dialect};

    fn prompt() -> Prompt {
        Prompt::rng(RngContext::VillageRevealPage, PromptKey::pair(2, 0))
    }

    async fn revealed() -> (Village, LostPagesGenerator) {
        // Shift 0 reveals (Dragonfly, Mushroom).
        Village::new()
            .reveal_first_page(&LostPagesGenerator::new(), &ScriptedInput::new([0]), &prompt())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn first_reveal_adds_one_slot_costing_one() {
        let (village, generator) = revealed().await;
        assert_eq!(village.pages.len(), 1);
        assert_eq!(village.pages[0].cost, 1);
        assert_eq!(
            village.pages[0].page,
            LostPage::new(Dialect::Dragonfly, AlchemicalResource::Mushroom)
        );
        assert_eq!(generator.remaining().len(), 15);

        let again = village
            .reveal_first_page(&generator, &ScriptedInput::new([0]), &prompt())
            .await;
        assert_eq!(again, Err(ActionError::NothingToDo));
    }

    #[tokio::test]
    async fn purchase_without_resources_changes_nothing() {
        let (village, generator) = revealed().await;
        let character = Character::new();
        let input = ScriptedInput::new([0]);
        let result = village
            .purchase_page(&character, &generator, &input, &prompt())
            .await;
        assert_eq!(result, Err(ActionError::InsufficientResources));
        assert!(input.asked.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn purchases_fill_two_slots_then_stop() {
        let (village, generator) = revealed().await;
        let character = Character::new().with_inventory(
            Inventory::initial()
                .with_alchemy(AlchemicalResource::Mushroom, 2)
                .with_alchemy(AlchemicalResource::Honey, 2)
                .with_alchemy(AlchemicalResource::Waterlily, 2),
        );

        let (village, character, generator) = village
            .purchase_page(&character, &generator, &ScriptedInput::new([0]), &prompt())
            .await
            .unwrap();
        assert_eq!(village.pages.len(), 2);
        assert!(village.pages[0].purchased);
        assert_eq!(village.pages[1].cost, 2);
        assert!(!village.pages[1].purchased);
        assert_eq!(character.inventory.raw_pages.get(Dialect::Dragonfly), 1);
        assert_eq!(character.inventory.alchemy.get(AlchemicalResource::Mushroom), 1);
        assert_eq!(generator.remaining().len(), 14);

        let second_cost = village.pages[1].page.cost;
        let (village, character, generator) = village
            .purchase_page(&character, &generator, &ScriptedInput::new([]), &prompt())
            .await
            .unwrap();
        assert_eq!(village.pages.len(), 2);
        assert!(village.pages.iter().all(|slot| slot.purchased));
        assert_eq!(character.inventory.alchemy.get(second_cost), 0);
        assert_eq!(generator.remaining().len(), 14);

        let done = village
            .purchase_page(&character, &generator, &ScriptedInput::new([]), &prompt())
            .await;
        assert_eq!(done, Err(ActionError::NothingToDo));
    }
}
