use crate::action::ActionError;
use crate::config::GameConfig;
use crate::input::{Input, Prompt};
use crate::state::{AlchemicalResource, Dialect};

/// A page found in a village: its dialect and the resource it is bought with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LostPage {
    pub dialect: Dialect,
    pub cost: AlchemicalResource,
}

impl LostPage {
    pub const fn new(dialect: Dialect, cost: AlchemicalResource) -> Self {
        Self { dialect, cost }
    }
}

const WHEEL: [LostPage; 16] = {
    use AlchemicalResource::{Honey, Mushroom, Waterlily};
    use Dialect::{Bird, Dragonfly, Fish, Mouse};
    [
        LostPage::new(Dragonfly, Mushroom),
        LostPage::new(Fish, Waterlily),
        LostPage::new(Mouse, Honey),
        LostPage::new(Bird, Mushroom),
        LostPage::new(Dragonfly, Waterlily),
        LostPage::new(Fish, Honey),
        LostPage::new(Mouse, Mushroom),
        LostPage::new(Bird, Waterlily),
        LostPage::new(Dragonfly, Honey),
        LostPage::new(Fish, Mushroom),
        LostPage::new(Mouse, Waterlily),
        LostPage::new(Bird, Honey),
        LostPage::new(Dragonfly, Mushroom),
        LostPage::new(Fish, Waterlily),
        LostPage::new(Mouse, Honey),
        LostPage::new(Bird, Mushroom),
    ]
};

/// Shared pool every village draws its pages from.
///
/// Each draw advances the cursor by a random shift of at most
/// [`GameConfig::LOST_PAGE_MAX_SHIFT`] and removes the page under it, so the
/// wheel only ever shrinks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LostPagesGenerator {
    wheel: Vec<LostPage>,
    pos: usize,
}

impl Default for LostPagesGenerator {
    fn default() -> Self {
        Self {
            wheel: WHEEL.to_vec(),
            pos: 0,
        }
    }
}

impl LostPagesGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> &[LostPage] {
        &self.wheel
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.wheel.is_empty()
    }

    pub async fn generate<I>(
        &self,
        input: &I,
        prompt: &Prompt,
    ) -> Result<(LostPage, LostPagesGenerator), ActionError>
    where
        I: Input + ?Sized,
    {
        if self.wheel.is_empty() {
            return Err(ActionError::NothingToDo);
        }
        let shift = input
            .choose_from_range(prompt, 0, GameConfig::LOST_PAGE_MAX_SHIFT)
            .await? as usize;
        let idx = (self.pos + shift) % self.wheel.len();

        let mut wheel = self.wheel.clone();
        let page = wheel.remove(idx);
        let pos = if wheel.is_empty() { 0 } else { idx % wheel.len() };
        Ok((page, LostPagesGenerator { wheel, pos }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::testing::ScriptedInput;
    use crate::input::{PromptKey, RngContext};

    fn prompt() -> Prompt {
        Prompt::rng(RngContext::VillageRevealPage, PromptKey::pair(1, 0))
    }

    #[tokio::test]
    async fn draw_removes_page_under_shifted_cursor() {
        let generator = LostPagesGenerator::new();
        let input = ScriptedInput::new([3]);
        let (page, next) = generator.generate(&input, &prompt()).await.unwrap();
        assert_eq!(page, LostPage::new(Dialect::Bird, AlchemicalResource::Mushroom));
        assert_eq!(next.remaining().len(), 15);
        assert_eq!(next.pos(), 3);
    }

    #[tokio::test]
    async fn cursor_wraps_around_the_shrinking_wheel() {
        let mut generator = LostPagesGenerator::new();
        let input = ScriptedInput::new(std::iter::repeat_n(5, 16));
        let mut drawn = Vec::new();
        for k in 1..=16 {
            let (page, next) = generator.generate(&input, &prompt()).await.unwrap();
            drawn.push(page);
            generator = next;
            assert_eq!(generator.remaining().len(), 16 - k);
            assert!(generator.pos() < generator.remaining().len().max(1));
        }
        assert!(generator.is_exhausted());
        assert_eq!(generator.pos(), 0);

        // Every wheel entry is handed out exactly once.
        let mut expected = WHEEL.to_vec();
        for page in &drawn {
            let idx = expected.iter().position(|p| p == page).unwrap();
            expected.remove(idx);
        }
        assert!(expected.is_empty());
    }

    #[tokio::test]
    async fn empty_wheel_has_nothing_to_give() {
        let generator = LostPagesGenerator {
            wheel: Vec::new(),
            pos: 0,
        };
        let input = ScriptedInput::new([]);
        assert_eq!(
            generator.generate(&input, &prompt()).await,
            Err(ActionError::NothingToDo)
        );
        assert!(input.asked.lock().unwrap().is_empty());
    }
}
