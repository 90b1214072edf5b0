use async_trait::async_trait;

use crate::input::{Choice, Input, InputError, Prng, Prompt, RerollInput};

/// The RNG as the rules see it for one action.
///
/// While the character holds the Golden Die every draw goes through the
/// keep-or-reroll decorator; otherwise draws come straight from the core.
pub enum GameRng<'a> {
    Plain(&'a Prng),
    Controlled(RerollInput<'a>),
}

impl GameRng<'_> {
    pub fn is_controlled(&self) -> bool {
        matches!(self, GameRng::Controlled(_))
    }
}

#[async_trait]
impl Input for GameRng<'_> {
    async fn choose_from_range(
        &self,
        prompt: &Prompt,
        lo: u32,
        hi: u32,
    ) -> Result<u32, InputError> {
        match self {
            GameRng::Plain(rng) => rng.choose_from_range(prompt, lo, hi).await,
            GameRng::Controlled(rng) => rng.choose_from_range(prompt, lo, hi).await,
        }
    }

    async fn choose_from_list(
        &self,
        prompt: &Prompt,
        options: &[Choice],
    ) -> Result<usize, InputError> {
        match self {
            GameRng::Plain(rng) => rng.choose_from_list(prompt, options).await,
            GameRng::Controlled(rng) => rng.choose_from_list(prompt, options).await,
        }
    }
}
