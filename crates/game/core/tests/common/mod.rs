#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hexalchemy_core::{
    BootstrappedGame, Character, GameState, Input, InputError, Output, Position, Prng, Prompt,
    Shown, world::default_template,
};

pub const SEED: u64 = 0x5eed;
pub const START: Position = Position::new(-5, 0);

/// Answers from a queue, then the lowest valid value. Logs everything.
#[derive(Default)]
pub struct ScriptedPlayer {
    answers: Mutex<VecDeque<u32>>,
    pub answered: Mutex<Vec<(Prompt, u32)>>,
    pub shown: Mutex<Vec<(Prompt, Shown)>>,
}

impl ScriptedPlayer {
    pub fn new(answers: impl IntoIterator<Item = u32>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        })
    }

    pub fn keys(&self) -> Vec<String> {
        self.answered
            .lock()
            .unwrap()
            .iter()
            .map(|(prompt, _)| prompt.key.to_string())
            .collect()
    }

    /// Key → answer map suitable for `RecordedInput`.
    pub fn recording(&self) -> BTreeMap<String, u32> {
        self.answered
            .lock()
            .unwrap()
            .iter()
            .map(|(prompt, answer)| (prompt.key.to_string(), *answer))
            .collect()
    }
}

#[async_trait]
impl Input for ScriptedPlayer {
    async fn choose_from_range(
        &self,
        prompt: &Prompt,
        lo: u32,
        hi: u32,
    ) -> Result<u32, InputError> {
        let answer = self.answers.lock().unwrap().pop_front().unwrap_or(lo);
        let answer = hexalchemy_core::input::check_range(answer, lo, hi)?;
        self.answered.lock().unwrap().push((prompt.clone(), answer));
        Ok(answer)
    }
}

impl Output for ScriptedPlayer {
    fn show(&self, prompt: &Prompt, value: &Shown) {
        self.shown.lock().unwrap().push((prompt.clone(), value.clone()));
    }
}

/// Walks through options with a fixed stride so long runs touch many rules.
#[derive(Default)]
pub struct StridePlayer {
    counter: AtomicU32,
}

#[async_trait]
impl Input for StridePlayer {
    async fn choose_from_range(
        &self,
        _prompt: &Prompt,
        lo: u32,
        hi: u32,
    ) -> Result<u32, InputError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let span = u64::from(hi - lo) + 1;
        Ok(lo + (u64::from(n) * 7 % span) as u32)
    }
}

impl Output for StridePlayer {
    fn show(&self, _prompt: &Prompt, _value: &Shown) {}
}

/// Fallback that refuses every prompt, proving a replay never reaches it.
pub struct Unreachable;

#[async_trait]
impl Input for Unreachable {
    async fn choose_from_range(
        &self,
        prompt: &Prompt,
        _lo: u32,
        _hi: u32,
    ) -> Result<u32, InputError> {
        Err(InputError::Cancelled {
            key: prompt.key.clone(),
        })
    }
}

impl Output for Unreachable {
    fn show(&self, _prompt: &Prompt, _value: &Shown) {}
}

/// A game at prompt 1 with the character placed on `pos`.
pub fn game_at(
    pos: Position,
    character: Character,
    player: Arc<dyn hexalchemy_core::Player>,
) -> BootstrappedGame {
    let mut state = GameState::initial(&default_template(), START).expect("start hex is valid");
    state.char_pos = pos;
    state.character = character;
    BootstrappedGame::resume(state, Arc::new(Prng::new(SEED)), player, 1)
}
