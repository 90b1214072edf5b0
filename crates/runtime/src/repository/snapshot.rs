//! Value snapshot of a game between two actions.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hexalchemy_core::{BootstrappedGame, GameState, Player, Prng, PrngState, Prompt, Shown};

use super::error::{RepositoryError, Result};
use crate::utils::hash::state_digest;

/// One exchange with the controller, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEntry {
    Answered { prompt: Prompt, answer: u32 },
    Shown { prompt: Prompt, value: Shown },
}

impl HistoryEntry {
    pub fn prompt(&self) -> &Prompt {
        match self {
            HistoryEntry::Answered { prompt, .. } | HistoryEntry::Shown { prompt, .. } => prompt,
        }
    }
}

/// Everything needed to continue a game: state, RNG, prompt counter and the
/// controller history that led there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub rng: PrngState,
    pub prompt_number: u64,
    pub history: Vec<HistoryEntry>,
}

impl Snapshot {
    pub fn capture(game: &BootstrappedGame, history: Vec<HistoryEntry>) -> Self {
        Self {
            state: game.state.clone(),
            rng: game.prng().state(),
            prompt_number: game.prompt_number,
            history,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed
    }

    /// Rebuilds the game with `player` as its controller.
    pub fn restore(&self, player: Arc<dyn Player>) -> BootstrappedGame {
        BootstrappedGame::resume(
            self.state.clone(),
            Arc::new(Prng::from_state(self.rng.clone())),
            player,
            self.prompt_number,
        )
    }

    /// Key to answer map of every recorded answer.
    ///
    /// A key answered more than once (an action that was rejected and asked
    /// again) keeps its latest answer.
    pub fn recording(&self) -> BTreeMap<String, u32> {
        self.history
            .iter()
            .filter_map(|entry| match entry {
                HistoryEntry::Answered { prompt, answer } => {
                    Some((prompt.key.to_string(), *answer))
                }
                HistoryEntry::Shown { .. } => None,
            })
            .collect()
    }

    /// Hex SHA-256 of the bincode-encoded state.
    pub fn digest(&self) -> Result<String> {
        state_digest(&self.state)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RepositoryError::Json(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RepositoryError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexalchemy_core::{PromptKey, QuestionContext, ShowContext, world::default_template};

    const START: hexalchemy_core::Position = hexalchemy_core::Position::new(-5, 0);

    fn snapshot() -> Snapshot {
        let state = GameState::initial(&default_template(), START).unwrap();
        let ask = |n| Prompt::question(QuestionContext::ChooseAction, PromptKey::root(n));
        Snapshot {
            state: state.clone(),
            rng: PrngState {
                seed: 42,
                history: [("[1,0]".to_string(), 3)].into_iter().collect(),
            },
            prompt_number: 3,
            history: vec![
                HistoryEntry::Shown {
                    prompt: Prompt::show(ShowContext::GameState, PromptKey::root(1)),
                    value: Shown::GameState(Box::new(state)),
                },
                HistoryEntry::Answered {
                    prompt: ask(1),
                    answer: 4,
                },
                HistoryEntry::Answered {
                    prompt: ask(1),
                    answer: 2,
                },
            ],
        }
    }

    #[test]
    fn bincode_round_trip_preserves_everything() {
        let snapshot = snapshot();
        let bytes = snapshot.encode().unwrap();
        assert_eq!(Snapshot::decode(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn json_export_reads_back() {
        let snapshot = snapshot();
        let json = snapshot.to_json().unwrap();
        assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn recording_keeps_the_latest_answer_per_key() {
        let recording = snapshot().recording();
        assert_eq!(recording.len(), 1);
        assert_eq!(recording["1"], 2);
    }

    #[test]
    fn garbage_does_not_decode() {
        assert!(matches!(
            Snapshot::decode(&[1, 2, 3]),
            Err(RepositoryError::Serialization(_))
        ));
    }

    #[test]
    fn restore_keeps_seed_and_counter() {
        let snapshot = snapshot();
        let game = snapshot.restore(Arc::new(NullPlayer));
        assert_eq!(game.prompt_number, 3);
        assert_eq!(game.prng().seed(), 42);
        assert_eq!(game.state, snapshot.state);
    }

    struct NullPlayer;

    #[async_trait::async_trait]
    impl hexalchemy_core::Input for NullPlayer {
        async fn choose_from_range(
            &self,
            _prompt: &Prompt,
            lo: u32,
            _hi: u32,
        ) -> std::result::Result<u32, hexalchemy_core::InputError> {
            Ok(lo)
        }
    }

    impl hexalchemy_core::Output for NullPlayer {
        fn show(&self, _prompt: &Prompt, _value: &Shown) {}
    }
}
