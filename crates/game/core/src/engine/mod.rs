//! Game loop and action execution pipeline.
//!
//! A [`BootstrappedGame`] bundles the authoritative [`GameState`] with the
//! RNG core, the controller, and the monotonic prompt counter. Every state
//! change flows through [`BootstrappedGame::execute`], which runs the
//! three-phase transition pipeline and hands back a new game; the game it was
//! called on is never modified.
//!
//! Prompt numbering: the `chooseAction` question of a step is keyed `N`, the
//! chosen action resolves under `N + 1` with sub-keys `[N + 1, i]`, and a
//! successful step leaves the game at `N + 2`. A rejected action leaves the
//! game at `N`, so retrying re-asks under the same key.

mod errors;
mod rng;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use rng::GameRng;

use std::fmt;
use std::sync::Arc;

use crate::action::{ActionError, GameAction, Interaction, traversable};
use crate::config::GameConfig;
use crate::error::ErrorContext;
use crate::input::{
    Player, Prng, Prompt, PromptKey, QuestionContext, RerollInput, ShowContext, Shown, choose,
};
use crate::state::{AlchemicalResource, Artifact, GameState};
use crate::world::{
    Position, TemplateTile, World, WorldObject, default_template,
    list_cells_can_reach_and_end_turn_there,
};

/// Hands out `[n, 0]`, `[n, 1]`, ... for actions that prompt an open-ended
/// number of times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubKeys {
    prompt_number: u64,
    next: u32,
}

impl SubKeys {
    pub fn next_key(&mut self) -> PromptKey {
        let key = PromptKey::pair(self.prompt_number, self.next);
        self.next += 1;
        key
    }
}

/// Result of one pass through the game loop.
#[derive(Clone, Debug)]
pub enum StepOutcome {
    /// The action resolved; the contained game is the successor.
    Advanced {
        action: GameAction,
        game: BootstrappedGame,
    },
    /// The action was rejected and the game is unchanged.
    Rejected {
        action: GameAction,
        error: ExecuteError,
        context: ErrorContext,
    },
}

impl StepOutcome {
    pub fn action(&self) -> GameAction {
        match self {
            StepOutcome::Advanced { action, .. } | StepOutcome::Rejected { action, .. } => *action,
        }
    }
}

/// A running game: state, RNG core, controller, and prompt counter.
#[derive(Clone)]
pub struct BootstrappedGame {
    pub state: GameState,
    pub prompt_number: u64,
    rng: Arc<Prng>,
    player: Arc<dyn Player>,
}

impl fmt::Debug for BootstrappedGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrappedGame")
            .field("prompt_number", &self.prompt_number)
            .field("seed", &self.rng.seed())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Building placed during start-up, with the template tile it goes on.
const START_BUILDINGS: [(QuestionContext, TemplateTile, AlchemicalResource); 3] = [
    (
        QuestionContext::HoneyBuilding,
        TemplateTile::Mountain,
        AlchemicalResource::Honey,
    ),
    (
        QuestionContext::WaterlilyBuilding,
        TemplateTile::Lake,
        AlchemicalResource::Waterlily,
    ),
    (
        QuestionContext::MushroomBuilding,
        TemplateTile::Forest,
        AlchemicalResource::Mushroom,
    ),
];

fn template_positions(template: &World<TemplateTile>, tile: TemplateTile) -> Vec<Position> {
    template
        .list_hexes()
        .filter(|(_, t)| **t == tile)
        .map(|(pos, _)| pos)
        .collect()
}

impl BootstrappedGame {
    /// Starts a new game on the default map.
    ///
    /// The controller picks the start hex under `[0,0]`, then places the
    /// Honey, Waterlily, and Mushroom buildings under `[0,1]` to `[0,3]`.
    pub async fn create_initial(
        rng: Arc<Prng>,
        player: Arc<dyn Player>,
    ) -> Result<Self, ActionError> {
        let template = default_template();

        let starts = template_positions(&template, TemplateTile::Start);
        let start = choose(
            player.as_ref(),
            &Prompt::question(QuestionContext::StartPosition, PromptKey::pair(0, 0)),
            &starts,
        )
        .await?;
        let mut state = GameState::initial(&template, start)?;

        for (sub, (context, tile, produces)) in (1..).zip(START_BUILDINGS) {
            let sites = template_positions(&template, tile);
            let site = choose(
                player.as_ref(),
                &Prompt::question(context, PromptKey::pair(0, sub)),
                &sites,
            )
            .await?;
            let cell = state
                .cell(site)
                .ok_or(ActionError::Unreachable)?
                .clone()
                .with_object(WorldObject::ProductionBuilding { produces });
            state.world.set(site, cell)?;
        }

        Ok(Self::resume(
            state,
            rng,
            player,
            GameConfig::FIRST_PROMPT_NUMBER,
        ))
    }

    /// Continues a game from a saved state.
    pub fn resume(
        state: GameState,
        rng: Arc<Prng>,
        player: Arc<dyn Player>,
        prompt_number: u64,
    ) -> Self {
        Self {
            state,
            prompt_number,
            rng,
            player,
        }
    }

    pub fn player(&self) -> &dyn Player {
        self.player.as_ref()
    }

    pub fn prng(&self) -> &Arc<Prng> {
        &self.rng
    }

    /// RNG for the current action, wrapped for rerolls while the Golden Die
    /// is held.
    pub fn rng(&self) -> GameRng<'_> {
        if self.state.character.has_artifact(Artifact::GoldenDie) {
            GameRng::Controlled(RerollInput::new(self.rng.as_ref(), self.player.as_ref()))
        } else {
            GameRng::Plain(self.rng.as_ref())
        }
    }

    /// Key of the `sub`-th prompt of the action resolving now.
    pub fn key(&self, sub: u32) -> PromptKey {
        PromptKey::pair(self.prompt_number, sub)
    }

    pub fn sub_keys(&self) -> SubKeys {
        SubKeys {
            prompt_number: self.prompt_number,
            next: 0,
        }
    }

    #[must_use]
    pub fn with_state(&self, state: GameState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_player(&self, player: Arc<dyn Player>) -> Self {
        Self {
            player,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn advance_prompt_number(&self) -> Self {
        Self {
            prompt_number: self.prompt_number + 1,
            ..self.clone()
        }
    }

    /// Moves within reach followed by interactions with adjacent hexes.
    ///
    /// Interactions are listed when the hex holds something to interact with;
    /// whether the character can afford it is decided on execution.
    pub fn possible_actions(&self) -> Result<Vec<GameAction>, ActionError> {
        let state = &self.state;
        let moves = list_cells_can_reach_and_end_turn_there(
            &state.world,
            state.char_pos,
            state.character.movement_speed(),
            traversable(&state.character),
        )?
        .into_iter()
        .filter(|(pos, _)| *pos != state.char_pos)
        .map(|(pos, _)| GameAction::Move(pos));

        let interactions = state
            .world
            .get_adjacents(state.char_pos)
            .into_iter()
            .filter(|(pos, _)| Interaction::resolve(state, *pos).is_ok())
            .map(|(pos, _)| GameAction::Interact(pos));

        Ok(moves.chain(interactions).collect())
    }

    /// Resolves `action` under the current prompt number.
    ///
    /// On success the returned game carries the successor state and the next
    /// prompt number; on failure `self` is untouched.
    pub async fn execute(&self, action: GameAction) -> Result<BootstrappedGame, ExecuteError> {
        let state = transition::execute_transition(action, self).await?;
        Ok(self.with_state(state).advance_prompt_number())
    }

    /// [`Self::execute`] with the phase information dropped.
    pub async fn take_action(&self, action: GameAction) -> Result<BootstrappedGame, ActionError> {
        self.execute(action)
            .await
            .map_err(ExecuteError::into_action_error)
    }

    /// One pass of the loop: show the state, ask for an action, resolve it.
    ///
    /// Errors from the `chooseAction` question itself are returned as is;
    /// a rejected action is reported in [`StepOutcome::Rejected`].
    pub async fn step(&self) -> Result<StepOutcome, ActionError> {
        let key = PromptKey::root(self.prompt_number);
        self.player.show(
            &Prompt::show(ShowContext::GameState, key.clone()),
            &Shown::GameState(Box::new(self.state.clone())),
        );

        let actions = self.possible_actions()?;
        let action = choose(
            self.player(),
            &Prompt::question(QuestionContext::ChooseAction, key),
            &actions,
        )
        .await?;

        match self.advance_prompt_number().execute(action).await {
            Ok(game) => Ok(StepOutcome::Advanced { action, game }),
            Err(error) => Ok(StepOutcome::Rejected {
                action,
                error,
                context: ErrorContext::new(self.prompt_number + 1)
                    .with_position(action.target()),
            }),
        }
    }
}
