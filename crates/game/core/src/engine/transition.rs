//! Action transition dispatch and execution logic.

use crate::action::{ActionError, ActionTransition, GameAction, InteractAction, MoveAction};
use crate::state::GameState;

use super::BootstrappedGame;
use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Runs a transition through the three-phase pipeline and returns the
/// successor state.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions on the current game
/// 2. `apply` - Build the successor state, prompting as needed
/// 3. `post_validate` - Verify invariants on the successor
async fn drive_transition<T>(
    transition: &T,
    game: &BootstrappedGame,
) -> Result<GameState, TransitionPhaseError<ActionError>>
where
    T: ActionTransition + ?Sized,
{
    transition
        .pre_validate(game)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let next = transition
        .apply(game)
        .await
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(&next)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(next)
}

/// Routes an action to its transition. Used by [`BootstrappedGame::execute`].
pub(super) async fn execute_transition(
    action: GameAction,
    game: &BootstrappedGame,
) -> Result<GameState, ExecuteError> {
    match action {
        GameAction::Move(target) => drive_transition(&MoveAction::new(target), game)
            .await
            .map_err(ExecuteError::Move),
        GameAction::Interact(target) => drive_transition(&InteractAction::new(target), game)
            .await
            .map_err(ExecuteError::Interact),
    }
}
