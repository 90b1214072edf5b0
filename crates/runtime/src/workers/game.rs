//! Game worker that owns one running game.
//!
//! The worker drives [`BootstrappedGame::step`] until the game can no longer
//! continue, committing a [`Snapshot`] after every accepted action and
//! reporting every outcome on the event bus. Aborting the task that runs it
//! drops the outstanding question, which is how a game is cancelled.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task;
use tracing::{debug, error, info, warn};

use hexalchemy_core::{
    ActionError, BootstrappedGame, ErrorSeverity, GameError, Player, Prng, StepOutcome,
};

use crate::api::Result;
use crate::events::{EventBus, GameStateEvent};
use crate::players::{History, RecordingPlayer};
use crate::repository::Snapshot;
use crate::utils::hash::{short, state_digest};

/// How a game begins.
#[derive(Debug, Clone)]
pub enum GameSetup {
    /// Fresh game: the controller answers the start-up questions first.
    New { seed: u64 },
    /// Continue from a committed snapshot.
    Resume(Box<Snapshot>),
}

pub struct GameWorker {
    events: EventBus,
    snapshots: Arc<watch::Sender<Option<Snapshot>>>,
}

impl GameWorker {
    pub fn new(events: EventBus, snapshots: Arc<watch::Sender<Option<Snapshot>>>) -> Self {
        Self { events, snapshots }
    }

    /// Runs the game to its end.
    ///
    /// Returns `Ok` when the game ends on its own (no action is possible) and
    /// the stopping error otherwise.
    pub async fn run(self, setup: GameSetup, player: Arc<dyn Player>) -> Result<()> {
        let (game, history, resumed) = match setup {
            GameSetup::New { seed } => {
                let history = History::default();
                let recorder = Arc::new(RecordingPlayer::new(player, history.clone()));
                info!(target: "runtime::worker", seed, "starting new game");
                match BootstrappedGame::create_initial(Arc::new(Prng::new(seed)), recorder).await {
                    Ok(game) => (game, history, false),
                    Err(error) => {
                        self.end(0, &error);
                        return Err(error.into());
                    }
                }
            }
            GameSetup::Resume(snapshot) => {
                let history = History::new(snapshot.history.clone());
                let recorder = Arc::new(RecordingPlayer::new(player, history.clone()));
                info!(
                    target: "runtime::worker",
                    seed = snapshot.seed(),
                    prompt_number = snapshot.prompt_number,
                    "resuming game"
                );
                (snapshot.restore(recorder), history, true)
            }
        };

        let digest = self.commit(&game, &history)?;
        self.events.publish(GameStateEvent::GameStarted {
            seed: game.prng().seed(),
            resumed,
            prompt_number: game.prompt_number,
            digest,
        });

        self.game_loop(game, history).await
    }

    /// Retries at the same prompt yield first, so an abort always lands.
    async fn game_loop(&self, mut game: BootstrappedGame, history: History) -> Result<()> {
        loop {
            match game.step().await {
                Ok(StepOutcome::Advanced { action, game: next }) => {
                    game = next;
                    let digest = self.commit(&game, &history)?;
                    debug!(
                        target: "runtime::worker",
                        prompt_number = game.prompt_number,
                        action = ?action,
                        turn = game.state.turn_number,
                        digest = short(&digest),
                        "action executed"
                    );
                    self.events.publish(GameStateEvent::ActionExecuted {
                        action,
                        prompt_number: game.prompt_number,
                        turn_number: game.state.turn_number,
                        digest,
                    });
                }

                Ok(StepOutcome::Rejected {
                    action,
                    error,
                    context,
                }) => {
                    let phase = error.phase();
                    let code = error.error_code();
                    let message = error.action_error().to_string();

                    match error.severity() {
                        ErrorSeverity::Fatal => {
                            let error = error.into_action_error();
                            self.end(context.prompt_number, &error);
                            return Err(error.into());
                        }
                        ErrorSeverity::Recoverable | ErrorSeverity::Validation => debug!(
                            target: "runtime::worker",
                            prompt_number = context.prompt_number,
                            action = ?action,
                            phase = phase.as_str(),
                            code,
                            error = %message,
                            "action rejected"
                        ),
                        ErrorSeverity::Internal => error!(
                            target: "runtime::worker",
                            prompt_number = context.prompt_number,
                            action = ?action,
                            phase = phase.as_str(),
                            code,
                            error = %message,
                            "action broke a state invariant"
                        ),
                    }

                    self.events.publish(GameStateEvent::ActionFailed {
                        action,
                        phase,
                        error: message,
                        code: code.to_owned(),
                        context,
                    });
                    task::yield_now().await;
                }

                // The answer to chooseAction itself was unusable; ask again.
                Err(error) if error.severity() == ErrorSeverity::Validation => {
                    warn!(
                        target: "runtime::worker",
                        prompt_number = game.prompt_number,
                        code = error.error_code(),
                        error = %error,
                        "invalid action choice"
                    );
                    task::yield_now().await;
                }

                Err(error) => {
                    self.end(game.prompt_number, &error);
                    return if error == ActionError::NoCandidates {
                        Ok(())
                    } else {
                        Err(error.into())
                    };
                }
            }
        }
    }

    /// Publishes the game as a snapshot and returns its state digest.
    fn commit(&self, game: &BootstrappedGame, history: &History) -> Result<String> {
        let snapshot = Snapshot::capture(game, history.entries());
        let digest = state_digest(&snapshot.state)?;
        self.snapshots.send_replace(Some(snapshot));
        Ok(digest)
    }

    fn end(&self, prompt_number: u64, error: &ActionError) {
        if error.severity().is_fatal() {
            warn!(
                target: "runtime::worker",
                prompt_number,
                code = error.error_code(),
                error = %error,
                "game stopped"
            );
        } else {
            info!(
                target: "runtime::worker",
                prompt_number,
                code = error.error_code(),
                "game over: {}",
                error
            );
        }
        self.events.publish(GameStateEvent::GameEnded {
            prompt_number,
            reason: error.to_string(),
            code: Some(error.error_code().to_owned()),
        });
    }
}
