//! Action resolution errors.
//!
//! Every rejected action reports one of these values; the game that was asked
//! to act is left exactly as it was.

use crate::error::{ErrorSeverity, GameError};
use crate::input::InputError;
use crate::state::{Artifact, Skill, StateError};
use crate::world::GridError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Target is not adjacent, off the map, or outside movement range.
    #[error("target is out of reach")]
    Unreachable,

    /// Target hex already holds an object.
    #[error("target hex is occupied")]
    Occupied,

    #[error("cannot pay the cost")]
    InsufficientResources,

    #[error("requires the {0} skill")]
    MissingSkill(Skill),

    #[error("requires the {0} artifact")]
    MissingArtifact(Artifact),

    /// No valid sub-action exists: nothing to reveal, purchase, or generate.
    #[error("nothing to do here")]
    NothingToDo,

    /// A set the controller must choose from came out empty.
    #[error("no candidates to choose from")]
    NoCandidates,

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Input(InputError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl From<InputError> for ActionError {
    fn from(error: InputError) -> Self {
        match error {
            InputError::EmptyChoice => ActionError::NoCandidates,
            other => ActionError::Input(other),
        }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Unreachable
            | Self::Occupied
            | Self::InsufficientResources
            | Self::MissingSkill(_)
            | Self::MissingArtifact(_)
            | Self::NothingToDo
            | Self::NoCandidates => ErrorSeverity::Recoverable,
            Self::Grid(error) => error.severity(),
            Self::Input(error) => error.severity(),
            Self::State(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unreachable => "action_unreachable",
            Self::Occupied => "action_occupied",
            Self::InsufficientResources => "action_insufficient_resources",
            Self::MissingSkill(_) => "action_missing_skill",
            Self::MissingArtifact(_) => "action_missing_artifact",
            Self::NothingToDo => "action_nothing_to_do",
            Self::NoCandidates => "action_no_candidates",
            Self::Grid(error) => error.error_code(),
            Self::Input(error) => error.error_code(),
            Self::State(error) => error.error_code(),
        }
    }
}
