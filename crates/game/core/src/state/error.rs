//! State construction and consistency errors.

use crate::error::{ErrorSeverity, GameError};
use crate::world::Position;

/// A state that must never exist: either rejected at construction or detected
/// after a transition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("hex {position} is not a start hex")]
    InvalidStart { position: Position },

    #[error("inventory exceeds storage capacity {capacity}")]
    CapacityExceeded { capacity: u32 },

    #[error("recipe {index} collected more than it needs")]
    RecipeOvercollected { index: usize },

    #[error("character stands on {position}, which is off the map")]
    CharacterOffMap { position: Position },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidStart { .. } => ErrorSeverity::Validation,
            Self::CapacityExceeded { .. }
            | Self::RecipeOvercollected { .. }
            | Self::CharacterOffMap { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidStart { .. } => "state_invalid_start",
            Self::CapacityExceeded { .. } => "state_capacity_exceeded",
            Self::RecipeOvercollected { .. } => "state_recipe_overcollected",
            Self::CharacterOffMap { .. } => "state_character_off_map",
        }
    }
}
