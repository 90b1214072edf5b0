//! Common error infrastructure for hexalchemy-core.
//!
//! Domain-specific errors (`ActionError`, `InputError`, `GridError`) live next
//! to the code that produces them. This module provides the shared severity
//! classification and the [`GameError`] trait they all implement.

use crate::world::Position;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the player may pick another action and carry on
/// - **Validation**: malformed input that must not be retried unchanged
/// - **Internal**: a state invariant was found broken after a transition
/// - **Fatal**: a programmer error or an abandoned prompt; the loop must stop
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if the game loop cannot continue after this error.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Contextual information attached to action failures.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Prompt number the failed action was resolved under.
    pub prompt_number: u64,

    /// Hex the action targeted (if applicable).
    pub position: Option<Position>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(prompt_number: u64) -> Self {
        Self {
            prompt_number,
            position: None,
        }
    }

    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Common trait for all hexalchemy-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable snake_case `error_code` for logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
