//! Worker tasks that back the runtime orchestration.
//!
//! One game worker runs per started game; the runtime replaces it when a new
//! game begins.

mod game;

pub use game::{GameSetup, GameWorker};
