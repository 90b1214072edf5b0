//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or persistence.

pub mod errors;
pub mod handle;
pub mod prompts;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use prompts::{PendingPrompt, PromptRequest};
