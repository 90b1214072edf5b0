//! Controllers the runtime can plug into a game.
//!
//! - [`ChannelPlayer`] forwards questions to a client over channels
//! - [`RecordingPlayer`] wraps any controller and keeps the history a
//!   snapshot needs
//! - [`ScriptedPlayer`] answers from a fixed list, for bots and tests

mod channel;
mod recording;
mod scripted;

pub use channel::ChannelPlayer;
pub use recording::{History, RecordingPlayer};
pub use scripted::ScriptedPlayer;
