//! Persistence boundary: snapshots of a running game and where they live.

mod error;
mod file;
mod snapshot;

pub use error::RepositoryError;
pub use file::FileSnapshotRepository;
pub use snapshot::{HistoryEntry, Snapshot};
