//! Deterministic state digests for logs and replay checks.

use sha2::{Digest, Sha256};

use hexalchemy_core::GameState;

use crate::repository::RepositoryError;

/// Hex SHA-256 of the bincode encoding of `state`.
///
/// Equal states always give equal digests, so two runs can be compared
/// without keeping every state around.
pub fn state_digest(state: &GameState) -> Result<String, RepositoryError> {
    let bytes =
        bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// First 16 hex characters of a digest, for compact logging.
pub fn short(digest: &str) -> &str {
    digest.get(..16).unwrap_or(digest)
}
