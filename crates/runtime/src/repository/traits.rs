//! Repository contract for persisting live matches.

use std::time::Duration;

use bout_core::{MatchId, MatchState};

use super::Result;

/// A stored match together with its bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredMatch {
    pub state: MatchState,
    /// Bumped on every successful save. A match that was never saved is at 0.
    pub version: u64,
    /// Clock reading of the last tick (or of creation).
    pub last_tick_at: Duration,
}

/// Repository for live match state.
///
/// Saves are optimistic: the caller names the version it read, and the save
/// fails with [`VersionConflict`](super::RepositoryError::VersionConflict)
/// when someone else saved in between.
pub trait MatchRepository: Send + Sync {
    /// Load a match by id.
    fn load(&self, id: MatchId) -> Result<Option<StoredMatch>>;

    /// Store `state` if the current version equals `expected_version`.
    ///
    /// Returns the new version. Use `expected_version = 0` to insert.
    fn save(&self, state: &MatchState, last_tick_at: Duration, expected_version: u64)
    -> Result<u64>;

    /// Delete a match.
    fn delete(&self, id: MatchId) -> Result<()>;

    /// Ids of every stored match, ascending.
    fn list(&self) -> Result<Vec<MatchId>>;

    /// Check if a match is stored.
    fn exists(&self, id: MatchId) -> bool {
        matches!(self.load(id), Ok(Some(_)))
    }
}
