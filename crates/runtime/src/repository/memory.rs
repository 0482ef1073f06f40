//! In-memory MatchRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use bout_core::{MatchId, MatchState};

use crate::repository::{MatchRepository, RepositoryError, Result, StoredMatch};

/// In-memory implementation of MatchRepository.
pub struct InMemoryMatchRepo {
    matches: RwLock<HashMap<MatchId, StoredMatch>>,
}

impl InMemoryMatchRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            matches: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryMatchRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchRepository for InMemoryMatchRepo {
    fn load(&self, id: MatchId) -> Result<Option<StoredMatch>> {
        let matches = self
            .matches
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(matches.get(&id).cloned())
    }

    fn save(
        &self,
        state: &MatchState,
        last_tick_at: Duration,
        expected_version: u64,
    ) -> Result<u64> {
        let mut matches = self
            .matches
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let found = matches.get(&state.id).map_or(0, |stored| stored.version);
        if found != expected_version {
            return Err(RepositoryError::VersionConflict {
                match_id: state.id,
                expected: expected_version,
                found,
            });
        }

        let version = found + 1;
        matches.insert(
            state.id,
            StoredMatch {
                state: state.clone(),
                version,
                last_tick_at,
            },
        );
        Ok(version)
    }

    fn delete(&self, id: MatchId) -> Result<()> {
        let mut matches = self
            .matches
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        matches
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }

    fn list(&self) -> Result<Vec<MatchId>> {
        let matches = self
            .matches
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<MatchId> = matches.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
