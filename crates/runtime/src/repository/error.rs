//! Error types raised by repository implementations.

use bout_core::MatchId;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("match repository lock was poisoned")]
    LockPoisoned,

    #[error("match {match_id} was modified concurrently: expected version {expected}, found {found}")]
    VersionConflict {
        match_id: MatchId,
        expected: u64,
        found: u64,
    },

    #[error("match {0} is not stored")]
    NotFound(MatchId),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
