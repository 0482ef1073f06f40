//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule failures from the core and storage failures from repositories
//! so clients can bubble them up with consistent context.

use bout_core::{MatchError, MatchId};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("match {0} not found")]
    MatchNotFound(MatchId),
}

impl RuntimeError {
    /// True when retrying the same request against fresh state may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RuntimeError::Repository(RepositoryError::VersionConflict { .. })
        )
    }
}
