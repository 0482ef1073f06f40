//! Repository layer for live matches.
//!
//! Repositories hold the data that CHANGES while a match runs: the full
//! `MatchState` plus its version and last tick time. Static tuning lives in
//! `MatchConfig`, not here.

mod error;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryMatchRepo;
pub use traits::{MatchRepository, StoredMatch};
