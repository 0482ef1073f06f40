//! Runtime orchestration around the deterministic match core.
//!
//! This crate supplies what the pure core leaves to its caller: a monotonic
//! clock for elapsed time, storage with optimistic versioning, a service that
//! serialises ticks per match, and topic-based event distribution.
//!
//! Modules are organized by responsibility:
//! - [`service`] hosts [`MatchService`], the single entry point for clients
//! - [`clock`] provides wall-clock and manually driven time sources
//! - [`events`] provides the topic-based event bus
//! - [`repository`] stores live matches
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod repository;
pub mod service;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{EventBus, MatchUpdate, Topic};
pub use repository::{InMemoryMatchRepo, MatchRepository, RepositoryError, StoredMatch};
pub use service::{MatchService, MatchView};
