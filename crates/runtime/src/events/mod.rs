//! Topic-based distribution of match events.
//!
//! The core returns typed [`MatchEvent`](bout_core::MatchEvent)s from every
//! tick; the service wraps them in [`MatchUpdate`]s and publishes them here.

mod bus;

pub use bus::{EventBus, MatchUpdate, Topic};
