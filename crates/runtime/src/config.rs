//! Runtime configuration and environment loading.
use std::env;

/// Configuration for a [`MatchService`](crate::MatchService).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Rounds per match.
    pub max_rounds: u32,
    /// Event-log lines returned with each view.
    pub event_window: usize,
    /// Base seed. Each match mixes in its id. `None` draws one from the
    /// system clock at service start.
    pub seed: Option<u64>,
    /// Per-topic capacity of the event bus.
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            event_window: 10,
            seed: None,
            event_buffer_size: 100,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BOUT_MAX_ROUNDS` - Rounds per match (default: 3)
    /// - `BOUT_EVENT_WINDOW` - Event-log lines per view (default: 10)
    /// - `BOUT_SEED` - Base seed for reproducible matches (default: random)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(rounds) = read_env::<u32>("BOUT_MAX_ROUNDS") {
            config.max_rounds = rounds;
        }

        if let Some(window) = read_env::<usize>("BOUT_EVENT_WINDOW") {
            config.event_window = window.max(1);
        }

        config.seed = read_env::<u64>("BOUT_SEED");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
