//! Read-only inputs the engine consults on every tick.
//!
//! [`MatchEnv`] bundles the tuning table and the injected randomness source so
//! the engine never depends on concrete implementations or ambient state.
mod rng;
mod tables;

pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
pub use tables::{ActionProfile, ActionTable};

use crate::config::MatchConfig;

/// Configuration plus randomness for one engine invocation.
#[derive(Clone, Copy)]
pub struct MatchEnv<'a> {
    pub config: &'a MatchConfig,
    pub rng: &'a dyn RngOracle,
}

impl<'a> MatchEnv<'a> {
    pub fn new(config: &'a MatchConfig, rng: &'a dyn RngOracle) -> Self {
        Self { config, rng }
    }
}

impl core::fmt::Debug for MatchEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MatchEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
