//! Data-driven content definitions and loaders.
//!
//! This crate houses static match content and provides loaders for TOML data
//! files:
//! - Match tuning (`MatchConfig`, data-driven via TOML)
//! - Opponent styles (named `OpponentTuning` presets)
//!
//! Content is consumed by the runtime and the CLI and never appears in match
//! state beyond the values it configures.

pub mod styles;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use styles::StyleRegistry;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, StyleLoader};
