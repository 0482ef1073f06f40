//! Combat resolution.
//!
//! Pure functions and a resolver that turn one pair of chosen actions into
//! per-fighter outcomes. Nothing here mutates match state; the engine applies
//! a [`Resolution`] afterwards.
//!
//! - `damage`: strike damage, block scaling, flash-knockdown threshold
//! - `resolver`: simultaneous resolution of an action pair

pub mod damage;
pub mod resolver;

pub use damage::{Defense, flash_threshold, is_flash_knockdown, strike_damage};
pub use resolver::{ActionResolver, FighterOutcome, Resolution};
