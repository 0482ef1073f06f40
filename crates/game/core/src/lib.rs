//! Deterministic round-based combat match simulation.
//!
//! `bout-core` defines the canonical rules (fighters, actions, knockdowns,
//! scoring, the match state machine) as pure APIs shared by the runtime and
//! offline tools. It performs no I/O, keeps no global state and draws every
//! random number from an injected [`RngOracle`].
//!
//! All state mutation flows through [`MatchEngine::tick`]:
//!
//! ```text
//! new_match ─▶ MatchState ─▶ submit_action ─▶ PendingAction
//!                  │                               │
//!                  └──────────▶ tick ◀─────────────┘
//!                                │
//!                      (MatchState, Vec<MatchEvent>)
//! ```
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod opponent;
pub mod snapshot;
pub mod state;

pub use action::{ActionClass, ActionType, PendingAction, submit_action};
pub use combat::{ActionResolver, Defense, FighterOutcome, Resolution};
pub use config::{MatchConfig, OpponentTuning};
pub use engine::{
    KnockdownResolver, MatchEngine, RoundJudge, TickOutcome, new_match, start_round,
};
pub use env::{
    ActionProfile, ActionTable, MatchEnv, PcgRng, RngOracle, RollContext, compute_seed,
};
pub use error::{BoutError, ErrorSeverity, MatchError};
pub use event::MatchEvent;
pub use opponent::{OpponentController, Tactic};
pub use snapshot::{
    FighterSnapshot, KnockdownSnapshot, MatchSnapshot, deserialize_state, serialize_state,
};
pub use state::{
    Combatant, FighterId, Finish, KnockdownInfo, MatchId, MatchState, MatchStatus, Winner,
};
