//! Typed events emitted by a tick.
//!
//! The engine returns these next to the successor state and appends their
//! [`Display`](core::fmt::Display) form to the match event log. Downstream
//! crates log or broadcast the typed values; the core itself never logs.

use core::fmt;

use crate::action::ActionType;
use crate::combat::Defense;
use crate::state::{FighterId, Finish, MatchStatus, Winner};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchEvent {
    /// A fighter could not pay for the requested action and rested instead.
    Fatigued {
        fighter: FighterId,
        requested: ActionType,
    },
    /// A pending action arrived while no exchange was possible.
    ActionIgnored {
        action: ActionType,
        status: MatchStatus,
    },
    HitLanded {
        attacker: FighterId,
        action: ActionType,
        damage: u32,
        defense: Defense,
    },
    Dodged {
        defender: FighterId,
        action: ActionType,
    },
    KnockedDown {
        fighter: FighterId,
        health: u32,
    },
    Recovered {
        fighter: FighterId,
        count: f64,
    },
    CountedOut {
        fighter: FighterId,
    },
    /// The knockdown limit stopped the fight.
    Stoppage {
        fighter: FighterId,
        knockdowns: u32,
    },
    RoundEnded {
        round: u32,
        primary_score: u32,
        opponent_score: u32,
    },
    RoundStarted {
        round: u32,
    },
    MatchOver {
        winner: Winner,
        finish: Finish,
    },
}

impl MatchEvent {
    /// True for events that end the match.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchEvent::MatchOver { .. })
    }
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchEvent::Fatigued { fighter, requested } => {
                write!(f, "{fighter} is too tired to {requested} and rests")
            }
            MatchEvent::ActionIgnored { action, status } => {
                write!(f, "{action} ignored while {status}")
            }
            MatchEvent::HitLanded {
                attacker,
                action,
                damage,
                defense,
            } => match defense {
                Defense::Blocked => {
                    write!(f, "{attacker}'s {action} is blocked for {damage} damage")
                }
                Defense::DodgeFailed => {
                    write!(f, "{attacker}'s {action} catches a failed dodge for {damage} damage")
                }
                Defense::Open | Defense::Dodged => {
                    write!(f, "{attacker} lands a {action} for {damage} damage")
                }
            },
            MatchEvent::Dodged { defender, action } => {
                write!(f, "{defender} slips the {action}")
            }
            MatchEvent::KnockedDown { fighter, health } => {
                write!(f, "{fighter} is down with {health} health left")
            }
            MatchEvent::Recovered { fighter, count } => {
                write!(f, "{fighter} beats the count at {count:.1}")
            }
            MatchEvent::CountedOut { fighter } => write!(f, "{fighter} is counted out"),
            MatchEvent::Stoppage {
                fighter,
                knockdowns,
            } => write!(f, "fight stopped after {fighter} went down {knockdowns} times"),
            MatchEvent::RoundEnded {
                round,
                primary_score,
                opponent_score,
            } => write!(
                f,
                "round {round} scored {primary_score}-{opponent_score}"
            ),
            MatchEvent::RoundStarted { round } => write!(f, "round {round} begins"),
            MatchEvent::MatchOver { winner, finish } => match winner {
                Winner::Draw => write!(f, "match ends in a draw by {finish}"),
                Winner::Primary | Winner::Opponent => {
                    write!(f, "{winner} wins by {finish}")
                }
            },
        }
    }
}
