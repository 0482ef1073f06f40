//! Plain-data view of a match for persistence and transport.
//!
//! The shape uses symbolic names for every enum and rounds timers to one
//! decimal. The core defines the shape only; the wire format is up to the
//! collaborator (with the `serde` feature the types derive
//! `Serialize`/`Deserialize`).
//!
//! Rounding makes the trip lossy for timers. Services that must replay a
//! match bit-for-bit keep the [`MatchState`] itself and use snapshots for
//! display.

use std::collections::BTreeMap;

use crate::action::ActionType;
use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::state::{
    Combatant, FighterId, Finish, KnockdownInfo, MatchId, MatchState, MatchStatus, Winner,
};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FighterSnapshot {
    pub name: FighterId,
    pub hp: u32,
    pub max_hp: u32,
    pub stamina: f64,
    pub max_stamina: f64,
    pub knockdowns_this_round: u32,
    pub total_knockdowns: u32,
    pub current_action: ActionType,
    /// Action usage tally.
    pub stats: BTreeMap<ActionType, u32>,
    pub round_scores: Vec<u32>,
    pub damage_dealt_this_round: u32,
    pub damage_since_knockdown: u32,
    pub recovery_buffer: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnockdownSnapshot {
    pub is_knockdown: bool,
    pub fighter_down: Option<FighterId>,
    pub second_down: Option<FighterId>,
    pub count: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSnapshot {
    pub match_id: MatchId,
    pub seed: u64,
    pub nonce: u64,
    pub match_status: MatchStatus,
    pub current_round: u32,
    pub max_rounds: u32,
    pub round_timer: f64,
    pub is_round_active: bool,
    pub between_rounds_timer: f64,
    pub winner: Option<Winner>,
    pub finish: Option<Finish>,
    pub primary: FighterSnapshot,
    pub opponent: FighterSnapshot,
    pub knockdown_info: KnockdownSnapshot,
    pub event_log: Vec<String>,
}

impl MatchSnapshot {
    /// The last `n` log lines, oldest first.
    pub fn recent_events(&self, n: usize) -> &[String] {
        let start = self.event_log.len().saturating_sub(n);
        &self.event_log[start..]
    }

    /// Drops all but the last `n` log lines.
    pub fn truncate_log(&mut self, n: usize) {
        let start = self.event_log.len().saturating_sub(n);
        self.event_log.drain(..start);
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Plain-data copy of `state`. Timers and the count are rounded to one decimal.
pub fn serialize_state(state: &MatchState) -> MatchSnapshot {
    MatchSnapshot {
        match_id: state.id,
        seed: state.seed,
        nonce: state.nonce,
        match_status: state.status,
        current_round: state.current_round,
        max_rounds: state.max_rounds,
        round_timer: round_tenth(state.round_timer),
        is_round_active: state.is_round_active,
        between_rounds_timer: round_tenth(state.between_rounds_timer),
        winner: state.winner,
        finish: state.finish,
        primary: fighter_snapshot(&state.primary),
        opponent: fighter_snapshot(&state.opponent),
        knockdown_info: KnockdownSnapshot {
            is_knockdown: state.knockdown.is_down,
            fighter_down: state.knockdown.fighter_down,
            second_down: state.knockdown.second_down,
            count: round_tenth(state.knockdown.count),
        },
        event_log: state.event_log.clone(),
    }
}

fn fighter_snapshot(fighter: &Combatant) -> FighterSnapshot {
    FighterSnapshot {
        name: fighter.id,
        hp: fighter.health,
        max_hp: fighter.max_health,
        stamina: fighter.stamina,
        max_stamina: fighter.max_stamina,
        knockdowns_this_round: fighter.knockdowns_this_round,
        total_knockdowns: fighter.total_knockdowns,
        current_action: fighter.current_action,
        stats: fighter.action_tally.clone(),
        round_scores: fighter.round_scores.clone(),
        damage_dealt_this_round: fighter.damage_dealt_this_round,
        damage_since_knockdown: fighter.damage_since_knockdown,
        recovery_buffer: fighter.recovery_buffer,
    }
}

/// Rebuilds a match from a snapshot.
///
/// Every invariant is re-checked, including timers against the configured
/// durations. Any violation fails with
/// [`MatchError::DeserializationMismatch`]; no partial state is returned.
pub fn deserialize_state(
    snapshot: MatchSnapshot,
    config: &MatchConfig,
) -> Result<MatchState, MatchError> {
    if snapshot.primary.name != FighterId::Primary {
        return Err(MatchError::mismatch("`primary` holds the opponent"));
    }
    if snapshot.opponent.name != FighterId::Opponent {
        return Err(MatchError::mismatch("`opponent` holds the primary fighter"));
    }
    if snapshot.round_timer > config.round_duration {
        return Err(MatchError::mismatch(format!(
            "round_timer {} exceeds round duration {}",
            snapshot.round_timer, config.round_duration
        )));
    }
    if snapshot.between_rounds_timer > config.between_rounds_duration {
        return Err(MatchError::mismatch(format!(
            "between_rounds_timer {} exceeds break duration {}",
            snapshot.between_rounds_timer, config.between_rounds_duration
        )));
    }

    let kd = snapshot.knockdown_info;
    let state = MatchState {
        id: snapshot.match_id,
        seed: snapshot.seed,
        nonce: snapshot.nonce,
        status: snapshot.match_status,
        current_round: snapshot.current_round,
        max_rounds: snapshot.max_rounds,
        round_timer: snapshot.round_timer,
        between_rounds_timer: snapshot.between_rounds_timer,
        is_round_active: snapshot.is_round_active,
        primary: combatant(snapshot.primary),
        opponent: combatant(snapshot.opponent),
        knockdown: KnockdownInfo {
            is_down: kd.is_knockdown,
            fighter_down: kd.fighter_down,
            second_down: kd.second_down,
            count: kd.count,
        },
        winner: snapshot.winner,
        finish: snapshot.finish,
        event_log: snapshot.event_log,
    };

    state.check_invariants().map_err(MatchError::mismatch)?;
    Ok(state)
}

fn combatant(f: FighterSnapshot) -> Combatant {
    Combatant {
        id: f.name,
        health: f.hp,
        max_health: f.max_hp,
        stamina: f.stamina,
        max_stamina: f.max_stamina,
        knockdowns_this_round: f.knockdowns_this_round,
        total_knockdowns: f.total_knockdowns,
        current_action: f.current_action,
        action_tally: f.stats,
        round_scores: f.round_scores,
        damage_dealt_this_round: f.damage_dealt_this_round,
        damage_since_knockdown: f.damage_since_knockdown,
        recovery_buffer: f.recovery_buffer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(config: &MatchConfig) -> MatchState {
        let mut state = MatchState::initial(MatchId(5), 3, config, 11);
        state.round_timer = 123.456;
        state.primary.record_action(ActionType::Jab);
        state.event_log = (0..12).map(|i| format!("event {i}")).collect();
        state
    }

    #[test]
    fn timers_round_to_one_decimal() {
        let config = MatchConfig::default();
        let snapshot = serialize_state(&state(&config));
        assert_eq!(snapshot.round_timer, 123.5);
        assert_eq!(snapshot.primary.stats.get(&ActionType::Jab), Some(&1));
        assert_eq!(snapshot.recent_events(10).len(), 10);
        assert_eq!(snapshot.recent_events(10)[0], "event 2");
    }

    #[test]
    fn round_trip_preserves_everything_but_timer_precision() {
        let config = MatchConfig::default();
        let mut original = state(&config);
        original.round_timer = 90.0;

        let rebuilt = deserialize_state(serialize_state(&original), &config).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn rejects_invariant_violations() {
        let config = MatchConfig::default();
        let mut snapshot = serialize_state(&state(&config));
        snapshot.primary.hp = snapshot.primary.max_hp + 5;
        assert!(matches!(
            deserialize_state(snapshot, &config),
            Err(MatchError::DeserializationMismatch { .. })
        ));

        let mut snapshot = serialize_state(&state(&config));
        snapshot.knockdown_info.fighter_down = Some(FighterId::Opponent);
        assert!(deserialize_state(snapshot, &config).is_err());

        let mut snapshot = serialize_state(&state(&config));
        std::mem::swap(&mut snapshot.primary, &mut snapshot.opponent);
        assert!(deserialize_state(snapshot, &config).is_err());

        let mut snapshot = serialize_state(&state(&config));
        snapshot.round_timer = config.round_duration + 1.0;
        assert!(deserialize_state(snapshot, &config).is_err());
    }

    #[test]
    fn truncate_log_keeps_the_tail() {
        let config = MatchConfig::default();
        let mut snapshot = serialize_state(&state(&config));
        snapshot.truncate_log(3);
        assert_eq!(snapshot.event_log, vec!["event 9", "event 10", "event 11"]);
    }
}
