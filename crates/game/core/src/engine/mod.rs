//! Tick-driven match state machine.
//!
//! [`MatchEngine`] is the only reducer for [`MatchState`]. A tick runs in
//! three phases on a private copy of the state:
//!
//! 1. pre-validate: reject bad input before anything is touched
//! 2. apply: advance timers, resolve the exchange, run the count
//! 3. log: append the emitted events to the event log
//!
//! The caller's state is only replaced when the tick succeeds, so a rejected
//! tick leaves it exactly as it was.
//!
//! # Concurrency
//!
//! The engine is synchronous and holds no locks. Callers must guarantee that
//! at most one tick per match is in flight at a time; two ticks started from
//! the same prior state will each produce a successor, and storing both
//! silently loses one of them.
//!
//! # Status transitions
//!
//! ```text
//! RoundActive --timer expires, rounds left--> BetweenRounds
//! RoundActive --timer expires, last round---> MatchOver (decision)
//! RoundActive --counted out / limit reached-> MatchOver
//! BetweenRounds --break expires-------------> RoundActive
//! MatchOver (absorbing)
//! ```

mod judge;
mod knockdown;

pub use judge::RoundJudge;
pub use knockdown::KnockdownResolver;

use crate::action::{ActionType, PendingAction};
use crate::combat::{ActionResolver, Defense, Resolution};
use crate::config::MatchConfig;
use crate::env::MatchEnv;
use crate::error::MatchError;
use crate::event::MatchEvent;
use crate::opponent::OpponentController;
use crate::state::{FighterId, Finish, MatchId, MatchState, MatchStatus, Winner};

/// Successor state plus what happened on the way there.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    pub state: MatchState,
    pub events: Vec<MatchEvent>,
}

/// Creates a match: both fighters fresh, round 1 running, empty log.
///
/// Fails with [`MatchError::InvalidConfiguration`] when `max_rounds` is zero
/// or any configured constant is out of range.
pub fn new_match(
    id: MatchId,
    max_rounds: u32,
    config: &MatchConfig,
    seed: u64,
) -> Result<MatchState, MatchError> {
    config.validate_rounds(max_rounds)?;
    Ok(MatchState::initial(id, max_rounds, config, seed))
}

/// Puts the match into `RoundActive`.
///
/// During a break this cuts the break short and starts the upcoming round.
/// A running round or a finished match is returned unchanged.
pub fn start_round(state: &MatchState, config: &MatchConfig) -> MatchState {
    let mut next = state.clone();
    if next.status == MatchStatus::BetweenRounds {
        let mut events = Vec::new();
        open_round(&mut next, config, &mut events);
        append_log(&mut next, &events);
    }
    next
}

pub struct MatchEngine<'a> {
    env: MatchEnv<'a>,
}

impl<'a> MatchEngine<'a> {
    pub fn new(env: MatchEnv<'a>) -> Self {
        Self { env }
    }

    /// Advances the match by `elapsed` seconds, resolving at most one
    /// exchange.
    ///
    /// Without a pending action the primary fighter rests. A pending action
    /// that arrives while nobody can throw (a count is running, or the
    /// fighters are in their corners) is dropped with
    /// [`MatchEvent::ActionIgnored`]. Once the match is over the tick is a
    /// no-op that returns the state unchanged and no events.
    ///
    /// Deterministic: the same state, action and elapsed time always yield
    /// the same outcome.
    pub fn tick(
        &self,
        state: &MatchState,
        pending: Option<PendingAction>,
        elapsed: f64,
    ) -> Result<TickOutcome, MatchError> {
        self.pre_validate(state, pending.as_ref(), elapsed)?;

        if state.is_over() {
            return Ok(TickOutcome {
                state: state.clone(),
                events: Vec::new(),
            });
        }

        let mut next = state.clone();
        next.nonce = next.nonce.wrapping_add(1);
        let mut events = Vec::new();

        match next.status {
            MatchStatus::RoundActive if next.knockdown.is_down => {
                self.run_count(&mut next, pending, elapsed, &mut events);
            }
            MatchStatus::RoundActive => {
                self.run_exchange(&mut next, pending, elapsed, &mut events);
            }
            MatchStatus::BetweenRounds => {
                self.run_break(&mut next, pending, elapsed, &mut events);
            }
            MatchStatus::MatchOver => {}
        }

        append_log(&mut next, &events);
        debug_assert_eq!(next.check_invariants(), Ok(()));

        Ok(TickOutcome {
            state: next,
            events,
        })
    }

    fn pre_validate(
        &self,
        state: &MatchState,
        pending: Option<&PendingAction>,
        elapsed: f64,
    ) -> Result<(), MatchError> {
        if !elapsed.is_finite() || elapsed < 0.0 {
            return Err(MatchError::InvalidElapsedTime { elapsed });
        }
        if let Some(pending) = pending
            && pending.match_id() != state.id
        {
            return Err(MatchError::ActionMatchMismatch {
                expected: state.id,
                found: pending.match_id(),
            });
        }
        Ok(())
    }

    /// Normal round time: one exchange, regen, knockdown check, clock.
    fn run_exchange(
        &self,
        state: &mut MatchState,
        pending: Option<PendingAction>,
        elapsed: f64,
        events: &mut Vec<MatchEvent>,
    ) {
        let config = self.env.config;
        let primary_action = pending.map_or(ActionType::Rest, |p| p.action());
        let opponent_action = OpponentController::new(&config.opponent, &config.actions).choose(
            &state.opponent,
            &state.primary,
            state.primary.current_action,
        );

        let resolution =
            ActionResolver::new(self.env).resolve(state, primary_action, opponent_action);
        apply_resolution(state, &resolution, events);

        for id in FighterId::BOTH {
            state
                .fighter_mut(id)
                .regenerate_stamina(config.stamina_regen_rate, elapsed);
        }

        if KnockdownResolver::new(config).begin(state, &resolution.knockdowns, events) {
            return;
        }

        state.round_timer = (state.round_timer - elapsed).max(0.0);
        if !state.knockdown.is_down && state.round_timer <= 0.0 {
            close_round(state, config, events);
        }
    }

    /// A fighter is down: the count runs and the round clock stands still.
    fn run_count(
        &self,
        state: &mut MatchState,
        pending: Option<PendingAction>,
        elapsed: f64,
        events: &mut Vec<MatchEvent>,
    ) {
        if let Some(pending) = pending {
            events.push(MatchEvent::ActionIgnored {
                action: pending.action(),
                status: state.status,
            });
        }

        let config = self.env.config;
        if KnockdownResolver::new(config).advance(state, elapsed, events) {
            return;
        }
        // A fighter who rises after the bell still finishes the round.
        if !state.knockdown.is_down && state.round_timer <= 0.0 {
            close_round(state, config, events);
        }
    }

    /// Fighters are in their corners.
    fn run_break(
        &self,
        state: &mut MatchState,
        pending: Option<PendingAction>,
        elapsed: f64,
        events: &mut Vec<MatchEvent>,
    ) {
        if let Some(pending) = pending {
            events.push(MatchEvent::ActionIgnored {
                action: pending.action(),
                status: state.status,
            });
        }

        let config = self.env.config;
        for id in FighterId::BOTH {
            state
                .fighter_mut(id)
                .regenerate_stamina(config.corner_recovery_rate, elapsed);
        }

        state.between_rounds_timer = (state.between_rounds_timer - elapsed).max(0.0);
        if state.between_rounds_timer <= 0.0 {
            open_round(state, config, events);
        }
    }
}

/// Books a resolved exchange onto both fighters.
fn apply_resolution(
    state: &mut MatchState,
    resolution: &Resolution,
    events: &mut Vec<MatchEvent>,
) {
    for id in FighterId::BOTH {
        let outcome = resolution.outcome(id);
        if outcome.was_downgraded() {
            events.push(MatchEvent::Fatigued {
                fighter: id,
                requested: outcome.requested,
            });
        }

        let fighter = state.fighter_mut(id);
        fighter.record_action(outcome.action);
        fighter.spend_stamina(outcome.stamina_spent);
        fighter.restore_stamina(outcome.stamina_restored);
        fighter.apply_damage(outcome.damage_taken);
        fighter.damage_dealt_this_round = fighter
            .damage_dealt_this_round
            .saturating_add(outcome.damage_dealt);
    }

    for attacker in FighterId::BOTH {
        let action = resolution.outcome(attacker).action;
        let defender = resolution.outcome(attacker.other());
        match defender.defense {
            Some(Defense::Dodged) => events.push(MatchEvent::Dodged {
                defender: defender.fighter,
                action,
            }),
            Some(defense) => events.push(MatchEvent::HitLanded {
                attacker,
                action,
                damage: defender.damage_taken,
                defense,
            }),
            None => {}
        }
    }
}

/// Judges the finished round, then either opens the break or ends the match.
fn close_round(state: &mut MatchState, config: &MatchConfig, events: &mut Vec<MatchEvent>) {
    let (primary_score, opponent_score) = RoundJudge::new(config).judge_round(state);
    events.push(MatchEvent::RoundEnded {
        round: state.current_round,
        primary_score,
        opponent_score,
    });

    if state.current_round >= state.max_rounds {
        let winner = match state
            .primary
            .total_score()
            .cmp(&state.opponent.total_score())
        {
            std::cmp::Ordering::Greater => Winner::Primary,
            std::cmp::Ordering::Less => Winner::Opponent,
            std::cmp::Ordering::Equal => Winner::Draw,
        };
        conclude(state, winner, Finish::Decision, events);
        return;
    }

    state.current_round += 1;
    state.status = MatchStatus::BetweenRounds;
    state.is_round_active = false;
    state.round_timer = 0.0;
    state.between_rounds_timer = config.between_rounds_duration;
}

/// Starts the round recorded in `current_round`.
fn open_round(state: &mut MatchState, config: &MatchConfig, events: &mut Vec<MatchEvent>) {
    state.status = MatchStatus::RoundActive;
    state.is_round_active = true;
    state.round_timer = config.round_duration;
    state.between_rounds_timer = 0.0;
    events.push(MatchEvent::RoundStarted {
        round: state.current_round,
    });
}

/// Enters the terminal state.
pub(crate) fn conclude(
    state: &mut MatchState,
    winner: Winner,
    finish: Finish,
    events: &mut Vec<MatchEvent>,
) {
    state.status = MatchStatus::MatchOver;
    state.is_round_active = false;
    state.winner = Some(winner);
    state.finish = Some(finish);
    events.push(MatchEvent::MatchOver { winner, finish });
}

fn append_log(state: &mut MatchState, events: &[MatchEvent]) {
    state
        .event_log
        .extend(events.iter().map(ToString::to_string));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::submit_action;
    use crate::env::PcgRng;

    fn fresh(config: &MatchConfig) -> MatchState {
        new_match(MatchId(1), 3, config, 42).unwrap()
    }

    #[test]
    fn rejects_bad_elapsed_time() {
        let config = MatchConfig::default();
        let rng = PcgRng;
        let engine = MatchEngine::new(MatchEnv::new(&config, &rng));
        let state = fresh(&config);
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                engine.tick(&state, None, bad),
                Err(MatchError::InvalidElapsedTime { .. })
            ));
        }
    }

    #[test]
    fn rejects_handles_from_other_matches() {
        let config = MatchConfig::default();
        let rng = PcgRng;
        let engine = MatchEngine::new(MatchEnv::new(&config, &rng));
        let state = fresh(&config);
        let other = new_match(MatchId(2), 3, &config, 42).unwrap();
        let handle = submit_action(&other, "jab").unwrap();

        assert_eq!(
            engine.tick(&state, Some(handle), 1.0),
            Err(MatchError::ActionMatchMismatch {
                expected: MatchId(1),
                found: MatchId(2)
            })
        );
    }

    #[test]
    fn exchange_lands_and_logs() {
        let config = MatchConfig::default();
        let rng = PcgRng;
        let engine = MatchEngine::new(MatchEnv::new(&config, &rng));
        let state = fresh(&config);
        let handle = submit_action(&state, "jab").unwrap();

        let out = engine.tick(&state, Some(handle), 1.0).unwrap();
        assert_eq!(out.state.nonce, 1);
        assert_eq!(out.state.primary.current_action, ActionType::Jab);
        assert_eq!(out.state.round_timer, config.round_duration - 1.0);
        // Opponent answers a resting primary's last action with a hook.
        assert_eq!(out.state.opponent.current_action, ActionType::Hook);
        assert_eq!(out.state.event_log.len(), out.events.len());
        assert!(out.events.iter().any(|e| matches!(
            e,
            MatchEvent::HitLanded {
                attacker: FighterId::Primary,
                action: ActionType::Jab,
                ..
            }
        )));
    }

    /// Puts a fresh match into the break after a scored first round.
    fn into_second_round_break(state: &mut MatchState) {
        state.status = MatchStatus::BetweenRounds;
        state.is_round_active = false;
        state.current_round = 2;
        state.round_timer = 0.0;
        state.primary.round_scores.push(10);
        state.opponent.round_scores.push(9);
    }

    #[test]
    fn start_round_cuts_the_break_short() {
        let config = MatchConfig::default();
        let mut state = fresh(&config);
        assert_eq!(start_round(&state, &config), state, "running round is a no-op");

        into_second_round_break(&mut state);
        state.between_rounds_timer = 30.0;
        assert_eq!(state.check_invariants(), Ok(()));

        let next = start_round(&state, &config);
        assert_eq!(next.check_invariants(), Ok(()));
        assert_eq!(next.status, MatchStatus::RoundActive);
        assert!(next.is_round_active);
        assert_eq!(next.current_round, 2);
        assert_eq!(next.round_timer, config.round_duration);
        assert_eq!(next.event_log.last().map(String::as_str), Some("round 2 begins"));
    }

    #[test]
    fn break_expiry_opens_the_next_round() {
        let config = MatchConfig::default();
        let rng = PcgRng;
        let engine = MatchEngine::new(MatchEnv::new(&config, &rng));
        let mut state = fresh(&config);
        into_second_round_break(&mut state);
        state.between_rounds_timer = config.between_rounds_duration;
        assert_eq!(state.check_invariants(), Ok(()));
        state.primary.stamina = 10.0;

        let handle = submit_action(&state, "hook").unwrap();
        let out = engine.tick(&state, Some(handle), 20.0).unwrap();
        assert_eq!(out.state.status, MatchStatus::BetweenRounds);
        assert_eq!(out.state.between_rounds_timer, 40.0);
        assert_eq!(out.state.primary.stamina, 10.0 + 20.0 * config.corner_recovery_rate);
        assert!(matches!(out.events[0], MatchEvent::ActionIgnored { .. }));

        let out = engine.tick(&out.state, None, 40.0).unwrap();
        assert_eq!(out.state.status, MatchStatus::RoundActive);
        assert_eq!(out.state.current_round, 2);
        assert_eq!(out.events, vec![MatchEvent::RoundStarted { round: 2 }]);
    }

    #[test]
    fn round_clock_stops_during_the_count() {
        let config = MatchConfig::default();
        let rng = PcgRng;
        let engine = MatchEngine::new(MatchEnv::new(&config, &rng));
        let mut state = fresh(&config);
        state.round_timer = 50.0;
        state.opponent.health = 0;
        state.knockdown.put_down(FighterId::Opponent);

        let out = engine.tick(&state, None, 2.0).unwrap();
        assert_eq!(out.state.round_timer, 50.0);
        assert_eq!(out.state.knockdown.count, 2.0);
        assert_eq!(out.state.opponent.current_action, state.opponent.current_action);
    }

    #[test]
    fn finished_match_is_absorbing() {
        let config = MatchConfig::default();
        let rng = PcgRng;
        let engine = MatchEngine::new(MatchEnv::new(&config, &rng));
        let mut state = fresh(&config);
        conclude(&mut state, Winner::Primary, Finish::Knockout, &mut Vec::new());

        let out = engine.tick(&state, None, 5.0).unwrap();
        assert_eq!(out.state, state);
        assert!(out.events.is_empty());
        assert_eq!(
            submit_action(&state, "jab"),
            Err(MatchError::MatchNotActive { match_id: MatchId(1) })
        );
    }
}
