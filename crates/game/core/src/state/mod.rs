//! Authoritative match state.
//!
//! [`MatchState`] is the aggregate root. Callers hold it, persist it, and hand
//! it back to the engine; only [`MatchEngine::tick`](crate::MatchEngine::tick)
//! produces a successor state.
mod combatant;
mod types;

pub use combatant::Combatant;
pub use types::{FighterId, Finish, KnockdownInfo, MatchId, MatchStatus, Winner};

use crate::config::MatchConfig;

/// Canonical snapshot of one match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    pub id: MatchId,

    /// RNG seed for the whole match. Set once at creation.
    pub seed: u64,
    /// Count of mutating ticks applied so far. Mixed into every roll seed.
    pub nonce: u64,

    pub status: MatchStatus,
    /// Round being fought, or the upcoming round during a break (1-indexed).
    pub current_round: u32,
    pub max_rounds: u32,
    /// Seconds left in the current round.
    pub round_timer: f64,
    /// Seconds left in the current break.
    pub between_rounds_timer: f64,
    /// True while a round is running and accepting actions.
    pub is_round_active: bool,

    pub primary: Combatant,
    pub opponent: Combatant,
    pub knockdown: KnockdownInfo,

    /// Unset until `MatchOver`.
    pub winner: Option<Winner>,
    pub finish: Option<Finish>,

    /// Human-readable log, oldest first. Grows without bound; callers surface
    /// only the tail via [`MatchState::recent_events`].
    pub event_log: Vec<String>,
}

impl MatchState {
    /// Fresh match: full health and stamina, round 1 running, empty log.
    ///
    /// Parameters are assumed valid; use [`crate::new_match`] for the
    /// validating constructor.
    pub(crate) fn initial(id: MatchId, max_rounds: u32, config: &MatchConfig, seed: u64) -> Self {
        Self {
            id,
            seed,
            nonce: 0,
            status: MatchStatus::RoundActive,
            current_round: 1,
            max_rounds,
            round_timer: config.round_duration,
            between_rounds_timer: 0.0,
            is_round_active: true,
            primary: Combatant::fresh(FighterId::Primary, config.max_health, config.max_stamina),
            opponent: Combatant::fresh(FighterId::Opponent, config.max_health, config.max_stamina),
            knockdown: KnockdownInfo::default(),
            winner: None,
            finish: None,
            event_log: Vec::new(),
        }
    }

    pub fn fighter(&self, id: FighterId) -> &Combatant {
        match id {
            FighterId::Primary => &self.primary,
            FighterId::Opponent => &self.opponent,
        }
    }

    pub fn fighter_mut(&mut self, id: FighterId) -> &mut Combatant {
        match id {
            FighterId::Primary => &mut self.primary,
            FighterId::Opponent => &mut self.opponent,
        }
    }

    pub fn is_over(&self) -> bool {
        self.status == MatchStatus::MatchOver
    }

    /// The last `n` event-log lines, oldest first.
    pub fn recent_events(&self, n: usize) -> &[String] {
        let start = self.event_log.len().saturating_sub(n);
        &self.event_log[start..]
    }

    /// Checks every structural invariant of a match.
    ///
    /// Holds for every state the engine produces; used to vet states rebuilt
    /// from persisted data.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.primary.id != FighterId::Primary || self.opponent.id != FighterId::Opponent {
            return Err("fighters are in the wrong corners".into());
        }
        for fighter in [&self.primary, &self.opponent] {
            let id = fighter.id;
            if fighter.max_health == 0 || fighter.health > fighter.max_health {
                return Err(format!(
                    "{id}: health {} outside 0..={}",
                    fighter.health, fighter.max_health
                ));
            }
            if !(fighter.max_stamina.is_finite() && fighter.max_stamina > 0.0) {
                return Err(format!("{id}: max_stamina must be positive"));
            }
            if !(0.0..=fighter.max_stamina).contains(&fighter.stamina) {
                return Err(format!(
                    "{id}: stamina {} outside 0..={}",
                    fighter.stamina, fighter.max_stamina
                ));
            }
            if fighter.knockdowns_this_round > fighter.total_knockdowns {
                return Err(format!("{id}: more knockdowns this round than in the match"));
            }
            if !(0.0..1.0).contains(&fighter.recovery_buffer) {
                return Err(format!("{id}: recovery buffer out of range"));
            }
        }

        if self.max_rounds == 0 || self.current_round == 0 || self.current_round > self.max_rounds {
            return Err(format!(
                "round {} outside 1..={}",
                self.current_round, self.max_rounds
            ));
        }
        for (name, timer) in [
            ("round_timer", self.round_timer),
            ("between_rounds_timer", self.between_rounds_timer),
            ("knockdown count", self.knockdown.count),
        ] {
            if !(timer.is_finite() && timer >= 0.0) {
                return Err(format!("{name} must be a non-negative number"));
            }
        }

        let kd = &self.knockdown;
        if kd.is_down != kd.fighter_down.is_some() {
            return Err("knockdown flag and downed fighter disagree".into());
        }
        if kd.second_down.is_some()
            && (kd.fighter_down.is_none() || kd.second_down == kd.fighter_down)
        {
            return Err("second downed fighter without a distinct first".into());
        }
        if !kd.is_down && kd.count != 0.0 {
            return Err("count running while nobody is down".into());
        }

        let cards = self.primary.round_scores.len();
        if cards != self.opponent.round_scores.len() {
            return Err("score cards have different lengths".into());
        }
        let completed = (self.current_round - 1) as usize;
        match self.status {
            MatchStatus::RoundActive | MatchStatus::BetweenRounds => {
                if self.winner.is_some() || self.finish.is_some() {
                    return Err(format!("{} match already has a result", self.status));
                }
                if self.is_round_active != (self.status == MatchStatus::RoundActive) {
                    return Err(format!("is_round_active contradicts {}", self.status));
                }
                if cards != completed {
                    return Err(format!(
                        "{cards} scored rounds before round {}",
                        self.current_round
                    ));
                }
                if self.status == MatchStatus::BetweenRounds && kd.is_down {
                    return Err("count running between rounds".into());
                }
            }
            MatchStatus::MatchOver => {
                if self.winner.is_none() || self.finish.is_none() {
                    return Err("finished match without a result".into());
                }
                if self.is_round_active {
                    return Err("finished match still accepting actions".into());
                }
                if cards > self.current_round as usize {
                    return Err(format!(
                        "{cards} scored rounds after round {}",
                        self.current_round
                    ));
                }
            }
        }
        Ok(())
    }

    /// SHA-256 over the bincode encoding of the whole state.
    ///
    /// Two states are byte-identical iff their digests match.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], crate::MatchError> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)
            .map_err(|e| crate::MatchError::mismatch(format!("state encoding failed: {e}")))?;
        let hash = Sha256::digest(&bytes);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hash);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_fresh() {
        let config = MatchConfig::default();
        let state = MatchState::initial(MatchId(9), 3, &config, 1234);

        assert_eq!(state.status, MatchStatus::RoundActive);
        assert_eq!(state.current_round, 1);
        assert_eq!(state.round_timer, config.round_duration);
        assert!(state.is_round_active);
        for id in FighterId::BOTH {
            let f = state.fighter(id);
            assert_eq!(f.health, f.max_health);
            assert_eq!(f.stamina, f.max_stamina);
            assert!(f.round_scores.is_empty());
        }
        assert!(state.event_log.is_empty());
        assert_eq!(state.winner, None);
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn invariant_check_flags_broken_states() {
        let config = MatchConfig::default();
        let base = MatchState::initial(MatchId(1), 3, &config, 0);

        let mut state = base.clone();
        state.primary.health = state.primary.max_health + 1;
        assert!(state.check_invariants().is_err());

        let mut state = base.clone();
        state.knockdown.is_down = true;
        assert!(state.check_invariants().is_err());

        let mut state = base.clone();
        state.status = MatchStatus::MatchOver;
        state.is_round_active = false;
        assert!(state.check_invariants().is_err(), "no winner recorded");

        let mut state = base;
        state.current_round = 4;
        assert!(state.check_invariants().is_err());
    }

    #[test]
    fn recent_events_returns_tail() {
        let mut state = MatchState::initial(MatchId(1), 3, &MatchConfig::default(), 0);
        state.event_log = (0..15).map(|i| format!("line {i}")).collect();
        let tail = state.recent_events(10);
        assert_eq!(tail.len(), 10);
        assert_eq!(tail[0], "line 5");
        assert_eq!(state.recent_events(100).len(), 15);
    }
}
