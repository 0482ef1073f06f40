//! Down-and-count sub-state.
//!
//! ```text
//! standing --eligible hit--> down --health > standing_health, count >= min--> standing
//!                             |
//!                             +--count >= count_limit--> counted out (MatchOver)
//! ```
//!
//! Reaching `max_knockdowns` ends the match at the moment of the knockdown,
//! whether or not the fighter would have beaten the count.

use crate::config::MatchConfig;
use crate::event::MatchEvent;
use crate::state::{FighterId, Finish, MatchState, Winner};

use super::conclude;

pub struct KnockdownResolver<'a> {
    config: &'a MatchConfig,
}

impl<'a> KnockdownResolver<'a> {
    pub fn new(config: &'a MatchConfig) -> Self {
        Self { config }
    }

    /// Puts every fighter in `fighters` on the canvas, in order.
    ///
    /// A knockdown that reaches the per-match limit is booked on the spot and
    /// stops the fight, booking any other knockdown from the same exchange.
    /// Returns true when the match ended.
    pub fn begin(
        &self,
        state: &mut MatchState,
        fighters: &[FighterId],
        events: &mut Vec<MatchEvent>,
    ) -> bool {
        if fighters.is_empty() {
            return false;
        }

        let mut stopped = Vec::new();
        for &id in fighters {
            let fighter = state.fighter_mut(id);
            events.push(MatchEvent::KnockedDown {
                fighter: id,
                health: fighter.health,
            });
            if fighter.total_knockdowns + 1 >= self.config.max_knockdowns {
                fighter.count_knockdown();
                events.push(MatchEvent::Stoppage {
                    fighter: id,
                    knockdowns: fighter.total_knockdowns,
                });
                stopped.push(id);
            } else {
                fighter.damage_since_knockdown = 0;
                fighter.recovery_buffer = 0.0;
                state.knockdown.put_down(id);
            }
        }

        if stopped.is_empty() {
            return false;
        }

        // The fight ends here: anyone else who went down in the same
        // exchange has the knockdown booked and no count runs.
        for id in state.knockdown.downed() {
            state.fighter_mut(id).count_knockdown();
        }
        state.knockdown.clear();

        match stopped.as_slice() {
            [id] => {
                conclude(
                    state,
                    Winner::fighter(id.other()),
                    Finish::TechnicalKnockout,
                    events,
                );
                true
            }
            _ => {
                conclude(state, Winner::Draw, Finish::TechnicalKnockout, events);
                true
            }
        }
    }

    /// Runs the count forward by `elapsed` seconds.
    ///
    /// Downed fighters regenerate health up to the count limit; anyone above
    /// `standing_health` once `min_down_count` has passed gets up. Whoever is
    /// still down at the limit is counted out. Returns true when the match
    /// ended.
    pub fn advance(
        &self,
        state: &mut MatchState,
        elapsed: f64,
        events: &mut Vec<MatchEvent>,
    ) -> bool {
        if !state.knockdown.is_down {
            return false;
        }
        let config = self.config;

        // Regeneration stops at the limit even if the tick overshoots it.
        let recovering = elapsed.min((config.count_limit - state.knockdown.count).max(0.0));
        state.knockdown.count += elapsed;
        let count = state.knockdown.count;

        for id in FighterId::BOTH {
            if state.knockdown.is_fighter_down(id) {
                state
                    .fighter_mut(id)
                    .regenerate_health(config.down_health_regen_rate, recovering);
            } else {
                state
                    .fighter_mut(id)
                    .regenerate_stamina(config.stamina_regen_rate, elapsed);
            }
        }

        let mut counted_out = Vec::new();
        for id in state.knockdown.downed() {
            let fighter = state.fighter_mut(id);
            if fighter.health > config.standing_health && count >= config.min_down_count {
                fighter.count_knockdown();
                fighter.damage_since_knockdown = 0;
                fighter.recovery_buffer = 0.0;
                state.knockdown.stand_up(id);
                events.push(MatchEvent::Recovered { fighter: id, count });
            } else if count >= config.count_limit {
                fighter.count_knockdown();
                events.push(MatchEvent::CountedOut { fighter: id });
                counted_out.push(id);
            }
        }

        match counted_out.as_slice() {
            [] => false,
            [id] => {
                conclude(state, Winner::fighter(id.other()), Finish::Knockout, events);
                true
            }
            _ => {
                conclude(state, Winner::Draw, Finish::DoubleKnockout, events);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MatchId, MatchStatus};

    fn setup() -> (MatchConfig, MatchState) {
        let config = MatchConfig::default();
        let state = MatchState::initial(MatchId(1), 3, &config, 0);
        (config, state)
    }

    #[test]
    fn knockdown_starts_a_count() {
        let (config, mut state) = setup();
        let mut events = Vec::new();
        state.opponent.health = 0;

        let ended = KnockdownResolver::new(&config).begin(
            &mut state,
            &[FighterId::Opponent],
            &mut events,
        );
        assert!(!ended);
        assert!(state.knockdown.is_down);
        assert_eq!(state.knockdown.fighter_down, Some(FighterId::Opponent));
        assert_eq!(state.knockdown.count, 0.0);
        // Booked when the fighter rises or is counted out.
        assert_eq!(state.opponent.total_knockdowns, 0);
    }

    #[test]
    fn fighter_rises_after_recovering() {
        let (config, mut state) = setup();
        let resolver = KnockdownResolver::new(&config);
        let mut events = Vec::new();
        state.opponent.health = 0;
        resolver.begin(&mut state, &[FighterId::Opponent], &mut events);

        // 1.5 hp/s from zero: 10 health after 7s, 12 after 8s.
        for _ in 0..7 {
            assert!(!resolver.advance(&mut state, 1.0, &mut events));
            assert!(state.knockdown.is_down);
        }
        assert!(!resolver.advance(&mut state, 1.0, &mut events));
        assert!(!state.knockdown.is_down);
        assert_eq!(state.knockdown.count, 0.0);
        assert_eq!(state.opponent.health, 12);
        assert_eq!(state.opponent.knockdowns_this_round, 1);
        assert_eq!(state.opponent.total_knockdowns, 1);
        assert!(matches!(events.last(), Some(MatchEvent::Recovered { .. })));
    }

    #[test]
    fn fighter_is_counted_out() {
        let (mut config, mut state) = setup();
        config.down_health_regen_rate = 0.0;
        let resolver = KnockdownResolver::new(&config);
        let mut events = Vec::new();
        state.opponent.health = 0;
        resolver.begin(&mut state, &[FighterId::Opponent], &mut events);

        let mut last = 0.0;
        for _ in 0..9 {
            assert!(!resolver.advance(&mut state, 1.0, &mut events));
            assert!(state.knockdown.count > last);
            last = state.knockdown.count;
        }
        assert!(resolver.advance(&mut state, 1.0, &mut events));
        assert_eq!(state.status, MatchStatus::MatchOver);
        assert_eq!(state.winner, Some(Winner::Primary));
        assert_eq!(state.finish, Some(Finish::Knockout));
        assert_eq!(state.opponent.total_knockdowns, 1);
    }

    #[test]
    fn knockdown_limit_stops_the_fight() {
        let (config, mut state) = setup();
        let mut events = Vec::new();
        state.primary.total_knockdowns = config.max_knockdowns - 1;
        state.primary.health = 50;

        let ended =
            KnockdownResolver::new(&config).begin(&mut state, &[FighterId::Primary], &mut events);
        assert!(ended);
        assert_eq!(state.winner, Some(Winner::Opponent));
        assert_eq!(state.finish, Some(Finish::TechnicalKnockout));
        assert_eq!(state.primary.total_knockdowns, config.max_knockdowns);
        assert!(!state.knockdown.is_down);
    }

    #[test]
    fn stoppage_books_the_other_knockdown_of_the_exchange() {
        let (config, mut state) = setup();
        let mut events = Vec::new();
        state.primary.total_knockdowns = config.max_knockdowns - 1;
        state.primary.health = 0;
        state.opponent.health = 0;

        let ended =
            KnockdownResolver::new(&config).begin(&mut state, &FighterId::BOTH, &mut events);
        assert!(ended);
        assert_eq!(state.winner, Some(Winner::Opponent));
        assert_eq!(state.finish, Some(Finish::TechnicalKnockout));
        assert_eq!(state.primary.total_knockdowns, config.max_knockdowns);
        assert_eq!(state.opponent.total_knockdowns, 1);
        assert_eq!(state.opponent.knockdowns_this_round, 1);
        assert!(!state.knockdown.is_down);
        assert!(state.knockdown.downed().is_empty());
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn double_knockdown_counted_out_is_a_draw() {
        let (mut config, mut state) = setup();
        config.down_health_regen_rate = 0.0;
        let resolver = KnockdownResolver::new(&config);
        let mut events = Vec::new();
        state.primary.health = 0;
        state.opponent.health = 0;
        resolver.begin(&mut state, &FighterId::BOTH, &mut events);
        assert_eq!(state.knockdown.downed(), FighterId::BOTH.to_vec());

        assert!(resolver.advance(&mut state, config.count_limit, &mut events));
        assert_eq!(state.winner, Some(Winner::Draw));
        assert_eq!(state.finish, Some(Finish::DoubleKnockout));
        assert_eq!(state.primary.total_knockdowns, 1);
        assert_eq!(state.opponent.total_knockdowns, 1);
    }
}
