//! Ten-point-must round scoring.

use crate::config::MatchConfig;
use crate::state::{Combatant, MatchState};

/// Scores a completed round.
///
/// The fighter who suffered fewer knockdowns takes the round; on equal
/// knockdowns the one who landed more damage does. A round with neither
/// edge is scored even. The winner receives `round_winner_points`; the
/// loser one point less plus one more per extra knockdown, never below
/// `min_round_points`.
pub struct RoundJudge<'a> {
    config: &'a MatchConfig,
}

impl<'a> RoundJudge<'a> {
    pub fn new(config: &'a MatchConfig) -> Self {
        Self { config }
    }

    /// Score pair `(primary, opponent)` for the round just fought.
    pub fn score(&self, primary: &Combatant, opponent: &Combatant) -> (u32, u32) {
        let top = self.config.round_winner_points;
        let edge = primary
            .knockdowns_this_round
            .cmp(&opponent.knockdowns_this_round)
            .reverse()
            .then(
                primary
                    .damage_dealt_this_round
                    .cmp(&opponent.damage_dealt_this_round),
            );

        match edge {
            std::cmp::Ordering::Equal => (top, top),
            std::cmp::Ordering::Greater => (top, self.loser_score(opponent, primary)),
            std::cmp::Ordering::Less => (self.loser_score(primary, opponent), top),
        }
    }

    fn loser_score(&self, loser: &Combatant, winner: &Combatant) -> u32 {
        let extra = loser
            .knockdowns_this_round
            .saturating_sub(winner.knockdowns_this_round);
        self.config
            .round_winner_points
            .saturating_sub(1 + extra)
            .max(self.config.min_round_points)
    }

    /// Scores the round, appends the pair to both cards and clears the
    /// per-round counters.
    pub fn judge_round(&self, state: &mut MatchState) -> (u32, u32) {
        let (p, o) = self.score(&state.primary, &state.opponent);
        state.primary.round_scores.push(p);
        state.opponent.round_scores.push(o);
        state.primary.reset_round();
        state.opponent.reset_round();
        (p, o)
    }
}
