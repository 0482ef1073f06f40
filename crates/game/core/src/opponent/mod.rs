//! Fixed decision policy for the non-player fighter.
//!
//! The controller walks [`Tactic::PRIORITY`] like a behavior-tree selector:
//! each tactic either proposes an action or passes, and the first proposal
//! wins. When every tactic passes the controller rests, so the policy is
//! total over every health/stamina combination.
mod tactic;

pub use tactic::{Situation, Tactic};

use crate::action::ActionType;
use crate::config::OpponentTuning;
use crate::env::ActionTable;
use crate::state::Combatant;

/// Chooses the opponent's action from its own condition and the other
/// fighter's last action. Stateless and deterministic.
#[derive(Clone, Copy, Debug)]
pub struct OpponentController<'a> {
    tuning: &'a OpponentTuning,
    table: &'a ActionTable,
}

impl<'a> OpponentController<'a> {
    pub fn new(tuning: &'a OpponentTuning, table: &'a ActionTable) -> Self {
        Self { tuning, table }
    }

    /// Picks an action for `own`. The result is always affordable.
    pub fn choose(&self, own: &Combatant, foe: &Combatant, foe_last: ActionType) -> ActionType {
        self.decide(own, foe, foe_last).1
    }

    /// Like [`choose`](Self::choose) but also reports the deciding tactic.
    /// `None` means every tactic passed and the fallback rest was used.
    pub fn decide(
        &self,
        own: &Combatant,
        foe: &Combatant,
        foe_last: ActionType,
    ) -> (Option<Tactic>, ActionType) {
        let situation = Situation {
            own,
            foe,
            foe_last,
            tuning: self.tuning,
            table: self.table,
        };
        Tactic::PRIORITY
            .iter()
            .find_map(|tactic| tactic.propose(&situation).map(|a| (Some(*tactic), a)))
            .unwrap_or((None, ActionType::Rest))
    }
}
