//! Tactics the opponent controller can settle on.

use crate::action::ActionType;
use crate::config::OpponentTuning;
use crate::env::ActionTable;
use crate::state::Combatant;

/// Intent behind a chosen action.
///
/// - **Recover**: too tired to throw anything, rest
/// - **Finish**: fresh and the foe is hurt, throw the heaviest affordable punch
/// - **Defend**: hurt or gassed, block or slip
/// - **Punish**: the foe dropped their hands to rest, land a power shot
/// - **Probe**: the foe is covering up, jab at the guard
/// - **Pressure**: nothing special going on, keep working
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Tactic {
    Recover,
    Finish,
    Defend,
    Punish,
    Probe,
    Pressure,
}

/// Everything a tactic may look at.
pub struct Situation<'a> {
    pub own: &'a Combatant,
    pub foe: &'a Combatant,
    /// The other fighter's most recent action.
    pub foe_last: ActionType,
    pub tuning: &'a OpponentTuning,
    pub table: &'a ActionTable,
}

impl Situation<'_> {
    fn affordable(&self, action: ActionType) -> Option<ActionType> {
        self.own.can_afford(action, self.table).then_some(action)
    }

    /// First affordable action among `candidates`.
    fn first_affordable(&self, candidates: &[ActionType]) -> Option<ActionType> {
        candidates.iter().find_map(|a| self.affordable(*a))
    }
}

impl Tactic {
    /// Priority order. The first tactic that yields an action wins.
    pub const PRIORITY: [Tactic; 6] = [
        Tactic::Recover,
        Tactic::Finish,
        Tactic::Defend,
        Tactic::Punish,
        Tactic::Probe,
        Tactic::Pressure,
    ];

    /// The action this tactic proposes, or `None` when it does not apply.
    pub fn propose(self, s: &Situation<'_>) -> Option<ActionType> {
        let stamina = s.own.stamina_ratio();
        match self {
            Tactic::Recover => {
                (s.own.stamina < s.table.min_strike_cost()).then_some(ActionType::Rest)
            }
            Tactic::Finish => {
                if stamina >= s.tuning.aggressive_stamina_ratio
                    && s.foe.health_ratio() <= s.tuning.finishing_health_ratio
                {
                    s.first_affordable(&[ActionType::Uppercut, ActionType::Hook, ActionType::Jab])
                } else {
                    None
                }
            }
            Tactic::Defend => {
                if s.own.health_ratio() <= s.tuning.defensive_health_ratio
                    || stamina <= s.tuning.defensive_stamina_ratio
                {
                    let slip = if s.foe_last.is_power_strike() {
                        s.affordable(ActionType::Dodge)
                    } else {
                        None
                    };
                    slip.or_else(|| s.affordable(ActionType::Block))
                } else {
                    None
                }
            }
            Tactic::Punish => match s.foe_last {
                ActionType::Rest => s.affordable(ActionType::Hook),
                _ => None,
            },
            Tactic::Probe => match s.foe_last {
                ActionType::Block => s.affordable(ActionType::Jab),
                _ => None,
            },
            Tactic::Pressure => {
                if stamina >= s.tuning.aggressive_stamina_ratio {
                    s.first_affordable(&[ActionType::Hook, ActionType::Jab])
                } else {
                    s.affordable(ActionType::Jab)
                }
            }
        }
    }
}
