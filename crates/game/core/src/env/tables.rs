//! Per-action balance table.

use crate::action::ActionType;

/// Balance numbers for one action.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionProfile {
    /// Base damage dealt when the action lands unopposed. Zero for non-strikes.
    pub power: u32,
    /// Stamina spent to perform the action.
    pub stamina_cost: f64,
}

impl ActionProfile {
    pub const fn new(power: u32, stamina_cost: f64) -> Self {
        Self {
            power,
            stamina_cost,
        }
    }
}

/// Balance table covering the whole roster.
///
/// One field per action keeps lookups exhaustive: adding a variant to
/// [`ActionType`] fails to compile until it has a profile here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionTable {
    pub jab: ActionProfile,
    pub hook: ActionProfile,
    pub uppercut: ActionProfile,
    pub block: ActionProfile,
    pub dodge: ActionProfile,
    pub rest: ActionProfile,
}

impl ActionTable {
    pub const fn profile(&self, action: ActionType) -> ActionProfile {
        match action {
            ActionType::Jab => self.jab,
            ActionType::Hook => self.hook,
            ActionType::Uppercut => self.uppercut,
            ActionType::Block => self.block,
            ActionType::Dodge => self.dodge,
            ActionType::Rest => self.rest,
        }
    }

    /// Cheapest stamina cost among striking actions.
    pub fn min_strike_cost(&self) -> f64 {
        [self.jab, self.hook, self.uppercut]
            .iter()
            .map(|p| p.stamina_cost)
            .fold(f64::INFINITY, f64::min)
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        Self {
            jab: ActionProfile::new(4, 4.0),
            hook: ActionProfile::new(10, 12.0),
            uppercut: ActionProfile::new(14, 20.0),
            block: ActionProfile::new(0, 0.0),
            dodge: ActionProfile::new(0, 3.0),
            rest: ActionProfile::new(0, 0.0),
        }
    }
}
