//! One fighter's mutable attributes.
//!
//! The methods here are the only way health and stamina change, and each of
//! them keeps `0 <= health <= max_health` and `0 <= stamina <= max_stamina`.

use std::collections::BTreeMap;

use crate::action::ActionType;
use crate::env::ActionTable;

use super::FighterId;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: FighterId,
    pub health: u32,
    pub max_health: u32,
    pub stamina: f64,
    pub max_stamina: f64,
    /// Knockdowns suffered in the current round. Reset after judging.
    pub knockdowns_this_round: u32,
    /// Knockdowns suffered in the whole match. Never decreases.
    pub total_knockdowns: u32,
    /// Action in effect on the most recent tick.
    pub current_action: ActionType,
    /// How often each action was performed. Post-match stats.
    pub action_tally: BTreeMap<ActionType, u32>,
    /// Judged score for each completed round, in round order.
    pub round_scores: Vec<u32>,
    /// Damage landed on the other fighter during the current round.
    pub damage_dealt_this_round: u32,
    /// Damage absorbed since the last knockdown (or round start).
    pub damage_since_knockdown: u32,
    /// Fractional health regenerated while down and not yet credited.
    pub recovery_buffer: f64,
}

impl Combatant {
    /// A fighter at full health and stamina.
    pub fn fresh(id: FighterId, max_health: u32, max_stamina: f64) -> Self {
        Self {
            id,
            health: max_health,
            max_health,
            stamina: max_stamina,
            max_stamina,
            knockdowns_this_round: 0,
            total_knockdowns: 0,
            current_action: ActionType::Rest,
            action_tally: BTreeMap::new(),
            round_scores: Vec::new(),
            damage_dealt_this_round: 0,
            damage_since_knockdown: 0,
            recovery_buffer: 0.0,
        }
    }

    /// Subtracts health, clamped at zero. Returns the damage actually taken.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.health);
        self.health = (self.health - taken).min(self.max_health);
        self.damage_since_knockdown = self.damage_since_knockdown.saturating_add(taken);
        taken
    }

    /// Subtracts stamina, clamped at zero. Returns the stamina actually spent.
    pub fn spend_stamina(&mut self, amount: f64) -> f64 {
        let spent = amount.max(0.0).min(self.stamina);
        self.stamina = (self.stamina - spent).max(0.0);
        spent
    }

    /// Adds a flat amount of stamina, clamped at the maximum.
    pub fn restore_stamina(&mut self, amount: f64) {
        self.stamina = (self.stamina + amount.max(0.0)).min(self.max_stamina);
    }

    pub fn regenerate_stamina(&mut self, rate: f64, delta_time: f64) {
        self.restore_stamina(rate * delta_time);
    }

    /// Regenerates health at `rate` per second, crediting whole points only.
    pub fn regenerate_health(&mut self, rate: f64, delta_time: f64) {
        self.recovery_buffer += (rate * delta_time).max(0.0);
        let whole = self.recovery_buffer.floor();
        if whole >= 1.0 {
            self.recovery_buffer -= whole;
            let gained = whole.min(u32::MAX as f64) as u32;
            self.health = self.health.saturating_add(gained).min(self.max_health);
        }
    }

    /// Increments the usage tally and makes `action` the current action.
    pub fn record_action(&mut self, action: ActionType) {
        *self.action_tally.entry(action).or_insert(0) += 1;
        self.current_action = action;
    }

    pub fn can_afford(&self, action: ActionType, table: &ActionTable) -> bool {
        table.profile(action).stamina_cost <= self.stamina
    }

    /// Fatigue rule: an action the fighter cannot pay for becomes `rest`.
    pub fn affordable(&self, action: ActionType, table: &ActionTable) -> ActionType {
        if self.can_afford(action, table) {
            action
        } else {
            ActionType::Rest
        }
    }

    pub fn health_ratio(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        f64::from(self.health) / f64::from(self.max_health)
    }

    pub fn stamina_ratio(&self) -> f64 {
        if self.max_stamina <= 0.0 {
            return 0.0;
        }
        self.stamina / self.max_stamina
    }

    /// Sum of all judged round scores.
    pub fn total_score(&self) -> u32 {
        self.round_scores.iter().sum()
    }

    /// Clears per-round counters once a round has been judged.
    pub(crate) fn reset_round(&mut self) {
        self.knockdowns_this_round = 0;
        self.damage_dealt_this_round = 0;
        self.damage_since_knockdown = 0;
    }

    /// Books a completed knockdown against this fighter.
    pub(crate) fn count_knockdown(&mut self) {
        self.knockdowns_this_round += 1;
        self.total_knockdowns += 1;
    }
}
