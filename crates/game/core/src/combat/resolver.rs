//! Simultaneous resolution of one action pair.
//!
//! Both sides are computed against the same pre-tick snapshot, so the order
//! in which fighters are processed never changes the result.

use crate::action::{ActionClass, ActionType};
use crate::env::{MatchEnv, RollContext, compute_seed};
use crate::state::{Combatant, FighterId, MatchState};

use super::damage::{Defense, is_flash_knockdown, strike_damage};

/// What one fighter did and suffered in an exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct FighterOutcome {
    pub fighter: FighterId,
    /// Action the caller or controller asked for.
    pub requested: ActionType,
    /// Action actually performed after the fatigue rule.
    pub action: ActionType,
    pub stamina_spent: f64,
    pub stamina_restored: f64,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    /// How this fighter met the other's strike, if one was thrown.
    pub defense: Option<Defense>,
    pub knockdown_eligible: bool,
}

impl FighterOutcome {
    pub fn was_downgraded(&self) -> bool {
        self.requested != self.action
    }
}

/// Outcome of one exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub primary: FighterOutcome,
    pub opponent: FighterOutcome,
    /// Fighters eligible for a knockdown, lower remaining health first.
    pub knockdowns: Vec<FighterId>,
}

impl Resolution {
    pub fn outcome(&self, id: FighterId) -> &FighterOutcome {
        match id {
            FighterId::Primary => &self.primary,
            FighterId::Opponent => &self.opponent,
        }
    }

    pub fn is_double_knockdown(&self) -> bool {
        self.knockdowns.len() == 2
    }
}

/// Resolves action pairs using the match tuning and the injected RNG.
pub struct ActionResolver<'a> {
    env: MatchEnv<'a>,
}

impl<'a> ActionResolver<'a> {
    pub fn new(env: MatchEnv<'a>) -> Self {
        Self { env }
    }

    /// Resolves `primary_action` against `opponent_action`.
    ///
    /// Rolls are keyed by `state.seed` and `state.nonce`, so resolving the
    /// same state with the same actions always yields the same result.
    pub fn resolve(
        &self,
        state: &MatchState,
        primary_action: ActionType,
        opponent_action: ActionType,
    ) -> Resolution {
        let table = &self.env.config.actions;
        let primary_eff = state.primary.affordable(primary_action, table);
        let opponent_eff = state.opponent.affordable(opponent_action, table);

        // Damage each fighter receives from the other's strike.
        let (to_primary, primary_defense) =
            self.incoming(state, &state.primary, primary_eff, opponent_eff);
        let (to_opponent, opponent_defense) =
            self.incoming(state, &state.opponent, opponent_eff, primary_eff);

        let mut primary = self.outcome(&state.primary, primary_action, primary_eff, to_primary);
        let mut opponent =
            self.outcome(&state.opponent, opponent_action, opponent_eff, to_opponent);
        primary.defense = primary_defense;
        opponent.defense = opponent_defense;
        primary.damage_dealt = opponent.damage_taken;
        opponent.damage_dealt = primary.damage_taken;

        let mut knockdowns: Vec<(u32, FighterId)> = [
            (&primary, &state.primary),
            (&opponent, &state.opponent),
        ]
        .into_iter()
        .filter(|(outcome, _)| outcome.knockdown_eligible)
        .map(|(outcome, fighter)| (fighter.health - outcome.damage_taken, fighter.id))
        .collect();
        // Lower remaining health first; primary before opponent on a tie.
        knockdowns.sort_by_key(|(health, id)| (*health, id.index()));

        Resolution {
            primary,
            opponent,
            knockdowns: knockdowns.into_iter().map(|(_, id)| id).collect(),
        }
    }

    /// Raw damage headed for `defender` and how they met it.
    fn incoming(
        &self,
        state: &MatchState,
        defender: &Combatant,
        defender_action: ActionType,
        attacker_action: ActionType,
    ) -> (u32, Option<Defense>) {
        if !attacker_action.is_strike() {
            return (0, None);
        }
        let config = self.env.config;
        let power = config.actions.profile(attacker_action).power;

        let defense = match defender_action.class() {
            ActionClass::Block => Defense::Blocked,
            ActionClass::Dodge => {
                let seed = compute_seed(
                    state.seed,
                    state.nonce,
                    defender.id.index(),
                    RollContext::Dodge,
                );
                if self.env.rng.chance(seed, config.dodge_success_percent) {
                    Defense::Dodged
                } else {
                    Defense::DodgeFailed
                }
            }
            ActionClass::LightStrike | ActionClass::PowerStrike | ActionClass::Recovery => {
                Defense::Open
            }
        };

        (
            strike_damage(power, defense, config.block_damage_factor),
            Some(defense),
        )
    }

    fn outcome(
        &self,
        fighter: &Combatant,
        requested: ActionType,
        action: ActionType,
        incoming: u32,
    ) -> FighterOutcome {
        let config = self.env.config;
        let stamina_spent = config
            .actions
            .profile(action)
            .stamina_cost
            .min(fighter.stamina);
        let stamina_restored = match action.class() {
            ActionClass::Recovery => config.rest_stamina_gain,
            ActionClass::LightStrike
            | ActionClass::PowerStrike
            | ActionClass::Block
            | ActionClass::Dodge => 0.0,
        };

        let damage_taken = incoming.min(fighter.health);
        let health_after = fighter.health - damage_taken;
        let stamina_after =
            ((fighter.stamina - stamina_spent).max(0.0) + stamina_restored).min(fighter.max_stamina);
        let stamina_ratio = if fighter.max_stamina > 0.0 {
            stamina_after / fighter.max_stamina
        } else {
            0.0
        };

        let flash = damage_taken > 0
            && is_flash_knockdown(
                fighter.damage_since_knockdown.saturating_add(damage_taken),
                stamina_ratio,
                config.flash_stamina_ratio,
                config.flash_damage_threshold,
            );

        FighterOutcome {
            fighter: fighter.id,
            requested,
            action,
            stamina_spent,
            stamina_restored,
            damage_dealt: 0,
            damage_taken,
            defense: None,
            knockdown_eligible: health_after == 0 || flash,
        }
    }
}
