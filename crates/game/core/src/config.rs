use crate::env::ActionTable;
use crate::error::MatchError;

/// Match tuning constants.
///
/// Every number the rules depend on lives here so tests can pin scenarios
/// with literal values and content files can rebalance without code changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    /// Length of a round in seconds.
    pub round_duration: f64,
    /// Length of the rest period between rounds in seconds.
    pub between_rounds_duration: f64,

    pub max_health: u32,
    pub max_stamina: f64,

    /// Passive stamina regained per second while standing in a round.
    pub stamina_regen_rate: f64,
    /// Stamina regained per second in the corner between rounds.
    pub corner_recovery_rate: f64,
    /// Stamina restored by one `rest` action.
    pub rest_stamina_gain: f64,

    /// Multiplier applied to damage taken while blocking.
    pub block_damage_factor: f64,
    /// Chance (0-100) that a dodge voids an incoming strike.
    pub dodge_success_percent: u32,

    /// A downed fighter rises once health climbs above this value.
    pub standing_health: u32,
    /// Health regained per second while down.
    pub down_health_regen_rate: f64,
    /// Earliest count at which a downed fighter may rise.
    pub min_down_count: f64,
    /// Count at which a fighter still down is counted out.
    pub count_limit: f64,
    /// Knockdowns per fighter per match that stop the fight.
    pub max_knockdowns: u32,

    /// Stamina ratio at or below which the flash-knockdown path is live.
    pub flash_stamina_ratio: f64,
    /// Damage since the last knockdown that drops a fully fresh fighter on
    /// the flash path. Scaled down by fatigue.
    pub flash_damage_threshold: u32,

    /// Points awarded to the winner of a round.
    pub round_winner_points: u32,
    /// Floor for any round score.
    pub min_round_points: u32,

    /// Number of event-log lines surfaced to callers.
    pub event_window: usize,

    pub actions: ActionTable,
    pub opponent: OpponentTuning,
}

/// Thresholds steering the opponent controller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OpponentTuning {
    /// Own stamina ratio at or above which power punches are favored.
    pub aggressive_stamina_ratio: f64,
    /// Foe health ratio at or below which the controller goes for the finish.
    pub finishing_health_ratio: f64,
    /// Own health ratio at or below which the controller turtles.
    pub defensive_health_ratio: f64,
    /// Own stamina ratio at or below which the controller turtles.
    pub defensive_stamina_ratio: f64,
}

impl Default for OpponentTuning {
    fn default() -> Self {
        Self {
            aggressive_stamina_ratio: 0.6,
            finishing_health_ratio: 0.35,
            defensive_health_ratio: 0.3,
            defensive_stamina_ratio: 0.25,
        }
    }
}

impl MatchConfig {
    pub const DEFAULT_MAX_ROUNDS: u32 = 3;
    pub const DEFAULT_ROUND_DURATION: f64 = 180.0;
    pub const DEFAULT_BETWEEN_ROUNDS_DURATION: f64 = 60.0;
    pub const DEFAULT_COUNT_LIMIT: f64 = 10.0;
    pub const DEFAULT_EVENT_WINDOW: usize = 10;

    pub fn new() -> Self {
        Self {
            round_duration: Self::DEFAULT_ROUND_DURATION,
            between_rounds_duration: Self::DEFAULT_BETWEEN_ROUNDS_DURATION,
            max_health: 100,
            max_stamina: 100.0,
            stamina_regen_rate: 2.0,
            corner_recovery_rate: 1.5,
            rest_stamina_gain: 8.0,
            block_damage_factor: 0.25,
            dodge_success_percent: 50,
            standing_health: 10,
            down_health_regen_rate: 1.5,
            min_down_count: 3.0,
            count_limit: Self::DEFAULT_COUNT_LIMIT,
            max_knockdowns: 3,
            flash_stamina_ratio: 0.1,
            flash_damage_threshold: 40,
            round_winner_points: 10,
            min_round_points: 7,
            event_window: Self::DEFAULT_EVENT_WINDOW,
            actions: ActionTable::default(),
            opponent: OpponentTuning::default(),
        }
    }

    /// Checks every constant for range and consistency.
    pub fn validate(&self) -> Result<(), MatchError> {
        positive("round_duration", self.round_duration)?;
        positive("between_rounds_duration", self.between_rounds_duration)?;
        positive("max_stamina", self.max_stamina)?;
        positive("count_limit", self.count_limit)?;

        non_negative("stamina_regen_rate", self.stamina_regen_rate)?;
        non_negative("corner_recovery_rate", self.corner_recovery_rate)?;
        non_negative("rest_stamina_gain", self.rest_stamina_gain)?;
        non_negative("down_health_regen_rate", self.down_health_regen_rate)?;
        non_negative("min_down_count", self.min_down_count)?;

        ratio("block_damage_factor", self.block_damage_factor)?;
        ratio("flash_stamina_ratio", self.flash_stamina_ratio)?;
        ratio(
            "opponent.aggressive_stamina_ratio",
            self.opponent.aggressive_stamina_ratio,
        )?;
        ratio(
            "opponent.finishing_health_ratio",
            self.opponent.finishing_health_ratio,
        )?;
        ratio(
            "opponent.defensive_health_ratio",
            self.opponent.defensive_health_ratio,
        )?;
        ratio(
            "opponent.defensive_stamina_ratio",
            self.opponent.defensive_stamina_ratio,
        )?;

        if self.max_health == 0 {
            return Err(MatchError::config("max_health", "must be positive"));
        }
        if self.standing_health >= self.max_health {
            return Err(MatchError::config(
                "standing_health",
                "must be below max_health",
            ));
        }
        if self.min_down_count >= self.count_limit {
            return Err(MatchError::config(
                "min_down_count",
                "must be below count_limit",
            ));
        }
        if self.max_knockdowns == 0 {
            return Err(MatchError::config("max_knockdowns", "must be positive"));
        }
        if self.dodge_success_percent > 100 {
            return Err(MatchError::config(
                "dodge_success_percent",
                "must be at most 100",
            ));
        }
        if self.round_winner_points == 0 {
            return Err(MatchError::config(
                "round_winner_points",
                "must be positive",
            ));
        }
        if self.min_round_points > self.round_winner_points {
            return Err(MatchError::config(
                "min_round_points",
                "must not exceed round_winner_points",
            ));
        }
        if self.event_window == 0 {
            return Err(MatchError::config("event_window", "must be positive"));
        }

        let a = &self.actions;
        for (field, profile) in [
            ("actions.jab", a.jab),
            ("actions.hook", a.hook),
            ("actions.uppercut", a.uppercut),
            ("actions.block", a.block),
            ("actions.dodge", a.dodge),
            ("actions.rest", a.rest),
        ] {
            non_negative(field, profile.stamina_cost)?;
        }
        if a.block.stamina_cost != 0.0 {
            return Err(MatchError::config(
                "actions.block.stamina_cost",
                "must be zero",
            ));
        }

        Ok(())
    }

    /// Validates a requested round count against this configuration.
    pub fn validate_rounds(&self, max_rounds: u32) -> Result<(), MatchError> {
        if max_rounds == 0 {
            return Err(MatchError::config("max_rounds", "must be positive"));
        }
        self.validate()
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), MatchError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MatchError::config(field, "must be a positive finite number"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), MatchError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MatchError::config(
            field,
            "must be a non-negative finite number",
        ))
    }
}

fn ratio(field: &'static str, value: f64) -> Result<(), MatchError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MatchError::config(field, "must be within 0.0..=1.0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(MatchConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_timers() {
        let mut config = MatchConfig::default();
        config.round_duration = 0.0;
        assert!(matches!(
            config.validate(),
            Err(MatchError::InvalidConfiguration {
                field: "round_duration",
                ..
            })
        ));

        let mut config = MatchConfig::default();
        config.between_rounds_duration = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_rounds() {
        assert!(matches!(
            MatchConfig::default().validate_rounds(0),
            Err(MatchError::InvalidConfiguration {
                field: "max_rounds",
                ..
            })
        ));
        assert_eq!(MatchConfig::default().validate_rounds(12), Ok(()));
    }

    #[test]
    fn rejects_inconsistent_scoring() {
        let mut config = MatchConfig::default();
        config.min_round_points = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn block_must_stay_free() {
        let mut config = MatchConfig::default();
        config.actions.block.stamina_cost = 2.0;
        assert_eq!(
            config.validate(),
            Err(MatchError::InvalidConfiguration {
                field: "actions.block.stamina_cost",
                reason: "must be zero",
            })
        );
    }
}
