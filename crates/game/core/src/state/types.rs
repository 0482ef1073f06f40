use std::fmt;

/// Identifier of one match. Allocated by whoever stores matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two fixed corners of a match.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum FighterId {
    /// The externally controlled fighter.
    Primary,
    /// The fighter driven by the opponent controller.
    Opponent,
}

impl FighterId {
    pub const BOTH: [FighterId; 2] = [FighterId::Primary, FighterId::Opponent];

    pub const fn other(self) -> Self {
        match self {
            FighterId::Primary => FighterId::Opponent,
            FighterId::Opponent => FighterId::Primary,
        }
    }

    /// Stable index used when deriving per-fighter random seeds.
    pub const fn index(self) -> u32 {
        match self {
            FighterId::Primary => 0,
            FighterId::Opponent => 1,
        }
    }
}

/// Coarse lifecycle of a match.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MatchStatus {
    RoundActive,
    BetweenRounds,
    /// Terminal. Ticks after this point change nothing.
    MatchOver,
}

/// Result of a finished match.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Winner {
    Primary,
    Opponent,
    Draw,
}

impl Winner {
    pub const fn fighter(id: FighterId) -> Self {
        match id {
            FighterId::Primary => Winner::Primary,
            FighterId::Opponent => Winner::Opponent,
        }
    }

    /// The winning fighter, or `None` for a draw.
    pub const fn winning_fighter(self) -> Option<FighterId> {
        match self {
            Winner::Primary => Some(FighterId::Primary),
            Winner::Opponent => Some(FighterId::Opponent),
            Winner::Draw => None,
        }
    }
}

/// How a match reached `MatchOver`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Finish {
    /// All rounds went the distance; cards decided it.
    Decision,
    /// A fighter failed to beat the count.
    Knockout,
    /// The per-match knockdown limit was reached.
    TechnicalKnockout,
    /// Both fighters were counted out together.
    DoubleKnockout,
}

/// Down-and-count sub-state.
///
/// `fighter_down` is set iff `is_down`. `second_down` is only used when both
/// fighters went down on the same exchange and is never set without
/// `fighter_down`.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnockdownInfo {
    pub is_down: bool,
    pub fighter_down: Option<FighterId>,
    pub second_down: Option<FighterId>,
    /// Seconds the current count has been running.
    pub count: f64,
}

impl KnockdownInfo {
    pub fn is_fighter_down(&self, id: FighterId) -> bool {
        self.fighter_down == Some(id) || self.second_down == Some(id)
    }

    /// Fighters currently on the canvas, first-recorded first.
    pub fn downed(&self) -> Vec<FighterId> {
        self.fighter_down.into_iter().chain(self.second_down).collect()
    }

    /// Put a fighter down. Starts a new count if nobody was down yet.
    pub(crate) fn put_down(&mut self, id: FighterId) {
        if !self.is_down {
            self.is_down = true;
            self.fighter_down = Some(id);
            self.second_down = None;
            self.count = 0.0;
        } else if self.fighter_down != Some(id) {
            self.second_down = Some(id);
        }
    }

    /// A fighter beat the count. Clears the count once nobody is left down.
    pub(crate) fn stand_up(&mut self, id: FighterId) {
        if self.second_down == Some(id) {
            self.second_down = None;
        } else if self.fighter_down == Some(id) {
            self.fighter_down = self.second_down.take();
        }
        if self.fighter_down.is_none() {
            self.clear();
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_names() {
        assert_eq!(FighterId::Primary.to_string(), "primary");
        assert_eq!("opponent".parse::<FighterId>(), Ok(FighterId::Opponent));
        assert_eq!(MatchStatus::BetweenRounds.to_string(), "between_rounds");
        assert_eq!("match_over".parse::<MatchStatus>(), Ok(MatchStatus::MatchOver));
        assert_eq!(Winner::Draw.to_string(), "draw");
        assert_eq!(Finish::TechnicalKnockout.as_ref(), "technical_knockout");
        assert!("sideways".parse::<MatchStatus>().is_err());
    }

    #[test]
    fn knockdown_slots_follow_invariant() {
        let mut info = KnockdownInfo::default();
        info.put_down(FighterId::Opponent);
        info.put_down(FighterId::Primary);
        assert!(info.is_down);
        assert_eq!(info.downed(), vec![FighterId::Opponent, FighterId::Primary]);

        info.stand_up(FighterId::Opponent);
        assert_eq!(info.fighter_down, Some(FighterId::Primary));
        assert_eq!(info.second_down, None);
        assert!(info.is_down);

        info.stand_up(FighterId::Primary);
        assert!(!info.is_down);
        assert_eq!(info.fighter_down, None);
        assert_eq!(info.count, 0.0);
    }
}
