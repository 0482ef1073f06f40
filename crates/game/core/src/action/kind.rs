//! The closed action roster and its behavioral classes.

/// Every action a fighter can take on a tick.
///
/// The set is closed: symbolic names crossing the core boundary are parsed
/// with [`str::parse`] and anything outside the roster is rejected rather
/// than mapped onto a default variant.
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
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionType {
    /// Quick straight punch. Light damage, cheap.
    Jab,
    /// Looping power punch. Heavy damage, expensive.
    Hook,
    /// Rising power punch. Heaviest damage, most expensive.
    Uppercut,
    /// Gloves up. Cuts incoming damage, costs nothing.
    Block,
    /// Slip the punch. May void incoming damage, small cost.
    Dodge,
    /// Catch a breath. Restores stamina, no offense.
    Rest,
}

/// Behavioral class of an action.
///
/// Combat rules are written against classes so the roster can grow without
/// touching the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionClass {
    LightStrike,
    PowerStrike,
    Block,
    Dodge,
    Recovery,
}

impl ActionType {
    pub const fn class(self) -> ActionClass {
        match self {
            ActionType::Jab => ActionClass::LightStrike,
            ActionType::Hook | ActionType::Uppercut => ActionClass::PowerStrike,
            ActionType::Block => ActionClass::Block,
            ActionType::Dodge => ActionClass::Dodge,
            ActionType::Rest => ActionClass::Recovery,
        }
    }

    /// True for actions that can deal damage.
    pub const fn is_strike(self) -> bool {
        matches!(
            self.class(),
            ActionClass::LightStrike | ActionClass::PowerStrike
        )
    }

    pub const fn is_power_strike(self) -> bool {
        matches!(self.class(), ActionClass::PowerStrike)
    }

    /// Symbolic name used at the core boundary.
    pub fn name(self) -> &'static str {
        self.into()
    }
}
