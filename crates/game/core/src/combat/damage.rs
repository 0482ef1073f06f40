//! Damage and knockdown-threshold formulas.

/// How the defender met an incoming strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Defense {
    /// Nothing in the way; full power lands.
    Open,
    /// Gloves up; damage scaled by the block factor.
    Blocked,
    /// Slipped; nothing lands.
    Dodged,
    /// Tried to slip and failed; full power lands.
    DodgeFailed,
}

/// Damage delivered by a strike of `power` against the given defense.
///
/// ```text
/// Open | DodgeFailed => power
/// Blocked            => round(power * block_factor)
/// Dodged             => 0
/// ```
pub fn strike_damage(power: u32, defense: Defense, block_factor: f64) -> u32 {
    match defense {
        Defense::Open | Defense::DodgeFailed => power,
        Defense::Blocked => (f64::from(power) * block_factor.clamp(0.0, 1.0)).round() as u32,
        Defense::Dodged => 0,
    }
}

/// Damage since the last knockdown needed to drop a fighter on the flash path.
///
/// A fresh fighter absorbs the full base threshold; an empty tank halves it.
///
/// ```text
/// threshold = base * (0.5 + 0.5 * stamina_ratio)
/// ```
pub fn flash_threshold(base: u32, stamina_ratio: f64) -> f64 {
    f64::from(base) * (0.5 + 0.5 * stamina_ratio.clamp(0.0, 1.0))
}

/// Flash-knockdown test: nearly gassed and hurt past the fatigue-weighted
/// threshold.
pub fn is_flash_knockdown(
    damage_since_knockdown: u32,
    stamina_ratio: f64,
    flash_stamina_ratio: f64,
    base_threshold: u32,
) -> bool {
    stamina_ratio <= flash_stamina_ratio
        && f64::from(damage_since_knockdown) > flash_threshold(base_threshold, stamina_ratio)
}
