//! Injected randomness for combat resolution.
//!
//! The core never reaches for ambient entropy. Every random decision (today:
//! whether a dodge slips the incoming punch) is drawn from an [`RngOracle`]
//! keyed by a seed derived from the match seed, the tick nonce, the fighter
//! rolling and the purpose of the roll. Replaying a match with the same seed
//! and the same action sequence therefore reproduces every roll.

/// Source of deterministic pseudo-random numbers.
///
/// Implementations are stateless: the same seed always yields the same value.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Returns true with the given percent chance (clamped to 0..=100).
    fn chance(&self, seed: u64, percent: u32) -> bool {
        self.roll_d100(seed) <= percent.min(100)
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32(seed) % span)
    }
}

/// PCG-XSH-RR generator: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Purpose of a roll within one tick.
///
/// Two rolls made by the same fighter on the same tick must use different
/// contexts or they would be perfectly correlated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    /// Defender's dodge attempt against an incoming strike.
    Dodge = 0,
    /// Seed derivation for a freshly created match.
    MatchSeed = 1,
}

/// Derive the seed for one roll.
///
/// * `match_seed` - set once when the match is created
/// * `nonce` - tick sequence number (increments once per mutating tick)
/// * `fighter` - index of the fighter making the roll
/// * `context` - which roll within the tick
pub fn compute_seed(match_seed: u64, nonce: u64, fighter: u32, context: RollContext) -> u64 {
    // SplitMix64 / FxHash style multipliers followed by a murmur finalizer
    let mut hash = match_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (fighter as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u32 as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn d100_stays_in_bounds() {
        let rng = PcgRng;
        for seed in 0..2_000u64 {
            let roll = rng.roll_d100(compute_seed(7, seed, 1, RollContext::Dodge));
            assert!((1..=100).contains(&roll));
        }
    }

    #[test]
    fn chance_extremes() {
        let rng = PcgRng;
        for seed in 0..200u64 {
            assert!(rng.chance(seed, 100));
            assert!(!rng.chance(seed, 0));
        }
    }

    #[test]
    fn seeds_differ_by_fighter_and_context() {
        let a = compute_seed(1, 5, 0, RollContext::Dodge);
        let b = compute_seed(1, 5, 1, RollContext::Dodge);
        let c = compute_seed(1, 5, 0, RollContext::MatchSeed);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, compute_seed(1, 5, 0, RollContext::Dodge));
    }

    #[test]
    fn dodge_rate_tracks_percent() {
        let rng = PcgRng;
        let hits = (0..10_000u64)
            .filter(|n| rng.chance(compute_seed(99, *n, 1, RollContext::Dodge), 50))
            .count();
        assert!((4_000..6_000).contains(&hits), "got {hits}");
    }
}
