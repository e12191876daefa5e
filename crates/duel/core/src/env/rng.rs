//! RNG oracle for deterministic random number generation.
//!
//! The engine never owns a mutable generator. Every draw derives its own seed
//! from the match seed and a roll counter through [`compute_seed`], so a match
//! replays byte for byte from `(inputs, seed)` and several matches can share
//! one oracle across threads.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn roll_unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / 4_294_967_296.0
    }

    /// Bernoulli draw: true with probability `chance`.
    ///
    /// Certain and impossible outcomes never depend on the generator.
    fn chance(&self, seed: u64, chance: f64) -> bool {
        if chance >= 1.0 {
            return true;
        }
        if chance <= 0.0 {
            return false;
        }
        self.roll_unit(seed) < chance
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state, one multiply, one
/// xorshift and one rotate per draw.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Independent roll streams within one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Crit = 0,
    Stun = 1,
}

/// Compute a deterministic seed for one draw.
///
/// * `match_seed` - seed the match was started with
/// * `nonce` - roll counter, incremented for every draw of the match
/// * `side` - 1 or 2, the side the draw is made for
/// * `context` - which kind of roll (see [`RollContext`])
pub fn compute_seed(match_seed: u64, nonce: u64, side: u32, context: RollContext) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = match_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(side).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context as u32).wrapping_mul(0x85ebca6b);

    // final avalanche
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
    fn roll_unit_stays_in_half_open_range() {
        let rng = PcgRng;
        for nonce in 0..2_000 {
            let value = rng.roll_unit(compute_seed(7, nonce, 1, RollContext::Crit));
            assert!((0.0..1.0).contains(&value), "{value}");
        }
    }

    #[test]
    fn certain_and_impossible_chances_ignore_the_draw() {
        let rng = PcgRng;
        for seed in 0..100 {
            assert!(rng.chance(seed, 1.0));
            assert!(!rng.chance(seed, 0.0));
        }
    }

    #[test]
    fn seed_differs_per_side_and_context() {
        let base = compute_seed(99, 3, 1, RollContext::Crit);
        assert_ne!(base, compute_seed(99, 3, 2, RollContext::Crit));
        assert_ne!(base, compute_seed(99, 3, 1, RollContext::Stun));
        assert_ne!(base, compute_seed(99, 4, 1, RollContext::Crit));
    }

    #[test]
    fn chance_frequency_is_roughly_uniform() {
        let rng = PcgRng;
        let hits = (0..10_000)
            .filter(|&nonce| rng.chance(compute_seed(1, nonce, 1, RollContext::Crit), 0.25))
            .count();
        assert!((2_000..3_000).contains(&hits), "{hits}");
    }
}
