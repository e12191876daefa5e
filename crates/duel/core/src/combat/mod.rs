//! Combat rules: damage math, status effects and abilities.
//!
//! Rules operate on two [`CombatantState`]s through an [`Exchange`], which
//! lends them the balance tables, the match dice and the log lines of the
//! step being written.

pub mod abilities;
pub mod boss;
pub mod crit;
pub mod damage;
pub mod race;
pub mod state;
pub mod status;

pub use abilities::AbilityResolver;
pub use boss::BossResolver;
pub use damage::{DamageKind, DamageRoll, magical_damage, physical_damage};
pub use state::{Bleed, BleedTick, CombatFlags, CombatantState, Cooldown};
pub use status::{Impact, StatusEffects};

use crate::env::{RngOracle, RollContext, TablesOracle, compute_seed};
use crate::replay::Side;

/// Seeded draws for one match.
///
/// Every draw consumes one nonce, so the sequence of rolls (not wall time or
/// call sites) determines the outcome.
pub struct Dice<'a> {
    rng: &'a dyn RngOracle,
    seed: u64,
    nonce: u64,
}

impl<'a> Dice<'a> {
    pub fn new(rng: &'a dyn RngOracle, seed: u64) -> Self {
        Self {
            rng,
            seed,
            nonce: 0,
        }
    }

    /// One Bernoulli draw for `side`.
    pub fn roll(&mut self, side: Side, context: RollContext, chance: f64) -> bool {
        let seed = compute_seed(self.seed, self.nonce, u32::from(side.number()), context);
        self.nonce += 1;
        self.rng.chance(seed, chance)
    }

    /// Number of draws made so far.
    pub fn rolls(&self) -> u64 {
        self.nonce
    }
}

/// What a rule needs besides the two combatants.
pub struct Exchange<'e, 'd> {
    pub tables: &'e dyn TablesOracle,
    pub dice: &'d mut Dice<'e>,
    pub lines: &'d mut Vec<String>,
}

impl<'e, 'd> Exchange<'e, 'd> {
    pub fn new(
        tables: &'e dyn TablesOracle,
        dice: &'d mut Dice<'e>,
        lines: &'d mut Vec<String>,
    ) -> Self {
        Self {
            tables,
            dice,
            lines,
        }
    }

    pub fn say(&mut self, line: String) {
        self.lines.push(line);
    }
}
