//! Damage formulas.
//!
//! Damage stays a float from mitigation to the last multiplier and is rounded
//! exactly once, half away from zero, in [`DamageRoll::finish`].

/// Which mitigation a hit is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageKind {
    /// Power vs DEF.
    Physical,
    /// Power vs RESCAP.
    Magical,
    /// Ignores mitigation.
    True,
}

/// Canonical share of mitigation subtracted from power.
pub const MITIGATION_FACTOR: f64 = 0.5;

/// `max(1, round(attack − 0.5 × defense))`
pub fn physical_damage(attack: u32, defense: u32) -> u32 {
    DamageRoll::mitigated(
        DamageKind::Physical,
        f64::from(attack),
        f64::from(defense),
        MITIGATION_FACTOR,
    )
    .finish()
}

/// `max(1, round(cap − 0.5 × rescap))`
pub fn magical_damage(cap: u32, rescap: u32) -> u32 {
    DamageRoll::mitigated(
        DamageKind::Magical,
        f64::from(cap),
        f64::from(rescap),
        MITIGATION_FACTOR,
    )
    .finish()
}

/// Unrounded damage travelling through its multipliers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRoll {
    kind: DamageKind,
    value: f64,
    crit: bool,
}

impl DamageRoll {
    /// Power reduced by `factor × mitigation`, floored at 1 before any multiplier.
    pub fn mitigated(kind: DamageKind, power: f64, mitigation: f64, factor: f64) -> Self {
        Self {
            kind,
            value: (power - factor * mitigation).max(1.0),
            crit: false,
        }
    }

    /// Damage that skips mitigation entirely.
    pub fn raw(value: f64) -> Self {
        Self {
            kind: DamageKind::True,
            value: value.max(1.0),
            crit: false,
        }
    }

    #[must_use]
    pub fn scaled(mut self, multiplier: f64) -> Self {
        self.value *= multiplier;
        self
    }

    #[must_use]
    pub fn critical(mut self, multiplier: f64) -> Self {
        self.crit = true;
        self.value *= multiplier;
        self
    }

    pub const fn kind(&self) -> DamageKind {
        self.kind
    }

    pub const fn is_crit(&self) -> bool {
        self.crit
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Rounds half away from zero, never below 1.
    pub fn finish(self) -> u32 {
        round_amount(self.value).max(1)
    }
}

/// Rounds a non-negative amount half away from zero into `u32`.
pub fn round_amount(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    // `as` saturates at u32::MAX
    value.round() as u32
}
