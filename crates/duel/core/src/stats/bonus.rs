//! Per-layer bonus accumulation.
//!
//! Each StatResolver layer folds its contributions as
//! `(value + Σflat) × (1 + Σpercent / 100)`, rounds half away from zero
//! exactly once, and leaves clamping to the final layer.

/// One contribution to a stat inside a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Added to the incoming value.
    Flat(i32),
    /// Whole percent, summed with the other percentages of the layer.
    Increased(i32),
}

/// Bonuses of a single layer, kept as running sums.
///
/// ```
/// # use duel_core::stats::bonus::BonusStack;
/// // (10 + 5) × 1.35 = 20.25
/// let value = BonusStack::new().flat(5).increased(20).increased(15).apply(10, 0, 100);
/// assert_eq!(value, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    flat: i64,
    percent: i64,
}

impl BonusStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: Bonus) {
        match bonus {
            Bonus::Flat(value) => self.flat += i64::from(value),
            Bonus::Increased(percent) => self.percent += i64::from(percent),
        }
    }

    pub fn flat(mut self, value: i32) -> Self {
        self.add(Bonus::Flat(value));
        self
    }

    pub fn increased(mut self, percent: i32) -> Self {
        self.add(Bonus::Increased(percent));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.flat == 0 && self.percent == 0
    }

    /// Folds the layer into `base`, then clamps to `[min, max]`.
    pub fn apply(&self, base: i32, min: i32, max: i32) -> i32 {
        let mut value = (i64::from(base) + self.flat) as f64;
        if self.percent != 0 {
            value *= (100 + self.percent) as f64 / 100.0;
        }
        let rounded = value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32;
        rounded.clamp(min, max)
    }

    /// Intermediate layers stay unclamped; negative values are carried forward.
    pub fn apply_unclamped(&self, base: i32) -> i32 {
        self.apply(base, i32::MIN, i32::MAX)
    }
}

/// Range a final stat is clamped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// A combatant always keeps one hit point.
    pub const HP: Self = Self { min: 1, max: 99_999 };

    pub const COMBAT: Self = Self { min: 0, max: 99_999 };

    pub fn clamp(self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_is_identity() {
        assert!(BonusStack::new().is_empty());
        assert_eq!(BonusStack::new().apply(42, 0, 100), 42);
    }

    #[test]
    fn half_rounds_away_from_zero() {
        // 25 × 1.10 = 27.5
        assert_eq!(BonusStack::new().increased(10).apply_unclamped(25), 28);
        assert_eq!(BonusStack::new().increased(10).apply_unclamped(-25), -28);
    }

    #[test]
    fn percentages_are_summed_not_chained() {
        // 10 × 2.0, where chaining would give 10 × 1.5 × 1.5 = 22.5
        assert_eq!(BonusStack::new().increased(50).increased(50).apply_unclamped(10), 20);
    }

    #[test]
    fn final_bounds_clamp() {
        assert_eq!(StatBounds::HP.clamp(-40), 1);
        assert_eq!(StatBounds::COMBAT.clamp(-3), 0);
        assert_eq!(BonusStack::new().flat(200_000).apply(1, 0, 99_999), 99_999);
    }
}
