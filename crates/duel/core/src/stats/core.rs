//! Core Stats - the six combat attributes every combatant carries.
//!
//! - **HP**: Maximum health
//! - **AUTO**: Physical attack power (basic attacks, warrior strikes)
//! - **DEF**: Physical mitigation
//! - **CAP**: Casting stat (spells, heals, tiered class bonuses)
//! - **RESCAP**: Magical mitigation
//! - **SPD**: Speed (turn order, elf agility)

/// Identifies one of the six combat attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum StatKind {
    Hp,
    Auto,
    Def,
    Cap,
    Rescap,
    Spd,
}

/// Stored base stats of a combatant.
///
/// For heroes, `base` already contains the racial and class bonuses that were
/// applied at creation time (see [`BonusBreakdown`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub hp: u32,
    pub auto: u32,
    pub def: u32,
    pub cap: u32,
    pub rescap: u32,
    pub spd: u32,
}

impl BaseStats {
    pub const fn new(hp: u32, auto: u32, def: u32, cap: u32, rescap: u32, spd: u32) -> Self {
        Self {
            hp,
            auto,
            def,
            cap,
            rescap,
            spd,
        }
    }

    pub const fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::Auto => self.auto,
            StatKind::Def => self.def,
            StatKind::Cap => self.cap,
            StatKind::Rescap => self.rescap,
            StatKind::Spd => self.spd,
        }
    }
}

/// Signed flat deltas per stat (racial, class, training, weapon, awakening).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatDelta {
    pub hp: i32,
    pub auto: i32,
    pub def: i32,
    pub cap: i32,
    pub rescap: i32,
    pub spd: i32,
}

impl StatDelta {
    pub const ZERO: Self = Self::new(0, 0, 0, 0, 0, 0);

    pub const fn new(hp: i32, auto: i32, def: i32, cap: i32, rescap: i32, spd: i32) -> Self {
        Self {
            hp,
            auto,
            def,
            cap,
            rescap,
            spd,
        }
    }

    pub const fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::Auto => self.auto,
            StatKind::Def => self.def,
            StatKind::Cap => self.cap,
            StatKind::Rescap => self.rescap,
            StatKind::Spd => self.spd,
        }
    }

    /// Builds a delta by evaluating `f` once per stat.
    pub fn from_fn(mut f: impl FnMut(StatKind) -> i32) -> Self {
        Self {
            hp: f(StatKind::Hp),
            auto: f(StatKind::Auto),
            def: f(StatKind::Def),
            cap: f(StatKind::Cap),
            rescap: f(StatKind::Rescap),
            spd: f(StatKind::Spd),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Component-wise sum.
    pub const fn plus(self, other: Self) -> Self {
        Self {
            hp: self.hp + other.hp,
            auto: self.auto + other.auto,
            def: self.def + other.def,
            cap: self.cap + other.cap,
            rescap: self.rescap + other.rescap,
            spd: self.spd + other.spd,
        }
    }
}

/// Integer percentages per stat (20 = +20%).
///
/// Same layout as [`StatDelta`], kept as a distinct type so a percentage can
/// never be applied as a flat amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatPercent {
    pub hp: i32,
    pub auto: i32,
    pub def: i32,
    pub cap: i32,
    pub rescap: i32,
    pub spd: i32,
}

impl StatPercent {
    pub const ZERO: Self = Self::new(0, 0, 0, 0, 0, 0);

    pub const fn new(hp: i32, auto: i32, def: i32, cap: i32, rescap: i32, spd: i32) -> Self {
        Self {
            hp,
            auto,
            def,
            cap,
            rescap,
            spd,
        }
    }

    /// Same percentage on every stat.
    pub const fn uniform(percent: i32) -> Self {
        Self::new(percent, percent, percent, percent, percent, percent)
    }

    pub const fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::Auto => self.auto,
            StatKind::Def => self.def,
            StatKind::Cap => self.cap,
            StatKind::Rescap => self.rescap,
            StatKind::Spd => self.spd,
        }
    }
}

/// Informational decomposition of a hero's stored `base` stats.
///
/// `base = roll + race + class` at creation time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BonusBreakdown {
    pub race: StatDelta,
    pub class: StatDelta,
}
