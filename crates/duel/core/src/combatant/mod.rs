//! Combatant records: the immutable input of a match.
//!
//! A [`Combatant`] is plain data. Every weapon or passive it references has
//! already been resolved by the caller (see [`record::CombatantRecord`]), so
//! the engine never reaches into a catalog or store while resolving.

mod boss;
mod record;
mod validation;

pub use boss::{BossAbility, BossKit};
pub use record::{CombatantRecord, PassiveRef};
pub use validation::ValidationError;

use crate::env::TablesOracle;
use crate::stats::{BaseStats, BonusBreakdown, StatDelta, StatPercent};

/// Playable races.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Race {
    Humain,
    Elfe,
    Orc,
    Nain,
    Dragonkin,
    #[strum(to_string = "Mort-vivant")]
    MortVivant,
    Lycan,
    Sylvari,
}

/// Playable classes. Each owns exactly one cooldown-gated special.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Class {
    Guerrier,
    Voleur,
    Paladin,
    #[strum(to_string = "Prêtre")]
    Pretre,
    Archer,
    Mage,
    #[strum(to_string = "Démoniste")]
    Demoniste,
    Masochiste,
}

/// What kind of opponent a combatant is.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Archetype {
    /// Player character with a race and a class.
    Hero { race: Race, class: Class },
    /// Dungeon boss or labyrinth enemy driven by its ability kit.
    Boss(BossKit),
}

/// Equipped weapon, already resolved from the weapon table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub id: String,
    pub name: String,
    /// Flat stat deltas granted while equipped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: StatDelta,
    /// Multiplies the critical damage multiplier.
    #[cfg_attr(feature = "serde", serde(default = "Weapon::default_crit_multiplier"))]
    pub crit_multiplier: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: Option<WeaponPassive>,
}

impl Weapon {
    pub fn new(id: impl Into<String>, name: impl Into<String>, stats: StatDelta) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stats,
            crit_multiplier: Self::default_crit_multiplier(),
            passive: None,
        }
    }

    pub fn with_crit_multiplier(mut self, multiplier: f64) -> Self {
        self.crit_multiplier = multiplier;
        self
    }

    pub fn with_passive(mut self, passive: WeaponPassive) -> Self {
        self.passive = Some(passive);
        self
    }

    pub const fn default_crit_multiplier() -> f64 {
        1.0
    }
}

/// Weapon passive: either an on-equip conditional stat bonus or an on-hit effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponPassive {
    /// Percent bonus while wielded by the given class.
    ClassAffinity { class: Class, bonus: StatPercent },
    /// Percent bonus while wielded by the given race.
    RaceAffinity { race: Race, bonus: StatPercent },
    /// Landed basic attacks add bleed stacks.
    Bleed { stacks: u32 },
    /// Landed basic attacks may stun.
    Stun { chance: f64, turns: u32 },
}

impl WeaponPassive {
    /// Stat bonus this passive grants to the wielder, if its condition holds.
    pub fn conditional_bonus(&self, archetype: &Archetype) -> Option<StatPercent> {
        match (self, archetype) {
            (Self::ClassAffinity { class, bonus }, Archetype::Hero { class: wielder, .. })
                if class == wielder =>
            {
                Some(*bonus)
            }
            (Self::RaceAffinity { race, bonus }, Archetype::Hero { race: wielder, .. })
                if race == wielder =>
            {
                Some(*bonus)
            }
            _ => None,
        }
    }
}

/// Mage tower passive kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveKind {
    /// Match-start shield worth `magnitude × maxHP`.
    #[strum(to_string = "Bouclier arcanique")]
    ArcaneShield,
    /// Heals `magnitude ×` HP damage dealt by own direct hits.
    #[strum(to_string = "Vampirisme")]
    Lifesteal,
    /// `+magnitude` critical chance.
    #[strum(to_string = "Concentration")]
    Focus,
    /// Critical multiplier `× (1 + magnitude)`.
    #[strum(to_string = "Fureur")]
    Fury,
}

/// Resolved mage tower passive.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MageTowerPassive {
    pub id: String,
    pub kind: PassiveKind,
    pub level: u8,
    /// Per-level value × level.
    pub magnitude: f64,
}

impl MageTowerPassive {
    pub fn new(id: impl Into<String>, kind: PassiveKind, level: u8, magnitude: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            level,
            magnitude,
        }
    }

    /// Magnitude if this passive is of the given kind, 0 otherwise.
    pub fn magnitude_of(passive: Option<&Self>, kind: PassiveKind) -> f64 {
        passive
            .filter(|p| p.kind == kind)
            .map_or(0.0, |p| p.magnitude)
    }
}

/// One side of a match, fully resolved into plain data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    pub archetype: Archetype,
    #[cfg_attr(feature = "serde", serde(default = "Combatant::default_level"))]
    pub level: u32,
    pub base: BaseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: BonusBreakdown,
    #[cfg_attr(feature = "serde", serde(default))]
    pub training: StatDelta,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<Weapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: Option<MageTowerPassive>,
}

impl Combatant {
    /// Creates a hero whose `base` carries no racial/class decomposition.
    pub fn hero(name: impl Into<String>, race: Race, class: Class, base: BaseStats) -> Self {
        Self::new(name, Archetype::Hero { race, class }, base)
    }

    /// Creates a boss driven by the given kit.
    pub fn boss(name: impl Into<String>, kit: BossKit, base: BaseStats) -> Self {
        Self::new(name, Archetype::Boss(kit), base)
    }

    fn new(name: impl Into<String>, archetype: Archetype, base: BaseStats) -> Self {
        Self {
            name: name.into(),
            archetype,
            level: Self::default_level(),
            base,
            bonuses: BonusBreakdown::default(),
            training: StatDelta::ZERO,
            weapon: None,
            passive: None,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_bonuses(mut self, bonuses: BonusBreakdown) -> Self {
        self.bonuses = bonuses;
        self
    }

    pub fn with_training(mut self, training: StatDelta) -> Self {
        self.training = training;
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_passive(mut self, passive: MageTowerPassive) -> Self {
        self.passive = Some(passive);
        self
    }

    pub const fn default_level() -> u32 {
        1
    }

    pub fn race(&self) -> Option<Race> {
        match &self.archetype {
            Archetype::Hero { race, .. } => Some(*race),
            Archetype::Boss(_) => None,
        }
    }

    pub fn class(&self) -> Option<Class> {
        match &self.archetype {
            Archetype::Hero { class, .. } => Some(*class),
            Archetype::Boss(_) => None,
        }
    }

    pub fn boss_kit(&self) -> Option<&BossKit> {
        match &self.archetype {
            Archetype::Boss(kit) => Some(kit),
            Archetype::Hero { .. } => None,
        }
    }

    /// Whether the race awakening is unlocked at this combatant's level.
    pub fn is_awakened(&self, tables: &(impl TablesOracle + ?Sized)) -> bool {
        self.race()
            .is_some_and(|race| self.level >= tables.race(race).awakening.level)
    }

    /// Short identity used in the intro banner ("Elfe Voleur", "Boss").
    pub fn title(&self) -> String {
        match &self.archetype {
            Archetype::Hero { race, class } => format!("{race} {class}"),
            Archetype::Boss(_) => "Boss".to_string(),
        }
    }
}
