//! Balance tables: racial and class bonuses, ability tuning, combat constants.
//!
//! Rules read every number from here, never from literals, so a TOML file can
//! rebalance the game without touching the engine. [`BalanceTables::default`]
//! holds the canonical values shipped with the game.

use crate::combatant::{Class, Race};
use crate::stats::{StatDelta, StatPercent};

/// Oracle providing balance tables.
///
/// Defines numbers only. Entity data (weapons, passives) comes from
/// [`CatalogOracle`](super::CatalogOracle).
pub trait TablesOracle: Send + Sync {
    fn races(&self) -> &RaceTable;
    fn classes(&self) -> &ClassTable;
    fn race_passives(&self) -> &RacePassiveTuning;
    fn combat(&self) -> &CombatRules;

    fn race(&self, race: Race) -> &RaceProfile {
        self.races().get(race)
    }
}

/// Complete balance table set.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceTables {
    pub races: RaceTable,
    pub classes: ClassTable,
    pub race_passives: RacePassiveTuning,
    pub combat: CombatRules,
}

impl TablesOracle for BalanceTables {
    fn races(&self) -> &RaceTable {
        &self.races
    }

    fn classes(&self) -> &ClassTable {
        &self.classes
    }

    fn race_passives(&self) -> &RacePassiveTuning {
        &self.race_passives
    }

    fn combat(&self) -> &CombatRules {
        &self.combat
    }
}

// ============================================================================
// Races
// ============================================================================

/// Flat racial bonus plus the awakening unlocked at `awakening.level`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RaceProfile {
    pub flat: StatDelta,
    pub awakening: Awakening,
}

impl RaceProfile {
    const fn new(flat: StatDelta, awakening: Awakening) -> Self {
        Self { flat, awakening }
    }
}

/// Race-specific permanent upgrade: flat deltas, then percent transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Awakening {
    pub level: u32,
    pub flat: StatDelta,
    pub percent: StatPercent,
}

impl Awakening {
    pub const DEFAULT_LEVEL: u32 = 10;

    const fn new(flat: StatDelta, percent: StatPercent) -> Self {
        Self {
            level: Self::DEFAULT_LEVEL,
            flat,
            percent,
        }
    }
}

impl Default for Awakening {
    fn default() -> Self {
        Self::new(StatDelta::ZERO, StatPercent::ZERO)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RaceTable {
    pub humain: RaceProfile,
    pub elfe: RaceProfile,
    pub orc: RaceProfile,
    pub nain: RaceProfile,
    pub dragonkin: RaceProfile,
    pub mort_vivant: RaceProfile,
    pub lycan: RaceProfile,
    pub sylvari: RaceProfile,
}

impl RaceTable {
    pub const fn get(&self, race: Race) -> &RaceProfile {
        match race {
            Race::Humain => &self.humain,
            Race::Elfe => &self.elfe,
            Race::Orc => &self.orc,
            Race::Nain => &self.nain,
            Race::Dragonkin => &self.dragonkin,
            Race::MortVivant => &self.mort_vivant,
            Race::Lycan => &self.lycan,
            Race::Sylvari => &self.sylvari,
        }
    }
}

impl Default for RaceTable {
    fn default() -> Self {
        Self {
            humain: RaceProfile::new(
                StatDelta::new(15, 3, 3, 3, 3, 2),
                Awakening::new(StatDelta::new(10, 2, 2, 2, 2, 1), StatPercent::ZERO),
            ),
            elfe: RaceProfile::new(
                StatDelta::new(0, 2, 0, 3, 2, 5),
                Awakening::new(StatDelta::ZERO, StatPercent::new(0, 5, 0, 0, 0, 10)),
            ),
            orc: RaceProfile::new(
                StatDelta::new(15, 5, 2, 0, 0, 0),
                Awakening::new(StatDelta::ZERO, StatPercent::new(5, 10, 0, 0, 0, 0)),
            ),
            nain: RaceProfile::new(
                StatDelta::new(20, 0, 5, 0, 3, -2),
                Awakening::new(StatDelta::ZERO, StatPercent::new(0, 0, 10, 0, 10, 0)),
            ),
            dragonkin: RaceProfile::new(
                StatDelta::new(10, 0, 2, 5, 3, 0),
                Awakening::new(StatDelta::ZERO, StatPercent::new(0, 0, 0, 10, 0, 0)),
            ),
            mort_vivant: RaceProfile::new(
                StatDelta::new(5, 2, 2, 2, 2, 0),
                Awakening::new(StatDelta::new(0, 0, 2, 0, 2, 0), StatPercent::ZERO),
            ),
            lycan: RaceProfile::new(
                StatDelta::new(5, 4, 1, 0, 0, 3),
                Awakening::new(StatDelta::ZERO, StatPercent::new(0, 5, 0, 0, 0, 5)),
            ),
            sylvari: RaceProfile::new(
                StatDelta::new(10, 0, 2, 3, 3, 0),
                Awakening::new(StatDelta::ZERO, StatPercent::new(10, 0, 0, 0, 0, 0)),
            ),
        }
    }
}

/// Numbers behind the race passives.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RacePassiveTuning {
    pub elf_crit_bonus: f64,
    pub orc_rage_threshold: f64,
    pub orc_rage_bonus: f64,
    pub dwarf_reduction: f64,
    pub dragonkin_spell_bonus: f64,
    pub undead_revive: f64,
    pub undead_awakened_revive: f64,
    pub lycan_bleed_stacks: u32,
    pub lycan_bleed_flat: u32,
    pub lycan_awakened_percent: f64,
    pub sylvari_regen: f64,
    pub sylvari_awakened_regen: f64,
}

impl Default for RacePassiveTuning {
    fn default() -> Self {
        Self {
            elf_crit_bonus: 0.10,
            orc_rage_threshold: 0.5,
            orc_rage_bonus: 0.20,
            dwarf_reduction: 0.10,
            dragonkin_spell_bonus: 0.15,
            undead_revive: 0.30,
            undead_awakened_revive: 0.50,
            lycan_bleed_stacks: 1,
            lycan_bleed_flat: 2,
            lycan_awakened_percent: 0.02,
            sylvari_regen: 0.03,
            sylvari_awakened_regen: 0.05,
        }
    }
}

// ============================================================================
// Classes
// ============================================================================

/// Flat class bonus, special cooldown and the special's own tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassProfile<T> {
    #[cfg_attr(feature = "serde", serde(default))]
    pub flat: StatDelta,
    pub interval: u32,
    pub ability: T,
}

impl<T> ClassProfile<T> {
    const fn new(flat: StatDelta, interval: u32, ability: T) -> Self {
        Self {
            flat,
            interval,
            ability,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassTable {
    pub guerrier: ClassProfile<BreachTuning>,
    pub voleur: ClassProfile<EvasionTuning>,
    pub paladin: ClassProfile<RiposteTuning>,
    pub pretre: ClassProfile<PrayerTuning>,
    pub archer: ClassProfile<VolleyTuning>,
    pub mage: ClassProfile<ArcaneTuning>,
    pub demoniste: ClassProfile<FamiliarTuning>,
    pub masochiste: ClassProfile<MartyrTuning>,
}

impl ClassTable {
    pub const fn flat(&self, class: Class) -> StatDelta {
        match class {
            Class::Guerrier => self.guerrier.flat,
            Class::Voleur => self.voleur.flat,
            Class::Paladin => self.paladin.flat,
            Class::Pretre => self.pretre.flat,
            Class::Archer => self.archer.flat,
            Class::Mage => self.mage.flat,
            Class::Demoniste => self.demoniste.flat,
            Class::Masochiste => self.masochiste.flat,
        }
    }

    pub const fn interval(&self, class: Class) -> u32 {
        match class {
            Class::Guerrier => self.guerrier.interval,
            Class::Voleur => self.voleur.interval,
            Class::Paladin => self.paladin.interval,
            Class::Pretre => self.pretre.interval,
            Class::Archer => self.archer.interval,
            Class::Mage => self.mage.interval,
            Class::Demoniste => self.demoniste.interval,
            Class::Masochiste => self.masochiste.interval,
        }
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self {
            guerrier: ClassProfile::new(
                StatDelta::new(10, 4, 3, 0, 0, 0),
                3,
                BreachTuning::default(),
            ),
            voleur: ClassProfile::new(
                StatDelta::new(0, 3, 0, 1, 0, 4),
                4,
                EvasionTuning::default(),
            ),
            paladin: ClassProfile::new(
                StatDelta::new(10, 2, 4, 0, 3, 0),
                2,
                RiposteTuning::default(),
            ),
            pretre: ClassProfile::new(
                StatDelta::new(0, 0, 1, 5, 3, 0),
                4,
                PrayerTuning::default(),
            ),
            archer: ClassProfile::new(
                StatDelta::new(0, 4, 0, 2, 0, 2),
                3,
                VolleyTuning::default(),
            ),
            mage: ClassProfile::new(
                StatDelta::new(0, 0, 0, 6, 2, 1),
                3,
                ArcaneTuning::default(),
            ),
            demoniste: ClassProfile::new(
                StatDelta::new(0, 0, 0, 5, 2, 1),
                1,
                FamiliarTuning::default(),
            ),
            masochiste: ClassProfile::new(
                StatDelta::new(20, 2, 2, 0, 2, 0),
                4,
                MartyrTuning::default(),
            ),
        }
    }
}

/// Guerrier: fraction of the weaker mitigation ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BreachTuning {
    pub ignore: f64,
}

impl Default for BreachTuning {
    fn default() -> Self {
        Self { ignore: 0.30 }
    }
}

/// Voleur: crit chance per full tier of cap.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvasionTuning {
    pub crit_per_tier: f64,
}

impl Default for EvasionTuning {
    fn default() -> Self {
        Self {
            crit_per_tier: 0.02,
        }
    }
}

/// Paladin: reflected fraction of HP damage taken.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RiposteTuning {
    pub reflect: f64,
}

impl Default for RiposteTuning {
    fn default() -> Self {
        Self { reflect: 0.40 }
    }
}

/// Pretre: heal = missing HP × `missing_ratio` + cap × `cap_ratio`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrayerTuning {
    pub missing_ratio: f64,
    pub cap_ratio: f64,
}

impl Default for PrayerTuning {
    fn default() -> Self {
        Self {
            missing_ratio: 0.25,
            cap_ratio: 0.5,
        }
    }
}

/// Archer volley shape.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VolleyTuning {
    pub base_hits: u32,
    /// One extra hit per full `hit_tier` of cap.
    pub hit_tier: u32,
    /// Capped again by [`DuelConfig::MAX_VOLLEY_HITS`](crate::config::DuelConfig).
    pub max_hits: u32,
    pub followup_auto: f64,
    pub followup_cap: f64,
}

impl Default for VolleyTuning {
    fn default() -> Self {
        Self {
            base_hits: 2,
            hit_tier: 15,
            max_hits: 5,
            followup_auto: 0.5,
            followup_cap: 0.3,
        }
    }
}

/// Mage: spell power = auto + cap × `cap_ratio`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArcaneTuning {
    pub cap_ratio: f64,
}

impl Default for ArcaneTuning {
    fn default() -> Self {
        Self { cap_ratio: 0.6 }
    }
}

/// Demoniste familiar and the healing reduction it imposes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FamiliarTuning {
    pub base_ratio: f64,
    pub stack_ratio: f64,
    pub max_stacks: u32,
    pub anti_heal: f64,
}

impl Default for FamiliarTuning {
    fn default() -> Self {
        Self {
            base_ratio: 0.15,
            stack_ratio: 0.05,
            max_stacks: 5,
            anti_heal: 0.35,
        }
    }
}

/// Masochiste: converts accumulated damage taken.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MartyrTuning {
    pub damage_ratio: f64,
    pub heal_ratio: f64,
}

impl Default for MartyrTuning {
    fn default() -> Self {
        Self {
            damage_ratio: 0.6,
            heal_ratio: 0.3,
        }
    }
}

// ============================================================================
// Combat constants
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatRules {
    pub base_crit: f64,
    pub crit_multiplier: f64,
    /// Cap points per tier for tiered class bonuses.
    pub crit_tier: u32,
    /// Share of the defender's mitigation subtracted from power.
    pub mitigation_factor: f64,
    /// Per-stack tick of weapon and venom bleeds.
    pub bleed_flat: u32,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            base_crit: 0.10,
            crit_multiplier: 1.5,
            crit_tier: 15,
            mitigation_factor: 0.5,
            bleed_flat: 2,
        }
    }
}
