//! StatResolver: combatant record → effective combat stats.
//!
//! ```text
//! [ Base roll ]            base − bonuses.race − bonuses.class
//!      ↓
//! [ Race ]                 tables.race(race).flat
//!      ↓
//! [ Class ]                tables.class(class).flat
//!      ↓
//! [ Training ]             combatant.training
//!      ↓
//! [ Weapon ]               weapon.stats
//!      ↓
//! [ Weapon affinity ]      +% when the wielder matches
//!      ↓
//! [ Awakening ]            flat then +%, once level ≥ threshold
//!      ↓
//! [ Clamp ]                HP [1, 99999], others [0, 99999]
//! ```
//!
//! Stored racial/class bonuses are informational: they are subtracted to
//! recover the roll and the current table values are applied instead, so a
//! rebalance reaches characters created under older tables. Bosses have no
//! race or class and skip those layers and the awakening.

use strum::IntoEnumIterator;

use super::bonus::{BonusStack, StatBounds};
use super::core::{StatDelta, StatKind};
use crate::combatant::{Archetype, Combatant, ValidationError};
use crate::env::TablesOracle;

/// Resolver layers in application order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum StatLayer {
    BaseRoll,
    Race,
    Class,
    Training,
    Weapon,
    WeaponAffinity,
    Awakening,
}

/// Final combat stats of a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveStats {
    pub hp: u32,
    pub auto: u32,
    pub def: u32,
    pub cap: u32,
    pub rescap: u32,
    pub spd: u32,
}

impl EffectiveStats {
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

    /// Clamps a signed layer result into the final bounds.
    fn clamped(values: StatDelta) -> Self {
        let clamp = |stat: StatKind| {
            // bounds are non-negative
            StatResolver::bounds(stat).clamp(values.get(stat)).unsigned_abs()
        };
        Self {
            hp: clamp(StatKind::Hp),
            auto: clamp(StatKind::Auto),
            def: clamp(StatKind::Def),
            cap: clamp(StatKind::Cap),
            rescap: clamp(StatKind::Rescap),
            spd: clamp(StatKind::Spd),
        }
    }
}

/// Value of every stat after each layer, for display surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBreakdown {
    /// `(layer, values after that layer)`, unclamped, in application order.
    pub layers: Vec<(StatLayer, StatDelta)>,
    pub effective: EffectiveStats,
    pub awakened: bool,
}

impl StatBreakdown {
    pub fn after(&self, layer: StatLayer) -> Option<StatDelta> {
        self.layers
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, values)| *values)
    }
}

/// Stateless stat resolution.
pub struct StatResolver;

impl StatResolver {
    pub const fn bounds(stat: StatKind) -> StatBounds {
        match stat {
            StatKind::Hp => StatBounds::HP,
            _ => StatBounds::COMBAT,
        }
    }

    /// Recovers the creation roll from stored stats.
    ///
    /// # Errors
    ///
    /// `NegativeRoll` for the first stat whose stored bonuses exceed its base.
    pub fn base_roll(combatant: &Combatant) -> Result<StatDelta, ValidationError> {
        if let Some((stat, value)) = StatKind::iter()
            .map(|stat| (stat, Self::roll_of(combatant, stat)))
            .find(|(_, value)| *value < 0)
        {
            return Err(ValidationError::NegativeRoll { stat, value });
        }
        Ok(StatDelta::from_fn(|stat| {
            i32::try_from(Self::roll_of(combatant, stat)).unwrap_or(i32::MAX)
        }))
    }

    fn roll_of(combatant: &Combatant, stat: StatKind) -> i64 {
        i64::from(combatant.base.get(stat))
            - i64::from(combatant.bonuses.race.get(stat))
            - i64::from(combatant.bonuses.class.get(stat))
    }

    /// Effective stats used for combat and display.
    ///
    /// # Errors
    ///
    /// Propagates [`base_roll`](Self::base_roll) failures.
    pub fn resolve(
        combatant: &Combatant,
        tables: &(impl TablesOracle + ?Sized),
    ) -> Result<EffectiveStats, ValidationError> {
        Ok(Self::breakdown(combatant, tables)?.effective)
    }

    /// Resolves every layer and keeps the intermediate values.
    ///
    /// # Errors
    ///
    /// Propagates [`base_roll`](Self::base_roll) failures.
    pub fn breakdown(
        combatant: &Combatant,
        tables: &(impl TablesOracle + ?Sized),
    ) -> Result<StatBreakdown, ValidationError> {
        let awakened = combatant.is_awakened(tables);
        let mut values = Self::base_roll(combatant)?;
        let mut layers = vec![(StatLayer::BaseRoll, values)];

        for layer in StatLayer::iter().skip(1) {
            if !Self::applies(combatant, layer, awakened) {
                continue;
            }
            values = StatDelta::from_fn(|stat| {
                Self::layer_stack(combatant, tables, layer, stat).apply_unclamped(values.get(stat))
            });
            layers.push((layer, values));
        }

        let effective = EffectiveStats::clamped(values);
        tracing::trace!(name = %combatant.name, ?effective, awakened, "resolved stats");

        Ok(StatBreakdown {
            layers,
            effective,
            awakened,
        })
    }

    fn applies(combatant: &Combatant, layer: StatLayer, awakened: bool) -> bool {
        let is_boss = matches!(combatant.archetype, Archetype::Boss(_));
        match layer {
            StatLayer::Race | StatLayer::Class => !is_boss,
            StatLayer::Awakening => awakened,
            StatLayer::BaseRoll
            | StatLayer::Training
            | StatLayer::Weapon
            | StatLayer::WeaponAffinity => true,
        }
    }

    /// Bonus stack contributed by `layer` to `stat`.
    fn layer_stack(
        combatant: &Combatant,
        tables: &(impl TablesOracle + ?Sized),
        layer: StatLayer,
        stat: StatKind,
    ) -> BonusStack {
        let stack = BonusStack::new();
        match layer {
            StatLayer::BaseRoll => stack,
            StatLayer::Race => match combatant.race() {
                Some(race) => stack.flat(tables.race(race).flat.get(stat)),
                None => stack,
            },
            StatLayer::Class => match combatant.class() {
                Some(class) => stack.flat(tables.classes().flat(class).get(stat)),
                None => stack,
            },
            StatLayer::Training => stack.flat(combatant.training.get(stat)),
            StatLayer::Weapon => match &combatant.weapon {
                Some(weapon) => stack.flat(weapon.stats.get(stat)),
                None => stack,
            },
            StatLayer::WeaponAffinity => match combatant
                .weapon
                .as_ref()
                .and_then(|weapon| weapon.passive)
                .and_then(|passive| passive.conditional_bonus(&combatant.archetype))
            {
                Some(bonus) => stack.increased(bonus.get(stat)),
                None => stack,
            },
            StatLayer::Awakening => match combatant.race() {
                Some(race) => {
                    let awakening = tables.race(race).awakening;
                    stack
                        .flat(awakening.flat.get(stat))
                        .increased(awakening.percent.get(stat))
                }
                None => stack,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{BossKit, Class, Race, Weapon, WeaponPassive};
    use crate::env::BalanceTables;
    use crate::stats::{BaseStats, BonusBreakdown, StatPercent};

    fn tables() -> BalanceTables {
        BalanceTables::default()
    }

    #[test]
    fn base_roll_subtracts_stored_bonuses() {
        let hero = Combatant::hero("A", Race::Orc, Class::Guerrier, BaseStats::new(100, 30, 20, 10, 10, 10))
            .with_bonuses(BonusBreakdown {
                race: StatDelta::new(15, 5, 2, 0, 0, 0),
                class: StatDelta::new(10, 4, 3, 0, 0, 0),
            });
        assert_eq!(
            StatResolver::base_roll(&hero),
            Ok(StatDelta::new(75, 21, 15, 10, 10, 10))
        );
    }

    #[test]
    fn current_tables_are_reapplied() {
        let mut tables = tables();
        let hero = Combatant::hero("A", Race::Orc, Class::Guerrier, BaseStats::new(100, 30, 20, 10, 10, 10));
        let before = StatResolver::resolve(&hero, &tables).expect("valid");
        tables.races.orc.flat.auto += 10;
        let after = StatResolver::resolve(&hero, &tables).expect("valid");
        assert_eq!(after.auto, before.auto + 10);
    }

    #[test]
    fn layers_apply_in_order() {
        let weapon = Weapon::new("lame", "Lame", StatDelta::new(0, 10, 0, 0, 0, 0)).with_passive(
            WeaponPassive::ClassAffinity {
                class: Class::Guerrier,
                bonus: StatPercent::new(0, 50, 0, 0, 0, 0),
            },
        );
        let hero = Combatant::hero("A", Race::Orc, Class::Guerrier, BaseStats::new(100, 10, 10, 10, 10, 10))
            .with_training(StatDelta::new(0, 1, 0, 0, 0, 0))
            .with_weapon(weapon);
        let breakdown = StatResolver::breakdown(&hero, &tables()).expect("valid");

        // roll 10 → +5 orc → +4 guerrier → +1 training → +10 weapon → ×1.5
        assert_eq!(breakdown.after(StatLayer::Race).map(|v| v.auto), Some(15));
        assert_eq!(breakdown.after(StatLayer::Class).map(|v| v.auto), Some(19));
        assert_eq!(breakdown.after(StatLayer::Training).map(|v| v.auto), Some(20));
        assert_eq!(breakdown.after(StatLayer::Weapon).map(|v| v.auto), Some(30));
        assert_eq!(breakdown.effective.auto, 45);
        assert!(!breakdown.awakened);
        assert_eq!(breakdown.after(StatLayer::Awakening), None);
    }

    #[test]
    fn affinity_ignored_for_other_classes() {
        let weapon = Weapon::new("baton", "Bâton", StatDelta::ZERO).with_passive(
            WeaponPassive::ClassAffinity {
                class: Class::Mage,
                bonus: StatPercent::uniform(50),
            },
        );
        let hero = Combatant::hero("A", Race::Elfe, Class::Voleur, BaseStats::new(80, 10, 10, 10, 10, 10));
        let plain = StatResolver::resolve(&hero, &tables()).expect("valid");
        let armed = StatResolver::resolve(&hero.clone().with_weapon(weapon), &tables()).expect("valid");
        assert_eq!(plain, armed);
    }

    #[test]
    fn awakening_unlocks_at_threshold() {
        let hero = Combatant::hero("A", Race::Sylvari, Class::Pretre, BaseStats::new(90, 10, 10, 10, 10, 10));
        let below = StatResolver::breakdown(&hero.clone().with_level(9), &tables()).expect("valid");
        let at = StatResolver::breakdown(&hero.with_level(10), &tables()).expect("valid");
        assert!(!below.awakened);
        assert!(at.awakened);
        // 90 + 10 sylvari + 0 prêtre = 100, then +10%
        assert_eq!(below.effective.hp, 100);
        assert_eq!(at.effective.hp, 110);
    }

    #[test]
    fn bosses_skip_race_class_and_awakening() {
        let boss = Combatant::boss("Golem", BossKit::new(), BaseStats::new(400, 30, 25, 10, 20, 4))
            .with_level(50);
        let breakdown = StatResolver::breakdown(&boss, &tables()).expect("valid");
        assert_eq!(breakdown.effective, EffectiveStats::new(400, 30, 25, 10, 20, 4));
        assert_eq!(breakdown.after(StatLayer::Race), None);
        assert_eq!(breakdown.after(StatLayer::Class), None);
    }

    #[test]
    fn final_values_are_clamped() {
        let hero = Combatant::hero("A", Race::Nain, Class::Mage, BaseStats::new(1, 0, 0, 0, 0, 0))
            .with_training(StatDelta::new(-500, 0, 0, 0, 0, 0));
        let stats = StatResolver::resolve(&hero, &tables()).expect("valid");
        assert_eq!(stats.hp, 1);
        // nain −2 spd, mage +1 spd
        assert_eq!(stats.spd, 0);
    }
}
