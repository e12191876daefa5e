//! Critical hits.
//!
//! ```text
//! chance     = base + voleur tiers + elf agility + focus      clamped [0, 1]
//! multiplier = 1.5 × weapon.crit_multiplier × (1 + fury)
//! ```

use super::state::CombatantState;
use super::{Exchange, damage::DamageRoll};
use crate::combatant::{Class, PassiveKind, Race};
use crate::env::{RollContext, TablesOracle};

pub fn crit_chance(
    attacker: &CombatantState,
    defender: &CombatantState,
    tables: &(impl TablesOracle + ?Sized),
) -> f64 {
    let combat = tables.combat();
    let mut chance = combat.base_crit;

    if attacker.class() == Some(Class::Voleur) {
        let tiers = attacker.stats.cap.checked_div(combat.crit_tier).unwrap_or(0);
        chance += f64::from(tiers) * tables.classes().voleur.ability.crit_per_tier;
    }
    if attacker.race() == Some(Race::Elfe) && attacker.stats.spd > defender.stats.spd {
        chance += tables.race_passives().elf_crit_bonus;
    }
    chance += attacker.passive_magnitude(PassiveKind::Focus);

    chance.clamp(0.0, 1.0)
}

pub fn crit_multiplier(attacker: &CombatantState, tables: &(impl TablesOracle + ?Sized)) -> f64 {
    let weapon = attacker
        .combatant
        .weapon
        .as_ref()
        .map_or(1.0, |weapon| weapon.crit_multiplier);
    tables.combat().crit_multiplier * weapon * (1.0 + attacker.passive_magnitude(PassiveKind::Fury))
}

/// Draws once and applies the crit multiplier when it lands.
pub fn roll(
    ex: &mut Exchange<'_, '_>,
    attacker: &CombatantState,
    defender: &CombatantState,
    damage: DamageRoll,
) -> DamageRoll {
    let chance = crit_chance(attacker, defender, ex.tables);
    if ex.dice.roll(attacker.side, RollContext::Crit, chance) {
        damage.critical(crit_multiplier(attacker, ex.tables))
    } else {
        damage
    }
}
