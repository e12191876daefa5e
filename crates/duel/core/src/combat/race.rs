//! Race passives (and the boss enrage, which hooks in at the same points).

use super::damage::DamageKind;
use super::state::{BleedTick, CombatFlags, CombatantState};
use crate::combatant::Race;
use crate::env::TablesOracle;

/// Multiplier on damage dealt by `attacker`.
pub fn outgoing_multiplier(
    attacker: &CombatantState,
    kind: DamageKind,
    tables: &(impl TablesOracle + ?Sized),
) -> f64 {
    let tuning = tables.race_passives();
    let mut multiplier = 1.0;

    match attacker.race() {
        Some(Race::Orc) if attacker.hp_ratio() < tuning.orc_rage_threshold => {
            multiplier *= 1.0 + tuning.orc_rage_bonus;
        }
        Some(Race::Dragonkin) if kind == DamageKind::Magical => {
            multiplier *= 1.0 + tuning.dragonkin_spell_bonus;
        }
        _ => {}
    }

    if attacker.flags.contains(CombatFlags::ENRAGED) {
        if let Some((_, bonus)) = attacker.combatant.boss_kit().and_then(|kit| kit.enrage()) {
            multiplier *= 1.0 + bonus;
        }
    }

    multiplier
}

/// Multiplier on direct-hit damage taken by `defender`.
pub fn incoming_multiplier(defender: &CombatantState, tables: &(impl TablesOracle + ?Sized)) -> f64 {
    match defender.race() {
        Some(Race::Nain) => 1.0 - tables.race_passives().dwarf_reduction,
        _ => 1.0,
    }
}

/// Revival fraction of max HP, if this combatant may still revive.
pub fn revive_fraction(state: &CombatantState, tables: &(impl TablesOracle + ?Sized)) -> Option<f64> {
    if state.race() != Some(Race::MortVivant) || state.flags.contains(CombatFlags::REVIVED) {
        return None;
    }
    let tuning = tables.race_passives();
    Some(if state.awakened {
        tuning.undead_awakened_revive
    } else {
        tuning.undead_revive
    })
}

/// Start-of-turn regeneration fraction of max HP.
pub fn regen_fraction(state: &CombatantState, tables: &(impl TablesOracle + ?Sized)) -> Option<f64> {
    if state.race() != Some(Race::Sylvari) {
        return None;
    }
    let tuning = tables.race_passives();
    Some(if state.awakened {
        tuning.sylvari_awakened_regen
    } else {
        tuning.sylvari_regen
    })
}

/// Bleed a Lycan's landed basic attack applies: `(stacks, tick)`.
pub fn bite(attacker: &CombatantState, tables: &(impl TablesOracle + ?Sized)) -> Option<(u32, BleedTick)> {
    if attacker.race() != Some(Race::Lycan) {
        return None;
    }
    let tuning = tables.race_passives();
    let tick = if attacker.awakened {
        BleedTick::Percent(tuning.lycan_awakened_percent)
    } else {
        BleedTick::Flat(tuning.lycan_bleed_flat)
    };
    Some((tuning.lycan_bleed_stacks, tick))
}
