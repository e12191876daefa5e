//! Basic attack and the eight class specials.

use super::damage::{DamageKind, DamageRoll, round_amount};
use super::state::{BleedTick, CombatFlags, CombatantState};
use super::status::{Blow, Impact, StatusEffects};
use super::{Exchange, crit, race};
use crate::combatant::{Class, WeaponPassive};
use crate::config::DuelConfig;
use crate::env::{PrayerTuning, RollContext, VolleyTuning};
use crate::replay::messages;

/// Special names shown in the replay.
pub const fn special_name(class: Class) -> &'static str {
    match class {
        Class::Guerrier => "Brèche",
        Class::Voleur => "Esquive",
        Class::Paladin => "Riposte",
        Class::Pretre => "Prière",
        Class::Archer => "Volée",
        Class::Mage => "Arcane",
        Class::Demoniste => "Familier",
        Class::Masochiste => "Martyre",
    }
}

/// Whether a class special takes the place of the basic attack.
pub const fn replaces_basic_attack(class: Class) -> bool {
    matches!(
        class,
        Class::Guerrier | Class::Archer | Class::Mage | Class::Masochiste
    )
}

/// Resolves direct hits and class specials.
pub struct AbilityResolver;

impl AbilityResolver {
    /// Mitigated, modified and crit-rolled damage of one direct hit.
    pub fn direct_roll(
        ex: &mut Exchange<'_, '_>,
        attacker: &CombatantState,
        defender: &CombatantState,
        kind: DamageKind,
        power: f64,
        mitigation: f64,
    ) -> DamageRoll {
        let roll = DamageRoll::mitigated(kind, power, mitigation, ex.tables.combat().mitigation_factor)
            .scaled(race::outgoing_multiplier(attacker, kind, ex.tables))
            .scaled(race::incoming_multiplier(defender, ex.tables));
        crit::roll(ex, attacker, defender, roll)
    }

    fn hit(
        ex: &mut Exchange<'_, '_>,
        attacker: &mut CombatantState,
        defender: &mut CombatantState,
        verb: &str,
        roll: DamageRoll,
    ) -> Impact {
        let blow = Blow {
            verb,
            amount: roll.finish(),
            crit: roll.is_crit(),
        };
        StatusEffects::strike(ex, attacker, defender, blow)
    }

    /// Physical hit with power `auto`, followed by on-hit effects when it lands.
    pub fn basic_attack(
        ex: &mut Exchange<'_, '_>,
        attacker: &mut CombatantState,
        defender: &mut CombatantState,
    ) -> Impact {
        let roll = Self::direct_roll(
            ex,
            attacker,
            defender,
            DamageKind::Physical,
            f64::from(attacker.stats.auto),
            f64::from(defender.stats.def),
        );
        let impact = Self::hit(ex, attacker, defender, "attaque", roll);
        if impact.landed() {
            Self::on_hit(ex, attacker, defender);
        }
        impact
    }

    /// Effects of a landed basic attack.
    fn on_hit(ex: &mut Exchange<'_, '_>, attacker: &mut CombatantState, defender: &mut CombatantState) {
        let flat = ex.tables.combat().bleed_flat;
        let mut bleeds = Vec::new();
        if let Some(bite) = race::bite(attacker, ex.tables) {
            bleeds.push(bite);
        }
        if let Some(kit) = attacker.combatant.boss_kit() {
            let stacks = kit.venom_stacks();
            if stacks > 0 {
                bleeds.push((stacks, BleedTick::Flat(flat)));
            }
        }

        let weapon_passive = attacker.combatant.weapon.as_ref().and_then(|w| w.passive);
        if let Some(WeaponPassive::Bleed { stacks }) = weapon_passive {
            bleeds.push((stacks, BleedTick::Flat(flat)));
        }

        for (stacks, tick) in bleeds {
            if stacks == 0 {
                continue;
            }
            defender.add_bleed(stacks, tick);
            let total = defender.bleed.map_or(stacks, |bleed| bleed.stacks);
            ex.say(messages::bleed_applied(defender.side, defender.name(), total));
        }

        if let Some(WeaponPassive::Stun { chance, turns }) = weapon_passive {
            if ex.dice.roll(attacker.side, RollContext::Stun, chance) {
                StatusEffects::stun(ex, attacker, defender, turns);
            }
        }

        if attacker.class() == Some(Class::Demoniste) {
            let max = ex.tables.classes().demoniste.ability.max_stacks;
            attacker.familiar_stacks = (attacker.familiar_stacks + 1).min(max);
        }
    }

    /// Specials that prepare the actor before it strikes.
    pub fn self_buff(ex: &mut Exchange<'_, '_>, actor: &mut CombatantState, class: Class) {
        let tables = ex.tables;
        let classes = tables.classes();
        match class {
            Class::Voleur => {
                actor.flags.insert(CombatFlags::DODGE_ARMED);
                ex.say(messages::ability(actor.side, actor.name(), special_name(class)));
                ex.say(messages::dodge_ready(actor.side, actor.name()));
            }
            Class::Paladin => {
                actor.reflect = classes.paladin.ability.reflect;
                ex.say(messages::ability(actor.side, actor.name(), special_name(class)));
                ex.say(messages::reflect_ready(
                    actor.side,
                    actor.name(),
                    round_amount(actor.reflect * 100.0),
                ));
            }
            Class::Pretre => {
                ex.say(messages::ability(actor.side, actor.name(), special_name(class)));
                let amount = Self::prayer_amount(actor, &classes.pretre.ability);
                StatusEffects::heal(ex, actor, amount);
            }
            Class::Guerrier
            | Class::Archer
            | Class::Mage
            | Class::Demoniste
            | Class::Masochiste => {}
        }
    }

    /// Specials that deal damage. Returns without attacking for buff-only classes.
    pub fn offensive(
        ex: &mut Exchange<'_, '_>,
        actor: &mut CombatantState,
        target: &mut CombatantState,
        class: Class,
    ) {
        match class {
            Class::Guerrier => Self::breach(ex, actor, target),
            Class::Archer => Self::volley(ex, actor, target),
            Class::Mage => Self::arcane(ex, actor, target),
            Class::Demoniste => Self::familiar(ex, actor, target),
            Class::Masochiste => Self::martyrdom(ex, actor, target),
            Class::Voleur | Class::Paladin | Class::Pretre => {}
        }
    }

    /// Prayer heal before anti-heal: `missing × missing_ratio + cap × cap_ratio`.
    pub fn prayer_amount(actor: &CombatantState, tuning: &PrayerTuning) -> f64 {
        let missing = (actor.max_hp - actor.current_hp).max(0) as f64;
        missing * tuning.missing_ratio + f64::from(actor.stats.cap) * tuning.cap_ratio
    }

    /// Volley size: `base_hits + cap / hit_tier`, capped twice.
    pub fn volley_hits(cap: u32, tuning: &VolleyTuning) -> u32 {
        let extra = cap.checked_div(tuning.hit_tier).unwrap_or(0);
        tuning
            .base_hits
            .saturating_add(extra)
            .min(tuning.max_hits)
            .min(DuelConfig::MAX_VOLLEY_HITS as u32)
            .max(1)
    }

    /// Ignores part of the weaker mitigation and strikes through it with `auto`.
    fn breach(ex: &mut Exchange<'_, '_>, actor: &mut CombatantState, target: &mut CombatantState) {
        let ignore = ex.tables.classes().guerrier.ability.ignore;
        let (kind, weaker) = if target.stats.def <= target.stats.rescap {
            (DamageKind::Physical, target.stats.def)
        } else {
            (DamageKind::Magical, target.stats.rescap)
        };
        ex.say(messages::ability(actor.side, actor.name(), special_name(Class::Guerrier)));
        let roll = Self::direct_roll(
            ex,
            actor,
            target,
            kind,
            f64::from(actor.stats.auto),
            f64::from(weaker) * (1.0 - ignore),
        );
        Self::hit(ex, actor, target, "transperce", roll);
    }

    fn volley(ex: &mut Exchange<'_, '_>, actor: &mut CombatantState, target: &mut CombatantState) {
        let tuning = ex.tables.classes().archer.ability;
        let hits = Self::volley_hits(actor.stats.cap, &tuning);
        ex.say(messages::ability(actor.side, actor.name(), special_name(Class::Archer)));

        for index in 0..hits {
            if target.is_down() || actor.is_down() {
                break;
            }
            let power = if index == 0 {
                f64::from(actor.stats.auto)
            } else {
                f64::from(actor.stats.auto) * tuning.followup_auto
                    + f64::from(actor.stats.cap) * tuning.followup_cap
            };
            let roll = Self::direct_roll(
                ex,
                actor,
                target,
                DamageKind::Physical,
                power,
                f64::from(target.stats.def),
            );
            Self::hit(ex, actor, target, "décoche une flèche sur", roll);
        }
    }

    fn arcane(ex: &mut Exchange<'_, '_>, actor: &mut CombatantState, target: &mut CombatantState) {
        let ratio = ex.tables.classes().mage.ability.cap_ratio;
        ex.say(messages::ability(actor.side, actor.name(), special_name(Class::Mage)));
        let power = f64::from(actor.stats.auto) + f64::from(actor.stats.cap) * ratio;
        let roll = Self::direct_roll(
            ex,
            actor,
            target,
            DamageKind::Magical,
            power,
            f64::from(target.stats.rescap),
        );
        Self::hit(ex, actor, target, "foudroie", roll);
    }

    /// Resistance-ignoring familiar strike, scaled by accumulated stacks.
    fn familiar(ex: &mut Exchange<'_, '_>, actor: &mut CombatantState, target: &mut CombatantState) {
        let tuning = ex.tables.classes().demoniste.ability;
        let ratio = tuning.base_ratio + tuning.stack_ratio * f64::from(actor.familiar_stacks);
        let amount = DamageRoll::mitigated(
            DamageKind::Magical,
            f64::from(actor.stats.cap) * ratio,
            0.0,
            0.0,
        )
        .scaled(race::outgoing_multiplier(actor, DamageKind::Magical, ex.tables))
        .finish();
        StatusEffects::true_damage(ex, actor, target, special_name(Class::Demoniste), amount);
    }

    /// Converts damage taken since the last martyrdom into damage and healing.
    fn martyrdom(ex: &mut Exchange<'_, '_>, actor: &mut CombatantState, target: &mut CombatantState) {
        let tuning = ex.tables.classes().masochiste.ability;
        let stored = actor.maso_taken as f64;
        actor.maso_taken = 0;

        ex.say(messages::ability(actor.side, actor.name(), special_name(Class::Masochiste)));
        let amount = DamageRoll::raw(stored * tuning.damage_ratio).finish();
        StatusEffects::true_damage(ex, actor, target, special_name(Class::Masochiste), amount);
        StatusEffects::heal(ex, actor, stored * tuning.heal_ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Dice;
    use crate::combatant::{Combatant, Race};
    use crate::env::{BalanceTables, PcgRng};
    use crate::replay::Side;
    use crate::stats::{BaseStats, StatResolver};

    fn no_crit_tables() -> BalanceTables {
        let mut tables = BalanceTables::default();
        tables.combat.base_crit = 0.0;
        tables.race_passives.elf_crit_bonus = 0.0;
        tables
    }

    fn state(side: Side, combatant: Combatant, tables: &BalanceTables) -> CombatantState {
        let stats = StatResolver::resolve(&combatant, tables).expect("valid");
        CombatantState::new(side, combatant, stats, tables)
    }

    fn hero(side: Side, race: Race, class: Class, base: BaseStats, tables: &BalanceTables) -> CombatantState {
        state(side, Combatant::hero(format!("{class}"), race, class, base), tables)
    }

    #[test]
    fn volley_hit_count_is_tiered_and_capped() {
        let tuning = VolleyTuning::default();
        assert_eq!(AbilityResolver::volley_hits(0, &tuning), 2);
        assert_eq!(AbilityResolver::volley_hits(15, &tuning), 3);
        assert_eq!(AbilityResolver::volley_hits(44, &tuning), 4);
        assert_eq!(AbilityResolver::volley_hits(500, &tuning), 5);
    }

    #[test]
    fn prayer_scales_with_cap() {
        let tables = no_crit_tables();
        let tuning = tables.classes.pretre.ability;
        let mut low = hero(Side::P1, Race::Humain, Class::Pretre, BaseStats::new(100, 5, 5, 10, 5, 5), &tables);
        let mut high = hero(Side::P1, Race::Humain, Class::Pretre, BaseStats::new(100, 5, 5, 25, 5, 5), &tables);
        low.current_hp = 50;
        high.current_hp = 50;
        assert!(
            AbilityResolver::prayer_amount(&high, &tuning) > AbilityResolver::prayer_amount(&low, &tuning)
        );
    }

    #[test]
    fn breach_takes_the_weaker_mitigation_path() {
        let tables = no_crit_tables();
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 3);
        let mut lines = Vec::new();
        let mut ex = Exchange::new(&tables, &mut dice, &mut lines);

        let mut warrior = hero(Side::P1, Race::Humain, Class::Guerrier, BaseStats::new(100, 24, 5, 5, 5, 5), &tables);
        let mut target = state(
            Side::P2,
            Combatant::boss("Mur", crate::combatant::BossKit::new(), BaseStats::new(500, 1, 40, 1, 20, 1)),
            &tables,
        );
        AbilityResolver::offensive(&mut ex, &mut warrior, &mut target, Class::Guerrier);
        // auto 24 + 3 humain + 4 guerrier = 31; rescap 20 × 0.7 = 14 → 31 − 7 = 24
        assert_eq!(target.current_hp, 500 - 24);
    }

    #[test]
    fn martyrdom_spends_stored_damage() {
        let tables = no_crit_tables();
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 3);
        let mut lines = Vec::new();
        let mut ex = Exchange::new(&tables, &mut dice, &mut lines);

        let mut maso = hero(Side::P1, Race::Humain, Class::Masochiste, BaseStats::new(100, 5, 5, 5, 5, 5), &tables);
        let mut target = state(
            Side::P2,
            Combatant::boss("Cible", crate::combatant::BossKit::new(), BaseStats::new(500, 1, 1, 1, 1, 1)),
            &tables,
        );
        maso.current_hp -= 100;
        maso.maso_taken = 100;
        AbilityResolver::offensive(&mut ex, &mut maso, &mut target, Class::Masochiste);

        assert_eq!(maso.maso_taken, 0);
        assert_eq!(target.current_hp, 440); // 100 × 0.6
        assert_eq!(maso.current_hp, maso.max_hp - 70); // healed 100 × 0.3
    }

    #[test]
    fn landed_basic_attacks_feed_the_familiar() {
        let tables = no_crit_tables();
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 3);
        let mut lines = Vec::new();
        let mut ex = Exchange::new(&tables, &mut dice, &mut lines);

        let mut demon = hero(Side::P1, Race::Humain, Class::Demoniste, BaseStats::new(100, 5, 5, 20, 5, 5), &tables);
        let mut target = state(
            Side::P2,
            Combatant::boss("Cible", crate::combatant::BossKit::new(), BaseStats::new(500, 1, 1, 1, 1, 1)),
            &tables,
        );
        for _ in 0..7 {
            AbilityResolver::basic_attack(&mut ex, &mut demon, &mut target);
        }
        assert_eq!(demon.familiar_stacks, 5);

        target.flags.insert(CombatFlags::DODGE_ARMED);
        demon.familiar_stacks = 1;
        AbilityResolver::basic_attack(&mut ex, &mut demon, &mut target);
        assert_eq!(demon.familiar_stacks, 1);
    }

    #[test]
    fn lycan_bite_makes_the_target_bleed() {
        let tables = no_crit_tables();
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 3);
        let mut lines = Vec::new();
        let mut ex = Exchange::new(&tables, &mut dice, &mut lines);

        let mut wolf = hero(Side::P1, Race::Lycan, Class::Voleur, BaseStats::new(100, 10, 5, 5, 5, 5), &tables);
        let mut target = state(
            Side::P2,
            Combatant::boss("Cible", crate::combatant::BossKit::new(), BaseStats::new(500, 1, 1, 1, 1, 1)),
            &tables,
        );
        AbilityResolver::basic_attack(&mut ex, &mut wolf, &mut target);
        AbilityResolver::basic_attack(&mut ex, &mut wolf, &mut target);
        assert_eq!(target.bleed.map(|b| b.stacks), Some(2));
    }
}
